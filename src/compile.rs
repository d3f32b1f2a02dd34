use tracing::debug;

use crate::{ListenerTable, ListenerTableBuilder, OverrideSet, Rule, RuleOrder};

/// Build the listener table for the current overrides.
///
/// Rules are visited in `order` (insertion order on ties) and each appends
/// its listeners, so an earlier rule's listeners always precede a later
/// rule's for the same event. A rule error aborts compilation and the
/// partial table is dropped.
pub(crate) fn compile<R, O>(
    overrides: &OverrideSet<R>,
    order: &O,
) -> Result<ListenerTable<R::Event, R::Invoker>, R::Error>
where
    R: Rule,
    O: RuleOrder<R> + ?Sized,
{
    let mut builder = ListenerTableBuilder::new();

    for (rule, outcome) in overrides.sorted(order) {
        rule.contribute_listeners(&mut builder, outcome)?;
    }

    let table = builder.build();
    debug!(
        overrides = overrides.len(),
        events = table.event_count(),
        listeners = table.len(),
        "compiled listener table"
    );
    Ok(table)
}

use std::cell::Cell;
use std::sync::Arc;

use rulemap::{ListenerTableBuilder, Outcome, Rule, RuleMap, RuleRegistryBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum GameRule {
    Pvp,
    BlockBreak,
    FallDamage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Event {
    Attack,
    BreakBlock,
    Damage,
    Chat,
}

/// What a listener would do when fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    CancelAttack,
    AllowAttack,
    CancelBreak,
    AllowBreak,
    CancelFallDamage,
}

impl Rule for GameRule {
    type Event = Event;
    type Invoker = Action;
    type Error = std::convert::Infallible;

    fn contribute_listeners(
        &self,
        listeners: &mut ListenerTableBuilder<Event, Action>,
        outcome: Outcome,
    ) -> Result<(), Self::Error> {
        match (self, outcome) {
            (GameRule::Pvp, Outcome::Deny) => {
                listeners.listen(Event::Attack, Action::CancelAttack);
            }
            (GameRule::Pvp, _) => {
                listeners.listen(Event::Attack, Action::AllowAttack);
            }
            (GameRule::BlockBreak, Outcome::Deny) => {
                listeners
                    .listen(Event::BreakBlock, Action::CancelBreak)
                    .listen(Event::Attack, Action::CancelBreak);
            }
            (GameRule::BlockBreak, _) => {
                listeners.listen(Event::BreakBlock, Action::AllowBreak);
            }
            (GameRule::FallDamage, Outcome::Deny) => {
                listeners.listen(Event::Damage, Action::CancelFallDamage);
            }
            (GameRule::FallDamage, _) => {}
        }
        Ok(())
    }
}

fn invokers(rules: &mut RuleMap<GameRule>, event: Event) -> Option<Vec<Action>> {
    match rules.invokers_for(&event) {
        Ok(invokers) => invokers.map(<[Action]>::to_vec),
        Err(never) => match never {},
    }
}

#[test]
fn pvp_scenario() {
    let mut rules = RuleMap::empty();
    assert_eq!(rules.test(&GameRule::Pvp), Outcome::Neutral);

    assert!(rules.set(GameRule::Pvp, Outcome::Deny));
    assert_eq!(rules.test(&GameRule::Pvp), Outcome::Deny);
    assert_eq!(
        invokers(&mut rules, Event::Attack),
        Some(vec![Action::CancelAttack])
    );
    assert_eq!(rules.compilations(), 1);

    assert!(!rules.set(GameRule::Pvp, Outcome::Deny));
    assert!(rules.is_compiled());
    invokers(&mut rules, Event::Attack);
    assert_eq!(rules.compilations(), 1);

    assert!(rules.set(GameRule::Pvp, Outcome::Neutral));
    assert_eq!(rules.test(&GameRule::Pvp), Outcome::Neutral);
    assert_eq!(invokers(&mut rules, Event::Attack), None);
    assert!(rules.overrides().is_empty());
}

#[test]
fn changing_outcome_swaps_listeners() {
    let mut rules = RuleMap::new();
    rules.set(GameRule::Pvp, Outcome::Allow);
    assert_eq!(
        invokers(&mut rules, Event::Attack),
        Some(vec![Action::AllowAttack])
    );

    rules.set(GameRule::Pvp, Outcome::Deny);
    assert_eq!(
        invokers(&mut rules, Event::Attack),
        Some(vec![Action::CancelAttack])
    );
    assert_eq!(rules.compilations(), 2);
}

#[test]
fn shared_event_composes_in_rule_order() {
    let mut first = RuleMap::new();
    first.set(GameRule::Pvp, Outcome::Deny);
    first.set(GameRule::BlockBreak, Outcome::Deny);

    let mut second = RuleMap::new();
    second.set(GameRule::BlockBreak, Outcome::Deny);
    second.set(GameRule::Pvp, Outcome::Deny);

    let expected = Some(vec![Action::CancelAttack, Action::CancelBreak]);
    assert_eq!(invokers(&mut first, Event::Attack), expected);
    assert_eq!(invokers(&mut second, Event::Attack), expected);
}

#[test]
fn event_without_listeners_is_absent() {
    let mut rules = RuleMap::new();
    assert_eq!(invokers(&mut rules, Event::Chat), None);

    // FallDamage allow contributes nothing at all.
    rules.set(GameRule::FallDamage, Outcome::Allow);
    assert_eq!(invokers(&mut rules, Event::Damage), None);
    assert!(rules.listeners().unwrap().is_empty());
}

#[test]
fn neutral_on_unset_rule_does_not_invalidate() {
    let mut rules = RuleMap::new();
    rules.set(GameRule::Pvp, Outcome::Deny);
    invokers(&mut rules, Event::Attack);

    assert!(!rules.set(GameRule::FallDamage, Outcome::Neutral));
    assert!(rules.is_compiled());
    assert_eq!(rules.compilations(), 1);
}

#[test]
fn test_never_compiles() {
    let mut rules = RuleMap::new();
    rules.set(GameRule::BlockBreak, Outcome::Allow);
    for _ in 0..10 {
        assert_eq!(rules.test(&GameRule::BlockBreak), Outcome::Allow);
        assert_eq!(rules.test(&GameRule::Pvp), Outcome::Neutral);
    }
    assert_eq!(rules.compilations(), 0);
    assert!(rules.compiled().is_none());
}

#[test]
fn registry_order_overrides_natural_order() {
    // FallDamage first, then Pvp, then BlockBreak.
    let registry = Arc::new(
        RuleRegistryBuilder::new()
            .rule("block_break", GameRule::BlockBreak, 20)
            .rule("pvp", GameRule::Pvp, 10)
            .rule("fall_damage", GameRule::FallDamage, 0)
            .build()
            .unwrap(),
    );
    let mut rules = RuleMap::with_order(Arc::clone(&registry));
    rules.set(GameRule::BlockBreak, Outcome::Deny);
    rules.set(GameRule::Pvp, Outcome::Deny);

    let attack = rules.invokers_for(&Event::Attack).unwrap().unwrap();
    assert_eq!(attack, &[Action::CancelAttack, Action::CancelBreak]);
    assert_eq!(rules.order().name_of(&GameRule::Pvp), Some("pvp"));
}

// -- Fallible rules -----------------------------------------------------------

thread_local! {
    /// Rule id whose contribution currently fails, if any.
    static FAILING: Cell<Option<u8>> = const { Cell::new(None) };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Scripted(u8);

#[derive(Debug, PartialEq, Eq)]
struct ScriptError(u8);

impl Rule for Scripted {
    type Event = &'static str;
    type Invoker = u8;
    type Error = ScriptError;

    fn contribute_listeners(
        &self,
        listeners: &mut ListenerTableBuilder<&'static str, u8>,
        _outcome: Outcome,
    ) -> Result<(), ScriptError> {
        if FAILING.with(Cell::get) == Some(self.0) {
            return Err(ScriptError(self.0));
        }
        listeners.listen("tick", self.0);
        Ok(())
    }
}

#[test]
fn rule_error_reaches_caller_and_cache_stays_invalid() {
    let mut rules = RuleMap::new();
    rules.set(Scripted(1), Outcome::Allow);
    assert_eq!(rules.invokers_for(&"tick"), Ok(Some(&[1_u8][..])));

    FAILING.with(|f| f.set(Some(2)));
    rules.set(Scripted(2), Outcome::Deny);
    assert_eq!(rules.invokers_for(&"tick"), Err(ScriptError(2)));
    assert!(!rules.is_compiled());
    assert!(rules.compiled().is_none());
    assert_eq!(rules.invokers_for(&"tick"), Err(ScriptError(2)));
    assert_eq!(rules.compilations(), 1);

    FAILING.with(|f| f.set(None));
    assert_eq!(rules.invokers_for(&"tick"), Ok(Some(&[1_u8, 2][..])));
    assert_eq!(rules.compilations(), 2);
}

#[test]
fn dropping_map_is_teardown() {
    let mut rules = RuleMap::new();
    rules.set(GameRule::Pvp, Outcome::Deny);
    invokers(&mut rules, Event::Attack);
    drop(rules);

    let fresh: RuleMap<GameRule> = RuleMap::new();
    assert_eq!(fresh.test(&GameRule::Pvp), Outcome::Neutral);
}

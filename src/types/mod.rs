mod cache;
mod error;
mod listeners;
mod outcome;
mod overrides;
mod registry;
mod rule;
mod rule_map;

pub use error::RegistryError;
pub use listeners::{ListenerTable, ListenerTableBuilder};
pub use outcome::Outcome;
pub use overrides::OverrideSet;
pub use registry::{RuleRegistry, RuleRegistryBuilder};
pub use rule::{NaturalOrder, OrderBy, Rule, RuleOrder};
pub use rule_map::RuleMap;

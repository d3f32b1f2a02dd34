mod compile;
mod error;
pub mod parse;
mod types;

pub use error::RuleMapError;
pub use types::{
    ListenerTable, ListenerTableBuilder, NaturalOrder, OrderBy, Outcome, OverrideSet,
    RegistryError, Rule, RuleMap, RuleOrder, RuleRegistry, RuleRegistryBuilder,
};

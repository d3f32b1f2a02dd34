use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate rule name '{name}'")]
    DuplicateName { name: String },

    #[error("rule '{name}' is already registered as '{existing}'")]
    DuplicateRule { name: String, existing: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_message() {
        let err = RegistryError::DuplicateName { name: "pvp".into() };
        assert_eq!(err.to_string(), "duplicate rule name 'pvp'");
    }

    #[test]
    fn duplicate_rule_message() {
        let err = RegistryError::DuplicateRule {
            name: "allow_pvp".into(),
            existing: "pvp".into(),
        };
        assert_eq!(
            err.to_string(),
            "rule 'allow_pvp' is already registered as 'pvp'"
        );
    }
}

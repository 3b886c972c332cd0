//! Error types for tree construction.

use std::fmt;

/// Errors raised while turning a flat record list into a nested tree.
///
/// Malformed input that can be handled by degrading (dangling parents,
/// zero or multiple selected records) never produces an error; only
/// input the builder cannot terminate on or read at all does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A record is its own transitive ancestor.
    CycleDetected {
        /// Id of the record at which the cycle was found.
        id: String,
    },
    /// A record is missing the configured id field, or the field is not
    /// a string or number.
    MissingField {
        /// Name of the absent field.
        field: String,
    },
    /// A record in the flat list is not a JSON object.
    NotAnObject,
    /// A typed record did not match the wire schema.
    Schema(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleDetected { id } => {
                write!(f, "record '{id}' is its own transitive ancestor")
            }
            Self::MissingField { field } => {
                write!(f, "record is missing the '{field}' field")
            }
            Self::NotAnObject => write!(f, "flat list records must be objects"),
            Self::Schema(msg) => write!(f, "record does not match the wire schema: {msg}"),
        }
    }
}

impl std::error::Error for TreeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_cycling_record() {
        let err = TreeError::CycleDetected { id: "ns1".into() };
        assert_eq!(err.to_string(), "record 'ns1' is its own transitive ancestor");
    }

    #[test]
    fn display_names_the_missing_field() {
        let err = TreeError::MissingField { field: "id".into() };
        assert!(err.to_string().contains("'id'"));
    }
}

use crate::node::TypeId;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Structural problems found while reading the model graph.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("type {0} is not present in the model graph")]
    UnknownType(TypeId),

    #[error("scalar '{scalar}' has a cyclic base chain")]
    ScalarCycle { scalar: String },

    #[error("record '{record}' has a cyclic base chain")]
    RecordCycle { record: String },

    #[error("base chain of '{name}' exceeds the maximum depth of {max}")]
    ChainTooDeep { name: String, max: usize },

    #[error("'{name}' derives from a {base_kind}, expected a {expected}")]
    InvalidBase {
        name: String,
        base_kind: &'static str,
        expected: &'static str,
    },

    #[error("type {id} is a {found}, expected a {expected}")]
    UnexpectedKind {
        id: TypeId,
        found: &'static str,
        expected: &'static str,
    },
}

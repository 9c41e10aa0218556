mod r#enum;
mod literal;
mod property;
mod record;
mod scalar;
mod union;

pub use literal::*;
pub use property::*;
pub use r#enum::*;
pub use record::*;
pub use scalar::*;
pub use union::*;

use crate::{error::SchemaError, types::Intrinsic};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// TypeId
///
/// Stable handle of a node inside a [`ModelGraph`].
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[display("#{_0}")]
#[serde(transparent)]
pub struct TypeId(pub usize);

///
/// Type
///
/// Closed set of model-graph type kinds.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Type {
    Scalar(Scalar),
    Record(Record),
    Array(Array),
    Enum(Enum),
    Union(Union),
    StringLiteral { value: String },
    NumericLiteral { value: Number },
    BooleanLiteral { value: bool },
    Tuple { items: Vec<TypeId> },
    Unknown,
    Void,
    Never,
    Null,
}

impl Type {
    /// Short kind name used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Record(_) => "record",
            Self::Array(_) => "array",
            Self::Enum(_) => "enum",
            Self::Union(_) => "union",
            Self::StringLiteral { .. } => "string literal",
            Self::NumericLiteral { .. } => "numeric literal",
            Self::BooleanLiteral { .. } => "boolean literal",
            Self::Tuple { .. } => "tuple",
            Self::Unknown => "unknown",
            Self::Void => "void",
            Self::Never => "never",
            Self::Null => "null",
        }
    }

    /// Human-readable name of the node.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Scalar(s) => s.name.clone(),
            Self::Record(r) => r.name.clone(),
            Self::Enum(e) => e.name.clone(),
            Self::Union(u) => u.name.clone().unwrap_or_else(|| "union".to_string()),
            Self::StringLiteral { value } => format!("\"{value}\""),
            Self::NumericLiteral { value } => value.to_string(),
            Self::BooleanLiteral { value } => value.to_string(),
            other => other.kind_name().to_string(),
        }
    }

    /// Literal value of a string or numeric literal type.
    #[must_use]
    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Self::StringLiteral { value } => Some(Literal::Text(value.clone())),
            Self::NumericLiteral { value } => Some(Literal::Number(*value)),
            _ => None,
        }
    }
}

impl From<Scalar> for Type {
    fn from(node: Scalar) -> Self {
        Self::Scalar(node)
    }
}

impl From<Record> for Type {
    fn from(node: Record) -> Self {
        Self::Record(node)
    }
}

impl From<Array> for Type {
    fn from(node: Array) -> Self {
        Self::Array(node)
    }
}

impl From<Enum> for Type {
    fn from(node: Enum) -> Self {
        Self::Enum(node)
    }
}

impl From<Union> for Type {
    fn from(node: Union) -> Self {
        Self::Union(node)
    }
}

///
/// Array
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Array {
    pub element: TypeId,
}

impl Array {
    #[must_use]
    pub const fn of(element: TypeId) -> Self {
        Self { element }
    }
}

///
/// ModelGraph
///
/// Arena of type nodes. Nodes are appended and never removed, so a `TypeId`
/// stays valid for the lifetime of the graph.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ModelGraph {
    types: Vec<Type>,
}

impl ModelGraph {
    #[must_use]
    pub const fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Append a node and return its handle.
    pub fn add(&mut self, ty: impl Into<Type>) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(ty.into());

        id
    }

    /// Root scalar for an intrinsic, added on first use.
    pub fn intrinsic(&mut self, intrinsic: Intrinsic) -> TypeId {
        let existing = self.iter().find_map(|(id, ty)| match ty {
            Type::Scalar(s) if s.base.is_none() && s.name == intrinsic.as_str() => Some(id),
            _ => None,
        });

        existing.unwrap_or_else(|| self.add(Scalar::new(intrinsic.as_str())))
    }

    pub fn get(&self, id: TypeId) -> Result<&Type, SchemaError> {
        self.types.get(id.0).ok_or(SchemaError::UnknownType(id))
    }

    pub fn scalar(&self, id: TypeId) -> Result<&Scalar, SchemaError> {
        match self.get(id)? {
            Type::Scalar(node) => Ok(node),
            other => Err(unexpected(id, other, "scalar")),
        }
    }

    pub fn record(&self, id: TypeId) -> Result<&Record, SchemaError> {
        match self.get(id)? {
            Type::Record(node) => Ok(node),
            other => Err(unexpected(id, other, "record")),
        }
    }

    /// First named node (scalar, record, enum or named union) with this name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<TypeId> {
        self.iter().find_map(|(id, ty)| {
            let matches = match ty {
                Type::Scalar(s) => s.name == name,
                Type::Record(r) => r.name == name,
                Type::Enum(e) => e.name == name,
                Type::Union(u) => u.name.as_deref() == Some(name),
                _ => false,
            };

            matches.then_some(id)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.types.iter().enumerate().map(|(i, ty)| (TypeId(i), ty))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn unexpected(id: TypeId, found: &Type, expected: &'static str) -> SchemaError {
    SchemaError::UnexpectedKind {
        id,
        found: found.kind_name(),
        expected,
    }
}

///
/// TESTS
///

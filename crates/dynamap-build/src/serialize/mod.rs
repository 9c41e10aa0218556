//! Value tree to literal-expression source text.
//!
//! Values are lowered into an [`Expr`] tree and rendered. Records are built
//! one single-member fragment per key and the fragments are merged into one
//! object literal, so each member is rendered as an independent, well-formed
//! `key: value` pair. Key order is insertion order; nothing is sorted.

mod expr;
mod parse;
mod value;

pub use expr::{Expr, Member, ObjectLit, quote_str, render_key};
pub use parse::{ParseError, parse_literal};
pub use value::{Record, Source, Value};

use std::fmt;
use thiserror::Error as ThisError;

///
/// SerializeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SerializeError {
    #[error("unsupported value: {reason}")]
    UnsupportedValue { reason: String },
}

///
/// SerializeErrorKind
///
/// Stable error-kind taxonomy for serializer failures.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SerializeErrorKind {
    UnsupportedValue,
}

impl SerializeErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedValue => "unsupported_value",
        }
    }
}

impl fmt::Display for SerializeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SerializeError {
    #[must_use]
    pub const fn kind(&self) -> SerializeErrorKind {
        match self {
            Self::UnsupportedValue { .. } => SerializeErrorKind::UnsupportedValue,
        }
    }

    fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            reason: reason.into(),
        }
    }
}

/// Render a value as a single-line literal expression.
pub fn serialize(value: &Value) -> Result<String, SerializeError> {
    serialize_with_indent(value, 0)
}

/// Render a value, breaking objects over indented lines when `indent > 0`.
pub fn serialize_with_indent(value: &Value, indent: usize) -> Result<String, SerializeError> {
    Ok(to_expr(value)?.render(indent))
}

/// Lower a value into its literal-expression tree.
pub fn to_expr(value: &Value) -> Result<Expr, SerializeError> {
    let expr = match value {
        Value::Undefined => Expr::Undefined,
        Value::Null => Expr::Null,
        Value::Bool(b) => Expr::Bool(*b),
        Value::Number(n) => {
            if !n.is_finite() {
                return Err(SerializeError::unsupported(format!(
                    "non-finite number {n} has no literal form"
                )));
            }
            Expr::Number(*n)
        }
        Value::Text(s) => Expr::Str(s.clone()),
        Value::Source(src) => {
            if src.trim().is_empty() {
                return Err(SerializeError::unsupported("empty source fragment"));
            }
            Expr::Raw(src.to_string())
        }
        Value::List(items) => Expr::Array(items.iter().map(to_expr).collect::<Result<_, _>>()?),
        Value::Record(record) => {
            let fragments = record
                .iter()
                .map(|(key, value)| Ok(ObjectLit::single(key, to_expr(value)?)))
                .collect::<Result<Vec<_>, SerializeError>>()?;

            Expr::Object(ObjectLit::merge(fragments))
        }
    };

    Ok(expr)
}

///
/// TESTS
///

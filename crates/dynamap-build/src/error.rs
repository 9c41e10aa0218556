use crate::serialize::SerializeError;
use dynamap_schema::error::SchemaError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Location
///
/// Dotted `Entity.property` path of the node being compiled when an error
/// was raised. Empty until a caller attaches context.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Location(String);

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<model>")
        } else {
            f.write_str(&self.0)
        }
    }
}

///
/// CompileError
///
/// Any of these aborts the whole compilation pass.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("unsupported type '{ty}' at {at}: {reason}")]
    UnsupportedType {
        at: Location,
        ty: String,
        reason: String,
    },

    #[error("unrenderable value at {at}: {source}")]
    UnsupportedValue {
        at: Location,
        #[source]
        source: SerializeError,
    },

    #[error("timestamp property {at} must map to a number, found {found}")]
    InvalidTimestampType { at: Location, found: &'static str },

    #[error("{at} is not an entity: {reason}")]
    NotAnEntity { at: Location, reason: String },

    #[error(
        "index '{index}' at {at} references '{property}', which is not a property of entity '{entity}'"
    )]
    InvalidAccessPatternReference {
        at: Location,
        entity: String,
        index: String,
        property: String,
    },

    #[error("invalid pattern '{pattern}' at {at}: {reason}")]
    InvalidPattern {
        at: Location,
        pattern: String,
        reason: String,
    },

    #[error("duplicate entity name '{entity}'")]
    DuplicateEntity { entity: String },
}

impl CompileError {
    pub(crate) fn unsupported_type(ty: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedType {
            at: Location::default(),
            ty: ty.into(),
            reason: reason.into(),
        }
    }

    /// Attach a location unless a more specific one is already set.
    #[must_use]
    pub fn in_context(mut self, path: impl Into<String>) -> Self {
        if let Some(at) = self.location_mut()
            && at.is_empty()
        {
            *at = Location::new(path);
        }

        self
    }

    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        match self {
            Self::UnsupportedType { at, .. }
            | Self::UnsupportedValue { at, .. }
            | Self::InvalidTimestampType { at, .. }
            | Self::NotAnEntity { at, .. }
            | Self::InvalidAccessPatternReference { at, .. }
            | Self::InvalidPattern { at, .. } => Some(at),
            Self::DuplicateEntity { .. } => None,
        }
    }

    fn location_mut(&mut self) -> Option<&mut Location> {
        match self {
            Self::UnsupportedType { at, .. }
            | Self::UnsupportedValue { at, .. }
            | Self::InvalidTimestampType { at, .. }
            | Self::NotAnEntity { at, .. }
            | Self::InvalidAccessPatternReference { at, .. }
            | Self::InvalidPattern { at, .. } => Some(at),
            Self::DuplicateEntity { .. } => None,
        }
    }

    /// Return a stable error kind independent of message text.
    #[must_use]
    pub const fn kind(&self) -> CompileErrorKind {
        match self {
            Self::UnsupportedType { .. } => CompileErrorKind::UnsupportedType,
            Self::UnsupportedValue { .. } => CompileErrorKind::UnsupportedValue,
            Self::InvalidTimestampType { .. } => CompileErrorKind::InvalidTimestampType,
            Self::NotAnEntity { .. } => CompileErrorKind::NotAnEntity,
            Self::InvalidAccessPatternReference { .. } => {
                CompileErrorKind::InvalidAccessPatternReference
            }
            Self::InvalidPattern { .. } => CompileErrorKind::InvalidPattern,
            Self::DuplicateEntity { .. } => CompileErrorKind::DuplicateEntity,
        }
    }
}

impl From<SerializeError> for CompileError {
    fn from(source: SerializeError) -> Self {
        Self::UnsupportedValue {
            at: Location::default(),
            source,
        }
    }
}

// Graph-shape problems (cycles, dangling ids, wrong base kinds) leave the
// type without a mapping rule.
impl From<SchemaError> for CompileError {
    fn from(err: SchemaError) -> Self {
        let ty = match &err {
            SchemaError::UnknownType(id) => id.to_string(),
            SchemaError::ScalarCycle { scalar } => scalar.clone(),
            SchemaError::RecordCycle { record } => record.clone(),
            SchemaError::ChainTooDeep { name, .. } | SchemaError::InvalidBase { name, .. } => {
                name.clone()
            }
            SchemaError::UnexpectedKind { id, .. } => id.to_string(),
        };

        Self::unsupported_type(ty, err.to_string())
    }
}

///
/// CompileErrorKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompileErrorKind {
    UnsupportedType,
    UnsupportedValue,
    InvalidTimestampType,
    NotAnEntity,
    InvalidAccessPatternReference,
    InvalidPattern,
    DuplicateEntity,
}

impl CompileErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedType => "unsupported_type",
            Self::UnsupportedValue => "unsupported_value",
            Self::InvalidTimestampType => "invalid_timestamp_type",
            Self::NotAnEntity => "not_an_entity",
            Self::InvalidAccessPatternReference => "invalid_access_pattern_reference",
            Self::InvalidPattern => "invalid_pattern",
            Self::DuplicateEntity => "duplicate_entity",
        }
    }
}

impl fmt::Display for CompileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// Intrinsic
///
/// Built-in scalar names recognised at the root (or anywhere along) a scalar
/// derivation chain.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[remain::sorted]
pub enum Intrinsic {
    Boolean,
    Bytes,
    Decimal,
    Decimal128,
    Duration,
    Float,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Integer,
    Numeric,
    OffsetDateTime,
    PlainDate,
    PlainTime,
    SafeInt,
    String,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Url,
    UtcDateTime,
}

impl Intrinsic {
    pub const ALL: [Self; 25] = [
        Self::Boolean,
        Self::Bytes,
        Self::Decimal,
        Self::Decimal128,
        Self::Duration,
        Self::Float,
        Self::Float32,
        Self::Float64,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Integer,
        Self::Numeric,
        Self::OffsetDateTime,
        Self::PlainDate,
        Self::PlainTime,
        Self::SafeInt,
        Self::String,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Url,
        Self::UtcDateTime,
    ];

    /// Canonical scalar name as it appears in the model graph.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Bytes => "bytes",
            Self::Decimal => "decimal",
            Self::Decimal128 => "decimal128",
            Self::Duration => "duration",
            Self::Float => "float",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Integer => "integer",
            Self::Numeric => "numeric",
            Self::OffsetDateTime => "offsetDateTime",
            Self::PlainDate => "plainDate",
            Self::PlainTime => "plainTime",
            Self::SafeInt => "safeint",
            Self::String => "string",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Url => "url",
            Self::UtcDateTime => "utcDateTime",
        }
    }

    /// Resolve a scalar name to an intrinsic, if it is one.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == name)
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Integer
                | Self::SafeInt
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            Self::Decimal | Self::Decimal128 | Self::Float | Self::Float32 | Self::Float64
        )
    }

    // is_numeric
    // ints, floats, decimals and the abstract `numeric` root
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, Self::Numeric)
    }

    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, Self::Boolean)
    }

    /// Raw binary data has no attribute representation.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::Bytes)
    }

    #[must_use]
    pub const fn date_time_kind(self) -> Option<DateTimeKind> {
        match self {
            Self::UtcDateTime => Some(DateTimeKind::Utc),
            Self::OffsetDateTime => Some(DateTimeKind::Offset),
            Self::PlainDate => Some(DateTimeKind::PlainDate),
            Self::PlainTime => Some(DateTimeKind::PlainTime),
            _ => None,
        }
    }
}

impl Display for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// DateTimeKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DateTimeKind {
    Utc,
    Offset,
    PlainDate,
    PlainTime,
}

impl DateTimeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utc => "utc",
            Self::Offset => "offset",
            Self::PlainDate => "plain_date",
            Self::PlainTime => "plain_time",
        }
    }
}

impl Display for DateTimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// TESTS
///

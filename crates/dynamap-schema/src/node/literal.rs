use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// Number
///
/// Numeric literal preserving whether it was written as an integer.
/// Equality is numeric, so `Int(5) == Float(5.0)`.
///

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(n) => n,
        }
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Float(n) => n.is_finite(),
        }
    }

    /// True when the value has no fractional part and is finite.
    #[must_use]
    pub fn is_integral(self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Float(n) => n.is_finite() && n.fract() == 0.0,
        }
    }
}

impl PartialEq for Number {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

///
/// Literal
///
/// Enum member values and literal-union variants.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Text(String),
    Number(Number),
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_like_source_literals() {
        assert_eq!(Number::Int(0).to_string(), "0");
        assert_eq!(Number::Float(3.0).to_string(), "3");
        assert_eq!(Number::Float(2.75).to_string(), "2.75");
        assert_eq!(Number::Int(-25).to_string(), "-25");
    }

    #[test]
    fn integral_check_rejects_fractions_and_non_finite() {
        assert!(Number::Int(3).is_integral());
        assert!(Number::Float(3.0).is_integral());
        assert!(!Number::Float(2.75).is_integral());
        assert!(!Number::Float(f64::INFINITY).is_integral());
        assert!(!Number::Float(f64::NAN).is_integral());
    }

    #[test]
    fn equality_is_numeric() {
        assert_eq!(Number::Int(5), Number::Float(5.0));
        assert_ne!(Number::Int(5), Number::Float(5.5));
        assert_ne!(Number::Float(f64::NAN), Number::Float(f64::NAN));
    }
}

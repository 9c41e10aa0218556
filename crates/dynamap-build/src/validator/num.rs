use crate::{serialize::Value, validator::Check};
use dynamap_schema::node::Number;
use std::cmp::Ordering;

fn number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(*n),
        _ => None,
    }
}

// integer pairs compare exactly; anything involving NaN is unordered
fn compare(a: Number, b: Number) -> Option<Ordering> {
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
        _ => a.as_f64().partial_cmp(&b.as_f64()),
    }
}

///
/// MinValue
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinValue {
    target: Number,
}

impl MinValue {
    #[must_use]
    pub const fn new(target: Number) -> Self {
        Self { target }
    }
}

impl Check for MinValue {
    fn name(&self) -> &'static str {
        "min_value"
    }

    fn violated_by(&self, value: &Value) -> bool {
        number(value).is_some_and(|n| compare(n, self.target) == Some(Ordering::Less))
    }

    fn guard(&self) -> String {
        format!("typeof value === \"number\" && value < {}", self.target)
    }

    fn message(&self) -> String {
        format!("must be at least {}", self.target)
    }
}

///
/// MaxValue
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaxValue {
    target: Number,
}

impl MaxValue {
    #[must_use]
    pub const fn new(target: Number) -> Self {
        Self { target }
    }
}

impl Check for MaxValue {
    fn name(&self) -> &'static str {
        "max_value"
    }

    fn violated_by(&self, value: &Value) -> bool {
        number(value).is_some_and(|n| compare(n, self.target) == Some(Ordering::Greater))
    }

    fn guard(&self) -> String {
        format!("typeof value === \"number\" && value > {}", self.target)
    }

    fn message(&self) -> String {
        format!("must be at most {}", self.target)
    }
}

///
/// Integer
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Integer;

impl Check for Integer {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn violated_by(&self, value: &Value) -> bool {
        number(value).is_some_and(|n| !n.is_integral())
    }

    fn guard(&self) -> String {
        "typeof value === \"number\" && !Number.isInteger(value)".to_string()
    }

    fn message(&self) -> String {
        "must be an integer".to_string()
    }
}

///
/// Finite
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Finite;

impl Check for Finite {
    fn name(&self) -> &'static str {
        "finite"
    }

    fn violated_by(&self, value: &Value) -> bool {
        number(value).is_some_and(|n| !n.is_finite())
    }

    fn guard(&self) -> String {
        "typeof value === \"number\" && !Number.isFinite(value)".to_string()
    }

    fn message(&self) -> String {
        "must be a finite number".to_string()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_inclusive() {
        let min = MinValue::new(Number::Int(0));
        assert!(min.violated_by(&Value::from(-1i64)));
        assert!(!min.violated_by(&Value::from(0i64)));
        assert!(min.violated_by(&Value::from(-0.5)));

        let max = MaxValue::new(Number::Float(9.5));
        assert!(!max.violated_by(&Value::from(9i64)));
        assert!(max.violated_by(&Value::from(10i64)));
    }

    #[test]
    fn large_integers_compare_exactly() {
        let max = MaxValue::new(Number::Int(i64::MAX - 1));
        assert!(max.violated_by(&Value::from(i64::MAX)));
    }

    #[test]
    fn integer_check_rejects_fractions() {
        assert!(Integer.violated_by(&Value::from(2.5)));
        assert!(!Integer.violated_by(&Value::from(3i64)));
        assert!(!Integer.violated_by(&Value::from(3.0)));
        assert!(!Integer.violated_by(&Value::from("2.5")));
    }

    #[test]
    fn finite_check_rejects_infinity_and_nan() {
        assert!(Finite.violated_by(&Value::from(f64::INFINITY)));
        assert!(Finite.violated_by(&Value::from(f64::NAN)));
        assert!(!Finite.violated_by(&Value::from(1.25)));
    }

    #[test]
    fn guards_render_negative_targets() {
        assert_eq!(
            MinValue::new(Number::Int(-5)).guard(),
            "typeof value === \"number\" && value < -5"
        );
    }
}

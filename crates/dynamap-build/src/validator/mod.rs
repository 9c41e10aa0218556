//! Validation predicates synthesized from a [`ConstraintSet`].
//!
//! A predicate is a list of type-guarded checks evaluated in a fixed order.
//! The same list drives both the native evaluation and the generated source
//! text, so the two cannot drift apart.

mod len;
mod num;
mod text;

pub use len::{MaxLength, MinLength};
pub use num::{Finite, Integer, MaxValue, MinValue};
pub use text::{DateTime, Pattern};

use crate::{
    constraint::ConstraintSet,
    error::{CompileError, Location},
    serialize::{Source, Value, quote_str},
};
use std::{
    fmt::{self, Write},
    sync::Arc,
};
use thiserror::Error as ThisError;

///
/// Check
///
/// One constraint test. Values of the wrong runtime type always pass.
///

pub trait Check: fmt::Debug + Send + Sync {
    /// Stable check name.
    fn name(&self) -> &'static str;

    fn violated_by(&self, value: &Value) -> bool;

    /// Source expression over `value` that is true when the check fails.
    fn guard(&self) -> String;

    /// Failure message, without the leading property name.
    fn message(&self) -> String;
}

///
/// ValidationError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct ValidationError {
    pub check: &'static str,
    pub message: String,
}

///
/// Predicate
///
/// Native validator for one property, paired with the source text that
/// performs the same checks at runtime.
///

#[derive(Clone)]
pub struct Predicate {
    property: String,
    checks: Vec<Arc<dyn Check>>,
    source: Source,
}

impl Predicate {
    fn new(property: &str, checks: Vec<Arc<dyn Check>>) -> Self {
        let source = render_source(property, &checks);

        Self {
            property: property.to_string(),
            checks,
            source,
        }
    }

    /// Run the checks in order; the first failure is reported.
    ///
    /// UTC and offset date-time checks accept ISO 8601 and RFC 3339 text and
    /// the space-separated `YYYY-MM-DD HH:MM[:SS]` form. The emitted source
    /// defers to `Date.parse`, which may accept further engine-specific forms.
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match self.checks.iter().find(|c| c.violated_by(value)) {
            Some(check) => Err(ValidationError {
                check: check.name(),
                message: format!("{} {}", self.property, check.message()),
            }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    /// Check names in evaluation order.
    pub fn check_names(&self) -> impl Iterator<Item = &'static str> {
        self.checks.iter().map(|c| c.name())
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("property", &self.property)
            .field("source", &self.source.as_str())
            .finish_non_exhaustive()
    }
}

// the source text is a pure function of the check list
impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl From<Predicate> for Value {
    fn from(predicate: Predicate) -> Self {
        Self::Source(predicate.source)
    }
}

/// Build the validator for `property`, or `None` when no check applies.
pub fn synthesize_validator(
    constraints: &ConstraintSet,
    property: &str,
) -> Result<Option<Predicate>, CompileError> {
    let mut checks: Vec<Arc<dyn Check>> = Vec::new();

    if let Some(n) = constraints.min_length {
        checks.push(Arc::new(MinLength::new(n)));
    }
    if let Some(n) = constraints.max_length {
        checks.push(Arc::new(MaxLength::new(n)));
    }
    if let Some(n) = constraints.min_value {
        checks.push(Arc::new(MinValue::new(n)));
    }
    if let Some(n) = constraints.max_value {
        checks.push(Arc::new(MaxValue::new(n)));
    }
    if constraints.is_integer {
        checks.push(Arc::new(Integer));
    }
    if constraints.is_float {
        checks.push(Arc::new(Finite));
    }
    if let Some(pattern) = &constraints.pattern {
        let compiled = Pattern::new(pattern.as_str()).map_err(|e| CompileError::InvalidPattern {
            at: Location::default(),
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        checks.push(Arc::new(compiled));
    }
    if let Some(kind) = constraints.date_time {
        checks.push(Arc::new(DateTime::new(kind)));
    }

    if checks.is_empty() {
        return Ok(None);
    }

    Ok(Some(Predicate::new(property, checks)))
}

fn render_source(property: &str, checks: &[Arc<dyn Check>]) -> Source {
    let mut out = String::from("(value) => { ");
    for check in checks {
        let message = format!("{property} {}", check.message());
        write!(
            out,
            "if ({}) {{ throw new Error({}); }} ",
            check.guard(),
            quote_str(&message)
        )
        .ok();
    }
    out.push_str("return true; }");

    Source::new(out)
}

///
/// TESTS
///

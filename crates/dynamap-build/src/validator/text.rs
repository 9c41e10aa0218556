use crate::{
    serialize::{Value, quote_str},
    validator::Check,
};
use dynamap_schema::types::DateTimeKind;
use regex::Regex;
use std::sync::LazyLock;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::well_known::{Iso8601, Rfc3339},
};

const PLAIN_DATE: &str = r"^\d{4}-\d{2}-\d{2}$";
const PLAIN_TIME: &str = r"^\d{2}:\d{2}(:\d{2}(\.\d+)?)?$";

static PLAIN_DATE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(PLAIN_DATE).ok());
static PLAIN_TIME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(PLAIN_TIME).ok());

fn is_match(re: &LazyLock<Option<Regex>>, s: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(s))
}

///
/// Pattern
///
/// Compiled with a backtracking engine so look-around and backreferences
/// behave as they do in the emitted `RegExp`.
///

#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: fancy_regex::Regex,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Result<Self, fancy_regex::Error> {
        let source = source.into();
        let regex = fancy_regex::Regex::new(&source)?;

        Ok(Self { source, regex })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Check for Pattern {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn violated_by(&self, value: &Value) -> bool {
        // a match that exhausts the backtrack limit counts as a miss
        value
            .as_text()
            .is_some_and(|s| !matches!(self.regex.is_match(s), Ok(true)))
    }

    fn guard(&self) -> String {
        format!(
            "typeof value === \"string\" && !new RegExp({}).test(value)",
            quote_str(&self.source)
        )
    }

    fn message(&self) -> String {
        format!("must match pattern {}", self.source)
    }
}

///
/// DateTime
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateTime {
    kind: DateTimeKind,
}

impl DateTime {
    #[must_use]
    pub const fn new(kind: DateTimeKind) -> Self {
        Self { kind }
    }
}

// RFC 3339 and ISO 8601, plus the space-separated `date time` form the
// runtime's date parser also accepts
fn parses_as_date_time(s: &str) -> bool {
    parses_as_iso(s)
        || s
            .split_once(' ')
            .is_some_and(|(date, time)| parses_as_iso(&format!("{date}T{time}")))
}

fn parses_as_iso(s: &str) -> bool {
    OffsetDateTime::parse(s, &Rfc3339).is_ok()
        || OffsetDateTime::parse(s, &Iso8601::DEFAULT).is_ok()
        || PrimitiveDateTime::parse(s, &Iso8601::DEFAULT).is_ok()
        || Date::parse(s, &Iso8601::DEFAULT).is_ok()
}

impl Check for DateTime {
    fn name(&self) -> &'static str {
        "date_time"
    }

    fn violated_by(&self, value: &Value) -> bool {
        let Some(s) = value.as_text() else {
            return false;
        };

        match self.kind {
            DateTimeKind::Utc | DateTimeKind::Offset => !parses_as_date_time(s),
            DateTimeKind::PlainDate => !is_match(&PLAIN_DATE_RE, s),
            DateTimeKind::PlainTime => !is_match(&PLAIN_TIME_RE, s),
        }
    }

    fn guard(&self) -> String {
        match self.kind {
            DateTimeKind::Utc | DateTimeKind::Offset => {
                "typeof value === \"string\" && Number.isNaN(Date.parse(value))".to_string()
            }
            DateTimeKind::PlainDate => {
                format!("typeof value === \"string\" && !/{PLAIN_DATE}/.test(value)")
            }
            DateTimeKind::PlainTime => {
                format!("typeof value === \"string\" && !/{PLAIN_TIME}/.test(value)")
            }
        }
    }

    fn message(&self) -> String {
        match self.kind {
            DateTimeKind::Utc => "must be a valid UTC date-time",
            DateTimeKind::Offset => "must be a valid date-time with offset",
            DateTimeKind::PlainDate => "must be a valid date (YYYY-MM-DD)",
            DateTimeKind::PlainTime => "must be a valid time (HH:MM[:SS[.fff]])",
        }
        .to_string()
    }
}

///
/// TESTS
///

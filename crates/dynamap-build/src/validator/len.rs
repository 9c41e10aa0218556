use crate::{serialize::Value, validator::Check};

// length as the runtime measures it: UTF-16 code units
fn text_len(value: &Value) -> Option<u64> {
    value
        .as_text()
        .map(|s| u64::try_from(s.encode_utf16().count()).unwrap_or(u64::MAX))
}

///
/// MinLength
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MinLength {
    target: u64,
}

impl MinLength {
    #[must_use]
    pub const fn new(target: u64) -> Self {
        Self { target }
    }
}

impl Check for MinLength {
    fn name(&self) -> &'static str {
        "min_length"
    }

    fn violated_by(&self, value: &Value) -> bool {
        text_len(value).is_some_and(|len| len < self.target)
    }

    fn guard(&self) -> String {
        format!("typeof value === \"string\" && value.length < {}", self.target)
    }

    fn message(&self) -> String {
        format!("must be at least {} characters", self.target)
    }
}

///
/// MaxLength
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MaxLength {
    target: u64,
}

impl MaxLength {
    #[must_use]
    pub const fn new(target: u64) -> Self {
        Self { target }
    }
}

impl Check for MaxLength {
    fn name(&self) -> &'static str {
        "max_length"
    }

    fn violated_by(&self, value: &Value) -> bool {
        text_len(value).is_some_and(|len| len > self.target)
    }

    fn guard(&self) -> String {
        format!("typeof value === \"string\" && value.length > {}", self.target)
    }

    fn message(&self) -> String {
        format!("must be at most {} characters", self.target)
    }
}

///
/// TESTS
///

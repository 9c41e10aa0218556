use crate::node::Literal;
use serde::{Deserialize, Serialize};

///
/// Enum
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Enum {
    pub name: String,
    pub members: Vec<EnumMember>,
}

impl Enum {
    #[must_use]
    pub fn new(name: impl Into<String>, members: Vec<EnumMember>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Enum whose members carry no explicit values.
    #[must_use]
    pub fn named<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, members.into_iter().map(EnumMember::new).collect())
    }

    /// Member values in declaration order, falling back to member names.
    #[must_use]
    pub fn values(&self) -> Vec<Literal> {
        self.members.iter().map(EnumMember::resolved_value).collect()
    }

    #[must_use]
    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

///
/// EnumMember
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EnumMember {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,
}

impl EnumMember {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(name: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    #[must_use]
    pub fn resolved_value(&self) -> Literal {
        self.value
            .clone()
            .unwrap_or_else(|| Literal::Text(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Number;

    #[test]
    fn values_fall_back_to_names() {
        let e = Enum::new(
            "Level",
            vec![
                EnumMember::new("LOW"),
                EnumMember::with_value("MEDIUM", "med"),
                EnumMember::with_value("HIGH", Number::Int(3)),
            ],
        );

        assert_eq!(
            e.values(),
            vec![
                Literal::Text("LOW".into()),
                Literal::Text("med".into()),
                Literal::Number(Number::Int(3)),
            ]
        );
    }
}

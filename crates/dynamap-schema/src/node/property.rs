use crate::node::{Facets, Number, TypeId};
use serde::{Deserialize, Serialize};

///
/// Property
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Property {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeId,

    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,

    #[serde(default, skip_serializing_if = "Facets::is_empty")]
    pub facets: Facets,
}

impl Property {
    #[must_use]
    pub fn required(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            default: None,
            facets: Facets::default(),
        }
    }

    #[must_use]
    pub fn optional(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            optional: true,
            ..Self::required(name, ty)
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub fn with_facets(mut self, facets: Facets) -> Self {
        self.facets = facets;
        self
    }
}

///
/// DefaultValue
///
/// Default-value expression attached to a property by the front-end.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DefaultValue {
    String {
        value: String,
    },
    Number {
        value: Number,
    },
    Boolean {
        value: bool,
    },
    #[serde(rename_all = "camelCase")]
    EnumMember {
        enum_type: TypeId,
        member: String,
    },
    Null,
    Array {
        items: Vec<DefaultValue>,
    },
    Object {
        fields: Vec<(String, DefaultValue)>,
    },
}

impl DefaultValue {
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn number(value: impl Into<Number>) -> Self {
        Self::Number {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn member(enum_type: TypeId, member: impl Into<String>) -> Self {
        Self::EnumMember {
            enum_type,
            member: member.into(),
        }
    }

    /// Plain scalar defaults survive into attribute descriptors; structured
    /// ones do not.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(
            self,
            Self::String { .. } | Self::Number { .. } | Self::Boolean { .. } | Self::EnumMember { .. }
        )
    }
}

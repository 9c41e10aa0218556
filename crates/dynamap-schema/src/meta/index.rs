use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// IndexMeta
///
/// One access pattern declared on an entity.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMeta {
    /// Access-pattern name; becomes the key of the entity's index map.
    pub name: String,

    pub pk: KeyMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sk: Option<KeyMeta>,

    /// Physical secondary index; `None` for the table's primary index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub index_type: Option<IndexType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl IndexMeta {
    #[must_use]
    pub fn new(name: impl Into<String>, pk: KeyMeta) -> Self {
        Self {
            name: name.into(),
            pk,
            sk: None,
            index: None,
            collection: None,
            index_type: None,
            scope: None,
        }
    }

    #[must_use]
    pub fn sk(mut self, sk: KeyMeta) -> Self {
        self.sk = Some(sk);
        self
    }

    #[must_use]
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    #[must_use]
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    #[must_use]
    pub const fn index_type(mut self, index_type: IndexType) -> Self {
        self.index_type = Some(index_type);
        self
    }

    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Every composite property name referenced by the pk and sk, in order.
    pub fn composite_refs(&self) -> impl Iterator<Item = &str> {
        self.pk
            .composite
            .iter()
            .chain(self.sk.iter().flat_map(|sk| sk.composite.iter()))
            .map(String::as_str)
    }
}

///
/// KeyMeta
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct KeyMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(default)]
    pub composite: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casing: Option<Casing>,
}

impl KeyMeta {
    #[must_use]
    pub fn composite<I, S>(composite: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: None,
            composite: composite.into_iter().map(Into::into).collect(),
            casing: None,
        }
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub const fn casing(mut self, casing: Casing) -> Self {
        self.casing = Some(casing);
        self
    }
}

///
/// IndexType
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    Isolated,
    Clustered,
}

impl IndexType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Isolated => "isolated",
            Self::Clustered => "clustered",
        }
    }
}

impl Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Casing
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Casing {
    Default,
    Upper,
    Lower,
    None,
}

impl Casing {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::None => "none",
        }
    }
}

impl Display for Casing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

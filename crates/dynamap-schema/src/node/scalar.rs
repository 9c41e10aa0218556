use crate::{
    MAX_CHAIN_DEPTH,
    error::SchemaError,
    node::{ModelGraph, Number, Type, TypeId, unexpected},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// Scalar
///
/// A named scalar, optionally deriving from a base scalar. Scalars without a
/// base are chain roots; their name is matched against the intrinsic set.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Scalar {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeId>,

    #[serde(default, skip_serializing_if = "Facets::is_empty")]
    pub facets: Facets,
}

impl Scalar {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            facets: Facets::default(),
        }
    }

    #[must_use]
    pub fn derived(name: impl Into<String>, base: TypeId) -> Self {
        Self {
            base: Some(base),
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn with_facets(mut self, facets: Facets) -> Self {
        self.facets = facets;
        self
    }
}

///
/// Facets
///
/// Constraint decorations declared on a scalar or directly on a property.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Facets {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.min_value.is_none()
            && self.max_value.is_none()
            && self.pattern.is_none()
    }

    #[must_use]
    pub const fn min_length(mut self, n: u64) -> Self {
        self.min_length = Some(n);
        self
    }

    #[must_use]
    pub const fn max_length(mut self, n: u64) -> Self {
        self.max_length = Some(n);
        self
    }

    #[must_use]
    pub fn min_value(mut self, n: impl Into<Number>) -> Self {
        self.min_value = Some(n.into());
        self
    }

    #[must_use]
    pub fn max_value(mut self, n: impl Into<Number>) -> Self {
        self.max_value = Some(n.into());
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

impl ModelGraph {
    /// Walk a scalar's derivation chain from the most specific scalar to the
    /// root. Cycles and over-long chains are rejected instead of followed.
    pub fn scalar_chain(&self, id: TypeId) -> Result<Vec<&Scalar>, SchemaError> {
        let mut chain: Vec<&Scalar> = Vec::new();
        let mut seen = BTreeSet::new();
        let mut next = Some(id);

        while let Some(current) = next {
            let scalar = match (self.get(current)?, chain.last()) {
                (Type::Scalar(node), _) => node,
                (other, None) => return Err(unexpected(current, other, "scalar")),
                (other, Some(prev)) => {
                    return Err(SchemaError::InvalidBase {
                        name: prev.name.clone(),
                        base_kind: other.kind_name(),
                        expected: "scalar",
                    });
                }
            };

            if !seen.insert(current) {
                return Err(SchemaError::ScalarCycle {
                    scalar: scalar.name.clone(),
                });
            }
            if chain.len() == MAX_CHAIN_DEPTH {
                return Err(SchemaError::ChainTooDeep {
                    name: chain[0].name.clone(),
                    max: MAX_CHAIN_DEPTH,
                });
            }

            chain.push(scalar);
            next = scalar.base;
        }

        tracing::trace!(scalar = %id, depth = chain.len(), "walked scalar chain");

        Ok(chain)
    }

    /// Root-most scalar of a derivation chain.
    pub fn scalar_root(&self, id: TypeId) -> Result<&Scalar, SchemaError> {
        let chain = self.scalar_chain(id)?;

        // a successful walk always yields at least the starting scalar
        chain
            .last()
            .copied()
            .ok_or(SchemaError::UnknownType(id))
    }
}

///
/// TESTS
///

//! Attached-metadata side-table.
//!
//! Populated once by the front-end's annotation processing and handed to the
//! compiler read-only. Entries are keyed by the entity's [`TypeId`] and, for
//! properties, by property name within that entity.

mod index;

pub use index::*;

use crate::node::TypeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Metadata
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Metadata {
    #[serde(default)]
    entities: Vec<EntityMeta>,
}

impl Metadata {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_entity(mut self, entity: EntityMeta) -> Self {
        self.add_entity(entity);
        self
    }

    pub fn add_entity(&mut self, entity: EntityMeta) {
        self.entities.push(entity);
    }

    /// Annotated entities in annotation order.
    #[must_use]
    pub fn entities(&self) -> &[EntityMeta] {
        &self.entities
    }

    #[must_use]
    pub fn entity(&self, node: TypeId) -> Option<&EntityMeta> {
        self.entities.iter().find(|e| e.node == node)
    }

    #[must_use]
    pub fn property(&self, node: TypeId, property: &str) -> Option<&PropertyMeta> {
        self.entity(node)?.properties.get(property)
    }
}

///
/// EntityMeta
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EntityMeta {
    pub node: TypeId,
    pub entity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexMeta>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyMeta>,
}

impl EntityMeta {
    #[must_use]
    pub fn new(node: TypeId, entity: impl Into<String>) -> Self {
        Self {
            node,
            entity: entity.into(),
            service: None,
            version: None,
            indexes: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn index(mut self, index: IndexMeta) -> Self {
        self.indexes.push(index);
        self
    }

    #[must_use]
    pub fn label(mut self, property: impl Into<String>, label: impl Into<String>) -> Self {
        self.property_mut(property).label = Some(label.into());
        self
    }

    /// Storage field name for a property.
    #[must_use]
    pub fn field(mut self, property: impl Into<String>, field: impl Into<String>) -> Self {
        self.property_mut(property).field = Some(field.into());
        self
    }

    #[must_use]
    pub fn created_at(self, property: impl Into<String>) -> Self {
        self.timestamp(property, TimestampMarker::created())
    }

    #[must_use]
    pub fn updated_at(self, property: impl Into<String>) -> Self {
        self.timestamp(property, TimestampMarker::updated())
    }

    #[must_use]
    pub fn timestamp(mut self, property: impl Into<String>, marker: TimestampMarker) -> Self {
        self.property_mut(property).timestamp = Some(marker);
        self
    }

    fn property_mut(&mut self, property: impl Into<String>) -> &mut PropertyMeta {
        self.properties.entry(property.into()).or_default()
    }
}

///
/// PropertyMeta
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PropertyMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<TimestampMarker>,
}

///
/// TimestampMarker
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TimestampMarker {
    pub kind: TimestampKind,

    /// Storage field name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl TimestampMarker {
    #[must_use]
    pub const fn created() -> Self {
        Self {
            kind: TimestampKind::Created,
            field: None,
        }
    }

    #[must_use]
    pub const fn updated() -> Self {
        Self {
            kind: TimestampKind::Updated,
            field: None,
        }
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

///
/// TimestampKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TimestampKind {
    Created,
    Updated,
}

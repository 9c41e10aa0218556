//! Attribute, index and entity descriptors.
//!
//! Descriptors are plain data built fresh on every compilation. `to_value`
//! lowers them into the serializer's value model with a fixed key order.

use crate::{
    serialize::{Record, Source, Value},
    validator::Predicate,
};
use dynamap_config_build::Config;
use dynamap_schema::{
    meta::{Casing, IndexType},
    node::Literal,
};

///
/// AttributeType
///

#[derive(Clone, Debug, PartialEq)]
pub enum AttributeType {
    String,
    Number,
    Boolean,
    List(Box<Self>),
    Map(Vec<(String, Self)>),

    /// Set of enum values, rendered as strings.
    Set(Vec<String>),

    /// Enum-like attribute whose type is the ordered value list.
    Enum(Vec<Literal>),

    /// Opaque escape hatch carrying a rendered type expression.
    Custom(String),
}

impl AttributeType {
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
            Self::Enum(_) => "enum-array",
            Self::Custom(_) => "custom",
        }
    }

    /// True when this type or any nested one needs the custom-type import.
    #[must_use]
    pub fn uses_custom_type(&self) -> bool {
        match self {
            Self::Custom(_) => true,
            Self::List(item) => item.uses_custom_type(),
            Self::Map(props) => props.iter().any(|(_, ty)| ty.uses_custom_type()),
            _ => false,
        }
    }

    // type, items and properties members of a descriptor record
    fn write_members(&self, record: &mut Record, config: &Config) {
        match self {
            Self::String | Self::Number | Self::Boolean => {
                record.insert("type", self.kind_name());
            }
            Self::List(item) => {
                record.insert("type", "list");
                record.insert("items", item.nested(config));
            }
            Self::Map(props) => {
                record.insert("type", "map");
                record.insert(
                    "properties",
                    props
                        .iter()
                        .map(|(name, ty)| (name.as_str(), ty.nested(config)))
                        .collect::<Record>(),
                );
            }
            Self::Set(items) => {
                record.insert("type", "set");
                record.insert("items", items.clone());
            }
            Self::Enum(values) => {
                record.insert("type", values.clone());
            }
            Self::Custom(expr) => {
                record.insert(
                    "type",
                    Source::new(format!("{}<{expr}>(\"any\")", config.output.custom_type)),
                );
            }
        }
    }

    fn nested(&self, config: &Config) -> Value {
        let mut record = Record::new();
        self.write_members(&mut record, config);

        record.into()
    }
}

///
/// AttributeDefault
///

#[derive(Clone, Debug, PartialEq)]
pub enum AttributeDefault {
    Literal(Value),

    /// Current time, produced by the configured source.
    Now,
}

impl AttributeDefault {
    fn to_value(&self, config: &Config) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Now => Source::new(config.timestamps.now_source.as_str()).into(),
        }
    }
}

///
/// AttributeDescriptor
///

#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDescriptor {
    pub ty: AttributeType,
    pub required: bool,
    pub default: Option<AttributeDefault>,
    pub read_only: bool,
    pub watch_all: bool,
    pub set: Option<AttributeDefault>,
    pub label: Option<String>,
    pub field: Option<String>,
    pub validate: Option<Predicate>,
}

impl AttributeDescriptor {
    #[must_use]
    pub const fn new(ty: AttributeType) -> Self {
        Self {
            ty,
            required: false,
            default: None,
            read_only: false,
            watch_all: false,
            set: None,
            label: None,
            field: None,
            validate: None,
        }
    }

    #[must_use]
    pub fn to_value(&self, config: &Config) -> Value {
        let mut record = Record::new();
        self.ty.write_members(&mut record, config);

        if self.required {
            record.insert("required", true);
        }
        if let Some(default) = &self.default {
            record.insert("default", default.to_value(config));
        }
        if self.read_only {
            record.insert("readOnly", true);
        }
        if self.watch_all {
            record.insert("watch", "*");
        }
        if let Some(set) = &self.set {
            record.insert("set", set.to_value(config));
        }
        if let Some(label) = &self.label {
            record.insert("label", label.as_str());
        }
        if let Some(field) = &self.field {
            record.insert("field", field.as_str());
        }
        if let Some(predicate) = &self.validate {
            record.insert("validate", predicate.clone());
        }

        record.into()
    }
}

///
/// KeyDescriptor
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyDescriptor {
    pub field: String,
    pub composite: Vec<String>,
    pub casing: Option<Casing>,
}

impl KeyDescriptor {
    fn to_value(&self) -> Value {
        let mut record = Record::new()
            .with("field", self.field.as_str())
            .with("composite", self.composite.clone());

        if let Some(casing) = self.casing {
            record.insert("casing", casing.as_str());
        }

        record.into()
    }
}

///
/// IndexDescriptor
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexDescriptor {
    pub pk: KeyDescriptor,
    pub sk: Option<KeyDescriptor>,
    pub index: Option<String>,
    pub collection: Option<String>,
    pub index_type: Option<IndexType>,
    pub scope: Option<String>,
}

impl IndexDescriptor {
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut record = Record::new().with("pk", self.pk.to_value());

        if let Some(sk) = &self.sk {
            record.insert("sk", sk.to_value());
        }
        if let Some(index) = &self.index {
            record.insert("index", index.as_str());
        }
        if let Some(collection) = &self.collection {
            record.insert("collection", collection.as_str());
        }
        if let Some(index_type) = self.index_type {
            record.insert("type", index_type.as_str());
        }
        if let Some(scope) = &self.scope {
            record.insert("scope", scope.as_str());
        }

        record.into()
    }
}

///
/// ModelIdentity
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelIdentity {
    pub entity: String,
    pub service: String,
    pub version: String,
}

///
/// EntitySchema
///

#[derive(Clone, Debug, PartialEq)]
pub struct EntitySchema {
    pub attributes: Vec<(String, AttributeDescriptor)>,
    pub indexes: Vec<(String, IndexDescriptor)>,
    pub model: ModelIdentity,
}

impl EntitySchema {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.model.entity
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, attr)| attr)
    }

    #[must_use]
    pub fn index(&self, name: &str) -> Option<&IndexDescriptor> {
        self.indexes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, index)| index)
    }

    #[must_use]
    pub fn uses_custom_type(&self) -> bool {
        self.attributes
            .iter()
            .any(|(_, attr)| attr.ty.uses_custom_type())
    }

    #[must_use]
    pub fn to_value(&self, config: &Config) -> Value {
        let attributes: Record = self
            .attributes
            .iter()
            .map(|(name, attr)| (name.as_str(), attr.to_value(config)))
            .collect();
        let indexes: Record = self
            .indexes
            .iter()
            .map(|(name, index)| (name.as_str(), index.to_value()))
            .collect();
        let model = Record::new()
            .with("entity", self.model.entity.as_str())
            .with("service", self.model.service.as_str())
            .with("version", self.model.version.as_str());

        Record::new()
            .with("attributes", attributes)
            .with("indexes", indexes)
            .with("model", model)
            .into()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::serialize;

    fn render(attr: &AttributeDescriptor) -> String {
        serialize(&attr.to_value(&Config::default())).unwrap()
    }

    #[test]
    fn timestamp_shape_renders_now_source() {
        let attr = AttributeDescriptor {
            required: true,
            default: Some(AttributeDefault::Now),
            set: Some(AttributeDefault::Now),
            watch_all: true,
            ..AttributeDescriptor::new(AttributeType::Number)
        };

        assert_eq!(
            render(&attr),
            r#"{ type: "number", required: true, default: () => Date.now(), watch: "*", set: () => Date.now() }"#
        );
    }

    #[test]
    fn nested_types_carry_items_and_properties() {
        let attr = AttributeDescriptor::new(AttributeType::List(Box::new(AttributeType::Map(
            vec![
                ("street".into(), AttributeType::String),
                ("zip".into(), AttributeType::Number),
            ],
        ))));

        assert_eq!(
            render(&attr),
            r#"{ type: "list", items: { type: "map", properties: { street: { type: "string" }, zip: { type: "number" } } } }"#
        );
    }

    #[test]
    fn enum_type_is_the_value_list() {
        let attr = AttributeDescriptor {
            required: true,
            default: Some(AttributeDefault::Literal("MEDIUM".into())),
            ..AttributeDescriptor::new(AttributeType::Enum(vec![
                "LOW".into(),
                "MEDIUM".into(),
                "HIGH".into(),
            ]))
        };

        assert_eq!(
            render(&attr),
            r#"{ type: ["LOW", "MEDIUM", "HIGH"], required: true, default: "MEDIUM" }"#
        );
    }

    #[test]
    fn custom_types_use_the_configured_name() {
        let ty = AttributeType::List(Box::new(AttributeType::Custom("string | null".into())));
        assert!(ty.uses_custom_type());
        assert!(!AttributeType::Set(vec!["A".into()]).uses_custom_type());

        assert_eq!(
            render(&AttributeDescriptor::new(ty)),
            r#"{ type: "list", items: { type: CustomAttributeType<string | null>("any") } }"#
        );
    }

    #[test]
    fn index_renders_optional_members_only_when_set() {
        let index = IndexDescriptor {
            pk: KeyDescriptor {
                field: "gsi1pk".into(),
                composite: vec!["personId".into()],
                casing: None,
            },
            sk: Some(KeyDescriptor {
                field: "gsi1sk".into(),
                composite: vec![],
                casing: Some(Casing::Upper),
            }),
            index: Some("gsi1".into()),
            collection: None,
            index_type: Some(IndexType::Clustered),
            scope: None,
        };

        assert_eq!(
            serialize(&index.to_value()).unwrap(),
            r#"{ pk: { field: "gsi1pk", composite: ["personId"] }, sk: { field: "gsi1sk", composite: [], casing: "upper" }, index: "gsi1", type: "clustered" }"#
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(AttributeType::Enum(vec![]).kind_name(), "enum-array");
        assert_eq!(AttributeType::Custom(String::new()).kind_name(), "custom");
    }
}

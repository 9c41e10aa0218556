use crate::{
    constraint::resolve_constraints,
    descriptor::{AttributeDefault, AttributeDescriptor, AttributeType},
    error::{CompileError, Location},
    mapper::map_type,
    serialize::Value,
    validator::synthesize_validator,
};
use dynamap_schema::{
    meta::{EntityMeta, TimestampKind, TimestampMarker},
    node::{DefaultValue, ModelGraph, Property, Type},
};

/// Compose the attribute descriptor for one property of an annotated entity.
pub fn compose_attribute(
    graph: &ModelGraph,
    entity: &EntityMeta,
    property: &Property,
) -> Result<AttributeDescriptor, CompileError> {
    let path = format!("{}.{}", entity.entity, property.name);

    let attr = compose(graph, entity, property, &path).map_err(|e| e.in_context(&path))?;

    tracing::debug!(
        attribute = %path,
        kind = attr.ty.kind_name(),
        required = attr.required,
        validated = attr.validate.is_some(),
        "composed attribute"
    );

    Ok(attr)
}

fn compose(
    graph: &ModelGraph,
    entity: &EntityMeta,
    property: &Property,
    path: &str,
) -> Result<AttributeDescriptor, CompileError> {
    let meta = entity.properties.get(&property.name);
    let ty = map_type(graph, property.ty)?;

    let mut attr = match meta.and_then(|m| m.timestamp.as_ref()) {
        Some(marker) => timestamp(ty, marker, path)?,
        None => plain(graph, ty, property)?,
    };

    if let Some(meta) = meta {
        attr.label.clone_from(&meta.label);
        if attr.field.is_none() {
            attr.field.clone_from(&meta.field);
        }
    }

    Ok(attr)
}

fn timestamp(
    ty: AttributeType,
    marker: &TimestampMarker,
    path: &str,
) -> Result<AttributeDescriptor, CompileError> {
    if ty != AttributeType::Number {
        return Err(CompileError::InvalidTimestampType {
            at: Location::new(path),
            found: ty.kind_name(),
        });
    }

    let mut attr = AttributeDescriptor {
        required: true,
        default: Some(AttributeDefault::Now),
        field: marker.field.clone(),
        ..AttributeDescriptor::new(ty)
    };

    match marker.kind {
        TimestampKind::Created => attr.read_only = true,
        TimestampKind::Updated => {
            attr.watch_all = true;
            attr.set = Some(AttributeDefault::Now);
        }
    }

    Ok(attr)
}

fn plain(
    graph: &ModelGraph,
    ty: AttributeType,
    property: &Property,
) -> Result<AttributeDescriptor, CompileError> {
    let constraints = resolve_constraints(graph, property)?;
    let validate = synthesize_validator(&constraints, &property.name)?;

    Ok(AttributeDescriptor {
        required: !property.optional,
        default: property
            .default
            .as_ref()
            .and_then(|d| extract_default(graph, d))
            .map(AttributeDefault::Literal),
        validate,
        ..AttributeDescriptor::new(ty)
    })
}

// plain scalar defaults only; structured ones are dropped
fn extract_default(graph: &ModelGraph, default: &DefaultValue) -> Option<Value> {
    match default {
        DefaultValue::String { value } => Some(value.as_str().into()),
        DefaultValue::Number { value } => Some((*value).into()),
        DefaultValue::Boolean { value } => Some((*value).into()),
        DefaultValue::EnumMember { enum_type, member } => {
            let value: Option<Value> = match graph.get(*enum_type) {
                Ok(Type::Enum(node)) => node.member(member).map(|m| m.resolved_value().into()),
                _ => None,
            };

            Some(value.unwrap_or_else(|| member.as_str().into()))
        }
        DefaultValue::Null | DefaultValue::Array { .. } | DefaultValue::Object { .. } => {
            tracing::debug!("dropping structured default");
            None
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use dynamap_schema::{
        node::{Array, Enum, EnumMember, Facets, Number, Record, Scalar, TypeId},
        types::Intrinsic,
    };

    fn entity() -> EntityMeta {
        EntityMeta::new(TypeId(0), "Task")
    }

    #[test]
    fn enum_property_with_member_default() {
        let mut graph = ModelGraph::new();
        let level = graph.add(Enum::named("Priority", ["LOW", "MEDIUM", "HIGH"]));
        let prop = Property::required("priority", level)
            .with_default(DefaultValue::member(level, "MEDIUM"));

        let attr = compose_attribute(&graph, &entity(), &prop).unwrap();
        assert_eq!(
            attr.ty,
            AttributeType::Enum(vec!["LOW".into(), "MEDIUM".into(), "HIGH".into()])
        );
        assert!(attr.required);
        assert_eq!(attr.default, Some(AttributeDefault::Literal("MEDIUM".into())));
        assert!(attr.validate.is_none());
    }

    #[test]
    fn member_defaults_use_the_member_value() {
        let mut graph = ModelGraph::new();
        let level = graph.add(Enum::new(
            "Level",
            vec![EnumMember::with_value("HIGH", Number::Int(3))],
        ));
        let prop =
            Property::optional("level", level).with_default(DefaultValue::member(level, "HIGH"));

        let attr = compose_attribute(&graph, &entity(), &prop).unwrap();
        assert!(!attr.required);
        assert_eq!(attr.default, Some(AttributeDefault::Literal(3i64.into())));
    }

    #[test]
    fn integer_property_gets_a_validator() {
        let mut graph = ModelGraph::new();
        let int = graph.intrinsic(Intrinsic::Int32);
        let prop = Property::required("count", int).with_default(DefaultValue::number(0));

        let attr = compose_attribute(&graph, &entity(), &prop).unwrap();
        assert_eq!(attr.ty, AttributeType::Number);
        assert_eq!(attr.default, Some(AttributeDefault::Literal(0i64.into())));

        let validate = attr.validate.unwrap();
        assert!(validate.check(&Value::from(2.5)).is_err());
        assert!(validate.check(&Value::from(2i64)).is_ok());
    }

    #[test]
    fn set_of_enum_keeps_string_default_without_validator() {
        let mut graph = ModelGraph::new();
        let level = graph.add(Enum::named("Level", ["LOW", "MEDIUM", "HIGH"]));
        let levels = graph.add(Array::of(level));
        let prop =
            Property::required("levels", levels).with_default(DefaultValue::string("MEDIUM"));

        let attr = compose_attribute(&graph, &entity(), &prop).unwrap();
        assert_eq!(
            attr.ty,
            AttributeType::Set(vec!["LOW".into(), "MEDIUM".into(), "HIGH".into()])
        );
        assert_eq!(attr.default, Some(AttributeDefault::Literal("MEDIUM".into())));
        assert!(attr.validate.is_none());
    }

    #[test]
    fn structured_defaults_are_dropped() {
        let mut graph = ModelGraph::new();
        let s = graph.intrinsic(Intrinsic::String);
        let tags = graph.add(Array::of(s));
        let prop = Property::required("tags", tags).with_default(DefaultValue::Array {
            items: vec![DefaultValue::string("a")],
        });

        let attr = compose_attribute(&graph, &entity(), &prop).unwrap();
        assert_eq!(attr.default, None);
    }

    #[test]
    fn update_timestamp_shape() {
        let mut graph = ModelGraph::new();
        let int = graph.intrinsic(Intrinsic::Int64);
        let meta = entity().updated_at("updatedAt");
        let prop = Property::optional("updatedAt", int).with_default(DefaultValue::number(1));

        let attr = compose_attribute(&graph, &meta, &prop).unwrap();
        assert!(attr.required);
        assert!(attr.watch_all);
        assert!(!attr.read_only);
        assert_eq!(attr.default, Some(AttributeDefault::Now));
        assert_eq!(attr.set, Some(AttributeDefault::Now));
        assert!(attr.validate.is_none());
    }

    #[test]
    fn creation_timestamp_shape_with_field_override() {
        let mut graph = ModelGraph::new();
        let int = graph.intrinsic(Intrinsic::Int64);
        let meta = entity()
            .timestamp("createdAt", TimestampMarker::created().field("ct"))
            .label("createdAt", "Created");
        let prop = Property::required("createdAt", int);

        let attr = compose_attribute(&graph, &meta, &prop).unwrap();
        assert!(attr.required && attr.read_only && !attr.watch_all);
        assert_eq!(attr.default, Some(AttributeDefault::Now));
        assert_eq!(attr.set, None);
        assert_eq!(attr.field.as_deref(), Some("ct"));
        assert_eq!(attr.label.as_deref(), Some("Created"));
    }

    #[test]
    fn non_numeric_timestamps_are_rejected() {
        let mut graph = ModelGraph::new();
        let utc = graph.intrinsic(Intrinsic::UtcDateTime);
        let meta = entity().created_at("createdAt");
        let prop = Property::required("createdAt", utc);

        let err = compose_attribute(&graph, &meta, &prop).unwrap_err();
        assert_eq!(err.kind().as_str(), "invalid_timestamp_type");
        assert_eq!(
            err.to_string(),
            "timestamp property Task.createdAt must map to a number, found string"
        );
    }

    #[test]
    fn mapping_errors_name_the_property() {
        let mut graph = ModelGraph::new();
        let bytes = graph.intrinsic(Intrinsic::Bytes);
        let prop = Property::required("blob", bytes);

        let err = compose_attribute(&graph, &entity(), &prop).unwrap_err();
        assert_eq!(err.location().map(Location::as_str), Some("Task.blob"));
    }

    #[test]
    fn label_and_field_come_from_metadata() {
        let mut graph = ModelGraph::new();
        let s = graph.intrinsic(Intrinsic::String);
        let code = graph.add(
            Scalar::derived("code", s).with_facets(Facets::default().pattern("^[A-Z]{3}$")),
        );
        let nested = graph.add(Record::new("Address", vec![Property::required("city", s)]));
        let meta = entity().label("code", "Code").field("code", "c");

        let attr = compose_attribute(&graph, &meta, &Property::optional("code", code)).unwrap();
        assert_eq!(attr.label.as_deref(), Some("Code"));
        assert_eq!(attr.field.as_deref(), Some("c"));
        assert_eq!(
            attr.validate.unwrap().check(&"abc".into()).unwrap_err().message,
            "code must match pattern ^[A-Z]{3}$"
        );

        let attr = compose_attribute(&graph, &meta, &Property::required("home", nested)).unwrap();
        assert_eq!(
            attr.ty,
            AttributeType::Map(vec![("city".into(), AttributeType::String)])
        );
    }
}

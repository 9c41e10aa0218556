use crate::{
    attribute::compose_attribute,
    descriptor::{EntitySchema, IndexDescriptor, KeyDescriptor, ModelIdentity},
    error::{CompileError, Location},
};
use dynamap_config_build::Config;
use dynamap_schema::{
    meta::{EntityMeta, IndexMeta, KeyMeta, Metadata},
    node::{ModelGraph, Record, Type},
    validate::naming::validate_entity_name,
};
use std::collections::BTreeSet;

/// Build one schema per annotated entity, in annotation order.
pub fn assemble_schemas(
    graph: &ModelGraph,
    metadata: &Metadata,
    config: &Config,
) -> Result<Vec<EntitySchema>, CompileError> {
    let mut seen = BTreeSet::new();
    let mut schemas = Vec::with_capacity(metadata.entities().len());

    for entity in metadata.entities() {
        if !seen.insert(entity.entity.as_str()) {
            return Err(CompileError::DuplicateEntity {
                entity: entity.entity.clone(),
            });
        }

        schemas.push(assemble_entity(graph, entity, config)?);
    }

    Ok(schemas)
}

/// Build the schema of a single annotated entity.
pub fn assemble_entity(
    graph: &ModelGraph,
    entity: &EntityMeta,
    config: &Config,
) -> Result<EntitySchema, CompileError> {
    let record = entity_record(graph, entity)?;

    let mut attributes = Vec::with_capacity(record.properties.len());
    for property in &record.properties {
        let attr = compose_attribute(graph, entity, property)?;
        attributes.push((property.name.clone(), attr));
    }

    let mut indexes = Vec::with_capacity(entity.indexes.len());
    for index in &entity.indexes {
        check_composites(entity, record, index)?;
        indexes.push((index.name.clone(), index_descriptor(index)));
    }

    let model = ModelIdentity {
        entity: entity.entity.clone(),
        service: entity
            .service
            .clone()
            .or_else(|| config.model.default_service.clone())
            .unwrap_or_else(|| entity.entity.clone()),
        version: entity
            .version
            .clone()
            .unwrap_or_else(|| config.model.default_version.clone()),
    };

    tracing::debug!(
        entity = %model.entity,
        service = %model.service,
        attributes = attributes.len(),
        indexes = indexes.len(),
        "assembled entity"
    );

    Ok(EntitySchema {
        attributes,
        indexes,
        model,
    })
}

fn entity_record<'a>(
    graph: &'a ModelGraph,
    entity: &EntityMeta,
) -> Result<&'a Record, CompileError> {
    let not_an_entity = |reason: String| CompileError::NotAnEntity {
        at: Location::new(entity.entity.as_str()),
        reason,
    };

    validate_entity_name(&entity.entity).map_err(not_an_entity)?;

    match graph.get(entity.node)? {
        Type::Record(record) if record.array_element().is_none() => Ok(record),
        other => Err(not_an_entity(format!(
            "metadata is attached to {} '{}', expected a record",
            other.kind_name(),
            other.display_name()
        ))),
    }
}

// composites may only name properties declared on the entity itself
fn check_composites(
    entity: &EntityMeta,
    record: &Record,
    index: &IndexMeta,
) -> Result<(), CompileError> {
    match index
        .composite_refs()
        .find(|name| record.property(name).is_none())
    {
        Some(missing) => Err(CompileError::InvalidAccessPatternReference {
            at: Location::new(format!("{}.{}", entity.entity, index.name)),
            entity: entity.entity.clone(),
            index: index.name.clone(),
            property: missing.to_string(),
        }),
        None => Ok(()),
    }
}

fn index_descriptor(index: &IndexMeta) -> IndexDescriptor {
    let prefix = index.index.as_deref().unwrap_or_default();

    IndexDescriptor {
        pk: key_descriptor(&index.pk, prefix, "pk"),
        sk: index.sk.as_ref().map(|sk| key_descriptor(sk, prefix, "sk")),
        index: index.index.clone(),
        collection: index.collection.clone(),
        index_type: index.index_type,
        scope: index.scope.clone(),
    }
}

// `pk`/`sk` on the table index, `<index>pk`/`<index>sk` on secondary ones
fn key_descriptor(key: &KeyMeta, prefix: &str, suffix: &str) -> KeyDescriptor {
    KeyDescriptor {
        field: key
            .field
            .clone()
            .unwrap_or_else(|| format!("{prefix}{suffix}")),
        composite: key.composite.clone(),
        casing: key.casing,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::AttributeType;
    use dynamap_schema::{
        meta::Casing,
        node::{Property, TypeId},
        types::Intrinsic,
    };

    fn job_graph() -> (ModelGraph, TypeId) {
        let mut graph = ModelGraph::new();
        let s = graph.intrinsic(Intrinsic::String);
        let job = graph.add(Record::new(
            "Job",
            vec![
                Property::required("personId", s),
                Property::required("jobId", s),
                Property::optional("title", s),
            ],
        ));

        (graph, job)
    }

    #[test]
    fn secondary_index_fields_default_from_index_name() {
        let (graph, job) = job_graph();
        let meta = EntityMeta::new(job, "Job").index(
            IndexMeta::new("jobs", KeyMeta::composite(["personId"]))
                .sk(KeyMeta::composite(["jobId"]))
                .index("gsi1")
                .collection("jobs"),
        );

        let schema = assemble_entity(&graph, &meta, &Config::default()).unwrap();
        let jobs = schema.index("jobs").unwrap();

        assert_eq!(jobs.pk.field, "gsi1pk");
        assert_eq!(jobs.pk.composite, ["personId"]);
        assert_eq!(jobs.sk.as_ref().map(|k| k.field.as_str()), Some("gsi1sk"));
        assert_eq!(jobs.index.as_deref(), Some("gsi1"));
        assert_eq!(jobs.collection.as_deref(), Some("jobs"));
    }

    #[test]
    fn primary_index_fields_and_explicit_overrides() {
        let (graph, job) = job_graph();
        let meta = EntityMeta::new(job, "Job").index(
            IndexMeta::new("primary", KeyMeta::composite(["jobId"]).casing(Casing::Lower))
                .sk(KeyMeta::composite(Vec::<String>::new()).field("sort")),
        );

        let schema = assemble_entity(&graph, &meta, &Config::default()).unwrap();
        let primary = schema.index("primary").unwrap();

        assert_eq!(primary.pk.field, "pk");
        assert_eq!(primary.pk.casing, Some(Casing::Lower));
        assert_eq!(primary.sk.as_ref().unwrap().field, "sort");
        assert!(primary.index.is_none());
    }

    #[test]
    fn identity_falls_back_to_config_then_entity_name() {
        let (graph, job) = job_graph();
        let mut config = Config::default();

        let schema = assemble_entity(&graph, &EntityMeta::new(job, "Job"), &config).unwrap();
        assert_eq!(schema.model.service, "Job");
        assert_eq!(schema.model.version, "1");
        assert!(schema.indexes.is_empty());

        config.model.default_service = Some("hr".into());
        let schema = assemble_entity(&graph, &EntityMeta::new(job, "Job"), &config).unwrap();
        assert_eq!(schema.model.service, "hr");

        let meta = EntityMeta::new(job, "Job").service("payroll").version("7");
        let schema = assemble_entity(&graph, &meta, &config).unwrap();
        assert_eq!(schema.model.service, "payroll");
        assert_eq!(schema.model.version, "7");
    }

    #[test]
    fn attributes_follow_declaration_order() {
        let (graph, job) = job_graph();
        let schema = assemble_entity(&graph, &EntityMeta::new(job, "Job"), &Config::default())
            .unwrap();

        let names: Vec<_> = schema.attributes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["personId", "jobId", "title"]);
        assert_eq!(schema.attribute("title").unwrap().ty, AttributeType::String);
        assert!(!schema.attribute("title").unwrap().required);
    }

    #[test]
    fn inherited_properties_are_not_attributes() {
        let mut graph = ModelGraph::new();
        let s = graph.intrinsic(Intrinsic::String);
        let base = graph.add(Record::new("Base", vec![Property::required("tenant", s)]));
        let job = graph
            .add(Record::new("Job", vec![Property::required("jobId", s)]).with_base(base));
        let meta = EntityMeta::new(job, "Job")
            .index(IndexMeta::new("byTenant", KeyMeta::composite(["tenant"])));

        let err = assemble_entity(&graph, &meta, &Config::default()).unwrap_err();
        assert_eq!(err.kind().as_str(), "invalid_access_pattern_reference");
        assert!(err.to_string().contains("'tenant'"), "{err}");
    }

    #[test]
    fn unknown_composite_reference_is_rejected() {
        let (graph, job) = job_graph();
        let meta = EntityMeta::new(job, "Job").index(
            IndexMeta::new("jobs", KeyMeta::composite(["personId"]))
                .sk(KeyMeta::composite(["missing"])),
        );

        let err = assemble_entity(&graph, &meta, &Config::default()).unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidAccessPatternReference {
                at: Location::new("Job.jobs"),
                entity: "Job".into(),
                index: "jobs".into(),
                property: "missing".into(),
            }
        );
    }

    #[test]
    fn metadata_on_non_records_is_rejected() {
        let mut graph = ModelGraph::new();
        let s = graph.intrinsic(Intrinsic::String);

        let err = assemble_entity(&graph, &EntityMeta::new(s, "Name"), &Config::default())
            .unwrap_err();
        assert_eq!(err.kind().as_str(), "not_an_entity");
    }

    #[test]
    fn invalid_entity_names_are_rejected() {
        let (graph, job) = job_graph();

        let err = assemble_entity(&graph, &EntityMeta::new(job, "my job"), &Config::default())
            .unwrap_err();
        assert_eq!(err.kind().as_str(), "not_an_entity");
    }

    #[test]
    fn duplicate_entity_names_are_rejected() {
        let (graph, job) = job_graph();
        let metadata = Metadata::new()
            .with_entity(EntityMeta::new(job, "Job"))
            .with_entity(EntityMeta::new(job, "Job"));

        let err = assemble_schemas(&graph, &metadata, &Config::default()).unwrap_err();
        assert_eq!(err.kind().as_str(), "duplicate_entity");
    }

    #[test]
    fn schemas_follow_annotation_order() {
        let (graph, job) = job_graph();
        let metadata = Metadata::new()
            .with_entity(EntityMeta::new(job, "Zeta"))
            .with_entity(EntityMeta::new(job, "Alpha"));

        let schemas = assemble_schemas(&graph, &metadata, &Config::default()).unwrap();
        let names: Vec<_> = schemas.iter().map(EntitySchema::name).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }
}

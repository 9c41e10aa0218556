//! Schema compiler: model graph + metadata → entity schema source.

pub mod assemble;
pub mod attribute;
pub mod constraint;
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod mapper;
pub mod serialize;
pub mod validator;

use crate::{assemble::assemble_schemas, descriptor::EntitySchema, emit::emit_document};
use dynamap_config_build::Config;
use dynamap_schema::{meta::Metadata, node::ModelGraph};

pub use error::{CompileError, CompileErrorKind};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Artifact, SchemaBuilder, compile,
        constraint::{ConstraintSet, resolve_constraints},
        descriptor::*,
        error::{CompileError, CompileErrorKind, Location},
        mapper::map_type,
        serialize::{Record, Source, Value, parse_literal, serialize},
        validator::{Predicate, ValidationError, synthesize_validator},
    };
}

///
/// Artifact
///
/// Result of one compilation pass.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    /// Generated source document.
    pub source: String,

    /// Entity schemas in annotation order.
    pub entities: Vec<EntitySchema>,

    pub uses_custom_type: bool,
}

impl Artifact {
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&EntitySchema> {
        self.entities.iter().find(|e| e.name() == name)
    }
}

/// Compile every annotated entity of `graph` into one source document.
pub fn compile(
    graph: &ModelGraph,
    metadata: &Metadata,
    config: &Config,
) -> Result<Artifact, CompileError> {
    SchemaBuilder::new(graph, metadata, config).generate()
}

///
/// SchemaBuilder
///

pub struct SchemaBuilder<'a> {
    graph: &'a ModelGraph,
    metadata: &'a Metadata,
    config: &'a Config,
}

impl<'a> SchemaBuilder<'a> {
    #[must_use]
    pub const fn new(graph: &'a ModelGraph, metadata: &'a Metadata, config: &'a Config) -> Self {
        Self {
            graph,
            metadata,
            config,
        }
    }

    /// Entity schemas without rendering them.
    pub fn schemas(&self) -> Result<Vec<EntitySchema>, CompileError> {
        assemble_schemas(self.graph, self.metadata, self.config)
    }

    /// Assemble and render; any failure aborts the whole pass.
    pub fn generate(&self) -> Result<Artifact, CompileError> {
        let entities = self.schemas()?;
        let source = emit_document(&entities, self.config)?;
        let uses_custom_type = entities.iter().any(EntitySchema::uses_custom_type);

        tracing::info!(
            entities = entities.len(),
            custom_type = uses_custom_type,
            bytes = source.len(),
            "compiled entity schemas"
        );

        Ok(Artifact {
            source,
            entities,
            uses_custom_type,
        })
    }
}

//! ## Crate layout
//! - `schema`: the typed model graph, intrinsic scalars and the metadata
//!   side-table handed over by a front-end.
//! - `build`: the compiler (type mapping, constraints, validators, descriptor
//!   assembly, literal serializer and document emitter).
//! - `config`: TOML configuration for the emitter.
//!
//! [`compile`] runs one full pass. [`compile_json`] does the same for a model
//! document serialized by an out-of-process front-end.

pub use dynamap_build as build;
pub use dynamap_config_build as config;
pub use dynamap_schema as schema;

mod error;

pub use build::Artifact;
pub use config::Config;
pub use error::{Error, ErrorKind};

use schema::{meta::Metadata, node::ModelGraph};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Model
///
/// A model graph together with its metadata side-table, as exchanged with a
/// front-end.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Model {
    pub graph: ModelGraph,

    #[serde(default)]
    pub metadata: Metadata,
}

impl Model {
    #[must_use]
    pub const fn new(graph: ModelGraph, metadata: Metadata) -> Self {
        Self { graph, metadata }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Compile a model graph and its metadata into a schema artifact.
pub fn compile(
    graph: &ModelGraph,
    metadata: &Metadata,
    config: &Config,
) -> Result<Artifact, Error> {
    Ok(build::compile(graph, metadata, config)?)
}

/// Compile a JSON-serialized [`Model`].
pub fn compile_json(json: &str, config: &Config) -> Result<Artifact, Error> {
    let model = Model::from_json(json)?;
    tracing::debug!(
        types = model.graph.len(),
        entities = model.metadata.entities().len(),
        "loaded model document"
    );

    compile(&model.graph, &model.metadata, config)
}

/// Load configuration from `config_path` and compile.
pub fn compile_with_config_file(
    graph: &ModelGraph,
    metadata: &Metadata,
    config_path: &Path,
) -> Result<Artifact, Error> {
    let config = Config::load(config_path)?;

    compile(graph, metadata, &config)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{Artifact, Config, Error, ErrorKind, Model, compile, compile_json};
    pub use dynamap_build::{
        descriptor::{AttributeDescriptor, AttributeType, EntitySchema, IndexDescriptor},
        serialize::{Value, parse_literal},
    };
    pub use dynamap_schema::prelude::*;
}

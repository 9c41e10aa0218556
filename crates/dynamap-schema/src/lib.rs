//! Typed model graph consumed by the dynamap schema compiler.
//!
//! The graph is an arena of [`Type`](node::Type) nodes addressed by
//! [`TypeId`](node::TypeId). Front-ends populate it once, together with the
//! [`Metadata`](meta::Metadata) side-table, and the compiler only ever reads it.

pub mod error;
pub mod meta;
pub mod node;
pub mod types;
pub mod validate;

/// Maximum length for entity identity names.
pub const MAX_ENTITY_NAME_LEN: usize = 64;

/// Maximum number of links followed when walking a scalar or record base chain.
pub const MAX_CHAIN_DEPTH: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::SchemaError,
        meta::*,
        node::*,
        types::{DateTimeKind, Intrinsic},
    };
    pub use serde::{Deserialize, Serialize};
}

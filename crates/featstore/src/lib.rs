//! Featstore — typed feature-store metadata declarations.
//!
//! This is the public meta-crate. Downstream users depend on
//! **featstore** only; it re-exports the stable surface from
//! `featstore-schema` (declaration nodes, scalar types, the project
//! registry, manifest loading, and errors).

pub use featstore_schema as schema;

pub use featstore_schema::{
    error::{ConfigurationError, ConfigurationErrorKind},
    registry::Project,
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use featstore_schema::prelude::*;
}

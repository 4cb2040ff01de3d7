//! Schema AST, project registry, and validation for feature-store
//! metadata declarations.
//!
//! Declarations are plain immutable value structures (Source, Entity,
//! FeatureView, FeatureService) registered explicitly into a [`registry::Project`]
//! and validated eagerly, so configuration errors surface at the earliest
//! possible point. Nothing here queries a warehouse or serves features;
//! that work belongs to the engine consuming the registry.

pub mod error;
pub mod manifest;
pub mod node;
pub mod obs;
pub mod registry;
pub mod types;
pub mod validate;
pub mod visit;

/// Maximum length for node identifiers.
pub const MAX_NAME_LEN: usize = 64;

/// Maximum length for field identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub(crate) use crate::validate::naming::{check_field_ident, check_ident};
    pub use crate::{
        err,
        error::{ConfigurationError, ConfigurationErrorKind, ErrorTree},
        node::*,
        registry::Project,
        types::ScalarType,
        visit::{ValidateNode, VisitableNode, Visitor},
    };
    pub use serde::{Deserialize, Serialize};
    pub use time::Duration;
}

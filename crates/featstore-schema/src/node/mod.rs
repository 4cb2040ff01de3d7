//! Declaration nodes: immutable value structures describing sources,
//! entities, feature views, and feature services.

pub mod entity;
pub mod feature_service;
pub mod feature_view;
pub mod field;
pub mod source;

pub use entity::Entity;
pub use feature_service::FeatureService;
pub use feature_view::FeatureView;
pub use field::{Field, FieldList};
pub use source::Source;

use std::fmt;

///
/// NodeKind
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum NodeKind {
    Entity,
    FeatureService,
    FeatureView,
    Source,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Entity => "entity",
            Self::FeatureService => "feature service",
            Self::FeatureView => "feature view",
            Self::Source => "source",
        };
        write!(f, "{label}")
    }
}

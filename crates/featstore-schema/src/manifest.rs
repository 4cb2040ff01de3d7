//! TOML manifest loading for project declarations.
//!
//! Manifests are deserialized through strict DTOs so that unknown
//! fields, missing required fields, and wrong value types fail at load
//! time, before anything is registered. A loaded manifest is registered
//! node by node, so the eager registration checks apply to manifest
//! input exactly as they do to in-code declarations.

use crate::{
    error::ConfigurationError,
    node::{Entity, FeatureService, FeatureView, Field, FieldList, Source},
    obs::{self, MetricsEvent},
    registry::Project,
    types::ScalarType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Duration;

///
/// ProjectManifest
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectManifest {
    pub project: String,

    #[serde(default, rename = "source", skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceManifest>,

    #[serde(default, rename = "entity", skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<EntityManifest>,

    #[serde(default, rename = "feature_view", skip_serializing_if = "Vec::is_empty")]
    pub feature_views: Vec<FeatureViewManifest>,

    #[serde(
        default,
        rename = "feature_service",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub feature_services: Vec<FeatureServiceManifest>,
}

impl ProjectManifest {
    /// Register every declared node into a fresh project and validate it.
    pub fn into_project(self) -> Result<Project, ConfigurationError> {
        let mut project = Project::new(self.project);

        for source in self.sources {
            project.register_source(source.into_node())?;
        }
        for entity in self.entities {
            project.register_entity(entity.into_node())?;
        }
        for view in self.feature_views {
            project.register_feature_view(view.into_node())?;
        }
        for service in self.feature_services {
            project.register_feature_service(service.into_node())?;
        }

        project.validate()?;

        obs::record(MetricsEvent::ManifestLoaded {
            nodes: project.len() as u64,
        });

        Ok(project)
    }

    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self {
            project: project.name().to_string(),
            sources: project.sources().map(SourceManifest::from_node).collect(),
            entities: project.entities().map(EntityManifest::from_node).collect(),
            feature_views: project
                .feature_views()
                .map(FeatureViewManifest::from_node)
                .collect(),
            feature_services: project
                .feature_services()
                .map(FeatureServiceManifest::from_node)
                .collect(),
        }
    }
}

///
/// SourceManifest
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceManifest {
    pub name: String,
    pub database: String,
    pub table: String,
    pub event_timestamp_field: String,
    pub created_timestamp_field: String,
}

impl SourceManifest {
    fn into_node(self) -> Source {
        Source {
            name: self.name,
            database: self.database,
            table: self.table,
            event_timestamp_field: self.event_timestamp_field,
            created_timestamp_field: self.created_timestamp_field,
        }
    }

    fn from_node(node: &Source) -> Self {
        Self {
            name: node.name.clone(),
            database: node.database.clone(),
            table: node.table.clone(),
            event_timestamp_field: node.event_timestamp_field.clone(),
            created_timestamp_field: node.created_timestamp_field.clone(),
        }
    }
}

///
/// EntityManifest
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntityManifest {
    pub name: String,
    pub join_keys: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl EntityManifest {
    fn into_node(self) -> Entity {
        Entity {
            name: self.name,
            join_keys: self.join_keys,
            description: self.description,
        }
    }

    fn from_node(node: &Entity) -> Self {
        Self {
            name: node.name.clone(),
            join_keys: node.join_keys.clone(),
            description: node.description.clone(),
        }
    }
}

///
/// FeatureViewManifest
///
/// The manifest spells ttl in whole seconds; a negative value builds a
/// negative duration, which view validation rejects.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureViewManifest {
    pub name: String,
    pub entities: Vec<String>,
    pub ttl_seconds: i64,

    #[serde(default)]
    pub online: bool,

    pub source: String,

    #[serde(rename = "schema")]
    pub fields: Vec<FieldManifest>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl FeatureViewManifest {
    fn into_node(self) -> FeatureView {
        FeatureView {
            name: self.name,
            entities: self.entities,
            ttl: Duration::seconds(self.ttl_seconds),
            schema: FieldList::new(self.fields.into_iter().map(FieldManifest::into_node).collect()),
            online: self.online,
            source: self.source,
            tags: self.tags,
        }
    }

    fn from_node(node: &FeatureView) -> Self {
        Self {
            name: node.name.clone(),
            entities: node.entities.clone(),
            ttl_seconds: node.ttl.whole_seconds(),
            online: node.online,
            source: node.source.clone(),
            fields: node.schema.iter().map(FieldManifest::from_node).collect(),
            tags: node.tags.clone(),
        }
    }
}

///
/// FieldManifest
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldManifest {
    pub name: String,
    pub dtype: ScalarType,
}

impl FieldManifest {
    fn into_node(self) -> Field {
        Field {
            name: self.name,
            dtype: self.dtype,
        }
    }

    fn from_node(node: &Field) -> Self {
        Self {
            name: node.name.clone(),
            dtype: node.dtype,
        }
    }
}

///
/// FeatureServiceManifest
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureServiceManifest {
    pub name: String,
    pub feature_views: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl FeatureServiceManifest {
    fn into_node(self) -> FeatureService {
        FeatureService {
            name: self.name,
            feature_views: self.feature_views,
            description: self.description,
            tags: self.tags,
        }
    }

    fn from_node(node: &FeatureService) -> Self {
        Self {
            name: node.name.clone(),
            feature_views: node.feature_views.clone(),
            description: node.description.clone(),
            tags: node.tags.clone(),
        }
    }
}

impl Project {
    /// Load a project from a TOML manifest.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigurationError> {
        let manifest: ProjectManifest =
            toml::from_str(input).map_err(ConfigurationError::manifest)?;

        manifest.into_project()
    }

    /// Serialize the project back into manifest form.
    pub fn to_toml_string(&self) -> Result<String, ConfigurationError> {
        toml::to_string(&ProjectManifest::from_project(self)).map_err(ConfigurationError::manifest)
    }
}

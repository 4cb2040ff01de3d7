use crate::{
    error::{ConfigurationError, ErrorTree},
    node::{Entity, FeatureService, FeatureView, NodeKind, Source},
    obs::{self, MetricsEvent},
    validate::validate_project,
    visit::{ValidateNode, ValidateVisitor, VisitableNode, Visitor},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Project
///
/// The deployment namespace declarations are registered into. Names are
/// unique per node kind within a project.
///
/// Registration is explicit and eager: each call validates the node's
/// local invariants, rejects duplicate names, and resolves the node's
/// references against what is already registered. Declaration order is
/// therefore source, then entity, then view, then service.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Project {
    name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) sources: BTreeMap<String, Source>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) entities: BTreeMap<String, Entity>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) feature_views: BTreeMap<String, FeatureView>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) feature_services: BTreeMap<String, FeatureService>,
}

impl Project {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    //
    // registration
    //

    pub fn register_source(&mut self, source: Source) -> Result<(), ConfigurationError> {
        Self::validate_node(&source)?;

        if self.sources.contains_key(&source.name) {
            return Err(ConfigurationError::duplicate_name(
                NodeKind::Source,
                &source.name,
            ));
        }

        obs::record(MetricsEvent::NodeRegistered {
            kind: NodeKind::Source,
        });
        self.sources.insert(source.name.clone(), source);

        Ok(())
    }

    pub fn register_entity(&mut self, entity: Entity) -> Result<(), ConfigurationError> {
        Self::validate_node(&entity)?;

        if self.entities.contains_key(&entity.name) {
            return Err(ConfigurationError::duplicate_name(
                NodeKind::Entity,
                &entity.name,
            ));
        }

        obs::record(MetricsEvent::NodeRegistered {
            kind: NodeKind::Entity,
        });
        self.entities.insert(entity.name.clone(), entity);

        Ok(())
    }

    pub fn register_feature_view(&mut self, view: FeatureView) -> Result<(), ConfigurationError> {
        Self::validate_node(&view)?;

        if self.feature_views.contains_key(&view.name) {
            return Err(ConfigurationError::duplicate_name(
                NodeKind::FeatureView,
                &view.name,
            ));
        }

        for entity in &view.entities {
            if !self.entities.contains_key(entity) {
                return Err(ConfigurationError::dangling_reference(
                    NodeKind::FeatureView,
                    &view.name,
                    NodeKind::Entity,
                    entity,
                ));
            }
        }

        if !self.sources.contains_key(&view.source) {
            return Err(ConfigurationError::dangling_reference(
                NodeKind::FeatureView,
                &view.name,
                NodeKind::Source,
                &view.source,
            ));
        }

        obs::record(MetricsEvent::NodeRegistered {
            kind: NodeKind::FeatureView,
        });
        self.feature_views.insert(view.name.clone(), view);

        Ok(())
    }

    pub fn register_feature_service(
        &mut self,
        service: FeatureService,
    ) -> Result<(), ConfigurationError> {
        Self::validate_node(&service)?;

        if self.feature_services.contains_key(&service.name) {
            return Err(ConfigurationError::duplicate_name(
                NodeKind::FeatureService,
                &service.name,
            ));
        }

        for view in &service.feature_views {
            if !self.feature_views.contains_key(view) {
                return Err(ConfigurationError::dangling_reference(
                    NodeKind::FeatureService,
                    &service.name,
                    NodeKind::FeatureView,
                    view,
                ));
            }
        }

        obs::record(MetricsEvent::NodeRegistered {
            kind: NodeKind::FeatureService,
        });
        self.feature_services.insert(service.name.clone(), service);

        Ok(())
    }

    //
    // lookup
    //

    #[must_use]
    pub fn get_source(&self, name: &str) -> Option<&Source> {
        self.sources.get(name)
    }

    #[must_use]
    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    #[must_use]
    pub fn get_feature_view(&self, name: &str) -> Option<&FeatureView> {
        self.feature_views.get(name)
    }

    #[must_use]
    pub fn get_feature_service(&self, name: &str) -> Option<&FeatureService> {
        self.feature_services.get(name)
    }

    /// Sources in name order.
    pub fn sources(&self) -> impl Iterator<Item = &Source> {
        self.sources.values()
    }

    /// Entities in name order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Feature views in name order.
    pub fn feature_views(&self) -> impl Iterator<Item = &FeatureView> {
        self.feature_views.values()
    }

    /// Feature services in name order.
    pub fn feature_services(&self) -> impl Iterator<Item = &FeatureService> {
        self.feature_services.values()
    }

    /// Total number of registered nodes of all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
            + self.entities.len()
            + self.feature_views.len()
            + self.feature_services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    //
    // validation
    //

    /// Run full staged validation over the registry.
    ///
    /// Registration already validates eagerly; this is the gate for
    /// registries rebuilt from serialized input, and a cheap re-check
    /// before handing the project to a consuming engine.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let result = validate_project(self);

        obs::record(MetricsEvent::ValidationRun {
            issues: result.as_ref().err().map_or(0, ErrorTree::len) as u64,
        });

        result.map_err(|tree| ConfigurationError::invalid(&tree))
    }

    // Walk a single node subtree, so list-level invariants (duplicate
    // field names) are enforced at registration time too.
    fn validate_node<N: VisitableNode>(node: &N) -> Result<(), ConfigurationError> {
        let mut visitor = ValidateVisitor::new();
        node.accept(&mut visitor);

        visitor
            .errors
            .result()
            .map_err(|tree| ConfigurationError::invalid(&tree))
    }

    //
    // serialization
    //

    /// Parse a project from JSON and validate it.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigurationError> {
        let project: Self = serde_json::from_str(input).map_err(ConfigurationError::manifest)?;
        project.validate()?;

        Ok(project)
    }

    /// Serialize the project to JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigurationError> {
        serde_json::to_string_pretty(self).map_err(ConfigurationError::manifest)
    }
}

impl ValidateNode for Project {}

impl VisitableNode for Project {
    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in self.sources.values() {
            node.accept(v);
        }
        for node in self.entities.values() {
            node.accept(v);
        }
        for node in self.feature_views.values() {
            node.accept(v);
        }
        for node in self.feature_services.values() {
            node.accept(v);
        }
    }
}

//! Driver statistics demo declarations.
//!
//! The canonical example project: one warehouse source, the driver
//! entity, an hourly statistics view served online, and a service
//! bundling that view for retrieval.

use featstore::prelude::*;
use std::collections::BTreeMap;

/// Warehouse source backing the driver statistics view.
#[must_use]
pub fn driver_stats_source() -> Source {
    Source {
        name: "driver_stats".to_string(),
        database: "FEAST".to_string(),
        table: "DRIVER_STATS".to_string(),
        event_timestamp_field: "event_timestamp".to_string(),
        created_timestamp_field: "created".to_string(),
    }
}

/// The driver entity; features are joined to drivers by `driver_id`.
#[must_use]
pub fn driver() -> Entity {
    Entity {
        name: "driver".to_string(),
        join_keys: vec!["driver_id".to_string()],
        description: "driver id".to_string(),
    }
}

/// Hourly driver statistics, fresh for one day and served online.
#[must_use]
pub fn driver_hourly_stats() -> FeatureView {
    FeatureView {
        name: "driver_hourly_stats".to_string(),
        entities: vec!["driver".to_string()],
        ttl: Duration::days(1),
        schema: FieldList::new(vec![
            Field::new("conv_rate", ScalarType::Float32),
            Field::new("acc_rate", ScalarType::Float32),
            Field::new("avg_daily_trips", ScalarType::Int64),
        ]),
        online: true,
        source: "driver_stats".to_string(),
        tags: BTreeMap::from([("team".to_string(), "driver_performance".to_string())]),
    }
}

/// Retrieval bundle exposing the driver statistics to models.
#[must_use]
pub fn driver_activity() -> FeatureService {
    FeatureService {
        name: "driver_activity".to_string(),
        feature_views: vec!["driver_hourly_stats".to_string()],
        description: "statistics used to rank drivers".to_string(),
        tags: BTreeMap::new(),
    }
}

/// Assemble and validate the demo project.
pub fn project() -> Result<Project, ConfigurationError> {
    let mut project = Project::new("driver_performance");

    project.register_source(driver_stats_source())?;
    project.register_entity(driver())?;
    project.register_feature_view(driver_hourly_stats())?;
    project.register_feature_service(driver_activity())?;

    project.validate()?;

    Ok(project)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_project_declares_and_validates() {
        let project = project().expect("demo project must validate");

        assert_eq!(project.name(), "driver_performance");
        assert_eq!(project.len(), 4);
    }

    #[test]
    fn declared_fields_are_retrievable_by_name_with_their_types() {
        let project = project().expect("demo project must validate");
        let view = project
            .get_feature_view("driver_hourly_stats")
            .expect("view is registered");

        assert_eq!(view.ttl, Duration::days(1));
        assert!(view.online);
        assert_eq!(view.schema.len(), 3);
        assert_eq!(
            view.field("conv_rate").map(|f| f.dtype),
            Some(ScalarType::Float32)
        );
        assert_eq!(
            view.field("acc_rate").map(|f| f.dtype),
            Some(ScalarType::Float32)
        );
        assert_eq!(
            view.field("avg_daily_trips").map(|f| f.dtype),
            Some(ScalarType::Int64)
        );
    }

    #[test]
    fn source_and_entity_resolve_from_the_view() {
        let project = project().expect("demo project must validate");
        let view = project
            .get_feature_view("driver_hourly_stats")
            .expect("view is registered");

        let source = project
            .get_source(&view.source)
            .expect("source reference resolves");
        assert_eq!(source.location(), "FEAST.DRIVER_STATS");
        assert_eq!(source.event_timestamp_field, "event_timestamp");

        let entity = project
            .get_entity(&view.entities[0])
            .expect("entity reference resolves");
        assert_eq!(entity.join_keys, vec!["driver_id".to_string()]);
    }

    #[test]
    fn service_bundles_the_view() {
        let project = project().expect("demo project must validate");
        let service = project
            .get_feature_service("driver_activity")
            .expect("service is registered");

        assert_eq!(
            service.feature_views,
            vec!["driver_hourly_stats".to_string()]
        );
    }
}

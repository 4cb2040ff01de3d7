use featstore_schema::prelude::*;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(_[a-z]{1,8}){0,2}"
}

fn arb_tags() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z]{1,6}", "[a-z ]{0,10}", 0..3)
}

proptest! {
    // Any project built from valid declarations survives both
    // serialization surfaces unchanged.
    #[test]
    fn valid_projects_round_trip(
        source_name in arb_ident(),
        entity_name in arb_ident(),
        view_name in arb_ident(),
        field_names in prop::collection::btree_set(arb_ident(), 1..4),
        ttl_seconds in 0i64..10_000_000,
        online in any::<bool>(),
        tags in arb_tags(),
    ) {
        let project = build_project(
            &source_name,
            &entity_name,
            &view_name,
            &field_names,
            ttl_seconds,
            online,
            tags,
        );

        let json = project.to_json_string().expect("project serializes to json");
        let reparsed = Project::from_json_str(&json).expect("json re-parses");
        prop_assert_eq!(&reparsed, &project);

        let rendered = project.to_toml_string().expect("project serializes to toml");
        let reparsed = Project::from_toml_str(&rendered).expect("toml re-loads");
        prop_assert_eq!(&reparsed, &project);
    }
}

fn build_project(
    source_name: &str,
    entity_name: &str,
    view_name: &str,
    field_names: &BTreeSet<String>,
    ttl_seconds: i64,
    online: bool,
    tags: BTreeMap<String, String>,
) -> Project {
    let mut project = Project::new("round_trip");

    project
        .register_source(Source {
            name: source_name.to_string(),
            database: "FEAST".to_string(),
            table: "ROUND_TRIP".to_string(),
            event_timestamp_field: "event_timestamp".to_string(),
            created_timestamp_field: "created".to_string(),
        })
        .expect("generated source is valid");

    project
        .register_entity(Entity {
            name: entity_name.to_string(),
            join_keys: vec![format!("{entity_name}_id")],
            description: String::new(),
        })
        .expect("generated entity is valid");

    let fields = field_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let dtype = if i % 2 == 0 {
                ScalarType::Float32
            } else {
                ScalarType::Int64
            };
            Field::new(name.clone(), dtype)
        })
        .collect();

    project
        .register_feature_view(FeatureView {
            name: view_name.to_string(),
            entities: vec![entity_name.to_string()],
            ttl: Duration::seconds(ttl_seconds),
            schema: FieldList::new(fields),
            online,
            source: source_name.to_string(),
            tags,
        })
        .expect("generated view is valid");

    project
}

use crate::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

///
/// FeatureService
///
/// A published bundle of feature views retrieved together as one unit.
/// Views are weak references by name, resolved by the project registry.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FeatureService {
    pub name: String,
    pub feature_views: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl ValidateNode for FeatureService {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        check_ident(&mut errs, "name", &self.name);

        if self.feature_views.is_empty() {
            err!(errs, "at least one feature view is required");
        }

        let mut seen = BTreeSet::new();
        for view in &self.feature_views {
            if !seen.insert(view.as_str()) {
                err!(errs, "duplicate feature view reference '{view}'");
            }
        }

        errs.result()
    }
}

impl VisitableNode for FeatureService {
    fn route_key(&self) -> String {
        self.name.clone()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_service_passes() {
        let service = FeatureService {
            name: "driver_activity".to_string(),
            feature_views: vec!["driver_hourly_stats".to_string()],
            description: String::new(),
            tags: BTreeMap::new(),
        };

        assert!(service.validate().is_ok());
    }

    #[test]
    fn at_least_one_view_is_required() {
        let service = FeatureService {
            name: "driver_activity".to_string(),
            feature_views: vec![],
            description: String::new(),
            tags: BTreeMap::new(),
        };

        let errs = service.validate().unwrap_err();
        assert!(errs.to_string().contains("at least one feature view"));
    }
}

use crate::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

///
/// FeatureView
///
/// A named, typed collection of feature fields bound to one or more
/// entities and exactly one source. Entities and the source are weak
/// references by name; the project registry resolves them.
///
/// `ttl` bounds how old a value may be and still be served; zero means
/// no staleness bound. `online` marks the view as eligible for
/// low-latency materialization.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FeatureView {
    pub name: String,
    pub entities: Vec<String>,
    pub ttl: Duration,
    pub schema: FieldList,
    pub online: bool,
    pub source: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl FeatureView {
    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.schema.get(name)
    }
}

impl ValidateNode for FeatureView {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        check_ident(&mut errs, "name", &self.name);

        if self.entities.is_empty() {
            err!(errs, "at least one entity is required");
        }

        let mut seen = BTreeSet::new();
        for entity in &self.entities {
            if !seen.insert(entity.as_str()) {
                err!(errs, "duplicate entity reference '{entity}'");
            }
        }

        if self.ttl.is_negative() {
            err!(errs, "ttl must be non-negative (got {})", self.ttl);
        }

        if self.source.is_empty() {
            err!(errs, "source must not be empty");
        }

        errs.result()
    }
}

impl VisitableNode for FeatureView {
    fn route_key(&self) -> String {
        self.name.clone()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        self.schema.accept(v);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> FeatureView {
        FeatureView {
            name: "driver_hourly_stats".to_string(),
            entities: vec!["driver".to_string()],
            ttl: Duration::days(1),
            schema: FieldList::new(vec![Field::new("conv_rate", ScalarType::Float32)]),
            online: true,
            source: "driver_stats".to_string(),
            tags: BTreeMap::new(),
        }
    }

    #[test]
    fn valid_view_passes() {
        assert!(view().validate().is_ok());
    }

    #[test]
    fn zero_ttl_is_allowed() {
        let mut v = view();
        v.ttl = Duration::ZERO;

        assert!(v.validate().is_ok());
    }

    #[test]
    fn negative_ttl_is_rejected() {
        let mut v = view();
        v.ttl = Duration::seconds(-1);

        let errs = v.validate().unwrap_err();
        assert!(errs.to_string().contains("ttl must be non-negative"));
    }

    #[test]
    fn entities_are_required() {
        let mut v = view();
        v.entities.clear();

        let errs = v.validate().unwrap_err();
        assert!(errs.to_string().contains("at least one entity"));
    }
}

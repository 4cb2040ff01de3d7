use crate::prelude::*;
use std::collections::BTreeSet;

///
/// Entity
///
/// A named join key representing a real-world subject. Feature views
/// reference entities by name; the entity's join keys are the columns
/// used to match subjects to feature rows.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Entity {
    pub name: String,
    pub join_keys: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ValidateNode for Entity {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        check_ident(&mut errs, "name", &self.name);

        if self.join_keys.is_empty() {
            err!(errs, "at least one join key is required");
        }

        // Join keys are warehouse column names; casing is the
        // warehouse's business, uniqueness is ours.
        let mut seen = BTreeSet::new();
        for key in &self.join_keys {
            if key.is_empty() {
                err!(errs, "join keys must not be empty");
            } else if !seen.insert(key.as_str()) {
                err!(errs, "duplicate join key '{key}'");
            }
        }

        errs.result()
    }
}

impl VisitableNode for Entity {
    fn route_key(&self) -> String {
        self.name.clone()
    }
}

///
/// TESTS
///

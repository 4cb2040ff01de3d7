//! Identifier rules and project-wide naming invariants.

use crate::{MAX_FIELD_NAME_LEN, MAX_NAME_LEN, err, error::ErrorTree, registry::Project};
use convert_case::{Case, Casing};

/// Check a node identifier: non-empty, snake_case, length-capped.
pub(crate) fn check_ident(errs: &mut ErrorTree, what: &str, ident: &str) {
    if ident.is_empty() {
        err!(errs, "{what} must not be empty");
        return;
    }
    if ident.len() > MAX_NAME_LEN {
        err!(errs, "{what} '{ident}' exceeds {MAX_NAME_LEN} characters");
    }
    if !ident.is_case(Case::Snake) {
        err!(errs, "{what} '{ident}' must be snake_case");
    }
}

/// Check a field identifier. Same rules as node identifiers but with the
/// field-specific length cap.
pub(crate) fn check_field_ident(errs: &mut ErrorTree, ident: &str) {
    if ident.is_empty() {
        err!(errs, "field name must not be empty");
        return;
    }
    if ident.len() > MAX_FIELD_NAME_LEN {
        err!(
            errs,
            "field name '{ident}' exceeds {MAX_FIELD_NAME_LEN} characters"
        );
    }
    if !ident.is_case(Case::Snake) {
        err!(errs, "field name '{ident}' must be snake_case");
    }
}

// Registered nodes must sit under the key matching their own name. A
// mismatch means the registry was built from tampered serialized input
// rather than through registration.
pub(crate) fn validate_registry_keys(project: &Project, errs: &mut ErrorTree) {
    for (key, node) in &project.sources {
        if key != &node.name {
            err!(errs, "source '{}' is registered under key '{key}'", node.name);
        }
    }
    for (key, node) in &project.entities {
        if key != &node.name {
            err!(errs, "entity '{}' is registered under key '{key}'", node.name);
        }
    }
    for (key, node) in &project.feature_views {
        if key != &node.name {
            err!(
                errs,
                "feature view '{}' is registered under key '{key}'",
                node.name,
            );
        }
    }
    for (key, node) in &project.feature_services {
        if key != &node.name {
            err!(
                errs,
                "feature service '{}' is registered under key '{key}'",
                node.name,
            );
        }
    }
}

///
/// TESTS
///

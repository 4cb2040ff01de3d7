//! Project-wide reference resolution.

use crate::{err, error::ErrorTree, registry::Project};

// Every name a node mentions must resolve within the project. The eager
// registration path already enforces this; the pass re-checks registries
// rebuilt from serialized input.
pub(crate) fn validate_references(project: &Project, errs: &mut ErrorTree) {
    for view in project.feature_views.values() {
        for entity in &view.entities {
            if project.get_entity(entity).is_none() {
                err!(
                    errs,
                    "feature view '{}' references unknown entity '{entity}'",
                    view.name,
                );
            }
        }

        if !view.source.is_empty() && project.get_source(&view.source).is_none() {
            err!(
                errs,
                "feature view '{}' references unknown source '{}'",
                view.name,
                view.source,
            );
        }
    }

    for service in project.feature_services.values() {
        for view in &service.feature_views {
            if project.get_feature_view(view).is_none() {
                err!(
                    errs,
                    "feature service '{}' references unknown feature view '{view}'",
                    service.name,
                );
            }
        }
    }
}

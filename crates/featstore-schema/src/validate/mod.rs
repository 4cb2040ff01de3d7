//! Project validation orchestration and shared helpers.

pub mod naming;
pub mod reference;

use crate::{
    error::ErrorTree,
    registry::Project,
    visit::{ValidateVisitor, VisitableNode},
};

/// Run full project validation in a staged, deterministic order.
pub(crate) fn validate_project(project: &Project) -> Result<(), ErrorTree> {
    // Phase 1: validate each node (structural + local invariants).
    let mut errors = validate_nodes(project);

    // Phase 2: enforce project-wide invariants.
    validate_global(project, &mut errors);

    errors.result()
}

// Validate all nodes via a visitor to retain route-aware error aggregation.
fn validate_nodes(project: &Project) -> ErrorTree {
    let mut visitor = ValidateVisitor::new();
    project.accept(&mut visitor);

    visitor.errors
}

// Run global validation passes that require a full project view.
fn validate_global(project: &Project, errors: &mut ErrorTree) {
    naming::validate_registry_keys(project, errors);
    reference::validate_references(project, errors);
}

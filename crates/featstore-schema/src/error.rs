use crate::node::NodeKind;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// ErrorTree
///
/// Route-aware validation error aggregation. Routes are dotted paths of
/// node identifiers ("driver_hourly_stats.conv_rate"); messages collected
/// without a route sit at the root.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ErrorTree {
    errors: BTreeMap<String, Vec<String>>,
}

impl ErrorTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message at the root route.
    pub fn add(&mut self, message: impl fmt::Display) {
        self.add_at("", message);
    }

    /// Add a message at a specific route.
    pub fn add_at(&mut self, route: impl Into<String>, message: impl fmt::Display) {
        self.errors
            .entry(route.into())
            .or_default()
            .push(message.to_string());
    }

    /// Merge another tree under a route prefix.
    pub fn merge(&mut self, route: &str, other: Self) {
        for (sub, messages) in other.errors {
            let route = match (route.is_empty(), sub.is_empty()) {
                (true, _) => sub,
                (false, true) => route.to_string(),
                (false, false) => format!("{route}.{sub}"),
            };

            self.errors.entry(route).or_default().extend(messages);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of collected messages across all routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (route, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                first = false;

                if route.is_empty() {
                    write!(f, "{message}")?;
                } else {
                    write!(f, "{route}: {message}")?;
                }
            }
        }

        Ok(())
    }
}

/// Push a formatted message onto an [`ErrorTree`] at the root route.
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

///
/// ConfigurationError
///
/// Public error type for everything that can go wrong while declaring,
/// loading, or registering metadata. All failures are load-time and
/// fatal; there is no recovery surface.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{kind}: {message}")]
pub struct ConfigurationError {
    pub kind: ConfigurationErrorKind,
    pub message: String,
}

impl ConfigurationError {
    pub fn new(kind: ConfigurationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn duplicate_name(kind: NodeKind, name: &str) -> Self {
        Self::new(
            ConfigurationErrorKind::DuplicateName,
            format!("duplicate {kind} name '{name}' in project"),
        )
    }

    pub(crate) fn dangling_reference(
        referrer: NodeKind,
        referrer_name: &str,
        target: NodeKind,
        target_name: &str,
    ) -> Self {
        Self::new(
            ConfigurationErrorKind::DanglingReference,
            format!("{referrer} '{referrer_name}' references unknown {target} '{target_name}'"),
        )
    }

    pub(crate) fn invalid(tree: &ErrorTree) -> Self {
        Self::new(
            ConfigurationErrorKind::Invalid,
            format!("validation failed: {tree}"),
        )
    }

    pub(crate) fn manifest(err: impl fmt::Display) -> Self {
        Self::new(ConfigurationErrorKind::Manifest, err.to_string())
    }

    #[must_use]
    pub const fn kind(&self) -> ConfigurationErrorKind {
        self.kind
    }
}

///
/// ConfigurationErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ConfigurationErrorKind {
    /// A declaration references a name not registered in the project.
    DanglingReference,

    /// A name is already registered for the same node kind.
    DuplicateName,

    /// A node-level invariant was violated.
    Invalid,

    /// The manifest could not be deserialized: unknown field, missing
    /// required field, wrong value type, or syntax error.
    Manifest,
}

impl fmt::Display for ConfigurationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DanglingReference => "dangling_reference",
            Self::DuplicateName => "duplicate_name",
            Self::Invalid => "invalid",
            Self::Manifest => "manifest",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_tree_renders_routes_deterministically() {
        let mut errs = ErrorTree::new();
        errs.add_at("b", "second");
        errs.add("first");
        errs.add_at("b", "third");

        assert_eq!(errs.len(), 3);
        assert_eq!(errs.to_string(), "first; b: second; b: third");
    }

    #[test]
    fn merge_prefixes_nested_routes() {
        let mut inner = ErrorTree::new();
        inner.add("root message");
        inner.add_at("conv_rate", "bad field");

        let mut outer = ErrorTree::new();
        outer.merge("driver_hourly_stats", inner);

        assert_eq!(
            outer.to_string(),
            "driver_hourly_stats: root message; driver_hourly_stats.conv_rate: bad field"
        );
    }

    #[test]
    fn empty_tree_is_ok() {
        assert!(ErrorTree::new().result().is_ok());
    }
}

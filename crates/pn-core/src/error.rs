use crate::key::EntityKind;
use thiserror::Error;

pub type PnResult<T> = Result<T, PnError>;

/// Structural errors shared across the porenet crates.
///
/// These are raised immediately at the call that triggers them; the only
/// deferred recovery anywhere in the system is the regeneration engine's
/// bounded retry of models whose dependencies are not yet defined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PnError {
    #[error("Not found: {key}")]
    NotFound { key: String },

    #[error("A model already targets '{target}' (pass replace to overwrite)")]
    DuplicateModel { target: String },

    #[error("Shape mismatch for '{key}': expected {expected} values, got {got}")]
    Shape {
        key: String,
        expected: usize,
        got: usize,
    },

    #[error("Could not resolve dependency '{missing}' for model '{target}' within the pass budget")]
    UnresolvedDependency { target: String, missing: String },

    #[error("Invalid property key '{raw}': expected '<pore|throat>.<name>'")]
    InvalidKey { raw: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Structural problem in a network's topology, reported with the
    /// full message from the network layer.
    #[error("{0}")]
    Topology(String),

    #[error("Model for '{target}' produces {produces} data, but the target key is {target_kind}")]
    KindMismatch {
        target: String,
        produces: EntityKind,
        target_kind: EntityKind,
    },

    #[error("Subdomain of '{host_a}' overlaps '{host_b}' (same role must be disjoint)")]
    SubdomainOverlap { host_a: String, host_b: String },
}

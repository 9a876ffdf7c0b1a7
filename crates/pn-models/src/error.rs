//! Engine error type.

use pn_core::PnError;
use thiserror::Error;

use crate::function::FunctionError;

/// Errors surfaced by the regeneration engine.
///
/// Structural failures (missing keys, shape mismatches, unresolved
/// dependencies) and leaf-function failures are kept distinguishable:
/// both variants are transparent, so a formula error reaches the caller
/// verbatim rather than wrapped in engine context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error(transparent)]
    Structural(#[from] PnError),

    #[error(transparent)]
    Function(#[from] FunctionError),
}

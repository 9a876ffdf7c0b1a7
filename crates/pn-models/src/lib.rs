//! pn-models: the property/model dependency-resolution engine.
//!
//! Quantities like pore diameters or throat conductances are defined as
//! named models: a pure [`ModelFunction`] plus parameter bindings that
//! either carry a constant or reference another stored property. Models
//! live in an insertion-ordered [`ModelRegistry`] on a [`ModelHost`]
//! (a geometry, physics, or phase object scoped to a [`Subdomain`]), and
//! the regeneration engine re-invokes them in dependency order, retrying
//! models whose dependencies are not yet defined for a bounded number of
//! passes rather than requiring callers to declare an explicit graph.

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod function;
pub mod host;
pub mod phase;
pub mod project;
pub mod registry;
pub mod subdomain;

pub use descriptor::{Binding, ModelDescriptor};
pub use engine::{EvalContext, MissingPolicy, RegenConfig};
pub use error::ModelError;
pub use function::{ArgValue, FunctionError, ModelFunction, ResolvedArgs};
pub use host::{HostRole, ModelHost, PropState};
pub use phase::interpolate_data;
pub use project::Project;
pub use registry::ModelRegistry;
pub use subdomain::Subdomain;

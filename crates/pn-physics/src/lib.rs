//! pn-physics: the leaf model-function library.
//!
//! Closed-form pore-scale formulas (geometry fillers, throat vectors,
//! transport conductances), each implemented as a [`ModelFunction`]
//! so the regeneration engine in `pn-models` can invoke them through
//! parameter bindings. All functions here are pure and deterministic.
//!
//! [`ModelFunction`]: pn_models::ModelFunction

pub mod common;
pub mod conductance;
pub mod geometry;
pub mod vectors;

pub use common::MIN_LENGTH;
pub use conductance::{DiffusiveConductance, ElectricalConductance, HydraulicConductance};
pub use geometry::{
    Constant, CylinderArea, NeighborMin, SphereCrossSectionArea, StraightThroatLength,
};
pub use vectors::PoreToPoreVector;

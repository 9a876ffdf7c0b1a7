//! pn-core: stable foundation for porenet.
//!
//! Contains:
//! - ids (stable compact IDs for pores and throats)
//! - key (entity kinds and `"pore.diameter"`-style property keys)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod key;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PnError, PnResult};
pub use ids::*;
pub use key::*;
pub use numeric::*;

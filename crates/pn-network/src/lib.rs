//! pn-network: pore/throat topology and network-level queries.
//!
//! A [`Network`] is built incrementally with [`NetworkBuilder`], validated,
//! and then frozen. It owns the network-level property store (seeded with
//! `pore.coords` and `throat.conns`) and answers the topology queries the
//! model engine and the leaf formulas rely on.

pub mod builder;
pub mod error;
pub mod network;
mod validate;

pub use builder::NetworkBuilder;
pub use error::NetworkError;
pub use network::Network;

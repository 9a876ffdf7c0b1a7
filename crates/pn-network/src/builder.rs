//! Incremental network builder.

use nalgebra::Vector3;
use pn_core::{PnResult, PoreId, Real, ThroatId};

use crate::network::Network;
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Use `add_pore` and `add_throat` to lay out the topology, then call
/// `build()` to validate and freeze it into an immutable [`Network`].
///
/// Throat pore pairs are canonicalized on insertion: the lower pore id is
/// always stored first, whatever order the caller passes.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    coords: Vec<Vector3<Real>>,
    conns: Vec<[u32; 2]>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pore at the given coordinates and return its ID.
    pub fn add_pore(&mut self, coords: [Real; 3]) -> PoreId {
        let id = PoreId::from_index(self.coords.len() as u32);
        self.coords.push(Vector3::from(coords));
        id
    }

    /// Add a throat connecting two pores and return its ID.
    pub fn add_throat(&mut self, p1: PoreId, p2: PoreId) -> ThroatId {
        let id = ThroatId::from_index(self.conns.len() as u32);
        let (lo, hi) = if p1.index() <= p2.index() {
            (p1.index(), p2.index())
        } else {
            (p2.index(), p1.index())
        };
        self.conns.push([lo, hi]);
        id
    }

    /// Build and validate the network, returning an immutable [`Network`].
    pub fn build(self) -> PnResult<Network> {
        validate::validate_conns(self.coords.len(), &self.conns)?;
        Network::from_parts(self.coords, self.conns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let mut b = NetworkBuilder::new();
        let p0 = b.add_pore([0.0, 0.0, 0.0]);
        let p1 = b.add_pore([1.0, 0.0, 0.0]);
        let t0 = b.add_throat(p0, p1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(t0.index(), 0);

        let net = b.build().unwrap();
        assert_eq!(net.num_pores(), 2);
        assert_eq!(net.num_throats(), 1);
    }

    #[test]
    fn conns_are_canonicalized() {
        let mut b = NetworkBuilder::new();
        let p0 = b.add_pore([0.0, 0.0, 0.0]);
        let p1 = b.add_pore([1.0, 0.0, 0.0]);
        // Insert backwards: higher pore first.
        b.add_throat(p1, p0);

        let net = b.build().unwrap();
        assert_eq!(net.conns()[0], [0, 1]);
    }

    #[test]
    fn build_rejects_self_loop() {
        let mut b = NetworkBuilder::new();
        let p0 = b.add_pore([0.0, 0.0, 0.0]);
        b.add_throat(p0, p0);
        assert!(b.build().is_err());
    }

    #[test]
    fn build_rejects_duplicate_throat() {
        let mut b = NetworkBuilder::new();
        let p0 = b.add_pore([0.0, 0.0, 0.0]);
        let p1 = b.add_pore([1.0, 0.0, 0.0]);
        b.add_throat(p0, p1);
        b.add_throat(p1, p0); // Same pair after canonicalization.
        assert!(b.build().is_err());
    }

    #[test]
    fn empty_network_builds() {
        let net = NetworkBuilder::new().build().unwrap();
        assert_eq!(net.num_pores(), 0);
        assert_eq!(net.num_throats(), 0);
    }
}

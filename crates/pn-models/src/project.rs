//! A thin lifecycle container: one network plus its model hosts.

use nalgebra::Vector3;
use pn_core::{EntityKind, PnError, PnResult, PropKey, Real};
use pn_data::PropArray;
use pn_network::Network;

use crate::engine::{EvalContext, RegenConfig};
use crate::error::ModelError;
use crate::host::ModelHost;

/// Owns a network and the geometry/physics/phase hosts attached to it.
///
/// Every host belongs to exactly one project and one network for its
/// lifetime. The project's job is wiring: when one host regenerates, the
/// stores of all sibling hosts (plus the network store) are offered as
/// read-only upstream sources.
#[derive(Debug)]
pub struct Project {
    network: Network,
    hosts: Vec<ModelHost>,
}

impl Project {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            hosts: Vec::new(),
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Attach a host, rejecting subdomains that reference entities the
    /// network does not have and subdomain overlap with any existing
    /// host of the same role.
    pub fn add_host(&mut self, host: ModelHost) -> PnResult<usize> {
        for kind in [EntityKind::Pore, EntityKind::Throat] {
            // Ids are sorted, so the last one is the largest.
            if let Some(last) = host.subdomain().ids(kind).last() {
                if last.idx() >= self.network.count(kind) {
                    return Err(PnError::InvalidArg {
                        what: "subdomain id outside the network",
                    });
                }
            }
        }
        for existing in &self.hosts {
            if existing.role() == host.role() && existing.subdomain().overlaps(host.subdomain()) {
                return Err(PnError::SubdomainOverlap {
                    host_a: host.name().to_string(),
                    host_b: existing.name().to_string(),
                });
            }
        }
        self.hosts.push(host);
        Ok(self.hosts.len() - 1)
    }

    pub fn host(&self, index: usize) -> Option<&ModelHost> {
        self.hosts.get(index)
    }

    pub fn host_mut(&mut self, index: usize) -> Option<&mut ModelHost> {
        self.hosts.get_mut(index)
    }

    pub fn host_by_name(&self, name: &str) -> Option<&ModelHost> {
        self.hosts.iter().find(|h| h.name() == name)
    }

    pub fn hosts(&self) -> &[ModelHost] {
        &self.hosts
    }

    /// Regenerate all models on one host, with every sibling store (and
    /// the network store) readable as an upstream source.
    pub fn regenerate_host(&mut self, index: usize, config: &RegenConfig) -> Result<(), ModelError> {
        if index >= self.hosts.len() {
            return Err(PnError::NotFound {
                key: format!("host #{index}"),
            }
            .into());
        }
        let (before, rest) = self.hosts.split_at_mut(index);
        let (host, after) = rest
            .split_first_mut()
            .ok_or(PnError::InvalidArg { what: "host index" })?;

        let mut ctx = EvalContext::new(&self.network);
        for sibling in before.iter().chain(after.iter()) {
            ctx = ctx.with_upstream(sibling.store());
        }
        host.regenerate_all(&ctx, config)
    }

    /// Regenerate every host, in the order they were added.
    pub fn regenerate_all(&mut self, config: &RegenConfig) -> Result<(), ModelError> {
        for index in 0..self.hosts.len() {
            self.regenerate_host(index, config)?;
        }
        Ok(())
    }

    /// Assemble a full-network-length array for `key` from the hosts that
    /// carry it, scattering each host's subdomain-length data to its
    /// assigned ids. Unassigned entities are NaN-filled.
    pub fn collect(&self, key: &PropKey) -> PnResult<PropArray> {
        let full = self.network.count(key.kind());
        let mut scalar: Option<Vec<Real>> = None;
        let mut vector: Option<Vec<Vector3<Real>>> = None;
        let mut found = false;

        for host in &self.hosts {
            let Some(array) = host.store().try_get(key) else {
                continue;
            };
            found = true;
            let indices = host.subdomain().indices(key.kind());
            match array {
                PropArray::Scalar(values) => {
                    let out = scalar.get_or_insert_with(|| vec![Real::NAN; full]);
                    for (&i, &v) in indices.iter().zip(values.iter()) {
                        out[i] = v;
                    }
                }
                PropArray::Vector(values) => {
                    let out =
                        vector.get_or_insert_with(|| vec![Vector3::repeat(Real::NAN); full]);
                    for (&i, v) in indices.iter().zip(values.iter()) {
                        out[i] = *v;
                    }
                }
                PropArray::Conns(_) => {
                    return Err(PnError::InvalidArg {
                        what: "cannot collect conns arrays across hosts",
                    });
                }
            }
        }

        match (found, scalar, vector) {
            (true, Some(s), None) => Ok(PropArray::Scalar(s)),
            (true, None, Some(v)) => Ok(PropArray::Vector(v)),
            (true, Some(_), Some(_)) => Err(PnError::InvalidArg {
                what: "hosts disagree on the array shape for this key",
            }),
            _ => Err(PnError::NotFound {
                key: key.to_string(),
            }),
        }
    }
}

//! The model host: one object's store, registry, subdomain, and the
//! per-property regeneration state machine.

use std::collections::BTreeMap;

use pn_core::{PnResult, PropKey};
use pn_data::{PropArray, PropertyStore};
use pn_network::Network;

use crate::descriptor::ModelDescriptor;
use crate::registry::ModelRegistry;
use crate::subdomain::Subdomain;

/// What role a host plays in a project. Subdomains must be disjoint within
/// one role; different roles may overlap (a phase spans the whole network
/// that several geometries partition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRole {
    Geometry,
    Physics,
    Phase,
}

/// Lifecycle state of one property key on a host.
///
/// A key with no state entry is undefined (never regenerated, or removed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropState {
    /// Computed (or manually set) and up to date as far as the host knows.
    Defined,
    /// An upstream dependency changed since this was last computed.
    Stale,
}

/// A geometry, physics, or phase object: exclusive owner of one property
/// store and one model registry, scoped to a subdomain of the network.
///
/// All writes go through the host's own API; other objects only ever get
/// the read side via [`store`](ModelHost::store).
#[derive(Debug, Clone)]
pub struct ModelHost {
    name: String,
    role: HostRole,
    subdomain: Subdomain,
    store: PropertyStore,
    registry: ModelRegistry,
    states: BTreeMap<PropKey, PropState>,
}

impl ModelHost {
    /// Create a host over an explicit subdomain. Its store is sized to the
    /// subdomain entity counts.
    pub fn new(name: impl Into<String>, role: HostRole, subdomain: Subdomain) -> Self {
        let store = PropertyStore::new(
            subdomain.count(pn_core::EntityKind::Pore),
            subdomain.count(pn_core::EntityKind::Throat),
        );
        Self {
            name: name.into(),
            role,
            subdomain,
            store,
            registry: ModelRegistry::new(),
            states: BTreeMap::new(),
        }
    }

    /// Create a host spanning the whole network (the usual shape for a
    /// phase, or for a single-geometry project).
    pub fn full(name: impl Into<String>, role: HostRole, network: &Network) -> Self {
        Self::new(
            name,
            role,
            Subdomain::full(network.num_pores(), network.num_throats()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> HostRole {
        self.role
    }

    pub fn subdomain(&self) -> &Subdomain {
        &self.subdomain
    }

    /// Read side of this host's property store.
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Register a model (fails on a duplicate target).
    pub fn add_model(&mut self, descriptor: ModelDescriptor) -> PnResult<()> {
        self.registry.add(descriptor)
    }

    /// Register a model, replacing any previous one for the same target.
    /// The replacement's output overwrites the old data on next
    /// regeneration; until then the stored values are unchanged.
    pub fn replace_model(&mut self, descriptor: ModelDescriptor) -> Option<ModelDescriptor> {
        self.registry.replace(descriptor)
    }

    /// Delete a model. The computed data and its lifecycle state go with
    /// it: the property is removed, not left dangling as stale.
    pub fn remove_model(&mut self, target: &PropKey) -> Option<ModelDescriptor> {
        let removed = self.registry.remove(target);
        if removed.is_some() {
            self.store.remove(target);
            self.states.remove(target);
        }
        removed
    }

    /// Move a model to a new position in regeneration order.
    pub fn move_model(&mut self, target: &PropKey, index: usize) -> PnResult<()> {
        self.registry.move_to(target, index)
    }

    /// Manually write a property array, shape-checked against the
    /// subdomain entity count.
    ///
    /// The key is marked as manually overridden and every registered
    /// transitive dependent that was defined becomes stale.
    pub fn set_data(&mut self, key: PropKey, array: impl Into<PropArray>) -> PnResult<()> {
        self.store.set(key.clone(), array)?;
        self.states.insert(key.clone(), PropState::Defined);
        self.mark_dependents_stale(&key);
        Ok(())
    }

    /// Remove a property array without touching its model (if any).
    pub fn remove_data(&mut self, key: &PropKey) -> Option<PropArray> {
        self.states.remove(key);
        self.store.remove(key)
    }

    /// Lifecycle state for a key; `None` means undefined.
    pub fn state(&self, key: &PropKey) -> Option<PropState> {
        self.states.get(key).copied()
    }

    /// Keys currently marked stale, in key order.
    pub fn stale_keys(&self) -> Vec<PropKey> {
        self.states
            .iter()
            .filter(|(_, s)| **s == PropState::Stale)
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub(crate) fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.store
    }

    pub(crate) fn set_state(&mut self, key: PropKey, state: PropState) {
        self.states.insert(key, state);
    }

    fn mark_dependents_stale(&mut self, key: &PropKey) {
        for dependent in self.registry.transitive_dependents(key) {
            if self.states.get(&dependent) == Some(&PropState::Defined) {
                self.states.insert(dependent, PropState::Stale);
            }
        }
    }
}

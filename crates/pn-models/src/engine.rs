//! The dependency resolver / regeneration engine.
//!
//! Models are executed in registry order. A model whose read of a
//! dependency key comes back "not yet defined" is deferred to the end of
//! the current pass and retried once the rest have run, up to a bounded
//! number of passes; exhaustion means a true ordering cycle or a missing
//! upstream model and raises [`PnError::UnresolvedDependency`]. This keeps
//! registration ergonomic (no explicit dependency graph) at the cost of a
//! few retries.

use pn_core::{PnError, PropKey};
use pn_data::{PropArray, PropertyStore};
use pn_network::Network;
use tracing::debug;

use crate::descriptor::{Binding, ModelDescriptor};
use crate::error::ModelError;
use crate::function::{ArgValue, ResolvedArgs};
use crate::host::{ModelHost, PropState};

/// What a full-regeneration pass does with a model whose dependency is not
/// yet defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissingPolicy {
    /// Defer the model to the next pass (the default, order-tolerant mode).
    Defer,
    /// Fail immediately on the first missing dependency.
    Fail,
}

/// Regeneration tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenConfig {
    /// Upper bound on full-regeneration passes before giving up.
    pub max_passes: usize,
    pub on_missing: MissingPolicy,
}

impl Default for RegenConfig {
    fn default() -> Self {
        Self {
            max_passes: 5,
            on_missing: MissingPolicy::Defer,
        }
    }
}

/// Read-only collaborator stores a host may resolve bindings against.
///
/// Lookup order is always: the host's own store, then the network store,
/// then each upstream store in the order added. Writes never go anywhere
/// but the host's own store.
#[derive(Debug, Clone)]
pub struct EvalContext<'a> {
    network: &'a Network,
    upstream: Vec<&'a PropertyStore>,
}

impl<'a> EvalContext<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self {
            network,
            upstream: Vec::new(),
        }
    }

    /// Add another object's store (e.g. a phase read by a physics host).
    pub fn with_upstream(mut self, store: &'a PropertyStore) -> Self {
        self.upstream.push(store);
        self
    }

    pub fn network(&self) -> &Network {
        self.network
    }

    fn lookup(&self, local: &PropertyStore, key: &PropKey) -> Option<PropArray> {
        if let Some(arr) = local.try_get(key) {
            return Some(arr.clone());
        }
        if let Some(arr) = self.network.store().try_get(key) {
            return Some(arr.clone());
        }
        self.upstream
            .iter()
            .find_map(|store| store.try_get(key).cloned())
    }
}

impl ModelHost {
    /// Regenerate one target property.
    ///
    /// Resolves the model's bindings (local store, then network, then
    /// upstream collaborators), invokes the function, and writes the
    /// result back restricted to this host's subdomain: a result of
    /// subdomain length is stored as-is, a full-network-length result is
    /// sliced to the assigned ids first (entities outside the subdomain
    /// are simply not written, not cleared).
    pub fn regenerate_one(
        &mut self,
        ctx: &EvalContext<'_>,
        target: &PropKey,
    ) -> Result<(), ModelError> {
        let descriptor = self.registry().get(target)?.clone();
        let args = self.resolve_args(ctx, &descriptor)?;
        let result = descriptor.function().call(&args)?;
        self.write_result(ctx, target, result)?;
        debug!(key = %target, function = descriptor.function().name(), "regenerated model");
        Ok(())
    }

    /// Regenerate every registered model, tolerating registration order
    /// that precedes dependencies (see module docs).
    pub fn regenerate_all(
        &mut self,
        ctx: &EvalContext<'_>,
        config: &RegenConfig,
    ) -> Result<(), ModelError> {
        let targets = self.registry().targets();
        self.regenerate_set(ctx, targets, config)
    }

    /// Regenerate exactly the registered transitive dependents of a key
    /// whose data was changed externally.
    pub fn regenerate_dependents(
        &mut self,
        ctx: &EvalContext<'_>,
        changed: &PropKey,
        config: &RegenConfig,
    ) -> Result<(), ModelError> {
        let targets = self.registry().transitive_dependents(changed);
        self.regenerate_set(ctx, targets, config)
    }

    fn regenerate_set(
        &mut self,
        ctx: &EvalContext<'_>,
        targets: Vec<PropKey>,
        config: &RegenConfig,
    ) -> Result<(), ModelError> {
        if config.max_passes == 0 {
            return Err(PnError::InvalidArg {
                what: "max_passes must be at least 1",
            }
            .into());
        }

        let mut pending = targets;
        let mut unresolved: Vec<(PropKey, String)> = Vec::new();

        for pass in 1..=config.max_passes {
            if pending.is_empty() {
                return Ok(());
            }
            let attempted = pending.len();
            let mut deferred: Vec<(PropKey, String)> = Vec::new();

            for target in pending.drain(..) {
                match self.regenerate_one(ctx, &target) {
                    Ok(()) => {}
                    Err(ModelError::Structural(PnError::NotFound { key }))
                        if config.on_missing == MissingPolicy::Defer =>
                    {
                        deferred.push((target, key));
                    }
                    Err(other) => return Err(other),
                }
            }

            if deferred.is_empty() {
                return Ok(());
            }
            debug!(pass, deferred = deferred.len(), attempted, "deferring models to next pass");

            let stuck = deferred.len() == attempted;
            pending = deferred.iter().map(|(k, _)| k.clone()).collect();
            unresolved = deferred;
            if stuck {
                // Nothing succeeded, so nothing can change on a retry.
                break;
            }
        }

        match unresolved.into_iter().next() {
            Some((target, missing)) => Err(PnError::UnresolvedDependency {
                target: target.to_string(),
                missing,
            }
            .into()),
            None => Ok(()),
        }
    }

    fn resolve_args(
        &self,
        ctx: &EvalContext<'_>,
        descriptor: &ModelDescriptor,
    ) -> Result<ResolvedArgs, ModelError> {
        let count = self.subdomain().count(descriptor.target().kind());
        let mut args = ResolvedArgs::new(count);
        for (name, binding) in descriptor.params() {
            match binding {
                Binding::Value(v) => args.insert(name.clone(), ArgValue::Scalar(*v)),
                Binding::Key(key) => {
                    let Some(array) = ctx.lookup(self.store(), key) else {
                        return Err(PnError::NotFound {
                            key: key.to_string(),
                        }
                        .into());
                    };
                    args.insert(name.clone(), ArgValue::Array(array));
                }
            }
        }
        Ok(args)
    }

    fn write_result(
        &mut self,
        ctx: &EvalContext<'_>,
        target: &PropKey,
        result: PropArray,
    ) -> Result<(), ModelError> {
        let kind = target.kind();
        let sub_len = self.subdomain().count(kind);
        let full_len = ctx.network.count(kind);

        let array = if result.len() == sub_len {
            result
        } else if result.len() == full_len {
            let indices = self.subdomain().indices(kind);
            if indices.iter().any(|&i| i >= full_len) {
                return Err(PnError::InvalidArg {
                    what: "subdomain id outside the network",
                }
                .into());
            }
            result.take_indices(&indices)
        } else {
            return Err(PnError::Shape {
                key: target.to_string(),
                expected: sub_len,
                got: result.len(),
            }
            .into());
        };

        self.store_mut().insert_computed(target.clone(), array)?;
        self.set_state(target.clone(), PropState::Defined);
        Ok(())
    }
}

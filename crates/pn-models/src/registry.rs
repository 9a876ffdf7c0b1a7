//! Insertion-ordered model registry.

use indexmap::IndexMap;
use pn_core::{PnError, PnResult, PropKey};

use crate::descriptor::ModelDescriptor;

/// An ordered mapping from target property key to model descriptor.
///
/// Iteration follows insertion order by default; [`move_to`]
/// (ModelRegistry::move_to) lets callers resequence explicitly when the
/// engine's retry-based ordering inference is not enough.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: IndexMap<PropKey, ModelDescriptor>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model. Fails with [`PnError::DuplicateModel`] if a model
    /// already targets the same key; use [`replace`](ModelRegistry::replace)
    /// to overwrite intentionally.
    pub fn add(&mut self, descriptor: ModelDescriptor) -> PnResult<()> {
        let target = descriptor.target().clone();
        if self.models.contains_key(&target) {
            return Err(PnError::DuplicateModel {
                target: target.to_string(),
            });
        }
        self.models.insert(target, descriptor);
        Ok(())
    }

    /// Register a model, replacing (and returning) any previous model for
    /// the same target. A replaced model keeps the original's position in
    /// the iteration order.
    pub fn replace(&mut self, descriptor: ModelDescriptor) -> Option<ModelDescriptor> {
        self.models
            .insert(descriptor.target().clone(), descriptor)
    }

    /// Remove a model, preserving the order of the remaining entries.
    pub fn remove(&mut self, target: &PropKey) -> Option<ModelDescriptor> {
        self.models.shift_remove(target)
    }

    pub fn get(&self, target: &PropKey) -> PnResult<&ModelDescriptor> {
        self.models.get(target).ok_or_else(|| PnError::NotFound {
            key: target.to_string(),
        })
    }

    pub fn contains(&self, target: &PropKey) -> bool {
        self.models.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Targets in iteration order.
    pub fn targets(&self) -> Vec<PropKey> {
        self.models.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropKey, &ModelDescriptor)> {
        self.models.iter()
    }

    /// Move a model to a new position in the iteration order.
    pub fn move_to(&mut self, target: &PropKey, index: usize) -> PnResult<()> {
        let Some(from) = self.models.get_index_of(target) else {
            return Err(PnError::NotFound {
                key: target.to_string(),
            });
        };
        if index >= self.models.len() {
            return Err(PnError::InvalidArg {
                what: "registry reorder index out of range",
            });
        }
        self.models.move_index(from, index);
        Ok(())
    }

    /// Registered models whose bindings reference `key` directly.
    ///
    /// This is a forward scan over descriptors, not a maintained reverse
    /// index, so registration stays purely additive.
    pub fn dependents_of(&self, key: &PropKey) -> Vec<PropKey> {
        self.models
            .iter()
            .filter(|(_, desc)| desc.depends_on(key))
            .map(|(target, _)| target.clone())
            .collect()
    }

    /// Registered transitive dependents of `key`, in registry order.
    pub fn transitive_dependents(&self, key: &PropKey) -> Vec<PropKey> {
        let mut affected: Vec<PropKey> = Vec::new();
        let mut frontier = vec![key.clone()];
        while let Some(current) = frontier.pop() {
            for dep in self.dependents_of(&current) {
                if dep != *key && !affected.contains(&dep) {
                    affected.push(dep.clone());
                    frontier.push(dep);
                }
            }
        }
        // Report in registry order so regeneration visits them as registered.
        self.models
            .keys()
            .filter(|t| affected.contains(t))
            .cloned()
            .collect()
    }
}

//! Model descriptors: target key, function handle, parameter bindings.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use pn_core::{PnError, PnResult, PropKey, Real};

use crate::function::ModelFunction;

/// One formal parameter binding: a literal constant, or a property key to
/// read from a store at call time.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Value(Real),
    Key(PropKey),
}

/// An immutable record tying a target property to a computation.
///
/// Rebinding parameters (by building a replacement descriptor) does not
/// retroactively alter already-computed values; nothing changes until the
/// engine regenerates the target.
#[derive(Clone)]
pub struct ModelDescriptor {
    target: PropKey,
    function: Arc<dyn ModelFunction>,
    params: BTreeMap<String, Binding>,
}

impl ModelDescriptor {
    /// Create a descriptor, checking that the target key's entity kind
    /// matches what the function produces.
    pub fn new(target: PropKey, function: Arc<dyn ModelFunction>) -> PnResult<Self> {
        if function.produces() != target.kind() {
            return Err(PnError::KindMismatch {
                target: target.to_string(),
                produces: function.produces(),
                target_kind: target.kind(),
            });
        }
        Ok(Self {
            target,
            function,
            params: BTreeMap::new(),
        })
    }

    /// Bind a parameter to a literal constant.
    pub fn with_value(mut self, name: impl Into<String>, value: Real) -> Self {
        self.params.insert(name.into(), Binding::Value(value));
        self
    }

    /// Bind a parameter to a property key, resolved from the stores at
    /// regeneration time.
    pub fn with_key(mut self, name: impl Into<String>, key: PropKey) -> Self {
        self.params.insert(name.into(), Binding::Key(key));
        self
    }

    pub fn target(&self) -> &PropKey {
        &self.target
    }

    pub fn function(&self) -> &Arc<dyn ModelFunction> {
        &self.function
    }

    pub fn params(&self) -> &BTreeMap<String, Binding> {
        &self.params
    }

    /// Property keys this model reads.
    pub fn dependency_keys(&self) -> impl Iterator<Item = &PropKey> {
        self.params.values().filter_map(|b| match b {
            Binding::Key(key) => Some(key),
            Binding::Value(_) => None,
        })
    }

    /// Whether any binding references the given key.
    pub fn depends_on(&self, key: &PropKey) -> bool {
        self.dependency_keys().any(|k| k == key)
    }
}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("target", &self.target)
            .field("function", &self.function.name())
            .field("params", &self.params)
            .finish()
    }
}

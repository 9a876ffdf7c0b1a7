//! The leaf calling contract: resolved keyword arguments in, one array out.

use std::collections::BTreeMap;

use nalgebra::Vector3;
use pn_core::{EntityKind, Real};
use pn_data::PropArray;
use thiserror::Error;

/// Failure inside a model function.
///
/// These travel through the engine untouched so callers can tell a formula
/// problem from an engine problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    #[error("Missing argument '{name}'")]
    MissingArg { name: String },

    #[error("Argument '{name}' has the wrong shape: expected {expected}")]
    WrongShape {
        name: String,
        expected: &'static str,
    },

    #[error("Arguments '{a}' ({len_a}) and '{b}' ({len_b}) have mismatched lengths")]
    LengthMismatch {
        a: String,
        b: String,
        len_a: usize,
        len_b: usize,
    },

    #[error("Non-physical value in {what}")]
    NonPhysical { what: String },
}

/// One resolved argument: a literal constant or a copy of a stored array.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Scalar(Real),
    Array(PropArray),
}

/// The fully resolved arguments handed to a [`ModelFunction`].
///
/// `count` is the number of target-kind entities in the calling object's
/// subdomain, for functions (like constants) whose output length cannot be
/// inferred from any input array.
#[derive(Debug, Clone)]
pub struct ResolvedArgs {
    count: usize,
    values: BTreeMap<String, ArgValue>,
}

impl ResolvedArgs {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            values: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    /// Target-kind entity count in the calling subdomain.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// A literal scalar argument.
    pub fn scalar(&self, name: &str) -> Result<Real, FunctionError> {
        match self.values.get(name) {
            Some(ArgValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(FunctionError::WrongShape {
                name: name.into(),
                expected: "scalar constant",
            }),
            None => Err(FunctionError::MissingArg { name: name.into() }),
        }
    }

    /// A scalar-array argument.
    pub fn scalars(&self, name: &str) -> Result<&[Real], FunctionError> {
        match self.values.get(name) {
            Some(ArgValue::Array(arr)) => arr.as_scalar().ok_or(FunctionError::WrongShape {
                name: name.into(),
                expected: "scalar array",
            }),
            Some(_) => Err(FunctionError::WrongShape {
                name: name.into(),
                expected: "scalar array",
            }),
            None => Err(FunctionError::MissingArg { name: name.into() }),
        }
    }

    /// A 3-vector array argument.
    pub fn vectors(&self, name: &str) -> Result<&[Vector3<Real>], FunctionError> {
        match self.values.get(name) {
            Some(ArgValue::Array(arr)) => arr.as_vector().ok_or(FunctionError::WrongShape {
                name: name.into(),
                expected: "vector array",
            }),
            Some(_) => Err(FunctionError::WrongShape {
                name: name.into(),
                expected: "vector array",
            }),
            None => Err(FunctionError::MissingArg { name: name.into() }),
        }
    }

    /// A conns (pore-pair) array argument.
    pub fn conns(&self, name: &str) -> Result<&[[u32; 2]], FunctionError> {
        match self.values.get(name) {
            Some(ArgValue::Array(arr)) => arr.as_conns().ok_or(FunctionError::WrongShape {
                name: name.into(),
                expected: "conns array",
            }),
            Some(_) => Err(FunctionError::WrongShape {
                name: name.into(),
                expected: "conns array",
            }),
            None => Err(FunctionError::MissingArg { name: name.into() }),
        }
    }
}

/// A pure model computation.
///
/// Implementations must be deterministic, must not mutate their inputs
/// (the contract hands them owned copies anyway), and return one array
/// that is either subdomain-length or full-network-length for the entity
/// kind named by [`produces`](ModelFunction::produces); the engine slices
/// full-length results down to the subdomain.
pub trait ModelFunction: Send + Sync {
    /// Function name for debugging and identification.
    fn name(&self) -> &str;

    /// Which entity kind the output array covers.
    fn produces(&self) -> EntityKind;

    /// Compute the target property from resolved arguments.
    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError>;
}

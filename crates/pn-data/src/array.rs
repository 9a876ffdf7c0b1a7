//! Array payloads a property key can hold.

use nalgebra::Vector3;
use pn_core::Real;

/// One array-valued property.
///
/// Three payload shapes cover everything the engine moves around:
/// plain scalars per entity, one 3-vector per entity (`pore.coords`,
/// `throat.vector`), and the `throat.conns` pore-id pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum PropArray {
    Scalar(Vec<Real>),
    Vector(Vec<Vector3<Real>>),
    Conns(Vec<[u32; 2]>),
}

impl PropArray {
    /// Number of entities covered by this array.
    pub fn len(&self) -> usize {
        match self {
            PropArray::Scalar(v) => v.len(),
            PropArray::Vector(v) => v.len(),
            PropArray::Conns(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable payload shape, for error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            PropArray::Scalar(_) => "scalar",
            PropArray::Vector(_) => "vector",
            PropArray::Conns(_) => "conns",
        }
    }

    pub fn as_scalar(&self) -> Option<&[Real]> {
        match self {
            PropArray::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[Vector3<Real>]> {
        match self {
            PropArray::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_conns(&self) -> Option<&[[u32; 2]]> {
        match self {
            PropArray::Conns(v) => Some(v),
            _ => None,
        }
    }

    /// Keep only the positions named by `indices` (0-based), in order.
    ///
    /// Used by the regeneration engine to slice a full-network result down
    /// to a subdomain.
    pub fn take_indices(&self, indices: &[usize]) -> PropArray {
        match self {
            PropArray::Scalar(v) => {
                PropArray::Scalar(indices.iter().map(|&i| v[i]).collect())
            }
            PropArray::Vector(v) => {
                PropArray::Vector(indices.iter().map(|&i| v[i]).collect())
            }
            PropArray::Conns(v) => {
                PropArray::Conns(indices.iter().map(|&i| v[i]).collect())
            }
        }
    }
}

impl From<Vec<Real>> for PropArray {
    fn from(v: Vec<Real>) -> Self {
        PropArray::Scalar(v)
    }
}

impl From<Vec<Vector3<Real>>> for PropArray {
    fn from(v: Vec<Vector3<Real>>) -> Self {
        PropArray::Vector(v)
    }
}

impl From<Vec<[u32; 2]>> for PropArray {
    fn from(v: Vec<[u32; 2]>) -> Self {
        PropArray::Conns(v)
    }
}

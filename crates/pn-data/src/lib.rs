//! pn-data: keyed, array-valued property storage.
//!
//! Every object in a porenet project (network, geometry, physics, phase)
//! owns exactly one [`PropertyStore`]; other objects may read it but never
//! write through it.

pub mod array;
pub mod store;

pub use array::PropArray;
pub use store::PropertyStore;

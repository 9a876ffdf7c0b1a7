//! Subdomain assignments: which entities an object's models apply to.

use pn_core::{EntityKind, Id, PoreId, ThroatId};

/// A sorted, deduplicated set of pore and throat ids owned by one object.
///
/// All regeneration writes are restricted to these ids, which lets several
/// geometry or physics objects coexist on one network without colliding,
/// provided same-role assignments stay disjoint, which
/// [`Project::add_host`](crate::Project::add_host) enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdomain {
    pores: Vec<PoreId>,
    throats: Vec<ThroatId>,
}

impl Subdomain {
    pub fn new(mut pores: Vec<PoreId>, mut throats: Vec<ThroatId>) -> Self {
        pores.sort();
        pores.dedup();
        throats.sort();
        throats.dedup();
        Self { pores, throats }
    }

    /// A subdomain spanning a full network of `num_pores` x `num_throats`.
    pub fn full(num_pores: usize, num_throats: usize) -> Self {
        Self {
            pores: (0..num_pores as u32).map(PoreId::from_index).collect(),
            throats: (0..num_throats as u32).map(ThroatId::from_index).collect(),
        }
    }

    /// Assigned entity ids of a kind, ascending.
    pub fn ids(&self, kind: EntityKind) -> &[Id] {
        match kind {
            EntityKind::Pore => &self.pores,
            EntityKind::Throat => &self.throats,
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.ids(kind).len()
    }

    pub fn contains(&self, kind: EntityKind, id: Id) -> bool {
        self.ids(kind).binary_search(&id).is_ok()
    }

    /// Assigned ids as 0-based usize indices, for slicing full arrays.
    pub fn indices(&self, kind: EntityKind) -> Vec<usize> {
        self.ids(kind).iter().map(|id| id.idx()).collect()
    }

    /// Whether any pore or throat is shared with another subdomain.
    pub fn overlaps(&self, other: &Subdomain) -> bool {
        let hit = |a: &[Id], b: &[Id]| a.iter().any(|id| b.binary_search(id).is_ok());
        hit(&self.pores, &other.pores) || hit(&self.throats, &other.throats)
    }
}

//! The frozen network and its query surface.

use std::collections::BTreeMap;

use nalgebra::Vector3;
use pn_core::{EntityKind, Id, PnError, PnResult, PoreId, PropKey, Real, ThroatId};
use pn_data::{PropArray, PropertyStore};

use crate::error::NetworkError;

/// A validated, immutable pore/throat topology plus the network-level
/// property store.
///
/// Invariant: every conns pair is canonical (`conns[t][0] <= conns[t][1]`),
/// which fixes the positive direction of directional throat quantities as
/// lower-index pore to higher-index pore.
///
/// The store always holds `pore.coords` (vectors) and `throat.conns`
/// (pairs); callers may add further network-wide arrays (e.g. a shared
/// `pore.diameter`) through [`store_mut`](Network::store_mut).
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) coords: Vec<Vector3<Real>>,
    pub(crate) conns: Vec<[u32; 2]>,
    store: PropertyStore,

    /// Offsets for pore->throat adjacency: pore i's throats are in
    /// pore_throats[pore_throat_offsets[i]..pore_throat_offsets[i+1]].
    pore_throat_offsets: Vec<usize>,
    pore_throats: Vec<ThroatId>,

    labels: BTreeMap<(EntityKind, String), Vec<Id>>,
}

impl Network {
    pub(crate) fn from_parts(coords: Vec<Vector3<Real>>, conns: Vec<[u32; 2]>) -> PnResult<Self> {
        let num_pores = coords.len();
        let num_throats = conns.len();

        let (pore_throat_offsets, pore_throats) = build_adjacency(num_pores, &conns);

        let mut store = PropertyStore::new(num_pores, num_throats);
        store.insert_computed(PropKey::pore("coords"), PropArray::Vector(coords.clone()))?;
        store.insert_computed(PropKey::throat("conns"), PropArray::Conns(conns.clone()))?;

        Ok(Self {
            coords,
            conns,
            store,
            pore_throat_offsets,
            pore_throats,
            labels: BTreeMap::new(),
        })
    }

    pub fn num_pores(&self) -> usize {
        self.coords.len()
    }

    pub fn num_throats(&self) -> usize {
        self.conns.len()
    }

    /// Entity count for a given kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Pore => self.num_pores(),
            EntityKind::Throat => self.num_throats(),
        }
    }

    /// Pore center coordinates, indexed by pore id.
    pub fn coords(&self) -> &[Vector3<Real>] {
        &self.coords
    }

    /// Canonical pore pairs, indexed by throat id.
    pub fn conns(&self) -> &[[u32; 2]] {
        &self.conns
    }

    /// The network-level property store (read side).
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// Mutable access for network-wide property arrays.
    ///
    /// Topology keys (`pore.coords`, `throat.conns`) are seeded at build
    /// time; overwriting them does not retroactively change the frozen
    /// adjacency.
    pub fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.store
    }

    /// The pore pair of each listed throat, in canonical order.
    pub fn find_connected_pores(&self, throats: &[ThroatId]) -> Vec<[PoreId; 2]> {
        throats
            .iter()
            .map(|t| {
                let [p1, p2] = self.conns[t.idx()];
                [PoreId::from_index(p1), PoreId::from_index(p2)]
            })
            .collect()
    }

    /// The throat connecting two pores, if any. Argument order is irrelevant.
    pub fn find_connecting_throat(&self, p1: PoreId, p2: PoreId) -> Option<ThroatId> {
        let (lo, hi) = if p1.index() <= p2.index() {
            (p1.index(), p2.index())
        } else {
            (p2.index(), p1.index())
        };
        self.pore_throats_of(PoreId::from_index(lo))
            .iter()
            .copied()
            .find(|t| self.conns[t.idx()] == [lo, hi])
    }

    /// All throats incident to a pore.
    pub fn pore_throats_of(&self, pore: PoreId) -> &[ThroatId] {
        let idx = pore.idx();
        if idx >= self.num_pores() {
            return &[];
        }
        let start = self.pore_throat_offsets[idx];
        let end = self.pore_throat_offsets[idx + 1];
        &self.pore_throats[start..end]
    }

    /// Attach a label to a set of entity ids. Replaces any previous set.
    pub fn set_label(
        &mut self,
        kind: EntityKind,
        label: impl Into<String>,
        ids: &[Id],
    ) -> PnResult<()> {
        let label = label.into();
        let limit = self.count(kind) as u32;
        for id in ids {
            if id.index() >= limit {
                return Err(NetworkError::LabelOutOfRange {
                    label,
                    id: id.index(),
                }
                .into());
            }
        }
        let mut sorted: Vec<Id> = ids.to_vec();
        sorted.sort();
        sorted.dedup();
        self.labels.insert((kind, label), sorted);
        Ok(())
    }

    /// Pore ids carrying a label.
    pub fn pores(&self, label: &str) -> PnResult<&[PoreId]> {
        self.labelled(EntityKind::Pore, label)
    }

    /// Throat ids carrying a label.
    pub fn throats(&self, label: &str) -> PnResult<&[ThroatId]> {
        self.labelled(EntityKind::Throat, label)
    }

    fn labelled(&self, kind: EntityKind, label: &str) -> PnResult<&[Id]> {
        self.labels
            .get(&(kind, label.to_string()))
            .map(Vec::as_slice)
            .ok_or_else(|| PnError::NotFound {
                key: format!("{kind} label '{label}'"),
            })
    }

    /// Dense boolean mask over all entities of a kind, true at the given ids.
    pub fn tomask(&self, kind: EntityKind, ids: &[Id]) -> Vec<bool> {
        let mut mask = vec![false; self.count(kind)];
        for id in ids {
            if id.idx() < mask.len() {
                mask[id.idx()] = true;
            }
        }
        mask
    }
}

/// Build compact adjacency lists: for each pore, its incident throats.
fn build_adjacency(num_pores: usize, conns: &[[u32; 2]]) -> (Vec<usize>, Vec<ThroatId>) {
    let mut per_pore: Vec<Vec<ThroatId>> = vec![Vec::new(); num_pores];
    for (t, &[p1, p2]) in conns.iter().enumerate() {
        let throat = ThroatId::from_index(t as u32);
        per_pore[p1 as usize].push(throat);
        per_pore[p2 as usize].push(throat);
    }

    let mut offsets = Vec::with_capacity(num_pores + 1);
    let mut flat = Vec::new();
    offsets.push(0);
    for list in &mut per_pore {
        list.sort();
        flat.extend_from_slice(list);
        offsets.push(flat.len());
    }

    (offsets, flat)
}

//! The per-object property store.

use std::collections::{BTreeMap, BTreeSet};

use pn_core::{EntityKind, PnError, PnResult, PropKey};

use crate::array::PropArray;

/// String-keyed, shape-checked array storage for one object.
///
/// The store knows how many pores and throats its owner is responsible for
/// (the full network for a Network object, the subdomain size for a
/// geometry or physics object) and rejects arrays of any other length.
///
/// A caller-facing [`set`](PropertyStore::set) records the key as manually
/// overridden so the model engine can treat its dependents as stale; engine
/// writes go through [`insert_computed`](PropertyStore::insert_computed),
/// which clears that mark.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    num_pores: usize,
    num_throats: usize,
    data: BTreeMap<PropKey, PropArray>,
    overridden: BTreeSet<PropKey>,
}

impl PropertyStore {
    pub fn new(num_pores: usize, num_throats: usize) -> Self {
        Self {
            num_pores,
            num_throats,
            data: BTreeMap::new(),
            overridden: BTreeSet::new(),
        }
    }

    pub fn num_pores(&self) -> usize {
        self.num_pores
    }

    pub fn num_throats(&self) -> usize {
        self.num_throats
    }

    /// Expected array length for a key of the given kind.
    pub fn expected_len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Pore => self.num_pores,
            EntityKind::Throat => self.num_throats,
        }
    }

    pub fn has(&self, key: &PropKey) -> bool {
        self.data.contains_key(key)
    }

    pub fn get(&self, key: &PropKey) -> PnResult<&PropArray> {
        self.data.get(key).ok_or_else(|| PnError::NotFound {
            key: key.to_string(),
        })
    }

    pub fn try_get(&self, key: &PropKey) -> Option<&PropArray> {
        self.data.get(key)
    }

    /// Store an array under `key`, marking it as manually overridden.
    ///
    /// Fails with [`PnError::Shape`] when the array length does not match
    /// the expected entity count for the key's kind.
    pub fn set(&mut self, key: PropKey, array: impl Into<PropArray>) -> PnResult<()> {
        let array = array.into();
        self.check_shape(&key, &array)?;
        self.overridden.insert(key.clone());
        self.data.insert(key, array);
        Ok(())
    }

    /// Store a model-computed array under `key`, clearing any override mark.
    pub fn insert_computed(&mut self, key: PropKey, array: PropArray) -> PnResult<()> {
        self.check_shape(&key, &array)?;
        self.overridden.remove(&key);
        self.data.insert(key, array);
        Ok(())
    }

    pub fn remove(&mut self, key: &PropKey) -> Option<PropArray> {
        self.overridden.remove(key);
        self.data.remove(key)
    }

    /// Whether the key's data was last written by a caller rather than a model.
    pub fn is_overridden(&self, key: &PropKey) -> bool {
        self.overridden.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PropKey> {
        self.data.keys()
    }

    fn check_shape(&self, key: &PropKey, array: &PropArray) -> PnResult<()> {
        let expected = self.expected_len(key.kind());
        if array.len() != expected {
            return Err(PnError::Shape {
                key: key.to_string(),
                expected,
                got: array.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PropertyStore {
        PropertyStore::new(3, 2)
    }

    #[test]
    fn set_and_get() {
        let mut s = store();
        s.set(PropKey::pore("diameter"), vec![1.0, 0.5, 1.0]).unwrap();
        let arr = s.get(&PropKey::pore("diameter")).unwrap();
        assert_eq!(arr.as_scalar().unwrap(), &[1.0, 0.5, 1.0]);
    }

    #[test]
    fn set_rejects_wrong_length() {
        let mut s = store();
        let err = s
            .set(PropKey::throat("length"), vec![1.0, 1.0, 1.0])
            .unwrap_err();
        assert_eq!(
            err,
            PnError::Shape {
                key: "throat.length".into(),
                expected: 2,
                got: 3,
            }
        );
    }

    #[test]
    fn get_missing_is_not_found() {
        let s = store();
        let err = s.get(&PropKey::pore("volume")).unwrap_err();
        assert!(matches!(err, PnError::NotFound { .. }));
    }

    #[test]
    fn set_marks_override_and_computed_clears_it() {
        let mut s = store();
        let key = PropKey::pore("diameter");
        s.set(key.clone(), vec![1.0, 1.0, 1.0]).unwrap();
        assert!(s.is_overridden(&key));

        s.insert_computed(key.clone(), PropArray::Scalar(vec![2.0, 2.0, 2.0]))
            .unwrap();
        assert!(!s.is_overridden(&key));
    }

    #[test]
    fn remove_clears_data_and_mark() {
        let mut s = store();
        let key = PropKey::throat("length");
        s.set(key.clone(), vec![1.0, 1.0]).unwrap();
        assert!(s.remove(&key).is_some());
        assert!(!s.has(&key));
        assert!(!s.is_overridden(&key));
        assert!(s.remove(&key).is_none());
    }

    #[test]
    fn kinds_use_their_own_counts() {
        let mut s = store();
        s.set(PropKey::pore("x"), vec![0.0; 3]).unwrap();
        s.set(PropKey::throat("x"), vec![0.0; 2]).unwrap();
        // Same name, different kind: distinct keys.
        assert!(s.has(&PropKey::pore("x")));
        assert!(s.has(&PropKey::throat("x")));
    }
}

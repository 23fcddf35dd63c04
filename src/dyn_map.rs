//! DynMap: linear-scan key/value map over a `DynArray` of `Pair`s.
//!
//! Keys are unique under `==`. Adding an existing key overwrites its value
//! in place, so entries keep their original insertion position; removal
//! shifts later entries left. Every lookup is a front-to-back scan.

use crate::dyn_array::DynArray;
use crate::error::AccessError;
use crate::pair::Pair;
use core::borrow::Borrow;
use core::fmt;
use core::mem;
use core::ops::{Index, IndexMut};

pub struct DynMap<K, V> {
    pairs: DynArray<Pair<K, V>>,
}

impl<K, V> DynMap<K, V> {
    pub const fn new() -> Self {
        Self {
            pairs: DynArray::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pairs.capacity()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Entries in insertion order.
    pub fn as_pairs(&self) -> &[Pair<K, V>] {
        self.pairs.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.pairs.iter().map(|p| (&p.key, &p.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.pairs.iter_mut().map(|p| (&p.key, &mut p.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.pairs.iter().map(|p| &p.key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.pairs.iter().map(|p| &p.value)
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        self.pairs.position(|p| p.key.borrow() == key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        self.find(key).is_some()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        let i = self.find(key)?;
        self.pairs.get(i).map(|p| &p.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        let i = self.find(key)?;
        self.pairs.get_mut(i).map(|p| &mut p.value)
    }

    /// Remove the entry for `key` and return its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, AccessError>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        self.remove_entry(key).map(|p| p.value)
    }

    /// Remove the entry for `key` and return the whole pair.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<Pair<K, V>, AccessError>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        match self.find(key) {
            Some(i) => self.pairs.remove_at(i),
            None => {
                log::debug!("DynMap::remove: key not found");
                Err(AccessError::KeyNotFound)
            }
        }
    }
}

impl<K: PartialEq, V> DynMap<K, V> {
    /// Insert or update. Returns the previous value when `key` was present;
    /// the entry keeps its position in that case.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        match self.find(&key) {
            Some(i) => Some(mem::replace(&mut self.pairs[i].value, value)),
            None => {
                self.pairs.push(Pair::new(key, value));
                None
            }
        }
    }
}

impl<K, V, Q> Index<&Q> for DynMap<K, V>
where
    K: Borrow<Q>,
    Q: ?Sized + PartialEq,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("{}", AccessError::KeyNotFound),
        }
    }
}

impl<K, V, Q> IndexMut<&Q> for DynMap<K, V>
where
    K: Borrow<Q>,
    Q: ?Sized + PartialEq,
{
    fn index_mut(&mut self, key: &Q) -> &mut V {
        match self.get_mut(key) {
            Some(v) => v,
            None => panic!("{}", AccessError::KeyNotFound),
        }
    }
}

impl<K: Clone, V: Clone> Clone for DynMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            pairs: self.pairs.clone(),
        }
    }
}

impl<K, V> Default for DynMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for DynMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V> Extend<(K, V)> for DynMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.add(k, v);
        }
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for DynMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

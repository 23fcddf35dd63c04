//! DynSet: linear-scan set of unique elements in insertion order.

use crate::dyn_array::DynArray;
use crate::error::AccessError;
use core::borrow::Borrow;
use core::fmt;

pub struct DynSet<T> {
    elements: DynArray<T>,
}

impl<T> DynSet<T> {
    pub const fn new() -> Self {
        Self {
            elements: DynArray::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        self.elements.as_slice()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.elements.iter()
    }

    fn find<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        self.elements.position(|e| e.borrow() == value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        self.find(value).is_some()
    }

    /// Remove the element equal to `value` and return it.
    pub fn remove<Q>(&mut self, value: &Q) -> Result<T, AccessError>
    where
        T: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        match self.find(value) {
            Some(i) => self.elements.remove_at(i),
            None => {
                log::debug!("DynSet::remove: element not found");
                Err(AccessError::ElementNotFound)
            }
        }
    }
}

impl<T: PartialEq> DynSet<T> {
    /// Append `value` unless an equal element is already present.
    /// Returns whether it was added.
    pub fn add(&mut self, value: T) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.elements.push(value);
        true
    }
}

impl<T: Clone> Clone for DynSet<T> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
        }
    }
}

impl<T> Default for DynSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> Extend<T> for DynSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}

impl<T: PartialEq> FromIterator<T> for DynSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl<'a, T> IntoIterator for &'a DynSet<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: adding an element twice is idempotent.
    #[test]
    fn add_is_idempotent() {
        let mut s = DynSet::new();
        assert!(s.add(7));
        assert!(!s.add(7));
        assert_eq!(s.len(), 1);
        assert!(s.contains(&7));
    }

    /// Invariant: elements keep insertion order with no implicit sorting.
    #[test]
    fn insertion_order_kept() {
        let s: DynSet<i32> = [3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(s.as_slice(), &[3, 1, 2]);
        assert_eq!(format!("{:?}", s), "{3, 1, 2}");
    }

    /// Invariant: removal shifts later elements left; absent elements report
    /// an error and leave the set unchanged.
    #[test]
    fn remove_present_and_absent() {
        let mut s: DynSet<i32> = (1..=3).collect();
        assert_eq!(s.remove(&2), Ok(2));
        assert!(s.contains(&1));
        assert!(!s.contains(&2));
        assert_eq!(s.as_slice(), &[1, 3]);
        assert_eq!(s.capacity(), 4);

        assert_eq!(s.remove(&2), Err(AccessError::ElementNotFound));
        assert_eq!(s.len(), 2);
    }

    /// Invariant: borrowed queries work against owned elements.
    #[test]
    fn borrowed_queries() {
        let mut s: DynSet<String> = DynSet::new();
        s.add("alpha".to_string());
        s.add("beta".to_string());
        assert!(s.contains("alpha"));
        assert_eq!(s.remove("alpha").as_deref(), Ok("alpha"));
        assert!(!s.contains("alpha"));
        let cloned = s.clone();
        s.clear();
        assert!(s.is_empty());
        assert_eq!((&cloned).into_iter().count(), 1);
    }
}

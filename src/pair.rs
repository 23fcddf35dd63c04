//! Pair: two-field value type ordered by key, then value.

use core::fmt;

/// A key/value tuple. Equality and ordering compare `key` first and fall
/// back to `value` on a tie.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Pair<K, V> {
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }

    pub fn as_refs(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    fn from(p: Pair<K, V>) -> Self {
        p.into_tuple()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Pair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key: {}, Value: {}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::Pair;

    /// Invariant: ordering is lexicographic over (key, value).
    #[test]
    fn lexicographic_order() {
        assert!(Pair::new(1, "b") < Pair::new(2, "a"));
        assert!(Pair::new(1, "a") < Pair::new(1, "b"));
        assert!(Pair::new(1, "a") == Pair::new(1, "a"));
        assert!(Pair::new(1, "a") != Pair::new(1, "b"));
        assert!(Pair::new(2, "a") > Pair::new(1, "z"));
        assert!(Pair::new(1, "a") <= Pair::new(1, "a"));
        assert!(Pair::new(1, "a") >= Pair::new(1, "a"));
    }

    /// Invariant: sorting pairs orders by key and breaks ties by value.
    #[test]
    fn sort_uses_both_fields() {
        let mut v = vec![Pair::new(2, 'a'), Pair::new(1, 'c'), Pair::new(1, 'b')];
        v.sort();
        assert_eq!(
            v,
            vec![Pair::new(1, 'b'), Pair::new(1, 'c'), Pair::new(2, 'a')]
        );
    }

    #[test]
    fn display_and_conversions() {
        let p: Pair<i32, &str> = (3, "three").into();
        assert_eq!(p.to_string(), "Key: 3, Value: three");
        assert_eq!(p.as_refs(), (&3, &"three"));
        let (k, v): (i32, &str) = p.into();
        assert_eq!((k, v), (3, "three"));
        assert_eq!(Pair::<i32, String>::default(), Pair::new(0, String::new()));
    }
}

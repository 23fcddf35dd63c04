#![cfg(test)]

// Property tests for the containers kept inside the crate so they can check
// capacity bookkeeping alongside the public behavior.

use crate::dyn_array::DynArray;
use crate::dyn_map::DynMap;
use crate::dyn_set::DynSet;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum ArrayOp {
    Push(i32),
    RemoveAt(usize),
    Pop,
    Set(usize, i32),
}

fn arb_array_ops() -> impl Strategy<Value = Vec<ArrayOp>> {
    let op = prop_oneof![
        4 => any::<i32>().prop_map(ArrayOp::Push),
        2 => (0usize..40).prop_map(ArrayOp::RemoveAt),
        1 => Just(ArrayOp::Pop),
        1 => (0usize..40, any::<i32>()).prop_map(|(i, v)| ArrayOp::Set(i, v)),
    ];
    proptest::collection::vec(op, 1..120)
}

// Property: DynArray behaves like Vec under push/remove_at/pop/set.
// Invariants checked after every step:
// - contents and len match the Vec model;
// - len <= capacity;
// - capacity is 0 or a power of two, and never decreases;
// - a push into a non-full buffer leaves capacity unchanged.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_dyn_array_matches_vec(ops in arb_array_ops()) {
        let mut sut: DynArray<i32> = DynArray::new();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            let cap_before = sut.capacity();
            match op {
                ArrayOp::Push(v) => {
                    let full = sut.len() == cap_before;
                    sut.push(v);
                    model.push(v);
                    if !full {
                        prop_assert_eq!(sut.capacity(), cap_before);
                    }
                }
                ArrayOp::RemoveAt(i) => {
                    let got = sut.remove_at(i);
                    if i < model.len() {
                        prop_assert_eq!(got, Ok(model.remove(i)));
                    } else {
                        prop_assert!(got.is_err());
                    }
                }
                ArrayOp::Pop => {
                    prop_assert_eq!(sut.pop(), model.pop());
                }
                ArrayOp::Set(i, v) => {
                    match (sut.get_mut(i), model.get_mut(i)) {
                        (Some(a), Some(b)) => { *a = v; *b = v; }
                        (None, None) => {}
                        _ => prop_assert!(false, "get_mut presence mismatch at {}", i),
                    }
                }
            }

            prop_assert_eq!(sut.as_slice(), model.as_slice());
            prop_assert!(sut.len() <= sut.capacity());
            prop_assert!(sut.capacity() >= cap_before);
            prop_assert!(sut.capacity() == 0 || sut.capacity().is_power_of_two());
        }
    }
}

// Property: capacity after n pushes from empty is the smallest doubling
// step (1, 2, 4, ...) that holds n elements.
proptest! {
    #[test]
    fn prop_growth_law(n in 0usize..600) {
        let mut a = DynArray::new();
        for i in 0..n {
            a.push(i);
        }
        let expected = if n == 0 { 0 } else { n.next_power_of_two() };
        prop_assert_eq!(a.capacity(), expected);
        prop_assert_eq!(a.len(), n);
    }
}

// Property: DynMap matches an association-list model.
// - add on an existing key updates in place (position kept);
// - remove on a missing key errors and changes nothing;
// - keys are always distinct.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_dyn_map_assoc_list(ops in proptest::collection::vec((any::<bool>(), 0u8..12, any::<i16>()), 1..80)) {
        let mut sut: DynMap<u8, i16> = DynMap::new();
        let mut model: Vec<(u8, i16)> = Vec::new();

        for (is_add, k, v) in ops {
            if is_add {
                let prev = sut.add(k, v);
                match model.iter_mut().find(|(mk, _)| *mk == k) {
                    Some(slot) => {
                        prop_assert_eq!(prev, Some(slot.1));
                        slot.1 = v;
                    }
                    None => {
                        prop_assert_eq!(prev, None);
                        model.push((k, v));
                    }
                }
            } else {
                let got = sut.remove(&k);
                match model.iter().position(|(mk, _)| *mk == k) {
                    Some(i) => prop_assert_eq!(got, Ok(model.remove(i).1)),
                    None => prop_assert!(got.is_err()),
                }
            }

            let pairs: Vec<(u8, i16)> = sut.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(&pairs, &model);
            prop_assert!(sut.len() <= sut.capacity());
        }
    }
}

// Property: DynSet keeps first-insertion order and never holds duplicates.
proptest! {
    #[test]
    fn prop_dyn_set_dedup(values in proptest::collection::vec(0u8..20, 0..60), removals in proptest::collection::vec(0u8..20, 0..20)) {
        let mut sut: DynSet<u8> = DynSet::new();
        let mut model: Vec<u8> = Vec::new();
        for v in values {
            let added = sut.add(v);
            prop_assert_eq!(added, !model.contains(&v));
            if added {
                model.push(v);
            }
        }
        for r in removals {
            let got = sut.remove(&r);
            match model.iter().position(|m| *m == r) {
                Some(i) => prop_assert_eq!(got, Ok(model.remove(i))),
                None => prop_assert!(got.is_err()),
            }
        }
        prop_assert_eq!(sut.as_slice(), model.as_slice());
    }
}

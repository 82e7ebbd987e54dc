use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Elements are `[key_hi, key_lo, payload]`; only the key takes part in the
/// order, so replacing operations have a payload to overwrite.
const ELEM: usize = 3;

fn by_key(key: &[u8], element: &[u8]) -> Ordering {
    key[..2].cmp(&element[..2])
}

fn element() -> impl Strategy<Value = [u8; ELEM]> {
    (0u8..4, 0u8..16, any::<u8>()).prop_map(|(hi, lo, payload)| [hi, lo, payload])
}

fn validate_array(a: &OrderedArray) {
    assert!(a.len() <= a.capacity(), "len exceeds capacity");
    assert!(
        (a.capacity() + 1).is_power_of_two(),
        "capacity {} is not 2^k - 1",
        a.capacity()
    );
    assert_eq!(
        a.reallocations(),
        a.capacity().count_ones() as usize,
        "one reallocation per capacity step"
    );
    assert_eq!(a.as_bytes().len(), a.len() * ELEM);
    for i in 1..a.len() {
        let (prev, next) = (a.get(i - 1).unwrap(), a.get(i).unwrap());
        assert_eq!(
            by_key(prev, next),
            Ordering::Less,
            "elements {} and {i} out of order",
            i - 1
        );
    }
}

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    #[proptest(weight = 4)]
    Insert(#[proptest(strategy = "element()")] [u8; ELEM]),
    #[proptest(weight = 2)]
    FindOrInsert(#[proptest(strategy = "element()")] [u8; ELEM]),
    #[proptest(weight = 2)]
    InsertOrReplace(#[proptest(strategy = "element()")] [u8; ELEM]),
    FindAndReplace(#[proptest(strategy = "element()")] [u8; ELEM]),
    #[proptest(weight = 3)]
    FindAndDelete(#[proptest(strategy = "element()")] [u8; ELEM]),
    Find(#[proptest(strategy = "element()")] [u8; ELEM]),
    Delete(#[proptest(strategy = "0usize..80")] usize),
    Rotate(
        #[proptest(strategy = "0usize..80")] usize,
        #[proptest(strategy = "0usize..80")] usize,
    ),
}

fn model_key(e: &[u8; ELEM]) -> [u8; 2] {
    [e[0], e[1]]
}

fn model_contents(m: &BTreeMap<[u8; 2], u8>) -> Vec<u8> {
    m.iter().flat_map(|(k, v)| [k[0], k[1], *v]).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_btreemap(ops in prop::collection::vec(any::<Op>(), 0..=1000)) {
        let mut a = OrderedArray::new(ELEM);
        let mut m: BTreeMap<[u8; 2], u8> = BTreeMap::new();

        for op in ops {
            let len_before = a.len();
            match op {
                Op::Insert(e) => {
                    let got = a.insert(&e, &by_key);
                    if m.contains_key(&model_key(&e)) {
                        prop_assert_eq!(got, Err(OrderedArrayError::AlreadyExists));
                    } else {
                        m.insert(model_key(&e), e[2]);
                        let index = got.unwrap();
                        prop_assert_eq!(a.get(index), Some(&e[..]));
                        prop_assert_eq!(a.len(), len_before + 1);
                    }
                }
                Op::FindOrInsert(e) => {
                    let slot = a.find_or_insert(&e, &by_key).unwrap();
                    let existed = m.contains_key(&model_key(&e));
                    prop_assert_eq!(slot.is_inserted(), !existed);
                    m.entry(model_key(&e)).or_insert(e[2]);
                    let stored = a.get(slot.index()).unwrap();
                    prop_assert_eq!(stored[2], m[&model_key(&e)]);
                }
                Op::InsertOrReplace(e) => {
                    let slot = a.insert_or_replace(&e, &by_key).unwrap();
                    let old = m.insert(model_key(&e), e[2]);
                    prop_assert_eq!(slot.is_inserted(), old.is_none());
                    prop_assert_eq!(a.get(slot.index()), Some(&e[..]));
                }
                Op::FindAndReplace(e) => {
                    let got = a.find_and_replace(&e, &by_key);
                    match m.get_mut(&model_key(&e)) {
                        Some(v) => {
                            *v = e[2];
                            prop_assert_eq!(a.get(got.unwrap()), Some(&e[..]));
                        }
                        None => prop_assert_eq!(got, Err(OrderedArrayError::NotFound)),
                    }
                }
                Op::FindAndDelete(e) => {
                    let got = a.find_and_delete(&e, &by_key);
                    if m.remove(&model_key(&e)).is_some() {
                        prop_assert_eq!(got, Ok(()));
                        prop_assert_eq!(a.len(), len_before - 1);
                        prop_assert_eq!(a.find(&e, &by_key), Err(OrderedArrayError::NotFound));
                    } else {
                        prop_assert_eq!(got, Err(OrderedArrayError::NotFound));
                    }
                }
                Op::Find(e) => {
                    let got = a.find(&e, &by_key);
                    match m.get(&model_key(&e)) {
                        Some(&payload) => {
                            let stored = a.get(got.unwrap()).unwrap();
                            prop_assert_eq!(&stored[..2], &e[..2]);
                            prop_assert_eq!(stored[2], payload);
                        }
                        None => prop_assert_eq!(got, Err(OrderedArrayError::NotFound)),
                    }
                }
                Op::Delete(index) => {
                    let key = a.get(index).map(|e| [e[0], e[1]]);
                    let got = a.delete(index);
                    match key {
                        Some(key) => {
                            prop_assert_eq!(got, Ok(()));
                            m.remove(&key);
                        }
                        None => prop_assert!(got.is_err()),
                    }
                }
                Op::Rotate(x, y) => {
                    let before = a.as_bytes().to_vec();
                    let (x, y) = (x.min(y), x.max(y));
                    if a.rotate_right_carry(x, y).is_ok() {
                        prop_assert_eq!(a.get(x), Some(&before[y * ELEM..(y + 1) * ELEM]));
                        a.rotate_left_carry(x, y).unwrap();
                    }
                    prop_assert_eq!(a.as_bytes(), &before[..]);
                }
            }

            prop_assert_eq!(a.len(), m.len());
        }

        validate_array(&a);
        prop_assert_eq!(a.as_bytes(), &model_contents(&m)[..]);
    }

    #[test]
    fn prop_sorted_vec_equivalence(
        ops in prop::collection::vec((any::<bool>(), 0u16..200), 0..=1000)
    ) {
        let mut v: SortedVec<u16> = SortedVec::new();
        let mut m: BTreeSet<u16> = BTreeSet::new();

        for (insert, key) in ops {
            if insert {
                prop_assert_eq!(v.insert(key).is_ok(), m.insert(key));
            } else {
                prop_assert_eq!(v.remove_key(&key).is_ok(), m.remove(&key));
            }
            prop_assert_eq!(v.contains(&key), m.contains(&key));
        }

        let expected: Vec<u16> = m.into_iter().collect();
        prop_assert_eq!(v.as_slice(), &expected[..]);
    }

    #[test]
    fn prop_rotation_round_trip(
        items in prop::collection::vec(any::<u8>(), 1..64),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let (x, y) = {
            let (a, b) = (a.index(items.len()), b.index(items.len()));
            (a.min(b), a.max(b))
        };
        let mut blob = items.clone();
        shift::rotate_right_carry(&mut shift::Blobs::new(&mut blob, 1, items.len()), x, y);
        prop_assert_eq!(blob[x], items[y]);
        prop_assert_eq!(&blob[x + 1..=y], &items[x..y]);
        shift::rotate_left_carry(&mut shift::Blobs::new(&mut blob, 1, items.len()), x, y);
        prop_assert_eq!(blob, items);
    }

    #[test]
    fn prop_find_nearest_is_lower_bound(
        mut items in prop::collection::vec(0u32..500, 0..100),
        key in 0u32..520,
    ) {
        items.sort_unstable();
        let lower = items.partition_point(|&x| x < key);
        let nearest = find_nearest_by(items.len(), |i| key.cmp(&items[i]));
        let expected = match items.get(lower) {
            Some(&x) if x == key => Nearest::Exact(lower),
            Some(_) => Nearest::Before(lower),
            None => Nearest::End,
        };
        prop_assert_eq!(nearest, expected);
    }
}

#[test]
fn growth_boundary_reallocations() {
    let mut a = OrderedArray::new(4);
    for i in 0..1024u32 {
        let len = a.len();
        let before = a.reallocations();
        // Descending keys so every insert also rotates.
        a.insert(&(u32::MAX - i).to_be_bytes(), &Bytewise).unwrap();
        let expected = usize::from(matches!(
            len,
            0 | 1 | 3 | 7 | 15 | 31 | 63 | 127 | 255 | 511 | 1023
        ));
        assert_eq!(a.reallocations() - before, expected, "insert at len {len}");
    }
    assert_eq!(a.capacity(), 2047);
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(
        items: &[T],
        used: &mut [bool],
        out: &mut Vec<T>,
        f: &mut impl FnMut(Vec<T>),
    ) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

fn small_set() -> Vec<[u8; 2]> {
    vec![*b"a\0", *b"b\0", *b"c\0", *b"aa", *b"ab", *b"ba"]
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = small_set();
    let mut expected = keys.clone();
    expected.sort();
    let expected: Vec<u8> = expected.concat();

    for_each_permutation(&keys, |perm| {
        let mut a = OrderedArray::new(2);
        for k in &perm {
            a.insert(k, &Bytewise).unwrap();
        }
        assert_eq!(a.as_bytes(), &expected[..], "insert order {perm:?}");
        for k in &perm {
            assert!(a.contains(k, &Bytewise).unwrap());
        }
    });
}

#[test]
fn exhaustive_delete_order_small_set() {
    let keys = small_set();
    let mut base = OrderedArray::new(2);
    for k in &keys {
        base.insert(k, &Bytewise).unwrap();
    }

    for_each_permutation(&keys, |perm| {
        let mut a = base.clone();
        let mut m: BTreeSet<[u8; 2]> = keys.iter().copied().collect();
        for k in perm {
            assert_eq!(a.find_and_delete(&k, &Bytewise), Ok(()));
            m.remove(&k);
            let expected: Vec<u8> = m.iter().flatten().copied().collect();
            assert_eq!(a.as_bytes(), &expected[..]);
        }
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 7);
    });
}

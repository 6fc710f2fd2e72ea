use super::*;
use crate::case::Matcher;
use crate::node::Node;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_node<V>(node: &Node<V>, m: Matcher) {
    let children = node.children();

    for (index, child) in children.iter().enumerate() {
        if child.is_end_node() {
            assert!(child.value().is_some(), "end node {:?} must hold a value", child.segment());
        } else {
            assert!(child.value().is_none(), "branch {:?} must not hold a value", child.segment());
            assert!(child.children().len() >= 2, "branch {:?} must fork", child.segment());
        }

        if child.segment().is_empty() {
            assert!(child.is_end_node(), "empty-segment child must be a value holder");
        }

        for sibling in &children[index + 1..] {
            assert_eq!(
                m.overlap(child.segment(), sibling.segment()).segment,
                0,
                "siblings {:?} and {:?} share a first character",
                child.segment(),
                sibling.segment(),
            );
        }

        validate_node(child, m);
    }
}

fn validate_map<V>(map: &RadixMap<V>) {
    let root = map.root();

    assert!(root.value().is_none(), "the root never holds a value");
    validate_node(root, Matcher::new(map.case_sensitivity()));
    assert_eq!(map.len(), root.count_end_nodes(), "len must match the number of end nodes");
}

#[derive(Clone, Debug)]
enum Op {
    Add(String, u32),
    Set(String, u32),
    Get(String),
    Prefix(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // a tiny alphabet forces lots of splits and demotions
    "[abAB]{0,5}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        40 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Add(k, v)),
        20 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Set(k, v)),
        25 => key.clone().prop_map(Op::Get),
        15 => key.clone().prop_map(Op::Prefix),
    ];
    prop::collection::vec(op, 0..=300)
}

fn sorted<T: Ord>(iter: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut items: Vec<T> = iter.into_iter().collect();
    items.sort();
    items
}

/// Runs `ops` against a fresh map and a `BTreeMap` keyed by `fold(key)`.
fn check_against_model(
    sensitivity: CaseSensitivity,
    fold: fn(&str) -> String,
    ops: Vec<Op>,
) -> core::result::Result<(), TestCaseError> {
    let mut map = RadixMap::with_case_sensitivity(sensitivity);
    let mut model: BTreeMap<String, u32> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Add(key, value) => {
                let folded = fold(&key);
                let added = !model.contains_key(&folded);
                if added {
                    model.insert(folded, value);
                }
                prop_assert_eq!(map.add(key.as_str(), value), Ok(added));
            }
            Op::Set(key, value) => {
                let previous = model.insert(fold(&key), value);
                prop_assert_eq!(map.set(key.as_str(), value), Ok(previous));
            }
            Op::Get(key) => {
                let expected = model.get(&fold(&key));
                prop_assert_eq!(map.try_get(key.as_str()), Ok(expected));
                prop_assert_eq!(map.contains_key(key.as_str()), Ok(expected.is_some()));
            }
            Op::Prefix(prefix) => {
                let folded = fold(&prefix);
                let expected = sorted(
                    model
                        .iter()
                        .filter(|(key, _)| key.starts_with(&folded))
                        .map(|(_, &value)| value),
                );
                let got = sorted(map.find_by_prefix(prefix.as_str()).unwrap().copied());
                prop_assert_eq!(got, expected);
            }
        }

        prop_assert_eq!(map.len(), model.len());
    }

    validate_map(&map);

    let got = sorted(map.iter().map(|(key, &value)| (fold(&key), value)));
    let expected: Vec<(String, u32)> = model.into_iter().collect();
    prop_assert_eq!(got, expected);

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_case_sensitive(ops in ops_strategy()) {
        check_against_model(CaseSensitivity::Sensitive, str::to_owned, ops)?;
    }

    #[test]
    fn prop_equivalence_case_insensitive(ops in ops_strategy()) {
        check_against_model(CaseSensitivity::Insensitive, str::to_ascii_uppercase, ops)?;
    }

    #[test]
    fn prop_prefix_completeness(keys in prop::collection::btree_set(key_strategy(), 0..40), prefix in key_strategy()) {
        let map: RadixMap<String> = keys.iter().map(|key| (key, key.clone())).collect();

        let got = sorted(map.find_by_prefix(prefix.as_str()).unwrap().cloned());
        let expected = sorted(keys.iter().filter(|key| key.starts_with(prefix.as_str())).cloned());
        prop_assert_eq!(got, expected);

        let got_keys = sorted(map.prefix_iter(prefix.as_str()).unwrap().map(|(key, _)| key));
        let expected_keys = sorted(keys.iter().filter(|key| key.starts_with(prefix.as_str())).cloned());
        prop_assert_eq!(got_keys, expected_keys);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
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

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = ["a", "b", "", "aa", "ab", "ba"];

    for_each_permutation(&keys, |perm| {
        let mut map = RadixMap::new();
        let mut model = BTreeMap::new();

        for (i, key) in perm.into_iter().enumerate() {
            assert_eq!(map.add(key, i), Ok(true));
            model.insert(key.to_owned(), i);
        }

        validate_map(&map);
        assert_eq!(sorted(map.iter().map(|(k, &v)| (k, v))), model.into_iter().collect::<Vec<_>>());
    });
}

//! Tests for the prefix tree.
//!
//! Property-based tests over generated paths plus scenario tests that pin the
//! exact structure left behind by both removal rules.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::data_structures::PrefixTree;
use crate::tests::{chars, path_strategy, payload_strategy};

proptest! {
    // Property: whatever was added last at a path is what find returns
    #[test]
    fn prop_add_then_find_round_trips(path in path_strategy(), payload in payload_strategy()) {
        let mut tree = PrefixTree::new();
        let depth = tree.add(&path, payload.clone()).depth();
        prop_assert_eq!(depth, path.len());

        let (node, matched) = tree.find(&path);
        prop_assert!(matched);
        prop_assert_eq!(node.data(), Some(payload.as_slice()));
        prop_assert_eq!(node.depth(), path.len());
    }

    // Property: re-inserting never grows the tree and the last payload wins
    #[test]
    fn prop_reinsertion_is_idempotent(
        path in path_strategy(),
        first in payload_strategy(),
        second in payload_strategy(),
    ) {
        let mut tree = PrefixTree::new();
        tree.add(&path, first);
        let count = tree.node_count();
        tree.add(&path, second.clone());

        prop_assert_eq!(tree.node_count(), count);
        prop_assert_eq!(tree.find(&path).0.data(), Some(second.as_slice()));
    }

    // Property: every inserted path is found with its latest payload, and
    // find_all_data reports one entry per character in root-to-leaf order
    #[test]
    fn prop_many_paths_keep_their_payloads(
        entries in proptest::collection::vec((path_strategy(), payload_strategy()), 1..20),
    ) {
        let mut tree = PrefixTree::new();
        let mut expected: HashMap<Vec<char>, Vec<u32>> = HashMap::new();
        for (path, payload) in entries {
            tree.add(&path, payload.clone());
            expected.insert(path, payload);
        }

        for (path, payload) in &expected {
            let (node, matched) = tree.find(path);
            prop_assert!(matched);
            prop_assert_eq!(node.data(), Some(payload.as_slice()));

            let (data, matched) = tree.find_all_data(path);
            prop_assert!(matched);
            prop_assert_eq!(data.len(), path.len());
            for (depth, entry) in data.iter().enumerate() {
                let prefix = &path[..=depth];
                prop_assert_eq!(*entry, expected.get(prefix).map(Vec::as_slice));
            }
        }
    }

    // Property: depth always equals parent depth plus one
    #[test]
    fn prop_depth_follows_parent(path in path_strategy()) {
        let mut tree = PrefixTree::new();
        tree.add(&path, vec![1u32]);

        let mut node = tree.find(&path).0;
        while let Some(father) = node.father() {
            prop_assert_eq!(node.depth(), father.depth() + 1);
            prop_assert_eq!(father.child(node.code()), Some(node));
            node = father;
        }
        prop_assert!(node.is_root());
    }

    // Property: pruned removal of everything leaves only the root
    #[test]
    fn prop_pruned_removal_empties_tree(
        paths in proptest::collection::vec(path_strategy(), 1..10),
    ) {
        let mut tree = PrefixTree::new();
        for path in &paths {
            tree.add(path, vec![0u32]);
        }
        for path in &paths {
            tree.remove_pruned(path);
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.node_count(), 1);
    }
}

/// Shared prefixes produce a single payload-less node.
#[test]
fn test_prefix_sharing() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("ab"), vec!["ab"]);
    tree.add(&chars("ac"), vec!["ac"]);

    let (a, matched) = tree.find(&chars("a"));
    assert!(matched);
    assert!(a.data().is_none());
    assert_eq!(a.child_count(), 2);
    assert_eq!(tree.root().child_count(), 1);

    let b = a.child('b').unwrap();
    let c = a.child('c').unwrap();
    assert_ne!(b, c);
    assert_eq!(b.depth(), 2);
    assert_eq!(c.depth(), 2);
    assert_eq!(tree.node_count(), 4);
}

/// Inserting an intermediate path later gives it a payload without touching children.
#[test]
fn test_intermediate_insert_keeps_children() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("abc"), vec![3]);
    tree.add(&chars("a"), vec![1]);

    assert_eq!(tree.find(&chars("a")).0.data(), Some(&[1][..]));
    assert_eq!(tree.find(&chars("abc")).0.data(), Some(&[3][..]));
    assert_eq!(tree.node_count(), 4);
}

/// The empty path targets the root but never matches on lookup.
#[test]
fn test_empty_path() {
    let mut tree = PrefixTree::new();
    let root = tree.add(&[], vec!["root"]);
    assert!(root.is_root());
    assert_eq!(root.data(), Some(&["root"][..]));

    let (node, matched) = tree.find(&[]);
    assert!(!matched);
    assert!(node.is_root());
    assert_eq!(node.data(), Some(&["root"][..]));

    let (data, matched) = tree.find_all_data(&[]);
    assert!(!matched);
    assert!(data.is_empty());

    // Removal goes through find, so the root payload survives
    tree.remove(&[]);
    assert_eq!(tree.root().data(), Some(&["root"][..]));
    assert!(tree.contains(&[]));
}

/// Missing paths return the root, never the deepest partial node.
#[test]
fn test_missing_path_returns_start() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("ab"), vec![2]);

    let (node, matched) = tree.find(&chars("abz"));
    assert!(!matched);
    assert!(node.is_root());

    let (node, matched) = tree.find(&chars("x"));
    assert!(!matched);
    assert!(node.is_root());
}

/// FindAllData returns root-to-leaf payloads, partial ones on a mismatch.
#[test]
fn test_find_all_data_ordering() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("a"), vec!["d1"]);
    tree.add(&chars("ab"), vec!["d2"]);
    tree.add(&chars("abc"), vec!["d3"]);

    let (data, matched) = tree.find_all_data(&chars("abc"));
    assert!(matched);
    assert_eq!(data, vec![Some(&["d1"][..]), Some(&["d2"][..]), Some(&["d3"][..])]);

    let (data, matched) = tree.find_all_data(&chars("abx"));
    assert!(!matched);
    assert_eq!(data, vec![Some(&["d1"][..]), Some(&["d2"][..])]);

    let (data, matched) = tree.find_all_data(&chars("x"));
    assert!(!matched);
    assert!(data.is_empty());
}

/// FindAllData reports payload-less intermediate nodes as `None`.
#[test]
fn test_find_all_data_skips_nothing() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("abc"), vec![3]);

    let (data, matched) = tree.find_all_data(&chars("abc"));
    assert!(matched);
    assert_eq!(data, vec![None, None, Some(&[3][..])]);
}

/// Literal removal: sibling under the shared node survives.
#[test]
fn test_remove_literal_sibling_pair() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("ab"), vec![1]);
    tree.add(&chars("ac"), vec![2]);

    tree.remove(&chars("ab"));

    let (a, matched) = tree.find(&chars("a"));
    assert!(matched);
    assert_eq!(a.child_count(), 1);
    assert!(a.child('b').is_none());
    assert_eq!(tree.find(&chars("ac")).0.data(), Some(&[2][..]));
}

/// Literal removal: the upward walk continues past the first detachment.
#[test]
fn test_remove_literal_cascades_to_root_siblings() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("ab"), vec![1]);
    tree.add(&chars("ac"), vec![2]);
    tree.add(&chars("d"), vec![3]);

    tree.remove(&chars("ab"));

    let root = tree.root();
    assert_eq!(root.child_count(), 1);
    assert!(root.child('a').is_none());
    assert!(!tree.contains(&chars("ac")));
    assert!(tree.contains(&chars("d")));
}

/// Literal removal: a node whose ancestors all have one child stays put.
#[test]
fn test_remove_literal_without_branching_ancestor() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("abc"), vec![1]);
    tree.add(&chars("abcd"), vec![2]);

    tree.remove(&chars("abc"));
    assert!(tree.contains(&chars("abc")));
    assert!(tree.contains(&chars("abcd")));
    assert_eq!(tree.node_count(), 5);
}

/// Literal removal: branching above the target detaches the target's branch there.
#[test]
fn test_remove_literal_branch_higher_up() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("abc"), vec![1]);
    tree.add(&chars("x"), vec![2]);

    tree.remove(&chars("abc"));

    // c and b have single-child parents; the root has two children and loses 'a'
    assert!(!tree.find(&chars("a")).1);
    assert!(tree.contains(&chars("x")));
    assert_eq!(tree.node_count(), 2);
}

/// Literal removal of a missing path changes nothing.
#[test]
fn test_remove_literal_missing_path() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("ab"), vec![1]);
    tree.add(&chars("ac"), vec![2]);

    tree.remove(&chars("az"));
    tree.remove(&chars("abc"));
    assert_eq!(tree.node_count(), 4);
}

/// Pruned removal of the same sibling pair keeps the shared node.
#[test]
fn test_remove_pruned_sibling_pair() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("ab"), vec![1]);
    tree.add(&chars("ac"), vec![2]);
    tree.add(&chars("d"), vec![3]);

    assert!(tree.remove_pruned(&chars("ab")));

    assert!(!tree.find(&chars("ab")).1);
    assert!(tree.contains(&chars("ac")));
    assert!(tree.contains(&chars("d")));
    assert_eq!(tree.node_count(), 4);
}

/// Pruned removal of a single-child chain removes the whole chain.
#[test]
fn test_remove_pruned_single_chain() {
    let mut tree = PrefixTree::new();
    tree.add(&chars("abc"), vec![1]);

    assert!(tree.remove_pruned(&chars("abc")));
    assert!(tree.is_empty());
    assert!(!tree.remove_pruned(&chars("ab")));
}

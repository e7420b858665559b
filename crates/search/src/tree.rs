//! Move trees: a trace of every move a search explored.

use std::collections::btree_map::{self, BTreeMap};

use serde::Serialize;

/// A node mapping each explored move's key to the subtree explored below it.
///
/// Leaves are empty maps. Serializes as nested objects, e.g.
/// `{"e2e4": {"e7e5": {}}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MoveTree<K: Ord> {
    children: BTreeMap<K, MoveTree<K>>,
}

impl<K: Ord> Default for MoveTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> MoveTree<K> {
    pub fn new() -> Self {
        Self {
            children: BTreeMap::new(),
        }
    }

    /// Records `subtree` under `key`, replacing any earlier entry.
    pub fn insert(&mut self, key: K, subtree: MoveTree<K>) {
        self.children.insert(key, subtree);
    }

    /// Shallow merge: each top-level entry of `other` replaces a same-keyed
    /// entry of `self` wholesale.
    pub fn absorb(&mut self, other: MoveTree<K>) {
        self.children.extend(other.children);
    }

    pub fn get(&self, key: &K) -> Option<&MoveTree<K>> {
        self.children.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.children.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.children.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, MoveTree<K>> {
        self.children.iter()
    }

    /// Total number of recorded moves at every level.
    pub fn node_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.node_count())
            .sum()
    }

    /// Length of the longest recorded line.
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }

    /// True if every key of `self`, recursively, is also present in `other`.
    pub fn is_subtree_of(&self, other: &MoveTree<K>) -> bool {
        self.children.iter().all(|(key, child)| match other.get(key) {
            Some(theirs) => child.is_subtree_of(theirs),
            None => false,
        })
    }
}

impl<'a, K: Ord> IntoIterator for &'a MoveTree<K> {
    type Item = (&'a K, &'a MoveTree<K>);
    type IntoIter = btree_map::Iter<'a, K, MoveTree<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl<K: Ord> FromIterator<(K, MoveTree<K>)> for MoveTree<K> {
    fn from_iter<I: IntoIterator<Item = (K, MoveTree<K>)>>(iter: I) -> Self {
        Self {
            children: iter.into_iter().collect(),
        }
    }
}

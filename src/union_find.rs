//! Incremental disjoint-set structure used for Hex connection detection.
//!
//! Elements are registered lazily on first lookup. Some elements can be
//! marked as *ignored*: they take part in connectivity like any other
//! element, but their own member list starts out empty so that group
//! enumeration only shows real board cells.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Union-find with union by rank and grandparent compression.
#[derive(Debug, Clone, Default)]
pub struct UnionFind<T: Copy + Eq + Hash> {
    parent: HashMap<T, T>,
    rank: HashMap<T, u32>,
    groups: HashMap<T, Vec<T>>,
    ignored: HashSet<T>,
}

impl<T: Copy + Eq + Hash> UnionFind<T> {
    /// Creates an empty structure with no ignored elements.
    pub fn new() -> Self {
        UnionFind {
            parent: HashMap::new(),
            rank: HashMap::new(),
            groups: HashMap::new(),
            ignored: HashSet::new(),
        }
    }

    /// Creates an empty structure whose given elements keep empty member lists.
    pub fn with_ignored<I: IntoIterator<Item = T>>(ignored: I) -> Self {
        let mut uf = Self::new();
        uf.set_ignored_elements(ignored);
        uf
    }

    /// Replaces the set of ignored elements.
    pub fn set_ignored_elements<I: IntoIterator<Item = T>>(&mut self, ignored: I) {
        self.ignored = ignored.into_iter().collect();
    }

    fn register(&mut self, x: T) {
        if self.parent.contains_key(&x) {
            return;
        }
        self.parent.insert(x, x);
        self.rank.insert(x, 0);
        let members = if self.ignored.contains(&x) {
            Vec::new()
        } else {
            vec![x]
        };
        self.groups.insert(x, members);
    }

    /// Returns the representative of `x`, registering it if unseen.
    ///
    /// Each step re-parents the current element to its grandparent, which
    /// halves the walked chain instead of flattening it completely.
    pub fn find(&mut self, x: T) -> T {
        self.register(x);

        let mut current = x;
        loop {
            let parent = self.parent[&current];
            if parent == current {
                return current;
            }
            let grandparent = self.parent[&parent];
            if grandparent == parent {
                return parent;
            }
            self.parent.insert(current, grandparent);
            current = grandparent;
        }
    }

    /// Merges the groups of `x` and `y`.
    ///
    /// Returns `false` without touching anything if they were already
    /// connected. On a rank tie the representative of `y` absorbs `x`.
    pub fn join(&mut self, x: T, y: T) -> bool {
        let rep_x = self.find(x);
        let rep_y = self.find(y);
        if rep_x == rep_y {
            return false;
        }

        let rank_x = self.rank[&rep_x];
        let rank_y = self.rank[&rep_y];
        let (winner, loser) = if rank_x > rank_y {
            (rep_x, rep_y)
        } else {
            if rank_x == rank_y {
                *self.rank.entry(rep_y).or_insert(0) += 1;
            }
            (rep_y, rep_x)
        };

        self.parent.insert(loser, winner);
        let absorbed = self.groups.remove(&loser).unwrap_or_default();
        self.groups.entry(winner).or_default().extend(absorbed);
        true
    }

    /// Returns true if `x` and `y` are in the same group.
    pub fn connected(&mut self, x: T, y: T) -> bool {
        self.find(x) == self.find(y)
    }

    /// Representative lookup that neither registers nor compresses.
    ///
    /// Unseen elements are their own representative.
    pub fn root(&self, x: T) -> T {
        let mut current = x;
        while let Some(&parent) = self.parent.get(&current) {
            if parent == current {
                break;
            }
            current = parent;
        }
        current
    }

    /// Read-only variant of [`connected`](Self::connected).
    pub fn same_set(&self, x: T, y: T) -> bool {
        self.root(x) == self.root(y)
    }

    /// Returns true if `x` has been registered.
    pub fn contains(&self, x: T) -> bool {
        self.parent.contains_key(&x)
    }

    /// Representative → member list for every live group.
    pub fn groups(&self) -> &HashMap<T, Vec<T>> {
        &self.groups
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true if no element has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

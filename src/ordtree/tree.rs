//! The order-statistic red-black tree itself: search, insert, remove, and
//! positional (rank) access, all O(log n).
//!
//! Implementation follows the textbook top-down red-black algorithms
//! (insert fix-up by uncle color, delete fix-up by sibling color), adapted
//! to the arena/`NodeId` representation in [`super::node`] instead of
//! owning `Box` pointers with a back-referencing parent pointer. Every
//! rotation recomputes `count` for exactly the two nodes it touches; every
//! insert/remove walks the ancestor chain once to keep `count` correct
//! everywhere above the change.

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::Error;
use crate::ordtree::iter::{Iter, Keys, Values};
use crate::ordtree::node::{Color, Node, NodeId};

/// An ordered `(key, value)` map backed by a red-black tree where every
/// node additionally tracks its subtree size, giving O(log n) positional
/// (rank) access alongside the usual keyed operations.
///
/// Single-writer, single-thread only: concurrent mutation is not
/// synchronized, and iterators are invalidated (silently — detection is
/// not attempted) by a concurrent structural change. Do not mutate while
/// iterating.
pub struct OrderStatRBTree<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
    hash_cache: Cell<Option<u64>>,
}

impl<K, V> Default for OrderStatRBTree<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        OrderStatRBTree::new()
    }
}

impl<K, V> OrderStatRBTree<K, V>
where
    K: Ord,
{
    pub fn new() -> Self {
        OrderStatRBTree {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            hash_cache: Cell::new(None),
        }
    }

    /// `hint` is a minimum-capacity hint. Capacity is effectively unbounded
    /// and governed by available memory, so the hint is accepted and
    /// ignored, matching the contract for this collection.
    pub fn with_capacity(_hint: usize) -> Self {
        OrderStatRBTree::new()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `(key, value)`, replacing and returning the old value if
    /// `key` was already present. O(log n).
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut cur = self.root;
        let mut parent = None;
        let mut went_left = false;
        while let Some(id) = cur {
            match key.cmp(&self.node(id).key) {
                Ordering::Less => {
                    parent = Some(id);
                    went_left = true;
                    cur = self.node(id).left;
                }
                Ordering::Greater => {
                    parent = Some(id);
                    went_left = false;
                    cur = self.node(id).right;
                }
                Ordering::Equal => {
                    let old = std::mem::replace(&mut self.node_mut(id).value, value);
                    self.invalidate_hash();
                    return Some(old);
                }
            }
        }

        let new_id = self.alloc(Node::leaf(key, value));
        self.node_mut(new_id).parent = parent;
        match parent {
            None => self.root = Some(new_id),
            Some(p) if went_left => self.node_mut(p).left = Some(new_id),
            Some(p) => self.node_mut(p).right = Some(new_id),
        }
        self.bump_counts_upward(parent, 1);
        self.len += 1;
        self.insert_fixup(new_id);
        self.invalidate_hash();
        None
    }

    /// O(log n).
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|id| &self.node(id).value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// O(log n).
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.find(key)?;
        Some(self.remove_node(id).1)
    }

    /// Remove the entry at 0-based in-order rank `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()` — out-of-range positional access is
    /// a programming error, not a recoverable condition.
    pub fn remove_at(&mut self, index: usize) -> (K, V) {
        let id = self.node_at(index);
        self.remove_node(id)
    }

    /// Return the entry at 0-based in-order rank `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn get_at(&self, index: usize) -> (&K, &V) {
        let id = self.node_at(index);
        let n = self.node(id);
        (&n.key, &n.value)
    }

    /// Replace the value at rank `index`, without touching key ordering
    /// (the keys view is unaffected; this is how the values view supports
    /// mutation by position). Returns the previous value.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn set_value_at(&mut self, index: usize, value: V) -> V {
        let id = self.node_at(index);
        let old = std::mem::replace(&mut self.node_mut(id).value, value);
        self.invalidate_hash();
        old
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.root.map(|r| self.min_node(r)).map(|id| {
            let n = self.node(id);
            (&n.key, &n.value)
        })
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.root.map(|r| self.max_node(r)).map(|id| {
            let n = self.node(id);
            (&n.key, &n.value)
        })
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let id = self.root.map(|r| self.min_node(r))?;
        Some(self.remove_node(id))
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let id = self.root.map(|r| self.max_node(r))?;
        Some(self.remove_node(id))
    }

    /// Ascending-key iteration. Restartable; not safe to use across a
    /// mutation of the tree (see struct-level docs).
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self)
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self)
    }

    // -- internal helpers -------------------------------------------------

    fn find(&self, key: &K) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            cur = match key.cmp(&self.node(id).key) {
                Ordering::Less => self.node(id).left,
                Ordering::Greater => self.node(id).right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Descend by comparing `index` against the current node's rank,
    /// derived from its left subtree's count.
    ///
    /// # Panics
    /// Panics if `index >= self.len`.
    fn node_at(&self, index: usize) -> NodeId {
        if index >= self.len {
            panic!("{}", Error::IndexOutOfBounds { index, len: self.len });
        }
        let mut id = self.root.expect("len > 0 implies a root exists");
        let mut idx = index;
        loop {
            let left_count = self.count_of(self.node(id).left);
            match idx.cmp(&left_count) {
                Ordering::Less => id = self.node(id).left.expect("left_count > idx"),
                Ordering::Equal => return id,
                Ordering::Greater => {
                    idx -= left_count + 1;
                    id = self.node(id).right.expect("remaining idx implies right child");
                }
            }
        }
    }

    fn min_node(&self, mut id: NodeId) -> NodeId {
        while let Some(l) = self.node(id).left {
            id = l;
        }
        id
    }

    fn max_node(&self, mut id: NodeId) -> NodeId {
        while let Some(r) = self.node(id).right {
            id = r;
        }
        id
    }

    // -- arena plumbing -----------------------------------------------------

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        self.nodes[id.0].as_ref().expect("dangling NodeId")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.nodes[id.0].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn free_node(&mut self, id: NodeId) -> Node<K, V> {
        let node = self.nodes[id.0].take().expect("dangling NodeId");
        self.free.push(id);
        node
    }

    pub(crate) fn count_of(&self, id: Option<NodeId>) -> usize {
        id.map(|id| self.node(id).count).unwrap_or(0)
    }

    fn color_of(&self, id: Option<NodeId>) -> Color {
        id.map(|id| self.node(id).color).unwrap_or(Color::Black)
    }

    fn is_red(&self, id: Option<NodeId>) -> bool {
        self.color_of(id) == Color::Red
    }

    fn recompute_count(&mut self, id: NodeId) {
        let l = self.count_of(self.node(id).left);
        let r = self.count_of(self.node(id).right);
        self.node_mut(id).count = 1 + l + r;
    }

    fn bump_counts_upward(&mut self, mut id: Option<NodeId>, delta: isize) {
        while let Some(n) = id {
            let count = &mut self.node_mut(n).count;
            *count = (*count as isize + delta) as usize;
            id = self.node(n).parent;
        }
    }

    fn invalidate_hash(&self) {
        self.hash_cache.set(None);
    }

    // -- rotations ----------------------------------------------------------

    /// `x`'s right child takes `x`'s place; `x` becomes its new left child.
    fn rotate_left(&mut self, x: NodeId) {
        let y = self
            .node(x)
            .right
            .unwrap_or_else(|| panic!("{}", Error::RotationMissingChild));
        let y_left = self.node(y).left;
        self.node_mut(x).right = y_left;
        if let Some(id) = y_left {
            self.node_mut(id).parent = Some(x);
        }
        self.transplant_parent(x, y);
        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
        self.recompute_count(x);
        self.recompute_count(y);
    }

    /// `x`'s left child takes `x`'s place; `x` becomes its new right child.
    fn rotate_right(&mut self, x: NodeId) {
        let y = self
            .node(x)
            .left
            .unwrap_or_else(|| panic!("{}", Error::RotationMissingChild));
        let y_right = self.node(y).right;
        self.node_mut(x).left = y_right;
        if let Some(id) = y_right {
            self.node_mut(id).parent = Some(x);
        }
        self.transplant_parent(x, y);
        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);
        self.recompute_count(x);
        self.recompute_count(y);
    }

    /// Re-point `x`'s parent (or the root) at `y`, without touching `y`'s
    /// own left/right pointers. Shared by both rotation directions.
    fn transplant_parent(&mut self, x: NodeId, y: NodeId) {
        let x_parent = self.node(x).parent;
        self.node_mut(y).parent = x_parent;
        match x_parent {
            None => self.root = Some(y),
            Some(p) if self.node(p).left == Some(x) => self.node_mut(p).left = Some(y),
            Some(p) => self.node_mut(p).right = Some(y),
        }
    }

    // -- insert fix-up --------------------------------------------------------

    fn insert_fixup(&mut self, mut z: NodeId) {
        while let Some(p) = self.node(z).parent {
            if self.node(p).color == Color::Black {
                break;
            }
            // p is red, so the root invariant guarantees p has a parent.
            let g = self.node(p).parent.expect("a red node always has a parent");
            if Some(p) == self.node(g).left {
                let u = self.node(g).right;
                if self.is_red(u) {
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(u.expect("is_red(u) implies u exists")).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    z = g;
                    continue;
                }
                if Some(z) == self.node(p).right {
                    z = p;
                    self.rotate_left(z);
                }
                let p = self.node(z).parent.expect("fixed up above");
                let g = self.node(p).parent.expect("fixed up above");
                self.node_mut(p).color = Color::Black;
                self.node_mut(g).color = Color::Red;
                self.rotate_right(g);
            } else {
                let u = self.node(g).left;
                if self.is_red(u) {
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(u.expect("is_red(u) implies u exists")).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    z = g;
                    continue;
                }
                if Some(z) == self.node(p).left {
                    z = p;
                    self.rotate_right(z);
                }
                let p = self.node(z).parent.expect("fixed up above");
                let g = self.node(p).parent.expect("fixed up above");
                self.node_mut(p).color = Color::Black;
                self.node_mut(g).color = Color::Red;
                self.rotate_left(g);
            }
        }
        self.node_mut(self.root.expect("z exists, so root exists")).color = Color::Black;
    }

    // -- removal --------------------------------------------------------------

    /// Physically remove `z` (after swapping it with its in-order successor
    /// if it has two children), returning the key/value pair that was
    /// logically requested for removal.
    fn remove_node(&mut self, mut z: NodeId) -> (K, V) {
        if self.node(z).left.is_some() && self.node(z).right.is_some() {
            let succ = self.min_node(self.node(z).right.expect("checked above"));
            self.swap_entries(z, succ);
            z = succ;
        }

        let child = self.node(z).left.or(self.node(z).right);
        let z_parent = self.node(z).parent;
        let z_was_left = z_parent.map(|p| self.node(p).left == Some(z));

        self.bump_counts_upward(z_parent, -1);

        if let Some(c) = child {
            self.node_mut(c).parent = z_parent;
        }
        match z_parent {
            None => self.root = child,
            Some(p) if z_was_left == Some(true) => self.node_mut(p).left = child,
            Some(p) => self.node_mut(p).right = child,
        }

        let z_color = self.node(z).color;
        match (z_color, child) {
            (Color::Red, _) => {}
            (Color::Black, Some(c)) => self.node_mut(c).color = Color::Black,
            (Color::Black, None) => self.delete_fixup(None, z_parent),
        }

        let node = self.free_node(z);
        self.len -= 1;
        self.invalidate_hash();
        (node.key, node.value)
    }

    /// Swap the (key, value) payload of two distinct nodes, leaving their
    /// tree structure (color, links, count) untouched. Used to relocate an
    /// in-order successor's payload onto the node being removed without
    /// requiring `K: Clone` / `V: Clone`.
    fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        assert_ne!(a, b, "swap_entries requires distinct nodes");
        let (lo, hi) = if a.0 < b.0 { (a, b) } else { (b, a) };
        let (left, right) = self.nodes.split_at_mut(hi.0);
        let na = left[lo.0].as_mut().expect("dangling NodeId");
        let nb = right[0].as_mut().expect("dangling NodeId");
        std::mem::swap(&mut na.key, &mut nb.key);
        std::mem::swap(&mut na.value, &mut nb.value);
    }

    /// `x` occupies a black-deficient position; `x_parent` is its parent
    /// (tracked explicitly because `x` itself may be a phantom null child
    /// with no node of its own to carry a parent link).
    fn delete_fixup(&mut self, mut x: Option<NodeId>, mut x_parent: Option<NodeId>) {
        while x != self.root && self.color_of(x) == Color::Black {
            let p = match x_parent {
                Some(p) => p,
                None => break,
            };
            let x_is_left = self.node(p).left == x;
            if x_is_left {
                let mut w = self
                    .node(p)
                    .right
                    .unwrap_or_else(|| panic!("{}", Error::SiblingMissing));
                if self.node(w).color == Color::Red {
                    self.node_mut(w).color = Color::Black;
                    self.node_mut(p).color = Color::Red;
                    self.rotate_left(p);
                    w = self
                        .node(p)
                        .right
                        .unwrap_or_else(|| panic!("{}", Error::SiblingMissing));
                }
                let (wl, wr) = (self.node(w).left, self.node(w).right);
                if !self.is_red(wl) && !self.is_red(wr) {
                    self.node_mut(w).color = Color::Red;
                    x = Some(p);
                    x_parent = self.node(p).parent;
                } else {
                    if !self.is_red(wr) {
                        if let Some(id) = wl {
                            self.node_mut(id).color = Color::Black;
                        }
                        self.node_mut(w).color = Color::Red;
                        self.rotate_right(w);
                        w = self
                            .node(p)
                            .right
                            .unwrap_or_else(|| panic!("{}", Error::SiblingMissing));
                    }
                    self.node_mut(w).color = self.node(p).color;
                    self.node_mut(p).color = Color::Black;
                    if let Some(id) = self.node(w).right {
                        self.node_mut(id).color = Color::Black;
                    }
                    self.rotate_left(p);
                    x = self.root;
                    x_parent = None;
                }
            } else {
                let mut w = self
                    .node(p)
                    .left
                    .unwrap_or_else(|| panic!("{}", Error::SiblingMissing));
                if self.node(w).color == Color::Red {
                    self.node_mut(w).color = Color::Black;
                    self.node_mut(p).color = Color::Red;
                    self.rotate_right(p);
                    w = self
                        .node(p)
                        .left
                        .unwrap_or_else(|| panic!("{}", Error::SiblingMissing));
                }
                let (wl, wr) = (self.node(w).left, self.node(w).right);
                if !self.is_red(wl) && !self.is_red(wr) {
                    self.node_mut(w).color = Color::Red;
                    x = Some(p);
                    x_parent = self.node(p).parent;
                } else {
                    if !self.is_red(wl) {
                        if let Some(id) = wr {
                            self.node_mut(id).color = Color::Black;
                        }
                        self.node_mut(w).color = Color::Red;
                        self.rotate_left(w);
                        w = self
                            .node(p)
                            .left
                            .unwrap_or_else(|| panic!("{}", Error::SiblingMissing));
                    }
                    self.node_mut(w).color = self.node(p).color;
                    self.node_mut(p).color = Color::Black;
                    if let Some(id) = self.node(w).left {
                        self.node_mut(id).color = Color::Black;
                    }
                    self.rotate_right(p);
                    x = self.root;
                    x_parent = None;
                }
            }
        }
        if let Some(id) = x {
            self.node_mut(id).color = Color::Black;
        }
    }
}

impl<K, V> Hash for OrderStatRBTree<K, V>
where
    K: Ord + Hash,
    V: Hash,
{
    /// Full-traversal hash, lazily memoized and invalidated by every
    /// mutation (§"Observable side effects"). No truncation to a node
    /// subset: a smaller, capped hash would silently ignore divergence
    /// past the cap, which this implementation never does.
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(cached) = self.hash_cache.get() {
            cached.hash(state);
            return;
        }
        let mut hasher = DefaultHasher::new();
        self.len.hash(&mut hasher);
        for (k, v) in self.iter() {
            k.hash(&mut hasher);
            v.hash(&mut hasher);
        }
        let digest = hasher.finish();
        self.hash_cache.set(Some(digest));
        digest.hash(state);
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

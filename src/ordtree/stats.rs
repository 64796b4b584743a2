//! Read-only diagnostics: [`OrderStatRBTree::validate`] re-checks every
//! invariant from the data model and returns [`Stats`] instead of
//! panicking, so property tests can assert on it directly. This mirrors
//! the teacher's `Llrb::validate`/`Stats` pair but never mutates, and never
//! caps how much of the tree it walks (the "1000-node" truncation noted as
//! an open question is explicitly not replicated here — a validation that
//! silently stops early is worse than no validation).

use crate::error::Error;
use crate::ordtree::node::{Color, NodeId};
use crate::ordtree::tree::OrderStatRBTree;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stats {
    pub entries: usize,
    pub black_height: usize,
    pub min_depth: usize,
    pub max_depth: usize,
    pub mean_depth: usize,
}

impl<K, V> OrderStatRBTree<K, V>
where
    K: Ord,
{
    /// Walk the whole tree checking BST order, red-black coloring,
    /// black-height, and subtree counts. Returns `Err` describing the
    /// first violation found rather than panicking.
    pub fn validate(&self) -> Result<Stats, Error> {
        let root = match self.root_id() {
            None => {
                return Ok(Stats {
                    entries: 0,
                    black_height: 0,
                    min_depth: 0,
                    max_depth: 0,
                    mean_depth: 0,
                })
            }
            Some(id) => id,
        };
        if self.node(root).color != Color::Black {
            return Err(Error::InvalidState("root is not Black".into()));
        }

        let mut depths = Vec::new();
        let black_height = self.validate_node(Some(root), 0, &mut depths, None, None)?;

        if depths.len() != self.len() + 1 {
            return Err(Error::InvalidState(
                "null-leaf count is inconsistent with entry count".into(),
            ));
        }
        let min_depth = *depths.iter().min().expect("depths is non-empty");
        let max_depth = *depths.iter().max().expect("depths is non-empty");
        let mean_depth = depths.iter().sum::<usize>() / depths.len();

        Ok(Stats {
            entries: self.len(),
            black_height,
            min_depth,
            max_depth,
            mean_depth,
        })
    }

    fn validate_node(
        &self,
        node: Option<NodeId>,
        depth: usize,
        depths: &mut Vec<usize>,
        min_key: Option<&K>,
        max_key: Option<&K>,
    ) -> Result<usize, Error> {
        let id = match node {
            None => {
                depths.push(depth);
                return Ok(1); // a null child counts as one black node.
            }
            Some(id) => id,
        };
        let n = self.node(id);

        if let Some(mk) = min_key {
            if n.key <= *mk {
                return Err(Error::InvalidState("in-order traversal is not strictly increasing".into()));
            }
        }
        if let Some(mk) = max_key {
            if n.key >= *mk {
                return Err(Error::InvalidState("in-order traversal is not strictly increasing".into()));
            }
        }

        if n.color == Color::Red && (self.is_red_pub(n.left) || self.is_red_pub(n.right)) {
            return Err(Error::InvalidState("red node has a red child".into()));
        }

        let left_bh = self.validate_node(n.left, depth + 1, depths, min_key, Some(&n.key))?;
        let right_bh = self.validate_node(n.right, depth + 1, depths, Some(&n.key), max_key)?;
        if left_bh != right_bh {
            return Err(Error::InvalidState("black-height differs between left and right subtree".into()));
        }

        let left_count = self.count_of(n.left);
        let right_count = self.count_of(n.right);
        if n.count != 1 + left_count + right_count {
            return Err(Error::InvalidState("node.count does not match subtree sizes".into()));
        }

        Ok(left_bh + if n.color == Color::Black { 1 } else { 0 })
    }

    fn is_red_pub(&self, id: Option<NodeId>) -> bool {
        id.map(|id| self.node(id).color == Color::Red).unwrap_or(false)
    }
}

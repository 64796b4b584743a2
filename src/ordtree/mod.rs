//! An order-statistic red-black tree map: keys are totally ordered and
//! unique, values are arbitrary. Beyond the usual ordered-map operations
//! ([`OrderStatRBTree::get`], [`OrderStatRBTree::insert`],
//! [`OrderStatRBTree::remove`]) every node tracks its subtree size, so
//! positional ("rank") access ([`OrderStatRBTree::get_at`],
//! [`OrderStatRBTree::remove_at`]) is also O(log n).
//!
//! Single-writer, single-thread only — see [`OrderStatRBTree`]'s docs.

mod iter;
mod node;
mod stats;
mod tree;

pub use iter::{Iter, Keys, Values};
pub use stats::Stats;
pub use tree::OrderStatRBTree;

//! Spiritual-parent lineage over the member directory.
//!
//! The member collection is loaded whole on every request and turned into a
//! [`LineageGraph`]: an id index plus a parent-to-children adjacency in
//! collection order. Nothing is cached between requests.
//!
//! `spiritual_parent_id` is not constrained in storage, so the graph may
//! contain dangling references, self loops and longer cycles. Traversals keep
//! the set of ancestors on the current path and never descend into one of
//! them; the overview additionally stops at a fixed depth.

mod graph;
mod service;
mod types;

pub use graph::LineageGraph;
pub use service::{
    build_family_tree, build_spiritual_parents_overview, family_tree, spiritual_parents_overview,
};
pub use types::{
    FamilyTree, FamilyTreeStatistics, MAX_TREE_DEPTH, OverviewStatistics, SpiritualParentSummary,
    SpiritualParentsOverview, TreeNode,
};

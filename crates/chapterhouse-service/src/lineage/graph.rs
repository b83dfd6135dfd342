use std::collections::{HashMap, HashSet};

use chapterhouse_db::model::member::Member;
use uuid::Uuid;

use super::types::{FamilyTreeStatistics, MAX_TREE_DEPTH, SpiritualParentSummary, TreeNode};

/// Parent-to-children adjacency over a borrowed member collection.
///
/// Children are kept in collection order, so every traversal is
/// deterministic for a given input ordering.
#[derive(Debug)]
pub struct LineageGraph<'a> {
    members: &'a [Member],
    index: HashMap<Uuid, usize>,
    children: HashMap<Uuid, Vec<usize>>,
}

impl<'a> LineageGraph<'a> {
    #[must_use]
    pub fn new(members: &'a [Member]) -> Self {
        let mut index = HashMap::with_capacity(members.len());
        let mut children: HashMap<Uuid, Vec<usize>> = HashMap::new();

        for (position, member) in members.iter().enumerate() {
            index.entry(member.id).or_insert(position);
            if let Some(parent) = member.spiritual_parent_id {
                children.entry(parent).or_default().push(position);
            }
        }

        Self {
            members,
            index,
            children,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn member(&self, id: Uuid) -> Option<&'a Member> {
        self.index.get(&id).map(|&position| &self.members[position])
    }

    /// Members with no spiritual parent, in collection order.
    ///
    /// A member whose parent id points at nobody is not a root.
    pub fn roots(&self) -> impl Iterator<Item = &'a Member> + use<'a> {
        self.members
            .iter()
            .filter(|member| member.spiritual_parent_id.is_none())
    }

    /// Raw adjacency count, including self references and cycle edges.
    #[must_use]
    pub fn direct_child_count(&self, id: Uuid) -> usize {
        self.child_positions(id).len()
    }

    #[must_use]
    pub fn statistics(&self) -> FamilyTreeStatistics {
        let members_with_parent = self
            .members
            .iter()
            .filter(|member| member.spiritual_parent_id.is_some())
            .count();

        FamilyTreeStatistics {
            total_members: self.members.len(),
            root_members: self.members.len() - members_with_parent,
            members_with_parent,
        }
    }

    /// ## Summary
    /// Expands the descendants of `root` into a tree.
    ///
    /// A child that already appears on the path from `root` down to the
    /// current node is left out, which also drops self references. The same
    /// member may still show up under two unrelated branches.
    ///
    /// The walk keeps its frames on the heap, so chain length is bounded by
    /// memory only. Nodes at [`MAX_TREE_DEPTH`] are rendered without
    /// children and flagged `truncated`; their counts still cover the full
    /// subtree.
    #[must_use]
    pub fn descendant_tree(&self, root: &'a Member) -> TreeNode {
        let mut path = HashSet::from([root.id]);
        let mut root_frame = self.enter(root, 0);
        let mut stack: Vec<TreeFrame<'_>> = Vec::new();

        loop {
            let frame = stack.last_mut().unwrap_or(&mut root_frame);
            if let Some(&position) = frame.positions.get(frame.next) {
                frame.next += 1;
                let depth = frame.depth + 1;
                let child = &self.members[position];
                if path.insert(child.id) {
                    stack.push(self.enter(child, depth));
                }
                continue;
            }

            let Some(done) = stack.pop() else {
                return root_frame.node;
            };
            path.remove(&done.node.id);
            stack.last_mut().unwrap_or(&mut root_frame).adopt(done.node);
        }
    }

    fn enter(&self, member: &'a Member, depth: usize) -> TreeFrame<'_> {
        let positions = self.child_positions(member.id);
        TreeFrame {
            node: TreeNode::leaf(member, positions.len()),
            positions,
            next: 0,
            depth,
        }
    }

    /// ## Summary
    /// Counts the descendants of `member` up to `max_depth` levels down.
    ///
    /// Direct children are level one. Counting follows the same ancestor
    /// rule as [`Self::descendant_tree`], so without the cap the result
    /// equals the tree's `total_downlines`.
    #[must_use]
    pub fn downline_count(&self, member: &Member, max_depth: usize) -> usize {
        if max_depth == 0 {
            return 0;
        }

        let mut path = HashSet::from([member.id]);
        // The frame at index `i` scans the children on level `i + 1`.
        let mut stack = vec![CountFrame {
            id: member.id,
            positions: self.child_positions(member.id),
            next: 0,
        }];
        let mut total = 0;

        while let Some(frame) = stack.last_mut() {
            let Some(&position) = frame.positions.get(frame.next) else {
                let finished = frame.id;
                path.remove(&finished);
                stack.pop();
                continue;
            };
            frame.next += 1;

            let child_id = self.members[position].id;
            if !path.insert(child_id) {
                continue;
            }
            total += 1;

            if stack.len() < max_depth {
                stack.push(CountFrame {
                    id: child_id,
                    positions: self.child_positions(child_id),
                    next: 0,
                });
            } else {
                path.remove(&child_id);
            }
        }
        total
    }

    /// ## Summary
    /// Summarises every member with at least one direct child.
    ///
    /// Rows are ordered by `total_downlines` descending. Ties keep
    /// collection order.
    #[must_use]
    pub fn spiritual_parents(&self, max_depth: usize) -> Vec<SpiritualParentSummary> {
        let mut parents: Vec<SpiritualParentSummary> = self
            .members
            .iter()
            .filter_map(|member| {
                let direct_children = self.direct_child_count(member.id);
                (direct_children > 0).then(|| SpiritualParentSummary {
                    id: member.id,
                    full_name: member.full_name.clone(),
                    email: member.email.clone(),
                    church: member.church.clone(),
                    membership_category: member.membership_category.clone(),
                    age_group: member.age_group.clone(),
                    direct_children,
                    total_downlines: self.downline_count(member, max_depth),
                })
            })
            .collect();

        parents.sort_by(|a, b| b.total_downlines.cmp(&a.total_downlines));
        parents
    }

    fn child_positions(&self, id: Uuid) -> &[usize] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }
}

/// A tree node under construction plus its position in the child list.
struct TreeFrame<'g> {
    node: TreeNode,
    positions: &'g [usize],
    next: usize,
    depth: usize,
}

impl TreeFrame<'_> {
    fn adopt(&mut self, child: TreeNode) {
        self.node.total_downlines += 1 + child.total_downlines;
        if self.depth < MAX_TREE_DEPTH {
            self.node.children.push(child);
        } else {
            self.node.truncated = true;
        }
    }
}

struct CountFrame<'g> {
    id: Uuid,
    positions: &'g [usize],
    next: usize,
}

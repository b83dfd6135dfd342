use chapterhouse_core::util::pagination::Pagination;
use chapterhouse_db::model::member::Member;
use serde::Serialize;
use uuid::Uuid;

/// Deepest level of a rendered family tree; the root is level zero.
///
/// A node at this level keeps its `total_downlines` but renders no children.
pub const MAX_TREE_DEPTH: usize = 256;

/// One member in a descendant tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub church: Option<String>,
    pub membership_category: Option<String>,
    pub age_group: Option<String>,
    pub children: Vec<TreeNode>,
    /// Members naming this one as spiritual parent, pruned or not.
    pub direct_child_count: usize,
    /// Nodes in the expanded subtree below this one.
    pub total_downlines: usize,
    /// Set when descendants were cut off at [`MAX_TREE_DEPTH`].
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl TreeNode {
    pub(crate) fn leaf(member: &Member, direct_child_count: usize) -> Self {
        Self {
            id: member.id,
            full_name: member.full_name.clone(),
            email: member.email.clone(),
            church: member.church.clone(),
            membership_category: member.membership_category.clone(),
            age_group: member.age_group.clone(),
            children: Vec::new(),
            direct_child_count,
            total_downlines: 0,
            truncated: false,
        }
    }

    /// Ids of the direct children as rendered, in order.
    #[must_use]
    pub fn child_ids(&self) -> Vec<Uuid> {
        self.children.iter().map(|child| child.id).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTreeStatistics {
    pub total_members: usize,
    pub root_members: usize,
    pub members_with_parent: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTree {
    pub family_tree: Vec<TreeNode>,
    pub statistics: FamilyTreeStatistics,
}

/// Overview row for a member with at least one direct child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiritualParentSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub church: Option<String>,
    pub membership_category: Option<String>,
    pub age_group: Option<String>,
    pub direct_children: usize,
    pub total_downlines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStatistics {
    pub total_members: usize,
    pub total_spiritual_parents: usize,
    pub average_downlines: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiritualParentsOverview {
    pub spiritual_parents: Vec<SpiritualParentSummary>,
    pub statistics: OverviewStatistics,
    pub pagination: Pagination,
}

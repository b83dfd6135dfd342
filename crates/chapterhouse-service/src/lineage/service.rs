use chapterhouse_core::util::pagination::PageRequest;
use chapterhouse_db::db::connection::DbConnection;
use chapterhouse_db::db::query::member as member_query;
use chapterhouse_db::model::member::Member;
use uuid::Uuid;

use super::graph::LineageGraph;
use super::types::{FamilyTree, OverviewStatistics, SpiritualParentsOverview};
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Builds the family tree rooted at `root_id`, or one tree per root member.
///
/// ## Errors
/// Returns `NotFound` if `root_id` names no member.
pub fn build_family_tree(
    members: &[Member],
    root_id: Option<Uuid>,
) -> ServiceResult<FamilyTree> {
    let graph = LineageGraph::new(members);

    let family_tree = match root_id {
        Some(id) => {
            let root = graph
                .member(id)
                .ok_or_else(|| ServiceError::not_found("member", id))?;
            vec![graph.descendant_tree(root)]
        }
        None => graph
            .roots()
            .map(|root| graph.descendant_tree(root))
            .collect(),
    };

    Ok(FamilyTree {
        family_tree,
        statistics: graph.statistics(),
    })
}

/// ## Summary
/// Ranks spiritual parents by downline count and returns one page of them.
#[must_use]
pub fn build_spiritual_parents_overview(
    members: &[Member],
    page: PageRequest,
    max_depth: usize,
) -> SpiritualParentsOverview {
    let graph = LineageGraph::new(members);
    let parents = graph.spiritual_parents(max_depth);

    let total_downlines: usize = parents.iter().map(|parent| parent.total_downlines).sum();
    let statistics = OverviewStatistics {
        total_members: graph.len(),
        total_spiritual_parents: parents.len(),
        average_downlines: average(total_downlines, parents.len()),
    };

    SpiritualParentsOverview {
        spiritual_parents: page.slice(&parents).to_vec(),
        statistics,
        pagination: page.pagination(parents.len()),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "member counts stay far below f64's exact integer range"
)]
fn average(sum: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let mean = sum as f64 / count as f64;
    (mean * 100.0).round() / 100.0
}

/// ## Summary
/// Loads every member and builds the family tree.
///
/// ## Errors
/// Returns `NotFound` for an unknown root, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn family_tree(
    conn: &mut DbConnection<'_>,
    root_id: Option<Uuid>,
) -> ServiceResult<FamilyTree> {
    let members = member_query::list_members(conn).await?;
    let tree = build_family_tree(&members, root_id)?;

    tracing::debug!(
        members = members.len(),
        trees = tree.family_tree.len(),
        "Built family tree"
    );

    Ok(tree)
}

/// ## Summary
/// Loads every member and builds one page of the spiritual-parents overview.
///
/// ## Errors
/// Returns a database error if loading members fails.
#[tracing::instrument(skip(conn))]
pub async fn spiritual_parents_overview(
    conn: &mut DbConnection<'_>,
    page: PageRequest,
    max_depth: usize,
) -> ServiceResult<SpiritualParentsOverview> {
    let members = member_query::list_members(conn).await?;
    let overview = build_spiritual_parents_overview(&members, page, max_depth);

    tracing::debug!(
        members = members.len(),
        parents = overview.statistics.total_spiritual_parents,
        "Built spiritual parents overview"
    );

    Ok(overview)
}

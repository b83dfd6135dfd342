use chapterhouse_core::util::id::parse_optional_id;
use chapterhouse_service::lineage::{self, FamilyTree};
use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use crate::app::api::extract::query;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// GET /api/members/family-tree?rootId=
///
/// Without `rootId` every member lacking a spiritual parent becomes a root.
///
/// ## Errors
/// 400 for a malformed `rootId`, 404 if it names nobody.
#[handler]
async fn get_family_tree(req: &mut Request, depot: &mut Depot) -> AppResult<Json<FamilyTree>> {
    let root_id = parse_optional_id("rootId", query(req, "rootId"))?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let tree = lineage::family_tree(&mut conn, root_id).await?;

    Ok(Json(tree))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("family-tree").get(get_family_tree)
}

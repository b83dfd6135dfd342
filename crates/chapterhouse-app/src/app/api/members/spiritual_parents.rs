use chapterhouse_core::util::pagination::PageRequest;
use chapterhouse_service::lineage::{self, SpiritualParentsOverview};
use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use crate::app::api::extract::query;
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// GET /api/members/spiritual-parents?page=&limit=
///
/// ## Errors
/// 400 for non-numeric or zero paging values.
#[handler]
async fn get_spiritual_parents(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<SpiritualParentsOverview>> {
    let page = PageRequest::parse(query(req, "page"), query(req, "limit"))?;
    let max_depth = get_config_from_depot(depot)?.lineage.max_depth;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let overview = lineage::spiritual_parents_overview(&mut conn, page, max_depth).await?;

    Ok(Json(overview))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("spiritual-parents").get(get_spiritual_parents)
}

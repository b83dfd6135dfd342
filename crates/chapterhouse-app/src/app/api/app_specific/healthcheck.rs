use salvo::{Depot, Router, handler};

use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// Liveness: the process is up and routing.
#[handler]
async fn healthcheck() -> &'static str {
    "OK"
}

/// Readiness: a pooled connection can be checked out.
#[handler]
async fn readiness(depot: &mut Depot) -> AppResult<&'static str> {
    let provider = get_db_from_depot(depot)?;
    let _conn = provider.get_connection().await?;
    Ok("OK")
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck))
        .push(Router::with_path("readiness").get(readiness))
}

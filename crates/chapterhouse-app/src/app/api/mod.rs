mod app_specific;
mod extract;
mod members;
mod wotd;

use salvo::Router;

// Re-export route constants from core
pub use chapterhouse_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, MEMBERS_ROUTE_COMPONENT, MEMBERS_ROUTE_PREFIX,
    WOTD_ROUTE_COMPONENT, WOTD_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the `/api` router with every resource below it.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(members::routes())
        .push(wotd::routes())
}

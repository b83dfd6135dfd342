//! `/api/wotd`: the rotator and the items it draws from.

use salvo::Router;

use chapterhouse_core::constants::WOTD_ROUTE_COMPONENT;

mod current;
mod items;
mod schedule;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(WOTD_ROUTE_COMPONENT)
        .push(current::routes())
        .push(schedule::routes())
        .push(items::routes())
}

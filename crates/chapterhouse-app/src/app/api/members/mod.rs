//! `/api/members`: the directory plus its lineage views.

use salvo::Router;

use chapterhouse_core::constants::MEMBERS_ROUTE_COMPONENT;

mod crud;
mod family_tree;
mod spiritual_parents;

/// The static views must be pushed ahead of `{id}`.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(MEMBERS_ROUTE_COMPONENT)
        .push(family_tree::routes())
        .push(spiritual_parents::routes())
        .push(crud::routes())
}

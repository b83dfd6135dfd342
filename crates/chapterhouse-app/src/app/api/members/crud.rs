use chapterhouse_core::util::id::parse_optional_id;
use chapterhouse_core::util::pagination::PageRequest;
use chapterhouse_db::model::member::Member;
use chapterhouse_service::member::{self, MemberInput, MemberPage};
use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;

use crate::app::api::extract::{json_body, path_id, query};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// Create / replace member request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    pub full_name: String,
    pub email: Option<String>,
    pub church: Option<String>,
    pub membership_category: Option<String>,
    pub age_group: Option<String>,
    pub spiritual_parent: Option<String>,
}

impl MemberRequest {
    fn into_input(self) -> AppResult<MemberInput> {
        let spiritual_parent =
            parse_optional_id("spiritualParent", self.spiritual_parent.as_deref())?;
        Ok(MemberInput {
            full_name: self.full_name,
            email: self.email,
            church: self.church,
            membership_category: self.membership_category,
            age_group: self.age_group,
            spiritual_parent,
        })
    }
}

/// GET /api/members?page=&limit=
#[handler]
async fn list_members(req: &mut Request, depot: &mut Depot) -> AppResult<Json<MemberPage>> {
    let page = PageRequest::parse(query(req, "page"), query(req, "limit"))?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(member::list_members(&mut conn, page).await?))
}

/// ## Summary
/// POST /api/members
///
/// ## Errors
/// 400 for a blank name or malformed parent id, 404 for an unknown parent.
#[handler]
async fn create_member(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Member>> {
    let input = json_body::<MemberRequest>(req).await?.into_input()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = member::create_member(&mut conn, input).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

/// GET /api/members/{id}
#[handler]
async fn get_member(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Member>> {
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(member::get_member(&mut conn, id).await?))
}

/// ## Summary
/// PUT /api/members/{id}
///
/// Replaces every editable field; omitted optional fields are cleared.
///
/// ## Errors
/// 400 for invalid input or a self reference, 404 for an unknown member or parent.
#[handler]
async fn update_member(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Member>> {
    let id = path_id(req)?;
    let input = json_body::<MemberRequest>(req).await?.into_input()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(member::update_member(&mut conn, id, input).await?))
}

/// ## Summary
/// DELETE /api/members/{id}
///
/// Direct children of the member become roots.
#[handler]
async fn delete_member(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    member::delete_member(&mut conn, id).await?;

    res.status_code(StatusCode::NO_CONTENT);
    Ok(())
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .get(list_members)
        .post(create_member)
        .push(
            Router::with_path("{id}")
                .get(get_member)
                .put(update_member)
                .delete(delete_member),
        )
}

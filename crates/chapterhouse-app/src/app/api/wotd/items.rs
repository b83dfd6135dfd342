use chapterhouse_db::db::enums::ItemStatus;
use chapterhouse_db::model::word::WordOfDay;
use chapterhouse_service::word::{self, WordInput};
use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;

use crate::app::api::extract::{json_body, path_id, query};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// Create / replace item request payload
#[derive(Debug, Deserialize)]
pub struct WordRequest {
    pub title: String,
    pub text: String,
    pub attribution: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: Option<String>,
}

impl WordRequest {
    fn into_input(self) -> AppResult<WordInput> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => ItemStatus::default(),
            Some(raw) => raw.parse()?,
        };
        Ok(WordInput {
            title: self.title,
            text: self.text,
            attribution: self.attribution,
            status,
            tags: self.tags,
            display_date: self.date,
        })
    }
}

/// GET /api/wotd?status=
#[handler]
async fn list_words(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<WordOfDay>>> {
    let status = query(req, "status")
        .filter(|raw| !raw.trim().is_empty())
        .map(str::parse::<ItemStatus>)
        .transpose()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(word::list_words(&mut conn, status).await?))
}

/// POST /api/wotd
#[handler]
async fn create_word(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<WordOfDay>> {
    let input = json_body::<WordRequest>(req).await?.into_input()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = word::create_word(&mut conn, input).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

/// GET /api/wotd/{id}
#[handler]
async fn get_word(req: &mut Request, depot: &mut Depot) -> AppResult<Json<WordOfDay>> {
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(word::get_word(&mut conn, id).await?))
}

/// PUT /api/wotd/{id}
#[handler]
async fn update_word(req: &mut Request, depot: &mut Depot) -> AppResult<Json<WordOfDay>> {
    let id = path_id(req)?;
    let input = json_body::<WordRequest>(req).await?.into_input()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(word::update_word(&mut conn, id, input).await?))
}

/// ## Summary
/// DELETE /api/wotd/{id}
///
/// The rotation forgets the item; calendar entries targeting it go too.
#[handler]
async fn delete_word(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    word::delete_word(&mut conn, id).await?;

    res.status_code(StatusCode::NO_CONTENT);
    Ok(())
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .get(list_words)
        .post(create_word)
        .push(
            Router::with_path("{id}")
                .get(get_word)
                .put(update_word)
                .delete(delete_word),
        )
}

//! Word-of-the-day item maintenance.

use chapterhouse_db::db::connection::DbConnection;
use chapterhouse_db::db::enums::ItemStatus;
use chapterhouse_db::db::query::word as word_query;
use chapterhouse_db::model::word::{NewWordOfDay, WordOfDay, WordOfDayChangeset};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::member::non_blank;

/// Editable item fields, as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordInput {
    pub title: String,
    pub text: String,
    pub attribution: Option<String>,
    pub status: ItemStatus,
    pub tags: Vec<String>,
    pub display_date: Option<String>,
}

impl WordInput {
    /// ## Summary
    /// Trims text fields, drops blank and repeated tags.
    ///
    /// ## Errors
    /// Returns `ValidationError` if `title` or `text` is blank.
    pub fn normalized(self) -> ServiceResult<Self> {
        let title = required("title", &self.title)?;
        let text = required("text", &self.text)?;

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        Ok(Self {
            title,
            text,
            attribution: non_blank(self.attribution),
            status: self.status,
            tags,
            display_date: non_blank(self.display_date),
        })
    }
}

fn required(field: &str, value: &str) -> ServiceResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::ValidationError(format!(
            "{field} must not be blank"
        )));
    }
    Ok(value.to_string())
}

/// ## Summary
/// Lists items newest first, optionally restricted to one status.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_words(
    conn: &mut DbConnection<'_>,
    status: Option<ItemStatus>,
) -> ServiceResult<Vec<WordOfDay>> {
    Ok(word_query::list_words(conn, status).await?)
}

/// ## Errors
/// Returns `NotFound` if no item has this id, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn get_word(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<WordOfDay> {
    word_query::get_word(conn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("word of the day", id))
}

/// ## Errors
/// Returns `ValidationError` for a blank title or text, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn create_word(
    conn: &mut DbConnection<'_>,
    input: WordInput,
) -> ServiceResult<WordOfDay> {
    let input = input.normalized()?;
    let new_word = NewWordOfDay {
        id: Uuid::now_v7(),
        title: &input.title,
        text: &input.text,
        attribution: input.attribution.as_deref(),
        status: input.status,
        tags: input.tags.clone(),
        display_date: input.display_date.as_deref(),
    };
    let created = word_query::create_word(conn, &new_word).await?;

    tracing::info!(item = %created.id, status = %created.status, "Word of the day created");
    Ok(created)
}

/// ## Summary
/// Replaces every editable field of an item.
///
/// ## Errors
/// Returns `ValidationError` for a blank title or text, `NotFound` for an
/// unknown item, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn update_word(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    input: WordInput,
) -> ServiceResult<WordOfDay> {
    let input = input.normalized()?;
    let changes = WordOfDayChangeset {
        title: &input.title,
        text: &input.text,
        attribution: input.attribution.as_deref(),
        status: input.status,
        tags: input.tags.clone(),
        display_date: input.display_date.as_deref(),
    };

    let updated = word_query::update_word(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::not_found("word of the day", id))?;

    tracing::info!(item = %id, status = %updated.status, "Word of the day updated");
    Ok(updated)
}

/// ## Summary
/// Deletes an item. The rotation forgets it and schedule entries targeting
/// it are removed along with it.
///
/// ## Errors
/// Returns `NotFound` if no item has this id, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn delete_word(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    match word_query::delete_word(conn, id).await? {
        0 => Err(ServiceError::not_found("word of the day", id)),
        _ => {
            tracing::info!(item = %id, "Word of the day deleted");
            Ok(())
        }
    }
}

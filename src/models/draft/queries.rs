use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::AppError;
use crate::models::image;

use super::types::{DraftDetail, DraftListItem, DraftStatus, DraftType};

fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

const SELECT_DRAFT: &str = "\
    SELECT d.id, d.draft_type, d.title, d.content, d.status, d.review_note, \
           d.owner_id, COALESCE(u.display_name, '') AS owner_name, \
           d.published_id, d.submitted_at, d.reviewed_at, d.created_at, d.updated_at \
    FROM drafts d \
    LEFT JOIN users u ON u.id = d.owner_id";

fn row_to_list_item(row: &rusqlite::Row) -> rusqlite::Result<DraftListItem> {
    let type_str: String = row.get("draft_type")?;
    let status_str: String = row.get("status")?;
    Ok(DraftListItem {
        id: row.get("id")?,
        draft_type: DraftType::parse(&type_str).unwrap_or(DraftType::Course),
        title: row.get("title")?,
        status: DraftStatus::parse(&status_str).unwrap_or(DraftStatus::Draft),
        owner_id: row.get("owner_id")?,
        owner_name: row.get("owner_name")?,
        review_note: row.get("review_note")?,
        published_id: row.get("published_id")?,
        submitted_at: row.get("submitted_at")?,
        reviewed_at: row.get("reviewed_at")?,
        created_at: row.get("created_at")?,
    })
}

/// Create a draft. `status` must be DRAFT (save) or PENDING (direct submit).
pub fn create(
    conn: &Connection,
    owner_id: i64,
    draft_type: DraftType,
    title: &str,
    content: &serde_json::Value,
    status: DraftStatus,
) -> Result<i64, AppError> {
    if !matches!(status, DraftStatus::Draft | DraftStatus::Pending) {
        return Err(AppError::Validation(
            "New drafts must start as DRAFT or PENDING".to_string(),
        ));
    }

    let submitted_at = match status {
        DraftStatus::Pending => Some(now_iso()),
        _ => None,
    };

    conn.execute(
        "INSERT INTO drafts (draft_type, title, content, status, owner_id, submitted_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            draft_type.as_str(),
            title,
            serde_json::to_string(content)?,
            status.as_str(),
            owner_id,
            submitted_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<DraftDetail>, AppError> {
    let sql = format!("{SELECT_DRAFT} WHERE d.id = ?1");
    let row = conn
        .query_row(&sql, params![id], |row| {
            let type_str: String = row.get("draft_type")?;
            let status_str: String = row.get("status")?;
            let content_str: String = row.get("content")?;
            Ok((
                content_str,
                DraftDetail {
                    id: row.get("id")?,
                    draft_type: DraftType::parse(&type_str).unwrap_or(DraftType::Course),
                    title: row.get("title")?,
                    content: serde_json::Value::Null,
                    status: DraftStatus::parse(&status_str).unwrap_or(DraftStatus::Draft),
                    owner_id: row.get("owner_id")?,
                    owner_name: row.get("owner_name")?,
                    review_note: row.get("review_note")?,
                    published_id: row.get("published_id")?,
                    image_ids: Vec::new(),
                    submitted_at: row.get("submitted_at")?,
                    reviewed_at: row.get("reviewed_at")?,
                    created_at: row.get("created_at")?,
                    updated_at: row.get("updated_at")?,
                },
            ))
        })
        .optional()?;

    match row {
        Some((content_str, mut detail)) => {
            detail.content =
                serde_json::from_str(&content_str).unwrap_or(serde_json::Value::Null);
            detail.image_ids = image::ids_for_draft(conn, detail.id)?;
            Ok(Some(detail))
        }
        None => Ok(None),
    }
}

/// Drafts belonging to one owner, newest first, optionally filtered by status.
pub fn find_for_owner(
    conn: &Connection,
    owner_id: i64,
    status: Option<DraftStatus>,
) -> Result<Vec<DraftListItem>, AppError> {
    let items = match status {
        Some(s) => {
            let sql = format!(
                "{SELECT_DRAFT} WHERE d.owner_id = ?1 AND d.status = ?2 \
                 ORDER BY d.created_at DESC, d.id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_map(params![owner_id, s.as_str()], row_to_list_item)?
                .collect::<Result<Vec<_>, _>>()?
        }
        None => {
            let sql = format!(
                "{SELECT_DRAFT} WHERE d.owner_id = ?1 \
                 ORDER BY d.created_at DESC, d.id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_map(params![owner_id], row_to_list_item)?
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(items)
}

/// Every draft on the platform (the admin review queue), newest first.
pub fn find_all(
    conn: &Connection,
    status: Option<DraftStatus>,
) -> Result<Vec<DraftListItem>, AppError> {
    let items = match status {
        Some(s) => {
            let sql = format!(
                "{SELECT_DRAFT} WHERE d.status = ?1 ORDER BY d.created_at DESC, d.id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_map(params![s.as_str()], row_to_list_item)?
                .collect::<Result<Vec<_>, _>>()?
        }
        None => {
            let sql = format!("{SELECT_DRAFT} ORDER BY d.created_at DESC, d.id DESC");
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_map([], row_to_list_item)?
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(items)
}

/// Write a validated status change, maintaining the bookkeeping columns:
/// entering PENDING stamps `submitted_at`; APPROVED/REJECTED stamp
/// `reviewed_at`; the review note is stored on rejection and cleared on any
/// other transition.
pub fn update_status(
    conn: &Connection,
    id: i64,
    new_status: DraftStatus,
    review_note: Option<&str>,
) -> Result<(), AppError> {
    let now = now_iso();

    match new_status {
        DraftStatus::Pending => {
            conn.execute(
                "UPDATE drafts SET status = ?1, submitted_at = ?2, review_note = NULL, \
                 updated_at = ?2 WHERE id = ?3",
                params![new_status.as_str(), now, id],
            )?;
        }
        DraftStatus::Approved | DraftStatus::Rejected => {
            conn.execute(
                "UPDATE drafts SET status = ?1, reviewed_at = ?2, review_note = ?3, \
                 updated_at = ?2 WHERE id = ?4",
                params![new_status.as_str(), now, review_note, id],
            )?;
        }
        _ => {
            conn.execute(
                "UPDATE drafts SET status = ?1, review_note = NULL, updated_at = ?2 \
                 WHERE id = ?3",
                params![new_status.as_str(), now, id],
            )?;
        }
    }
    Ok(())
}

/// Revise title/content in place (owner edit while DRAFT or REJECTED).
pub fn update_content(
    conn: &Connection,
    id: i64,
    title: Option<&str>,
    content: Option<&serde_json::Value>,
) -> Result<(), AppError> {
    if let Some(t) = title {
        conn.execute(
            "UPDATE drafts SET title = ?1, updated_at = ?2 WHERE id = ?3",
            params![t, now_iso(), id],
        )?;
    }
    if let Some(c) = content {
        conn.execute(
            "UPDATE drafts SET content = ?1, updated_at = ?2 WHERE id = ?3",
            params![serde_json::to_string(c)?, now_iso(), id],
        )?;
    }
    Ok(())
}

/// Record the live Course/Organization a draft produced on approval.
pub fn set_published(conn: &Connection, id: i64, published_id: i64) -> Result<(), AppError> {
    conn.execute(
        "UPDATE drafts SET published_id = ?1 WHERE id = ?2",
        params![published_id, id],
    )?;
    Ok(())
}

/// Clone a draft's content and images into a new DRAFT for the same owner.
/// Works from any status; the copy starts its lifecycle from scratch.
pub fn copy(conn: &Connection, id: i64) -> Result<i64, AppError> {
    let source = find_by_id(conn, id)?.ok_or(AppError::NotFound)?;

    let title = format!("{} (copy)", source.title);
    let new_id = create(
        conn,
        source.owner_id,
        source.draft_type,
        &title,
        &source.content,
        DraftStatus::Draft,
    )?;

    for (i, image_id) in source.image_ids.iter().enumerate() {
        image::link_to_draft(conn, new_id, *image_id, i as i64)?;
    }

    Ok(new_id)
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), AppError> {
    conn.execute("DELETE FROM drafts WHERE id = ?1", params![id])?;
    Ok(())
}

/// Per-status draft counts for one owner (the advocate dashboard stats).
pub fn count_by_status_for_owner(
    conn: &Connection,
    owner_id: i64,
    status: DraftStatus,
) -> Result<i64, AppError> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM drafts WHERE owner_id = ?1 AND status = ?2",
        params![owner_id, status.as_str()],
        |row| row.get(0),
    )?;
    Ok(n)
}

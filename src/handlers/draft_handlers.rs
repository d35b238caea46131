use actix_multipart::Multipart;
use actix_session::Session;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use std::collections::HashMap;

use crate::auth::session::{get_role, require_login};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::draft::{
    self, Actor, DraftPatch, DraftStatus, DraftSubmission, DraftType,
};
use crate::models::{course, image, organization};

use super::ApiMessage;

/// Content must deserialize into the payload shape for its draft type before
/// it can enter review or be published.
fn parse_content(
    draft_type: DraftType,
    content: &serde_json::Value,
) -> Result<(), AppError> {
    match draft_type {
        DraftType::Course => {
            serde_json::from_value::<course::CoursePayload>(content.clone())
                .map(|_| ())
                .map_err(|e| AppError::Validation(format!("Invalid course content: {e}")))
        }
        DraftType::Organization => {
            serde_json::from_value::<organization::OrganizationPayload>(content.clone())
                .map(|_| ())
                .map_err(|e| AppError::Validation(format!("Invalid organization content: {e}")))
        }
    }
}

/// GET /api/drafts - own drafts; a platform admin passing `all=1` sees the
/// full review queue. Optional `status` filter.
pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_login(&session)?;
    let role = get_role(&session);

    let status = match query.get("status") {
        Some(s) => Some(
            DraftStatus::parse(s)
                .ok_or_else(|| AppError::Validation(format!("Unknown status '{s}'")))?,
        ),
        None => None,
    };
    let want_all = query.get("all").map(|v| v == "1").unwrap_or(false);

    let conn = pool.get()?;
    let items = if want_all && role.is_some_and(|r| r.is_reviewer()) {
        draft::find_all(&conn, status)?
    } else {
        draft::find_for_owner(&conn, user_id, status)?
    };

    Ok(HttpResponse::Ok().json(items))
}

/// POST /api/drafts - multipart submission: JSON under `data`, files under
/// `image_0..N`.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let owner_id = require_login(&session)?;
    let role = get_role(&session)
        .ok_or_else(|| AppError::Session("No role in session".to_string()))?;
    if !role.can_submit_drafts() {
        return Err(AppError::PermissionDenied("advocate, org_admin".to_string()));
    }

    let mut data_json: Option<String> = None;
    // (index, filename, content type, bytes)
    let mut uploads: Vec<(i64, String, String, Vec<u8>)> = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::Upload(e.to_string()))?;
        let name = field.name().unwrap_or("").to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("upload")
            .to_string();
        let content_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::Upload(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }

        if name == "data" {
            let text = String::from_utf8(bytes)
                .map_err(|_| AppError::Upload("data field is not UTF-8".to_string()))?;
            data_json = Some(text);
        } else if let Some(index) = name.strip_prefix("image_") {
            let index: i64 = index
                .parse()
                .map_err(|_| AppError::Upload(format!("Bad image field name '{name}'")))?;
            uploads.push((index, filename, content_type, bytes));
        }
        // Unknown fields are ignored.
    }

    let data_json = data_json
        .ok_or_else(|| AppError::Upload("Missing 'data' field".to_string()))?;
    let submission: DraftSubmission = serde_json::from_str(&data_json)
        .map_err(|e| AppError::Validation(format!("Invalid draft payload: {e}")))?;

    // Unparseable content may be saved as DRAFT, but not submitted.
    if submission.status == DraftStatus::Pending {
        parse_content(submission.draft_type, &submission.content)?;
    }

    let title = if submission.title.trim().is_empty() {
        derived_title(&submission)
    } else {
        submission.title.clone()
    };

    let conn = pool.get()?;
    let draft_id = draft::create(
        &conn,
        owner_id,
        submission.draft_type,
        &title,
        &submission.content,
        submission.status,
    )?;

    uploads.sort_by_key(|(index, ..)| *index);
    for (i, (_, filename, content_type, bytes)) in uploads.iter().enumerate() {
        let image_id = image::create(&conn, filename, content_type, bytes)?;
        image::link_to_draft(&conn, draft_id, image_id, i as i64)?;
    }

    let detail = draft::find_by_id(&conn, draft_id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(detail))
}

fn derived_title(submission: &DraftSubmission) -> String {
    let key = match submission.draft_type {
        DraftType::Course => "title",
        DraftType::Organization => "name",
    };
    submission
        .content
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("Untitled")
        .to_string()
}

/// GET /api/drafts/{id} - owner or platform admin.
pub async fn detail(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_login(&session)?;
    let conn = pool.get()?;
    let d = draft::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;

    let is_reviewer = get_role(&session).is_some_and(|r| r.is_reviewer());
    if d.owner_id != user_id && !is_reviewer {
        return Err(AppError::PermissionDenied("owner or platform_admin".to_string()));
    }

    Ok(HttpResponse::Ok().json(d))
}

/// PATCH /api/drafts/{id} - content revision and/or a status transition.
///
/// Revisions (title/content) are owner-only and only while the draft sits in
/// DRAFT or REJECTED. Status changes are validated against the lifecycle
/// table; approval materializes the draft into a live course/organization.
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<DraftPatch>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_login(&session)?;
    let id = path.into_inner();
    let conn = pool.get()?;
    let d = draft::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    let is_owner = d.owner_id == user_id;
    let is_reviewer = get_role(&session).is_some_and(|r| r.is_reviewer());
    if !is_owner && !is_reviewer {
        return Err(AppError::PermissionDenied("owner or platform_admin".to_string()));
    }

    // Revision first, so revise-and-resubmit works in one request.
    if body.title.is_some() || body.content.is_some() {
        if !is_owner {
            return Err(AppError::PermissionDenied("owner".to_string()));
        }
        if !matches!(d.status, DraftStatus::Draft | DraftStatus::Rejected) {
            return Err(AppError::InvalidTransition(format!(
                "Cannot edit a draft in status {}",
                d.status.as_str()
            )));
        }
        draft::update_content(&conn, id, body.title.as_deref(), body.content.as_ref())?;
    }

    if let Some(new_status) = body.status {
        let actor = if is_owner { Actor::Owner } else { Actor::Reviewer };
        draft::validate_transition(d.status, new_status, actor)?;

        match new_status {
            DraftStatus::Pending => {
                // Submission gate: content must parse for its type.
                let current = draft::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
                parse_content(current.draft_type, &current.content)?;
            }
            DraftStatus::Rejected => {
                let note_ok = body
                    .review_note
                    .as_deref()
                    .is_some_and(|n| !n.trim().is_empty());
                if !note_ok {
                    return Err(AppError::Validation(
                        "A review note is required when rejecting".to_string(),
                    ));
                }
            }
            DraftStatus::Approved => {
                let published_id = publish(&conn, &d)?;
                draft::set_published(&conn, id, published_id)?;
            }
            _ => {}
        }

        draft::update_status(&conn, id, new_status, body.review_note.as_deref())?;
    }

    let updated = draft::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Materialize an approved draft into a live record, returning its id.
/// The draft's images move onto a published course in their draft order.
fn publish(conn: &rusqlite::Connection, d: &draft::DraftDetail) -> Result<i64, AppError> {
    match d.draft_type {
        DraftType::Course => {
            let payload: course::CoursePayload = serde_json::from_value(d.content.clone())
                .map_err(|e| AppError::Validation(format!("Invalid course content: {e}")))?;
            organization::find_by_id(conn, payload.organization_id)?
                .ok_or_else(|| AppError::Validation("Unknown organization".to_string()))?;
            let course_id = course::create(conn, &payload)?;
            for (i, image_id) in d.image_ids.iter().enumerate() {
                image::link_to_course(conn, course_id, *image_id, i as i64)?;
            }
            Ok(course_id)
        }
        DraftType::Organization => {
            let payload: organization::OrganizationPayload =
                serde_json::from_value(d.content.clone()).map_err(|e| {
                    AppError::Validation(format!("Invalid organization content: {e}"))
                })?;
            let org_id = organization::create(conn, &payload)?;
            Ok(org_id)
        }
    }
}

/// DELETE /api/drafts/{id} - owner only, never for APPROVED drafts.
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_login(&session)?;
    let id = path.into_inner();
    let conn = pool.get()?;
    let d = draft::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    if d.owner_id != user_id {
        return Err(AppError::PermissionDenied("owner".to_string()));
    }
    draft::validate_delete(d.status)?;
    draft::delete(&conn, id)?;

    Ok(HttpResponse::Ok().json(ApiMessage::new("Draft deleted")))
}

/// POST /api/drafts/{id}/copy - clone into a fresh DRAFT, any status.
pub async fn copy(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_login(&session)?;
    let id = path.into_inner();
    let conn = pool.get()?;
    let d = draft::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    if d.owner_id != user_id {
        return Err(AppError::PermissionDenied("owner".to_string()));
    }

    let new_id = draft::copy(&conn, id)?;
    let detail = draft::find_by_id(&conn, new_id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(detail))
}

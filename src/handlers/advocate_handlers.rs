use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::session::{require_login, require_role};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::advocate::{self, ProfilePayload, validate_profile_transition};
use crate::models::draft::DraftStatus;
use crate::models::user::Role;

/// GET /api/advocates - public list of approved profiles.
pub async fn public_list(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let profiles = advocate::find_public(&conn)?;
    Ok(HttpResponse::Ok().json(profiles))
}

/// GET /api/advocates/pending - platform admin review queue.
pub async fn pending_list(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, &[Role::PlatformAdmin])?;
    let conn = pool.get()?;
    let profiles = advocate::find_pending(&conn)?;
    Ok(HttpResponse::Ok().json(profiles))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReview {
    pub status: DraftStatus,
}

/// PATCH /api/advocates/{id} - reviewer decides a pending profile.
pub async fn review(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<ProfileReview>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, &[Role::PlatformAdmin])?;

    let id = path.into_inner();
    let conn = pool.get()?;
    let profile = advocate::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    validate_profile_transition(profile.status, body.status, true)?;
    advocate::set_status(&conn, id, body.status)?;

    let updated = advocate::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// GET /api/advocate/profile - the caller's own profile.
pub async fn profile(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user_id = require_role(&session, &[Role::Advocate])?;
    let conn = pool.get()?;
    let profile = advocate::find_by_user(&conn, user_id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/advocate/profile - create or replace; content changes re-enter
/// review as PENDING.
pub async fn upsert_profile(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<ProfilePayload>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_role(&session, &[Role::Advocate])?;

    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let conn = pool.get()?;
    let profile = advocate::upsert(&conn, user_id, &body)?;
    Ok(HttpResponse::Ok().json(profile))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileVisibility {
    pub status: DraftStatus,
}

/// PATCH /api/advocate/profile - owner toggles APPROVED <-> HIDDEN.
pub async fn toggle_visibility(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<ProfileVisibility>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_role(&session, &[Role::Advocate])?;
    let conn = pool.get()?;
    let profile = advocate::find_by_user(&conn, user_id)?.ok_or(AppError::NotFound)?;

    validate_profile_transition(profile.status, body.status, false)?;
    advocate::set_status(&conn, profile.id, body.status)?;

    let updated = advocate::find_by_user(&conn, user_id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// GET /api/advocate/stats - own draft counters.
pub async fn stats(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user_id = require_login(&session)?;
    let conn = pool.get()?;
    let stats = advocate::stats_for_user(&conn, user_id)?;
    Ok(HttpResponse::Ok().json(stats))
}

/// GET /api/advocate/rank - standing by approved-draft count.
pub async fn rank(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user_id = require_login(&session)?;
    let conn = pool.get()?;
    let rank = advocate::rank_for_user(&conn, user_id)?;
    Ok(HttpResponse::Ok().json(rank))
}

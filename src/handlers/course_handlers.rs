use actix_session::Session;
use actix_web::{HttpResponse, web};
use std::collections::HashMap;

use crate::auth::session::require_role;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::user::Role;
use crate::models::{badge, course, organization};

use super::{ApiMessage, PaginatedResponse, pagination};

/// GET /api/courses - public catalog list.
/// Query params: badge, organization_id, q, page (default 1), per_page (default 25).
pub async fn list(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let (page, per_page) = pagination(&query);
    let filter = course::CourseFilter {
        badge: query.get("badge").cloned(),
        organization_id: query.get("organization_id").and_then(|s| s.parse().ok()),
        q: query.get("q").cloned(),
    };

    let conn = pool.get()?;
    let course_page = course::find_page(&conn, &filter, page, per_page)?;

    Ok(HttpResponse::Ok().json(PaginatedResponse {
        items: course_page.items,
        page: course_page.page,
        per_page: course_page.per_page,
        total: course_page.total_count,
    }))
}

/// GET /api/courses/{id}
pub async fn detail(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let detail = course::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(detail))
}

/// GET /api/badges - the fixed badge vocabulary (for filter UIs).
pub async fn badges() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(badge::BADGES))
}

/// POST /api/courses - platform admin creates a course directly.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<course::CoursePayload>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, &[Role::PlatformAdmin])?;

    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let conn = pool.get()?;
    organization::find_by_id(&conn, body.organization_id)?
        .ok_or_else(|| AppError::Validation("Unknown organization".to_string()))?;

    let id = course::create(&conn, &body)?;
    let detail = course::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(detail))
}

/// PATCH /api/courses/{id} - partial update.
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<course::CoursePatch>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, &[Role::PlatformAdmin])?;

    let id = path.into_inner();
    let conn = pool.get()?;
    course::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    course::update(&conn, id, &body)?;

    let detail = course::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(detail))
}

/// DELETE /api/courses/{id}
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, &[Role::PlatformAdmin])?;

    let id = path.into_inner();
    let conn = pool.get()?;
    course::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    course::delete(&conn, id)?;

    Ok(HttpResponse::Ok().json(ApiMessage::new("Course deleted")))
}

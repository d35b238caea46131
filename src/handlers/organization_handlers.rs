use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::auth::session::require_role;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::user::Role;
use crate::models::{course, organization};

use super::ApiMessage;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationDetail {
    #[serde(flatten)]
    organization: organization::Organization,
    course_count: i64,
    courses: Vec<course::CourseListItem>,
}

/// GET /api/organizations
pub async fn list(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let orgs = organization::find_all(&conn)?;
    Ok(HttpResponse::Ok().json(orgs))
}

/// GET /api/organizations/{id} - detail including published courses.
pub async fn detail(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let conn = pool.get()?;
    let org = organization::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    let filter = course::CourseFilter {
        organization_id: Some(id),
        ..course::CourseFilter::default()
    };
    let courses = course::find_page(&conn, &filter, 1, 100)?;

    Ok(HttpResponse::Ok().json(OrganizationDetail {
        organization: org,
        course_count: course::count_for_org(&conn, id)?,
        courses: courses.items,
    }))
}

/// POST /api/organizations - platform admin only.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<organization::OrganizationPayload>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, &[Role::PlatformAdmin])?;

    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let conn = pool.get()?;
    let id = organization::create(&conn, &body)?;
    let org = organization::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(org))
}

/// PATCH /api/organizations/{id}
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<organization::OrganizationPatch>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, &[Role::PlatformAdmin])?;

    let id = path.into_inner();
    let conn = pool.get()?;
    organization::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    organization::update(&conn, id, &body)?;

    let org = organization::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(org))
}

/// DELETE /api/organizations/{id} - cascades to the organization's courses.
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, &[Role::PlatformAdmin])?;

    let id = path.into_inner();
    let conn = pool.get()?;
    organization::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    organization::delete(&conn, id)?;

    Ok(HttpResponse::Ok().json(ApiMessage::new("Organization deleted")))
}

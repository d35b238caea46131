use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::{password, session};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::user::{self, UserDisplay};

use super::ApiMessage;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
pub async fn login(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let found = user::find_by_email(&conn, &body.email)?;

    match found {
        Some(u) if password::verify_password(&body.password, &u.password_hash).unwrap_or(false) => {
            session::establish(&session, u.id, u.role, &u.display_name);
            Ok(HttpResponse::Ok().json(UserDisplay::from(u)))
        }
        // Same response for unknown email and wrong password.
        _ => Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Invalid email or password" }))),
    }
}

/// POST /api/auth/logout
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    session.purge();
    Ok(HttpResponse::Ok().json(ApiMessage::new("Logged out")))
}

/// GET /api/auth/me
pub async fn me(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user_id = session::require_login(&session)?;
    let conn = pool.get()?;
    let u = user::find_by_id(&conn, user_id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(UserDisplay::from(u)))
}

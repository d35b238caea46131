use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    Json(serde_json::Error),
    Session(String),
    Validation(String),
    PermissionDenied(String),
    InvalidTransition(String),
    Upload(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Json(e) => write!(f, "JSON error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Validation(e) => write!(f, "{e}"),
            AppError::PermissionDenied(role) => write!(f, "Requires role: {role}"),
            AppError::InvalidTransition(e) => write!(f, "{e}"),
            AppError::Upload(e) => write!(f, "Upload error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

fn json_error(msg: &str) -> serde_json::Value {
    serde_json::json!({ "error": msg })
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(json_error("Not found")),
            AppError::Validation(msg) | AppError::Upload(msg) => {
                HttpResponse::BadRequest().json(json_error(msg))
            }
            AppError::InvalidTransition(msg) => {
                HttpResponse::Conflict().json(json_error(msg))
            }
            AppError::PermissionDenied(_) => {
                HttpResponse::Forbidden().json(json_error("Permission denied"))
            }
            AppError::Session(_) => {
                HttpResponse::Unauthorized().json(json_error("Not logged in"))
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().json(json_error("Internal server error"))
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

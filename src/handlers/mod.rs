pub mod advocate_handlers;
pub mod auth_handlers;
pub mod course_handlers;
pub mod draft_handlers;
pub mod image_handlers;
pub mod organization_handlers;

use serde::Serialize;

/// Standard pagination envelope for list endpoints.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

/// `{"message": ...}` body for mutations with nothing else to return.
#[derive(Serialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(msg: impl Into<String>) -> Self {
        ApiMessage { message: msg.into() }
    }
}

/// Parse `page` / `per_page` query params with the usual defaults and caps.
pub fn pagination(query: &std::collections::HashMap<String, String>) -> (i64, i64) {
    let page = query
        .get("page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(1)
        .max(1);
    let per_page = query
        .get("per_page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(25)
        .max(1)
        .min(100);
    (page, per_page)
}

use actix_session::Session;

use crate::errors::AppError;
use crate::models::user::Role;

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn get_role(session: &Session) -> Option<Role> {
    session
        .get::<String>("role")
        .unwrap_or(None)
        .and_then(|s| Role::parse(&s))
}

/// Logged-in user id, or a 401-mapped error.
pub fn require_login(session: &Session) -> Result<i64, AppError> {
    get_user_id(session).ok_or_else(|| AppError::Session("User not logged in".to_string()))
}

/// Logged-in user id plus role check; 403-mapped error on mismatch.
pub fn require_role(session: &Session, allowed: &[Role]) -> Result<i64, AppError> {
    let user_id = require_login(session)?;
    let role = get_role(session)
        .ok_or_else(|| AppError::Session("No role in session".to_string()))?;
    if allowed.contains(&role) {
        Ok(user_id)
    } else {
        let wanted = allowed
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(AppError::PermissionDenied(wanted))
    }
}

/// Store the authenticated identity on the session.
pub fn establish(session: &Session, user_id: i64, role: Role, display_name: &str) {
    let _ = session.insert("user_id", user_id);
    let _ = session.insert("role", role.as_str());
    let _ = session.insert("display_name", display_name);
}

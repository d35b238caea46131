use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::draft::DraftStatus;

/// A youth advocate's public profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvocateProfile {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub name_mm: String,
    pub bio: String,
    pub bio_mm: String,
    pub photo_image_id: Option<i64>,
    pub status: DraftStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Upsert payload for `PUT /api/advocate/profile`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: String,
    #[serde(default)]
    pub name_mm: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub bio_mm: String,
    #[serde(default)]
    pub photo_image_id: Option<i64>,
}

/// Advocate dashboard counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvocateStats {
    pub total: i64,
    pub draft: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

/// Standing among advocates by approved-draft count. Ties share a rank.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvocateRank {
    pub rank: i64,
    pub total_advocates: i64,
    pub approved_count: i64,
}

/// The profile machine is analogous to the draft machine but separate: the
/// owner may toggle an APPROVED profile to HIDDEN and back, and a reviewer
/// decides PENDING profiles.
pub fn validate_profile_transition(
    from: DraftStatus,
    to: DraftStatus,
    is_reviewer: bool,
) -> Result<(), AppError> {
    use DraftStatus::*;

    let allowed = match (from, to) {
        (Approved, Hidden) | (Hidden, Approved) => true,
        (Pending, Approved) | (Pending, Rejected) => is_reviewer,
        _ => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::InvalidTransition(format!(
            "Cannot move profile from {} to {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

use serde::{Deserialize, Serialize};

/// What a draft proposes to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DraftType {
    Course,
    Organization,
}

impl DraftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftType::Course => "COURSE",
            DraftType::Organization => "ORGANIZATION",
        }
    }

    pub fn parse(s: &str) -> Option<DraftType> {
        match s {
            "COURSE" => Some(DraftType::Course),
            "ORGANIZATION" => Some(DraftType::Organization),
            _ => None,
        }
    }
}

/// Draft review lifecycle states.
///
/// `Hidden` belongs to the sibling advocate-profile machine; it is parsed
/// here so the two machines share one status vocabulary on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DraftStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Hidden,
}

impl DraftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Draft => "DRAFT",
            DraftStatus::Pending => "PENDING",
            DraftStatus::Approved => "APPROVED",
            DraftStatus::Rejected => "REJECTED",
            DraftStatus::Hidden => "HIDDEN",
        }
    }

    pub fn parse(s: &str) -> Option<DraftStatus> {
        match s {
            "DRAFT" => Some(DraftStatus::Draft),
            "PENDING" => Some(DraftStatus::Pending),
            "APPROVED" => Some(DraftStatus::Approved),
            "REJECTED" => Some(DraftStatus::Rejected),
            "HIDDEN" => Some(DraftStatus::Hidden),
            _ => None,
        }
    }
}

/// Draft as shown in list views (own drafts or the admin review queue).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftListItem {
    pub id: i64,
    pub draft_type: DraftType,
    pub title: String,
    pub status: DraftStatus,
    pub owner_id: i64,
    pub owner_name: String,
    pub review_note: Option<String>,
    pub published_id: Option<i64>,
    pub submitted_at: Option<String>,
    pub reviewed_at: Option<String>,
    pub created_at: String,
}

/// Full draft detail, including the structured content payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDetail {
    pub id: i64,
    pub draft_type: DraftType,
    pub title: String,
    pub content: serde_json::Value,
    pub status: DraftStatus,
    pub owner_id: i64,
    pub owner_name: String,
    pub review_note: Option<String>,
    pub published_id: Option<i64>,
    pub image_ids: Vec<i64>,
    pub submitted_at: Option<String>,
    pub reviewed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// The JSON under the multipart `data` field on submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSubmission {
    pub draft_type: DraftType,
    #[serde(default)]
    pub title: String,
    pub content: serde_json::Value,
    /// `DRAFT` to save without submitting, `PENDING` to submit for review.
    pub status: DraftStatus,
}

/// PATCH body: a status transition, a content revision, or both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPatch {
    pub status: Option<DraftStatus>,
    pub review_note: Option<String>,
    pub title: Option<String>,
    pub content: Option<serde_json::Value>,
}

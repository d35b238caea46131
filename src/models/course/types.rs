use serde::{Deserialize, Serialize};

use crate::models::badge::Badge;
use crate::models::estimated_date::{self, EstimatedDate};
use crate::models::faq::Faq;
use crate::models::organization::Organization;

/// Course as shown in the public catalog list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListItem {
    pub id: i64,
    pub organization_id: i64,
    pub organization_name: String,
    pub organization_name_mm: String,
    pub title: String,
    pub title_mm: String,
    pub duration: String,
    pub fee: String,
    pub location: String,
    pub location_mm: String,
    pub start_date: String,
    pub apply_by_date: String,
    #[serde(flatten)]
    pub estimated: EstimatedDate,
    pub badges: Vec<Badge>,
}

/// Full course detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: i64,
    pub organization: Organization,
    pub title: String,
    pub title_mm: String,
    pub description: String,
    pub description_mm: String,
    pub schedule: String,
    pub schedule_mm: String,
    pub duration: String,
    pub fee: String,
    pub location: String,
    pub location_mm: String,
    pub apply_url: String,
    pub start_date: String,
    pub apply_by_date: String,
    #[serde(flatten)]
    pub estimated: EstimatedDate,
    pub badges: Vec<Badge>,
    pub image_ids: Vec<i64>,
    pub faqs: Vec<Faq>,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating a course — also the JSON shape inside a COURSE
/// draft's content.
///
/// The estimated date arrives either structured (`estimatedDate` +
/// `showEstimatedFor*` booleans) or, from older clients, as the packed
/// `estimatedDateRaw` string which is decoded with the legacy rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub organization_id: i64,
    pub title: String,
    #[serde(default)]
    pub title_mm: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_mm: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub schedule_mm: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub fee: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub location_mm: String,
    #[serde(default)]
    pub apply_url: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub apply_by_date: String,
    #[serde(default)]
    pub estimated_date: Option<String>,
    #[serde(default)]
    pub show_estimated_for_start_date: Option<bool>,
    #[serde(default)]
    pub show_estimated_for_apply_by_date: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_date_raw: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

impl CoursePayload {
    /// Resolve whichever estimated-date form the client sent.
    /// Structured fields win; the packed string is a legacy fallback and goes
    /// through the repair-tolerant decoder.
    pub fn resolved_estimated(&self) -> EstimatedDate {
        if self.estimated_date.is_some()
            || self.show_estimated_for_start_date.is_some()
            || self.show_estimated_for_apply_by_date.is_some()
        {
            return EstimatedDate {
                estimated_date: self.estimated_date.clone().unwrap_or_default(),
                show_estimated_for_start_date: self.show_estimated_for_start_date.unwrap_or(false),
                show_estimated_for_apply_by_date: self
                    .show_estimated_for_apply_by_date
                    .unwrap_or(false),
            };
        }
        match &self.estimated_date_raw {
            Some(raw) => estimated_date::parse_existing(raw),
            None => EstimatedDate {
                estimated_date: String::new(),
                show_estimated_for_start_date: false,
                show_estimated_for_apply_by_date: false,
            },
        }
    }
}

/// Partial update for admin course edits — only present fields change.
/// `badges` and `faqs`, when present, replace the full set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePatch {
    pub organization_id: Option<i64>,
    pub title: Option<String>,
    pub title_mm: Option<String>,
    pub description: Option<String>,
    pub description_mm: Option<String>,
    pub schedule: Option<String>,
    pub schedule_mm: Option<String>,
    pub duration: Option<String>,
    pub fee: Option<String>,
    pub location: Option<String>,
    pub location_mm: Option<String>,
    pub apply_url: Option<String>,
    pub start_date: Option<String>,
    pub apply_by_date: Option<String>,
    pub estimated_date: Option<String>,
    pub show_estimated_for_start_date: Option<bool>,
    pub show_estimated_for_apply_by_date: Option<bool>,
    pub badges: Option<Vec<String>>,
    pub faqs: Option<Vec<Faq>>,
}

/// Catalog list filters.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub badge: Option<String>,
    pub organization_id: Option<i64>,
    pub q: Option<String>,
}

/// Pagination envelope for the catalog.
pub struct CoursePage {
    pub items: Vec<CourseListItem>,
    pub page: i64,
    pub per_page: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

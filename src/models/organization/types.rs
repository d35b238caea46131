use serde::{Deserialize, Serialize};

/// Organization as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub name_mm: String,
    pub description: String,
    pub description_mm: String,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub address_mm: String,
    pub logo_image_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating an organization — also the JSON shape inside an
/// ORGANIZATION draft's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPayload {
    pub name: String,
    #[serde(default)]
    pub name_mm: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_mm: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub address_mm: String,
    #[serde(default)]
    pub logo_image_id: Option<i64>,
}

/// Partial update — only present fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPatch {
    pub name: Option<String>,
    pub name_mm: Option<String>,
    pub description: Option<String>,
    pub description_mm: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub address_mm: Option<String>,
    pub logo_image_id: Option<Option<i64>>,
}

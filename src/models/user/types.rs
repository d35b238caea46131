use serde::{Deserialize, Serialize};

/// Platform roles. Stored lowercase in the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    PlatformAdmin,
    OrgAdmin,
    Advocate,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::PlatformAdmin => "platform_admin",
            Role::OrgAdmin => "org_admin",
            Role::Advocate => "advocate",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "platform_admin" => Some(Role::PlatformAdmin),
            "org_admin" => Some(Role::OrgAdmin),
            "advocate" => Some(Role::Advocate),
            _ => None,
        }
    }

    /// Platform admins review drafts and advocate profiles.
    pub fn is_reviewer(&self) -> bool {
        matches!(self, Role::PlatformAdmin)
    }

    /// Roles allowed to author drafts.
    pub fn can_submit_drafts(&self) -> bool {
        matches!(self, Role::Advocate | Role::OrgAdmin)
    }
}

/// Internal user struct for authentication — includes the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
    pub organization_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Safe shape for API responses — no password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDisplay {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub organization_id: Option<i64>,
}

impl From<User> for UserDisplay {
    fn from(u: User) -> Self {
        UserDisplay {
            id: u.id,
            email: u.email,
            display_name: u.display_name,
            role: u.role,
            organization_id: u.organization_id,
        }
    }
}

/// New user data for creation. `password_hash` is already hashed.
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
    pub organization_id: Option<i64>,
}

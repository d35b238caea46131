//! Shared test infrastructure for model layer tests.
//!
//! `setup_test_db()` creates a temporary SQLite database with the full schema
//! applied; the helpers below seed the accounts and catalog rows most tests
//! need.

#![allow(dead_code)]

use rusqlite::Connection;
use tempfile::TempDir;

use coursebridge::auth::password;
use coursebridge::db::MIGRATIONS;
use coursebridge::models::course::CoursePayload;
use coursebridge::models::organization::{self, OrganizationPayload};
use coursebridge::models::user::{self, NewUser, Role};

pub const TEST_PASSWORD: &str = "test-password-1";

/// Setup a test database with the schema applied.
///
/// Returns a tuple of (TempDir, Connection) where TempDir must be kept
/// alive for the Connection to remain valid.
pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
        .expect("Failed to set pragmas");

    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    (dir, conn)
}

pub fn create_user(conn: &Connection, email: &str, role: Role) -> i64 {
    let hash = password::hash_password(TEST_PASSWORD).expect("hash");
    user::create(
        conn,
        &NewUser {
            email: email.to_string(),
            password_hash: hash,
            display_name: email.split('@').next().unwrap_or(email).to_string(),
            role,
            organization_id: None,
        },
    )
    .expect("create user")
}

pub fn create_advocate(conn: &Connection, email: &str) -> i64 {
    create_user(conn, email, Role::Advocate)
}

pub fn create_org(conn: &Connection, name: &str) -> i64 {
    let payload: OrganizationPayload = serde_json::from_value(serde_json::json!({
        "name": name,
        "nameMm": format!("{name} (MM)"),
        "description": "Test organization",
        "email": "org@test.example",
    }))
    .expect("org payload");
    organization::create(conn, &payload).expect("create org")
}

/// A realistic bilingual course payload, built through serde so tests also
/// cover the camelCase wire shape.
pub fn course_payload(org_id: i64, title: &str) -> CoursePayload {
    serde_json::from_value(serde_json::json!({
        "organizationId": org_id,
        "title": title,
        "titleMm": "သင်တန်း",
        "description": "A test course",
        "descriptionMm": "စမ်းသပ်သင်တန်း",
        "schedule": "Mon-Fri",
        "duration": "8 weeks",
        "fee": "Free",
        "location": "Yangon",
        "locationMm": "ရန်ကုန်",
        "applyUrl": "https://example.org/apply",
        "startDate": "2026-01-05",
        "applyByDate": "2025-12-15",
        "badges": ["Free", "In-person", "Technology"],
        "faqs": [
            {"question": "Is it online?", "answer": "No, in person."}
        ]
    }))
    .expect("course payload")
}

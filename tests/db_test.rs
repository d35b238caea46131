//! Integration tests for pool setup, migrations, and seeding.

mod common;

use common::TEST_PASSWORD;
use coursebridge::auth::password;
use coursebridge::db;
use coursebridge::models::course::CourseFilter;
use coursebridge::models::user::{self, Role};
use coursebridge::models::{course, organization};
use tempfile::TempDir;

fn setup_pool() -> (TempDir, db::DbPool) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pool = db::init_pool(dir.path().join("test.db").to_str().unwrap());
    db::run_migrations(&pool);
    (dir, pool)
}

#[test]
fn test_migrations_are_idempotent() {
    let (_dir, pool) = setup_pool();
    // Running the batch again must not fail or duplicate anything
    db::run_migrations(&pool);
    let conn = pool.get().unwrap();
    assert_eq!(user::count(&conn).unwrap(), 0);
}

#[test]
fn test_seed_creates_admin_once() {
    let (_dir, pool) = setup_pool();
    let hash = password::hash_password(TEST_PASSWORD).unwrap();

    db::seed(&pool, &hash);
    let conn = pool.get().unwrap();
    assert_eq!(user::count(&conn).unwrap(), 1);

    let admin = user::find_by_email(&conn, db::ADMIN_EMAIL).unwrap().unwrap();
    assert_eq!(admin.role, Role::PlatformAdmin);
    assert!(password::verify_password(TEST_PASSWORD, &admin.password_hash).unwrap());

    // Second run is a no-op
    db::seed(&pool, &hash);
    assert_eq!(user::count(&conn).unwrap(), 1);
}

#[test]
fn test_seed_skipped_when_users_exist() {
    let (_dir, pool) = setup_pool();
    let hash = password::hash_password(TEST_PASSWORD).unwrap();
    {
        let conn = pool.get().unwrap();
        common::create_user(&conn, "existing@test.example", Role::Advocate);
    }

    db::seed(&pool, &hash);
    let conn = pool.get().unwrap();
    assert_eq!(user::count(&conn).unwrap(), 1);
    assert!(user::find_by_email(&conn, db::ADMIN_EMAIL).unwrap().is_none());
}

#[test]
fn test_seed_demo_populates_catalog() {
    let (_dir, pool) = setup_pool();
    let hash = password::hash_password(TEST_PASSWORD).unwrap();

    db::seed_demo(&pool, &hash);
    let conn = pool.get().unwrap();

    let orgs = organization::find_all(&conn).unwrap();
    assert_eq!(orgs.len(), 2);

    let page = course::find_page(&conn, &CourseFilter::default(), 1, 25).unwrap();
    assert_eq!(page.total_count, 3);

    // The demo data exercises both estimated-date forms and a legacy badge
    let packed = page
        .items
        .iter()
        .find(|c| !c.estimated.estimated_date.is_empty())
        .expect("one demo course carries an estimated date");
    assert!(packed.estimated.show_estimated_for_start_date);

    let in_person = CourseFilter {
        badge: Some("In-Person".to_string()),
        ..CourseFilter::default()
    };
    let filtered = course::find_page(&conn, &in_person, 1, 25).unwrap();
    assert!(filtered.total_count >= 1, "legacy demo badge must canonicalize");

    // Demo accounts
    let advocate = user::find_by_email(&conn, "aye.advocate@example.org")
        .unwrap()
        .expect("demo advocate");
    assert_eq!(advocate.role, Role::Advocate);
    let org_admin = user::find_by_email(&conn, "kyaw.orgadmin@example.org")
        .unwrap()
        .expect("demo org admin");
    assert_eq!(org_admin.role, Role::OrgAdmin);
    assert!(org_admin.organization_id.is_some());
}

#[test]
fn test_seed_demo_is_idempotent() {
    let (_dir, pool) = setup_pool();
    let hash = password::hash_password(TEST_PASSWORD).unwrap();

    db::seed_demo(&pool, &hash);
    db::seed_demo(&pool, &hash);

    let conn = pool.get().unwrap();
    assert_eq!(organization::find_all(&conn).unwrap().len(), 2);
    let page = course::find_page(&conn, &CourseFilter::default(), 1, 25).unwrap();
    assert_eq!(page.total_count, 3);
}

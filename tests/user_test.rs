//! Integration tests for user accounts and password hashing.

mod common;

use common::{TEST_PASSWORD, create_org, create_user, setup_test_db};
use coursebridge::auth::password;
use coursebridge::models::user::{self, NewUser, Role};

#[test]
fn test_create_and_find_by_email() {
    let (_dir, conn) = setup_test_db();
    let id = create_user(&conn, "aye@test.example", Role::Advocate);

    let found = user::find_by_email(&conn, "aye@test.example")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.role, Role::Advocate);
    assert_eq!(found.display_name, "aye");
    assert!(found.organization_id.is_none());

    assert!(user::find_by_email(&conn, "nobody@test.example")
        .unwrap()
        .is_none());
}

#[test]
fn test_duplicate_email_rejected() {
    let (_dir, conn) = setup_test_db();
    create_user(&conn, "aye@test.example", Role::Advocate);

    let hash = password::hash_password(TEST_PASSWORD).unwrap();
    let result = user::create(
        &conn,
        &NewUser {
            email: "aye@test.example".to_string(),
            password_hash: hash,
            display_name: "Dup".to_string(),
            role: Role::Advocate,
            organization_id: None,
        },
    );
    assert!(result.is_err());
}

#[test]
fn test_password_verify() {
    let hash = password::hash_password("correct horse").unwrap();
    assert!(password::verify_password("correct horse", &hash).unwrap());
    assert!(!password::verify_password("wrong horse", &hash).unwrap());
    // Two hashes of the same password differ (salted)
    let other = password::hash_password("correct horse").unwrap();
    assert_ne!(hash, other);
}

#[test]
fn test_org_admin_links_to_organization() {
    let (_dir, conn) = setup_test_db();
    let org_id = create_org(&conn, "Org");

    let hash = password::hash_password(TEST_PASSWORD).unwrap();
    let id = user::create(
        &conn,
        &NewUser {
            email: "admin@org.example".to_string(),
            password_hash: hash,
            display_name: "Org Admin".to_string(),
            role: Role::OrgAdmin,
            organization_id: Some(org_id),
        },
    )
    .unwrap();

    let found = user::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(found.role, Role::OrgAdmin);
    assert_eq!(found.organization_id, Some(org_id));
}

#[test]
fn test_role_parse_and_capabilities() {
    assert_eq!(Role::parse("platform_admin"), Some(Role::PlatformAdmin));
    assert_eq!(Role::parse("org_admin"), Some(Role::OrgAdmin));
    assert_eq!(Role::parse("advocate"), Some(Role::Advocate));
    assert_eq!(Role::parse("superuser"), None);

    assert!(Role::PlatformAdmin.is_reviewer());
    assert!(!Role::OrgAdmin.is_reviewer());
    assert!(Role::Advocate.can_submit_drafts());
    assert!(Role::OrgAdmin.can_submit_drafts());
    assert!(!Role::PlatformAdmin.can_submit_drafts());
}

#[test]
fn test_count() {
    let (_dir, conn) = setup_test_db();
    assert_eq!(user::count(&conn).unwrap(), 0);
    create_user(&conn, "a@test.example", Role::Advocate);
    create_user(&conn, "b@test.example", Role::PlatformAdmin);
    assert_eq!(user::count(&conn).unwrap(), 2);
}

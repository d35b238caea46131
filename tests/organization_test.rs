//! Integration tests for the organization model layer.

mod common;

use common::{course_payload, create_org, setup_test_db};
use coursebridge::models::course;
use coursebridge::models::organization::{self, OrganizationPatch, OrganizationPayload};

#[test]
fn test_create_and_find() {
    let (_dir, conn) = setup_test_db();

    let payload: OrganizationPayload = serde_json::from_value(serde_json::json!({
        "name": "Yangon Tech Academy",
        "nameMm": "ရန်ကုန်နည်းပညာကျောင်း",
        "description": "Coding school",
        "website": "https://yta.example",
        "email": "hello@yta.example",
    }))
    .unwrap();
    let id = organization::create(&conn, &payload).unwrap();

    let org = organization::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(org.name, "Yangon Tech Academy");
    assert_eq!(org.name_mm, "ရန်ကုန်နည်းပညာကျောင်း");
    // Fields absent from the payload default to empty
    assert_eq!(org.phone, "");
    assert!(org.logo_image_id.is_none());

    let by_name = organization::find_by_name(&conn, "Yangon Tech Academy")
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, id);
    assert!(organization::find_by_name(&conn, "Nope").unwrap().is_none());
}

#[test]
fn test_find_all_sorted_by_name() {
    let (_dir, conn) = setup_test_db();
    create_org(&conn, "Zebra Institute");
    create_org(&conn, "Alpha College");

    let all = organization::find_all(&conn).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Alpha College");
    assert_eq!(all[1].name, "Zebra Institute");
}

#[test]
fn test_partial_update() {
    let (_dir, conn) = setup_test_db();
    let id = create_org(&conn, "Old Name");

    let patch = OrganizationPatch {
        name: Some("New Name".to_string()),
        phone: Some("09-123456".to_string()),
        ..OrganizationPatch::default()
    };
    organization::update(&conn, id, &patch).unwrap();

    let org = organization::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(org.name, "New Name");
    assert_eq!(org.phone, "09-123456");
    // Fields not in the patch survive
    assert_eq!(org.name_mm, "Old Name (MM)");
    assert_eq!(org.email, "org@test.example");
}

#[test]
fn test_update_can_clear_logo() {
    let (_dir, conn) = setup_test_db();
    let id = create_org(&conn, "Org");

    // Explicit null clears; absent keeps
    let clear = OrganizationPatch {
        logo_image_id: Some(None),
        ..OrganizationPatch::default()
    };
    organization::update(&conn, id, &clear).unwrap();
    let org = organization::find_by_id(&conn, id).unwrap().unwrap();
    assert!(org.logo_image_id.is_none());
}

#[test]
fn test_update_missing_org_errors() {
    let (_dir, conn) = setup_test_db();
    let patch = OrganizationPatch::default();
    assert!(organization::update(&conn, 9999, &patch).is_err());
}

#[test]
fn test_delete_cascades_to_courses() {
    let (_dir, conn) = setup_test_db();
    let org_id = create_org(&conn, "Doomed Org");
    let course_id = course::create(&conn, &course_payload(org_id, "Orphan Course")).unwrap();

    organization::delete(&conn, org_id).unwrap();

    assert!(organization::find_by_id(&conn, org_id).unwrap().is_none());
    assert!(course::find_by_id(&conn, course_id).unwrap().is_none());
    assert_eq!(course::count_for_org(&conn, org_id).unwrap(), 0);
}

use rusqlite::{Connection, OptionalExtension, params};

use super::types::{Organization, OrganizationPatch, OrganizationPayload};

const SELECT_ORG: &str = "\
    SELECT id, name, name_mm, description, description_mm, website, email, \
           phone, address, address_mm, logo_image_id, created_at, updated_at \
    FROM organizations";

fn row_to_org(row: &rusqlite::Row) -> rusqlite::Result<Organization> {
    Ok(Organization {
        id: row.get("id")?,
        name: row.get("name")?,
        name_mm: row.get("name_mm")?,
        description: row.get("description")?,
        description_mm: row.get("description_mm")?,
        website: row.get("website")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        address: row.get("address")?,
        address_mm: row.get("address_mm")?,
        logo_image_id: row.get("logo_image_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn create(conn: &Connection, org: &OrganizationPayload) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO organizations \
         (name, name_mm, description, description_mm, website, email, phone, \
          address, address_mm, logo_image_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            org.name,
            org.name_mm,
            org.description,
            org.description_mm,
            org.website,
            org.email,
            org.phone,
            org.address,
            org.address_mm,
            org.logo_image_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<Organization>> {
    let sql = format!("{SELECT_ORG} ORDER BY name, id");
    let mut stmt = conn.prepare(&sql)?;
    let orgs = stmt
        .query_map([], row_to_org)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(orgs)
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Organization>> {
    let sql = format!("{SELECT_ORG} WHERE id = ?1");
    conn.query_row(&sql, params![id], row_to_org).optional()
}

pub fn find_by_name(conn: &Connection, name: &str) -> rusqlite::Result<Option<Organization>> {
    let sql = format!("{SELECT_ORG} WHERE name = ?1");
    conn.query_row(&sql, params![name], row_to_org).optional()
}

/// Apply a partial update; absent fields keep their current value.
pub fn update(conn: &Connection, id: i64, patch: &OrganizationPatch) -> rusqlite::Result<()> {
    let current = match find_by_id(conn, id)? {
        Some(org) => org,
        None => return Err(rusqlite::Error::QueryReturnedNoRows),
    };

    let logo = match &patch.logo_image_id {
        Some(v) => *v,
        None => current.logo_image_id,
    };

    conn.execute(
        "UPDATE organizations SET \
         name = ?1, name_mm = ?2, description = ?3, description_mm = ?4, \
         website = ?5, email = ?6, phone = ?7, address = ?8, address_mm = ?9, \
         logo_image_id = ?10, updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') \
         WHERE id = ?11",
        params![
            patch.name.as_ref().unwrap_or(&current.name),
            patch.name_mm.as_ref().unwrap_or(&current.name_mm),
            patch.description.as_ref().unwrap_or(&current.description),
            patch.description_mm.as_ref().unwrap_or(&current.description_mm),
            patch.website.as_ref().unwrap_or(&current.website),
            patch.email.as_ref().unwrap_or(&current.email),
            patch.phone.as_ref().unwrap_or(&current.phone),
            patch.address.as_ref().unwrap_or(&current.address),
            patch.address_mm.as_ref().unwrap_or(&current.address_mm),
            logo,
            id,
        ],
    )?;
    Ok(())
}

/// Delete an organization (cascades to its courses).
pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM organizations WHERE id = ?1", params![id])?;
    Ok(())
}

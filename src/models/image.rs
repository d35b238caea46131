use rusqlite::{Connection, OptionalExtension, params};

#[derive(Debug, Clone)]
pub struct StoredImage {
    pub id: i64,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Store raw image bytes, returning the new image id.
pub fn create(
    conn: &Connection,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO images (filename, content_type, data) VALUES (?1, ?2, ?3)",
        params![filename, content_type, data],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<StoredImage>> {
    conn.query_row(
        "SELECT id, filename, content_type, data FROM images WHERE id = ?1",
        params![id],
        |row| {
            Ok(StoredImage {
                id: row.get("id")?,
                filename: row.get("filename")?,
                content_type: row.get("content_type")?,
                data: row.get("data")?,
            })
        },
    )
    .optional()
}

/// Attach an image to a draft at the given position.
pub fn link_to_draft(
    conn: &Connection,
    draft_id: i64,
    image_id: i64,
    sort_order: i64,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO draft_images (draft_id, image_id, sort_order) VALUES (?1, ?2, ?3)",
        params![draft_id, image_id, sort_order],
    )?;
    Ok(())
}

/// Attach an image to a published course.
pub fn link_to_course(
    conn: &Connection,
    course_id: i64,
    image_id: i64,
    sort_order: i64,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO course_images (course_id, image_id, sort_order) VALUES (?1, ?2, ?3)",
        params![course_id, image_id, sort_order],
    )?;
    Ok(())
}

/// Image ids attached to a draft, in display order.
pub fn ids_for_draft(conn: &Connection, draft_id: i64) -> rusqlite::Result<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT image_id FROM draft_images WHERE draft_id = ?1 ORDER BY sort_order, image_id",
    )?;
    let ids = stmt
        .query_map(params![draft_id], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

/// Image ids attached to a course, in display order.
pub fn ids_for_course(conn: &Connection, course_id: i64) -> rusqlite::Result<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT image_id FROM course_images WHERE course_id = ?1 ORDER BY sort_order, image_id",
    )?;
    let ids = stmt
        .query_map(params![course_id], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

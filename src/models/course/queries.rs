use rusqlite::{Connection, OptionalExtension, params};

use crate::models::badge::{self, Badge};
use crate::models::estimated_date::EstimatedDate;
use crate::models::{faq, image, organization};

use super::types::{CourseDetail, CourseFilter, CourseListItem, CoursePage, CoursePatch, CoursePayload};

/// Badges attached to a course, normalized on read: legacy spellings stored
/// by old writers resolve to the canonical badge, unknown names are dropped.
pub fn badges_for_course(conn: &Connection, course_id: i64) -> rusqlite::Result<Vec<Badge>> {
    let mut stmt = conn.prepare(
        "SELECT badge FROM course_badges WHERE course_id = ?1 ORDER BY sort_order, badge",
    )?;
    let names = stmt
        .query_map(params![course_id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names
        .iter()
        .filter_map(|n| badge::find(n))
        .cloned()
        .collect())
}

fn set_badges(conn: &Connection, course_id: i64, names: &[String]) -> rusqlite::Result<()> {
    conn.execute(
        "DELETE FROM course_badges WHERE course_id = ?1",
        params![course_id],
    )?;
    for (i, name) in badge::normalize_all(names).iter().enumerate() {
        conn.execute(
            "INSERT INTO course_badges (course_id, badge, sort_order) VALUES (?1, ?2, ?3)",
            params![course_id, name, i as i64],
        )?;
    }
    Ok(())
}

/// Create a course with its badges and FAQs, returning the new id.
pub fn create(conn: &Connection, payload: &CoursePayload) -> rusqlite::Result<i64> {
    let est = payload.resolved_estimated();
    conn.execute(
        "INSERT INTO courses \
         (organization_id, title, title_mm, description, description_mm, \
          schedule, schedule_mm, duration, fee, location, location_mm, \
          apply_url, start_date, apply_by_date, estimated_date, \
          show_estimated_start, show_estimated_apply) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            payload.organization_id,
            payload.title,
            payload.title_mm,
            payload.description,
            payload.description_mm,
            payload.schedule,
            payload.schedule_mm,
            payload.duration,
            payload.fee,
            payload.location,
            payload.location_mm,
            payload.apply_url,
            payload.start_date,
            payload.apply_by_date,
            est.estimated_date,
            est.show_estimated_for_start_date as i64,
            est.show_estimated_for_apply_by_date as i64,
        ],
    )?;
    let course_id = conn.last_insert_rowid();

    set_badges(conn, course_id, &payload.badges)?;
    for (i, f) in payload.faqs.iter().enumerate() {
        faq::create(conn, course_id, f, i as i64)?;
    }

    Ok(course_id)
}

fn row_estimated(row: &rusqlite::Row) -> rusqlite::Result<EstimatedDate> {
    Ok(EstimatedDate {
        estimated_date: row.get("estimated_date")?,
        show_estimated_for_start_date: row.get::<_, i64>("show_estimated_start")? != 0,
        show_estimated_for_apply_by_date: row.get::<_, i64>("show_estimated_apply")? != 0,
    })
}

/// Paginated catalog listing with optional badge / organization / text filters.
pub fn find_page(
    conn: &Connection,
    filter: &CourseFilter,
    page: i64,
    per_page: i64,
) -> rusqlite::Result<CoursePage> {
    let page = page.max(1);
    let per_page = per_page.clamp(1, 100);
    let offset = (page - 1) * per_page;

    let mut clauses: Vec<String> = vec!["1=1".to_string()];
    let mut bind: Vec<rusqlite::types::Value> = Vec::new();

    if let Some(org_id) = filter.organization_id {
        bind.push(rusqlite::types::Value::Integer(org_id));
        clauses.push(format!("c.organization_id = ?{}", bind.len()));
    }
    if let Some(raw) = filter.badge.as_deref() {
        match badge::canonical(raw) {
            Some(name) => {
                bind.push(rusqlite::types::Value::Text(name.to_string()));
                clauses.push(format!(
                    "EXISTS (SELECT 1 FROM course_badges cb \
                     WHERE cb.course_id = c.id AND cb.badge = ?{})",
                    bind.len()
                ));
            }
            // A name outside the vocabulary can never be attached to a course.
            None => clauses.push("1=0".to_string()),
        }
    }
    if let Some(q) = filter.q.as_deref().filter(|q| !q.trim().is_empty()) {
        let escaped = q
            .trim()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let like = format!("%{escaped}%");
        bind.push(rusqlite::types::Value::Text(like.clone()));
        let n = bind.len();
        bind.push(rusqlite::types::Value::Text(like));
        clauses.push(format!(
            "(c.title LIKE ?{n} ESCAPE '\\' OR c.title_mm LIKE ?{} ESCAPE '\\')",
            bind.len()
        ));
    }

    let where_clause = clauses.join(" AND ");

    let count_sql = format!("SELECT COUNT(*) FROM courses c WHERE {where_clause}");
    let total_count: i64 = {
        let mut stmt = conn.prepare(&count_sql)?;
        stmt.query_row(rusqlite::params_from_iter(bind.iter()), |r| r.get(0))?
    };

    let n = bind.len();
    let data_sql = format!(
        "SELECT c.id, c.organization_id, o.name AS organization_name, \
                o.name_mm AS organization_name_mm, \
                c.title, c.title_mm, c.duration, c.fee, c.location, c.location_mm, \
                c.start_date, c.apply_by_date, c.estimated_date, \
                c.show_estimated_start, c.show_estimated_apply \
         FROM courses c \
         JOIN organizations o ON o.id = c.organization_id \
         WHERE {where_clause} \
         ORDER BY c.created_at DESC, c.id DESC \
         LIMIT ?{} OFFSET ?{}",
        n + 1,
        n + 2
    );
    bind.push(rusqlite::types::Value::Integer(per_page));
    bind.push(rusqlite::types::Value::Integer(offset));

    let mut stmt = conn.prepare(&data_sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(bind.iter()), |row| {
            Ok((
                row.get::<_, i64>("id")?,
                CourseListItem {
                    id: row.get("id")?,
                    organization_id: row.get("organization_id")?,
                    organization_name: row.get("organization_name")?,
                    organization_name_mm: row.get("organization_name_mm")?,
                    title: row.get("title")?,
                    title_mm: row.get("title_mm")?,
                    duration: row.get("duration")?,
                    fee: row.get("fee")?,
                    location: row.get("location")?,
                    location_mm: row.get("location_mm")?,
                    start_date: row.get("start_date")?,
                    apply_by_date: row.get("apply_by_date")?,
                    estimated: row_estimated(row)?,
                    badges: Vec::new(),
                },
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut items = Vec::with_capacity(rows.len());
    for (id, mut item) in rows {
        item.badges = badges_for_course(conn, id)?;
        items.push(item);
    }

    let total_pages = ((total_count as f64) / (per_page as f64)).ceil() as i64;

    Ok(CoursePage {
        items,
        page,
        per_page,
        total_count,
        total_pages,
    })
}

/// Full detail with organization, badges, images, and FAQs.
pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<CourseDetail>> {
    #[allow(clippy::type_complexity)]
    let base = conn
        .query_row(
            "SELECT id, organization_id, title, title_mm, description, description_mm, \
                    schedule, schedule_mm, duration, fee, location, location_mm, \
                    apply_url, start_date, apply_by_date, estimated_date, \
                    show_estimated_start, show_estimated_apply, created_at, updated_at \
             FROM courses WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, i64>("organization_id")?,
                    CourseDetail {
                        id: row.get("id")?,
                        organization: placeholder_org(),
                        title: row.get("title")?,
                        title_mm: row.get("title_mm")?,
                        description: row.get("description")?,
                        description_mm: row.get("description_mm")?,
                        schedule: row.get("schedule")?,
                        schedule_mm: row.get("schedule_mm")?,
                        duration: row.get("duration")?,
                        fee: row.get("fee")?,
                        location: row.get("location")?,
                        location_mm: row.get("location_mm")?,
                        apply_url: row.get("apply_url")?,
                        start_date: row.get("start_date")?,
                        apply_by_date: row.get("apply_by_date")?,
                        estimated: row_estimated(row)?,
                        badges: Vec::new(),
                        image_ids: Vec::new(),
                        faqs: Vec::new(),
                        created_at: row.get("created_at")?,
                        updated_at: row.get("updated_at")?,
                    },
                ))
            },
        )
        .optional()?;

    let (org_id, mut detail) = match base {
        Some(pair) => pair,
        None => return Ok(None),
    };

    detail.organization =
        organization::find_by_id(conn, org_id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
    detail.badges = badges_for_course(conn, id)?;
    detail.image_ids = image::ids_for_course(conn, id)?;
    detail.faqs = faq::find_for_course(conn, id)?;

    Ok(Some(detail))
}

// Never serialized; replaced before find_by_id returns.
fn placeholder_org() -> organization::Organization {
    organization::Organization {
        id: 0,
        name: String::new(),
        name_mm: String::new(),
        description: String::new(),
        description_mm: String::new(),
        website: String::new(),
        email: String::new(),
        phone: String::new(),
        address: String::new(),
        address_mm: String::new(),
        logo_image_id: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

/// Apply a partial update; absent fields keep their current value.
pub fn update(conn: &Connection, id: i64, patch: &CoursePatch) -> rusqlite::Result<()> {
    let current = match find_by_id(conn, id)? {
        Some(c) => c,
        None => return Err(rusqlite::Error::QueryReturnedNoRows),
    };

    conn.execute(
        "UPDATE courses SET \
         organization_id = ?1, title = ?2, title_mm = ?3, description = ?4, \
         description_mm = ?5, schedule = ?6, schedule_mm = ?7, duration = ?8, \
         fee = ?9, location = ?10, location_mm = ?11, apply_url = ?12, \
         start_date = ?13, apply_by_date = ?14, estimated_date = ?15, \
         show_estimated_start = ?16, show_estimated_apply = ?17, \
         updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') \
         WHERE id = ?18",
        params![
            patch.organization_id.unwrap_or(current.organization.id),
            patch.title.as_ref().unwrap_or(&current.title),
            patch.title_mm.as_ref().unwrap_or(&current.title_mm),
            patch.description.as_ref().unwrap_or(&current.description),
            patch.description_mm.as_ref().unwrap_or(&current.description_mm),
            patch.schedule.as_ref().unwrap_or(&current.schedule),
            patch.schedule_mm.as_ref().unwrap_or(&current.schedule_mm),
            patch.duration.as_ref().unwrap_or(&current.duration),
            patch.fee.as_ref().unwrap_or(&current.fee),
            patch.location.as_ref().unwrap_or(&current.location),
            patch.location_mm.as_ref().unwrap_or(&current.location_mm),
            patch.apply_url.as_ref().unwrap_or(&current.apply_url),
            patch.start_date.as_ref().unwrap_or(&current.start_date),
            patch.apply_by_date.as_ref().unwrap_or(&current.apply_by_date),
            patch
                .estimated_date
                .as_ref()
                .unwrap_or(&current.estimated.estimated_date),
            patch
                .show_estimated_for_start_date
                .unwrap_or(current.estimated.show_estimated_for_start_date) as i64,
            patch
                .show_estimated_for_apply_by_date
                .unwrap_or(current.estimated.show_estimated_for_apply_by_date) as i64,
            id,
        ],
    )?;

    if let Some(badges) = &patch.badges {
        set_badges(conn, id, badges)?;
    }
    if let Some(faqs) = &patch.faqs {
        faq::replace_for_course(conn, id, faqs)?;
    }

    Ok(())
}

/// Delete a course (cascades to badges, images links, FAQs).
pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM courses WHERE id = ?1", params![id])?;
    Ok(())
}

pub fn count_for_org(conn: &Connection, org_id: i64) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM courses WHERE organization_id = ?1",
        params![org_id],
        |row| row.get(0),
    )
}

use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::AppError;
use crate::models::draft::{self, DraftStatus};

use super::types::{AdvocateProfile, AdvocateRank, AdvocateStats, ProfilePayload};

const SELECT_PROFILE: &str = "\
    SELECT id, user_id, name, name_mm, bio, bio_mm, photo_image_id, status, \
           created_at, updated_at \
    FROM advocate_profiles";

fn row_to_profile(row: &rusqlite::Row) -> rusqlite::Result<AdvocateProfile> {
    let status_str: String = row.get("status")?;
    Ok(AdvocateProfile {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        name_mm: row.get("name_mm")?,
        bio: row.get("bio")?,
        bio_mm: row.get("bio_mm")?,
        photo_image_id: row.get("photo_image_id")?,
        status: DraftStatus::parse(&status_str).unwrap_or(DraftStatus::Pending),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn find_by_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Option<AdvocateProfile>> {
    let sql = format!("{SELECT_PROFILE} WHERE user_id = ?1");
    conn.query_row(&sql, params![user_id], row_to_profile).optional()
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<AdvocateProfile>> {
    let sql = format!("{SELECT_PROFILE} WHERE id = ?1");
    conn.query_row(&sql, params![id], row_to_profile).optional()
}

/// Publicly visible profiles: approved only, hidden ones excluded.
pub fn find_public(conn: &Connection) -> rusqlite::Result<Vec<AdvocateProfile>> {
    let sql = format!("{SELECT_PROFILE} WHERE status = 'APPROVED' ORDER BY name, id");
    let mut stmt = conn.prepare(&sql)?;
    let profiles = stmt
        .query_map([], row_to_profile)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(profiles)
}

/// Profiles awaiting review, oldest first.
pub fn find_pending(conn: &Connection) -> rusqlite::Result<Vec<AdvocateProfile>> {
    let sql = format!("{SELECT_PROFILE} WHERE status = 'PENDING' ORDER BY updated_at, id");
    let mut stmt = conn.prepare(&sql)?;
    let profiles = stmt
        .query_map([], row_to_profile)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(profiles)
}

/// Create or replace the caller's profile. Content changes put the profile
/// back into PENDING for re-review.
pub fn upsert(
    conn: &Connection,
    user_id: i64,
    payload: &ProfilePayload,
) -> rusqlite::Result<AdvocateProfile> {
    conn.execute(
        "INSERT INTO advocate_profiles \
         (user_id, name, name_mm, bio, bio_mm, photo_image_id, status) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'PENDING') \
         ON CONFLICT(user_id) DO UPDATE SET \
             name = excluded.name, name_mm = excluded.name_mm, \
             bio = excluded.bio, bio_mm = excluded.bio_mm, \
             photo_image_id = excluded.photo_image_id, status = 'PENDING', \
             updated_at = strftime('%Y-%m-%dT%H:%M:%S','now')",
        params![
            user_id,
            payload.name,
            payload.name_mm,
            payload.bio,
            payload.bio_mm,
            payload.photo_image_id,
        ],
    )?;
    // The reselect can still miss if the user row was deleted concurrently.
    find_by_user(conn, user_id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

pub fn set_status(conn: &Connection, id: i64, status: DraftStatus) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE advocate_profiles SET status = ?1, \
         updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(())
}

/// Draft counters for one advocate's dashboard.
pub fn stats_for_user(conn: &Connection, user_id: i64) -> Result<AdvocateStats, AppError> {
    let draft = draft::count_by_status_for_owner(conn, user_id, DraftStatus::Draft)?;
    let pending = draft::count_by_status_for_owner(conn, user_id, DraftStatus::Pending)?;
    let approved = draft::count_by_status_for_owner(conn, user_id, DraftStatus::Approved)?;
    let rejected = draft::count_by_status_for_owner(conn, user_id, DraftStatus::Rejected)?;
    Ok(AdvocateStats {
        total: draft + pending + approved + rejected,
        draft,
        pending,
        approved,
        rejected,
    })
}

/// Standing among all advocates by approved-draft count; advocates with equal
/// counts share a rank.
pub fn rank_for_user(conn: &Connection, user_id: i64) -> Result<AdvocateRank, AppError> {
    let approved_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM drafts WHERE owner_id = ?1 AND status = 'APPROVED'",
        params![user_id],
        |row| row.get(0),
    )?;

    let higher: i64 = conn.query_row(
        "SELECT COUNT(*) FROM ( \
             SELECT u.id, COUNT(d.id) AS approved \
             FROM users u \
             LEFT JOIN drafts d ON d.owner_id = u.id AND d.status = 'APPROVED' \
             WHERE u.role = 'advocate' \
             GROUP BY u.id \
         ) WHERE approved > ?1",
        params![approved_count],
        |row| row.get(0),
    )?;

    let total_advocates: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'advocate'",
        [],
        |row| row.get(0),
    )?;

    Ok(AdvocateRank {
        rank: higher + 1,
        total_advocates,
        approved_count,
    })
}

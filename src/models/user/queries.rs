use rusqlite::{Connection, OptionalExtension, params};

use super::types::{NewUser, Role, User};

const SELECT_USER: &str = "\
    SELECT id, email, password_hash, display_name, role, organization_id, \
           created_at, updated_at \
    FROM users";

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let role_str: String = row.get("role")?;
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        display_name: row.get("display_name")?,
        role: Role::parse(&role_str).unwrap_or(Role::Advocate),
        organization_id: row.get("organization_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn create(conn: &Connection, user: &NewUser) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (email, password_hash, display_name, role, organization_id) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user.email,
            user.password_hash,
            user.display_name,
            user.role.as_str(),
            user.organization_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<User>> {
    let sql = format!("{SELECT_USER} WHERE email = ?1");
    conn.query_row(&sql, params![email], row_to_user).optional()
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    let sql = format!("{SELECT_USER} WHERE id = ?1");
    conn.query_row(&sql, params![id], row_to_user).optional()
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
}

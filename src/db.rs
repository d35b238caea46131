use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::Deserialize;

use crate::models::user::{self, NewUser, Role};
use crate::models::{course, organization};

pub type DbPool = Pool<SqliteConnectionManager>;

pub const MIGRATIONS: &str = include_str!("schema.sql");

const DEMO_SEED: &str = include_str!("../data/seed/demo.json");

pub const ADMIN_EMAIL: &str = "admin@coursebridge.local";

pub fn init_pool(database_url: &str) -> DbPool {
    let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(())
    });
    Pool::builder()
        .max_size(8)
        .build(manager)
        .expect("Failed to create DB pool")
}

pub fn run_migrations(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

/// Create the initial platform admin if the users table is empty.
pub fn seed(pool: &DbPool, admin_password_hash: &str) {
    let conn = pool.get().expect("Failed to get DB connection for seeding");

    let count = user::count(&conn).unwrap_or(0);
    if count > 0 {
        log::info!("Database already seeded ({count} users), skipping");
        return;
    }

    let admin = NewUser {
        email: ADMIN_EMAIL.to_string(),
        password_hash: admin_password_hash.to_string(),
        display_name: "Platform Admin".to_string(),
        role: Role::PlatformAdmin,
        organization_id: None,
    };
    user::create(&conn, &admin).expect("Failed to create admin user");
    log::info!("Created platform admin account {ADMIN_EMAIL}");
}

#[derive(Deserialize)]
struct DemoSeed {
    organizations: Vec<DemoOrg>,
    #[serde(default)]
    users: Vec<DemoUser>,
}

#[derive(Deserialize)]
struct DemoOrg {
    #[serde(flatten)]
    org: organization::OrganizationPayload,
    #[serde(default)]
    courses: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoUser {
    email: String,
    display_name: String,
    role: String,
    #[serde(default)]
    organization: Option<String>,
}

/// Seed demo catalog data (organizations with their courses, sample advocate
/// and org-admin accounts) for staging. Idempotent: skips if the first demo
/// organization already exists.
///
/// Organizations are created before their courses; a course that fails to
/// import is logged and skipped, and the organization row stays. That matches
/// the documented behavior of the production seed and is deliberately not
/// "fixed" with a transaction here.
pub fn seed_demo(pool: &DbPool, demo_password_hash: &str) {
    let conn = pool.get().expect("Failed to get DB connection for demo seed");

    let seed_data: DemoSeed =
        serde_json::from_str(DEMO_SEED).expect("Bad demo seed JSON");

    if let Some(first) = seed_data.organizations.first() {
        let exists = organization::find_by_name(&conn, &first.org.name)
            .unwrap_or(None)
            .is_some();
        if exists {
            log::info!("Demo data already present, skipping");
            return;
        }
    }

    let mut orgs_created = 0usize;
    let mut courses_created = 0usize;

    for demo_org in &seed_data.organizations {
        let org_id = match organization::create(&conn, &demo_org.org) {
            Ok(id) => id,
            Err(e) => {
                log::error!("Demo seed: organization '{}' failed: {e}", demo_org.org.name);
                continue;
            }
        };
        orgs_created += 1;

        for raw in &demo_org.courses {
            let mut value = raw.clone();
            if let Some(map) = value.as_object_mut() {
                map.insert("organizationId".to_string(), serde_json::json!(org_id));
            }
            let payload: course::CoursePayload = match serde_json::from_value(value) {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("Demo seed: bad course under '{}': {e}", demo_org.org.name);
                    continue;
                }
            };
            match course::create(&conn, &payload) {
                Ok(_) => courses_created += 1,
                Err(e) => {
                    log::warn!("Demo seed: course '{}' failed: {e}", payload.title);
                }
            }
        }
    }

    for demo_user in &seed_data.users {
        let role = Role::parse(&demo_user.role).unwrap_or(Role::Advocate);
        let organization_id = demo_user
            .organization
            .as_deref()
            .and_then(|name| organization::find_by_name(&conn, name).ok().flatten())
            .map(|o| o.id);
        let new_user = NewUser {
            email: demo_user.email.clone(),
            password_hash: demo_password_hash.to_string(),
            display_name: demo_user.display_name.clone(),
            role,
            organization_id,
        };
        if let Err(e) = user::create(&conn, &new_user) {
            log::warn!("Demo seed: user '{}' failed: {e}", demo_user.email);
        }
    }

    log::info!(
        "Demo seed complete: {orgs_created} organizations, {courses_created} courses, {} users",
        seed_data.users.len()
    );
}

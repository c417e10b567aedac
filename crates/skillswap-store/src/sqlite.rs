use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use skillswap_core::{Recommendation, Result, SwapError, User, UserId, UserSink, UserSource};

/// A user row together with the recommendation last written to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(flatten)]
    pub recommendation: Recommendation,
    /// RFC 3339 timestamp of the last recommendation write, if any.
    pub recommended_at: Option<String>,
}

/// SQLite-backed user store.
pub struct UserStore {
    db: Arc<Mutex<Connection>>,
}

fn db_err(e: rusqlite::Error) -> SwapError {
    SwapError::Store(e.to_string())
}

fn encode_list(items: &[String]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

fn decode_list(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| SwapError::Store(format!("corrupt list column: {e}")))
}

/// Raw column values of one `users` row.
struct UserRow {
    id: String,
    username: Option<String>,
    teach: String,
    learn: String,
    matches: String,
    suggested: String,
    recommended_at: Option<String>,
}

impl UserRow {
    const COLUMNS: &'static str = "id, username, skills_to_teach, skills_to_learn, \
         recommended_matches, suggested_skills, recommended_at";

    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            teach: row.get(2)?,
            learn: row.get(3)?,
            matches: row.get(4)?,
            suggested: row.get(5)?,
            recommended_at: row.get(6)?,
        })
    }

    fn decode(self) -> Result<StoredUser> {
        Ok(StoredUser {
            user: User {
                id: self.id,
                username: self.username,
                skills_to_teach: decode_list(&self.teach)?,
                skills_to_learn: decode_list(&self.learn)?,
            },
            recommendation: Recommendation {
                recommended_matches: decode_list(&self.matches)?,
                suggested_skills: decode_list(&self.suggested)?,
            },
            recommended_at: self.recommended_at,
        })
    }
}

impl UserStore {
    /// Open or create the user database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        info!(?path, "opening user store");

        let conn = Connection::open(path).map_err(db_err)?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(db_err)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT,
                skills_to_teach TEXT NOT NULL DEFAULT '[]',
                skills_to_learn TEXT NOT NULL DEFAULT '[]',
                recommended_matches TEXT NOT NULL DEFAULT '[]',
                suggested_skills TEXT NOT NULL DEFAULT '[]',
                recommended_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )
        .map_err(db_err)?;

        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        Self::open(Path::new(":memory:"))
    }

    /// Get a reference to the raw database connection (for advanced queries).
    pub fn db(&self) -> parking_lot::MutexGuard<'_, Connection> {
        self.db.lock()
    }

    /// Insert a user or replace its name and skills. Stored recommendations are kept.
    pub fn upsert_user(&self, user: &User) -> Result<()> {
        self.upsert_users(std::slice::from_ref(user)).map(|_| ())
    }

    /// Upsert users in one transaction. Stored recommendations are kept. Returns how many were written.
    pub fn upsert_users(&self, users: &[User]) -> Result<usize> {
        let now = chrono::Utc::now().to_rfc3339();
        let mut db = self.db.lock();
        let tx = db.transaction().map_err(db_err)?;
        for user in users {
            tx.execute(
                "INSERT INTO users (id, username, skills_to_teach, skills_to_learn, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                    username = excluded.username,
                    skills_to_teach = excluded.skills_to_teach,
                    skills_to_learn = excluded.skills_to_learn,
                    updated_at = excluded.updated_at",
                rusqlite::params![
                    user.id,
                    user.username,
                    encode_list(&user.skills_to_teach)?,
                    encode_list(&user.skills_to_learn)?,
                    now,
                ],
            )
            .map_err(db_err)?;
        }
        tx.commit().map_err(db_err)?;
        debug!(count = users.len(), "upserted users");
        Ok(users.len())
    }

    /// Delete every user whose id starts with `prefix`. Returns rows deleted.
    pub fn delete_users_with_prefix(&self, prefix: &str) -> Result<usize> {
        let db = self.db.lock();
        let rows = db
            .execute(
                "DELETE FROM users WHERE substr(id, 1, length(?1)) = ?1",
                rusqlite::params![prefix],
            )
            .map_err(db_err)?;
        Ok(rows)
    }

    /// Look up one user and its stored recommendation.
    pub fn get_user(&self, id: &str) -> Result<Option<StoredUser>> {
        let row = {
            let db = self.db.lock();
            db.query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", UserRow::COLUMNS),
                rusqlite::params![id],
                UserRow::from_row,
            )
            .optional()
            .map_err(db_err)?
        };
        row.map(UserRow::decode).transpose()
    }

    /// All users with their stored recommendations, in insertion order.
    pub fn list_users(&self) -> Result<Vec<StoredUser>> {
        let rows: Vec<UserRow> = {
            let db = self.db.lock();
            let mut stmt = db
                .prepare(&format!(
                    "SELECT {} FROM users ORDER BY rowid",
                    UserRow::COLUMNS
                ))
                .map_err(db_err)?;
            let rows = stmt
                .query_map([], UserRow::from_row)
                .map_err(db_err)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(db_err)?;
            rows
        };
        rows.into_iter().map(UserRow::decode).collect()
    }

    pub fn count(&self) -> Result<usize> {
        let db = self.db.lock();
        let n: i64 = db
            .query_row("SELECT count(*) FROM users", [], |r| r.get(0))
            .map_err(db_err)?;
        Ok(n as usize)
    }

    /// Overwrite the recommendation fields of one user.
    pub fn set_recommendation(&self, id: &str, recommendation: &Recommendation) -> Result<()> {
        let matches = encode_list(&recommendation.recommended_matches)?;
        let suggested = encode_list(&recommendation.suggested_skills)?;
        let now = chrono::Utc::now().to_rfc3339();
        let db = self.db.lock();
        let rows = db
            .execute(
                "UPDATE users SET
                    recommended_matches = ?2,
                    suggested_skills = ?3,
                    recommended_at = ?4,
                    updated_at = ?4
                 WHERE id = ?1",
                rusqlite::params![id, matches, suggested, now],
            )
            .map_err(db_err)?;
        if rows == 0 {
            return Err(SwapError::UserNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserSource for UserStore {
    async fn fetch_all(&self) -> Result<Vec<User>> {
        Ok(self.list_users()?.into_iter().map(|s| s.user).collect())
    }
}

#[async_trait]
impl UserSink for UserStore {
    async fn update_recommendations(
        &self,
        id: &UserId,
        recommendation: &Recommendation,
    ) -> Result<()> {
        self.set_recommendation(id, recommendation)
    }
}

//! Database row types — these map directly to SQLite rows. Distinct from
//! burrow-types models so the hash column never leaks past this crate's
//! credential path.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use burrow_types::models::{Post, User};

pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub owner_id: i64,
    pub created_at: String,
}

impl UserRow {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            created_at: parse_sqlite_datetime(&self.created_at),
        }
    }
}

impl PostRow {
    pub fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            is_published: self.is_published,
            owner_id: self.owner_id,
            created_at: parse_sqlite_datetime(&self.created_at),
        }
    }
}

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
/// Parse as naive UTC and convert, falling back through RFC 3339.
pub fn parse_sqlite_datetime(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}': {}", raw, e);
            DateTime::default()
        })
}

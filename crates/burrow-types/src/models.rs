use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public shape of an account. The password hash lives in the storage
/// layer only and never appears on this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A post paired with its upvote count. Posts with no votes carry
/// `votes = 0` rather than being absent from listings.
#[derive(Debug, Clone, Serialize)]
pub struct CountedPost {
    pub post: Post,
    pub votes: i64,
}

/// The two meaningful vote actions. The wire format keeps the legacy
/// numeric `dir` field (1 = up, 0 = retract); everything past the
/// request boundary works with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Retract,
}

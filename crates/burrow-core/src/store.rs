use thiserror::Error;

use burrow_types::api::PostDraft;
use burrow_types::models::{CountedPost, Post, User};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint fired: duplicate email, duplicate (user, post)
    /// vote pair. The constraint itself is the concurrency control — two
    /// racing inserts cannot both succeed, and the loser sees this.
    #[error("unique constraint violated on {0}")]
    Duplicate(&'static str),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// A user together with its stored password hash. Only the login path
/// ever sees the hash; it is verified and dropped.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Substring match against post titles; empty matches everything.
    pub search: String,
    pub limit: u32,
    pub offset: u32,
}

/// Repository interface over relational storage. Each operation executes
/// as one atomic unit; callers never observe a half-applied mutation.
/// Listing order is insertion order by id.
pub trait Store: Send + Sync {
    fn find_user_by_email(&self, email: &str) -> Result<Option<StoredCredential>, StoreError>;
    fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    fn insert_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    fn find_post_by_id(&self, id: i64) -> Result<Option<Post>, StoreError>;
    fn insert_post(&self, owner_id: i64, draft: &PostDraft) -> Result<Post, StoreError>;
    fn update_post(&self, id: i64, draft: &PostDraft) -> Result<Post, StoreError>;
    fn delete_post(&self, id: i64) -> Result<(), StoreError>;

    /// Outer-join aggregation: a post with zero votes is returned with
    /// count 0, never omitted.
    fn find_post_with_vote_count(&self, id: i64) -> Result<Option<CountedPost>, StoreError>;
    fn list_posts_with_vote_counts(&self, filter: &PostFilter)
    -> Result<Vec<CountedPost>, StoreError>;

    fn insert_vote(&self, user_id: i64, post_id: i64) -> Result<(), StoreError>;
    /// Returns whether a vote row was actually removed.
    fn delete_vote(&self, user_id: i64, post_id: i64) -> Result<bool, StoreError>;
}

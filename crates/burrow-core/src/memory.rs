//! In-memory `Store` backed by plain collections. Used by the core test
//! suites; also handy as a scratch backend when no database is wanted.

use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::anyhow;
use chrono::Utc;

use burrow_types::api::PostDraft;
use burrow_types::models::{CountedPost, Post, User};

use crate::store::{PostFilter, Store, StoreError, StoredCredential};

#[derive(Default)]
struct Inner {
    users: Vec<(User, String)>,
    posts: Vec<Post>,
    votes: HashSet<(i64, i64)>,
    next_user_id: i64,
    next_post_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|e| StoreError::Backend(anyhow!("store lock poisoned: {e}")))
    }
}

impl Store for MemoryStore {
    fn find_user_by_email(&self, email: &str) -> Result<Option<StoredCredential>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|(u, _)| u.email == email).map(
            |(user, hash)| StoredCredential {
                user: user.clone(),
                password_hash: hash.clone(),
            },
        ))
    }

    fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone()))
    }

    fn insert_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|(u, _)| u.email == email) {
            return Err(StoreError::Duplicate("users.email"));
        }
        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            email: email.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push((user.clone(), password_hash.to_string()));
        Ok(user)
    }

    fn find_post_by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.posts.iter().find(|p| p.id == id).cloned())
    }

    fn insert_post(&self, owner_id: i64, draft: &PostDraft) -> Result<Post, StoreError> {
        let mut inner = self.lock()?;
        inner.next_post_id += 1;
        let post = Post {
            id: inner.next_post_id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            is_published: draft.is_published,
            owner_id,
            created_at: Utc::now(),
        };
        inner.posts.push(post.clone());
        Ok(post)
    }

    fn update_post(&self, id: i64, draft: &PostDraft) -> Result<Post, StoreError> {
        let mut inner = self.lock()?;
        let post = inner
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::Backend(anyhow!("post {id} vanished mid-update")))?;
        post.title = draft.title.clone();
        post.content = draft.content.clone();
        post.is_published = draft.is_published;
        Ok(post.clone())
    }

    fn delete_post(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.posts.retain(|p| p.id != id);
        inner.votes.retain(|&(_, post_id)| post_id != id);
        Ok(())
    }

    fn find_post_with_vote_count(&self, id: i64) -> Result<Option<CountedPost>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.posts.iter().find(|p| p.id == id).map(|post| {
            let votes = inner.votes.iter().filter(|&&(_, pid)| pid == id).count() as i64;
            CountedPost {
                post: post.clone(),
                votes,
            }
        }))
    }

    fn list_posts_with_vote_counts(
        &self,
        filter: &PostFilter,
    ) -> Result<Vec<CountedPost>, StoreError> {
        let inner = self.lock()?;
        let rows = inner
            .posts
            .iter()
            .filter(|p| filter.search.is_empty() || p.title.contains(&filter.search))
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .map(|post| {
                let votes = inner
                    .votes
                    .iter()
                    .filter(|&&(_, pid)| pid == post.id)
                    .count() as i64;
                CountedPost {
                    post: post.clone(),
                    votes,
                }
            })
            .collect();
        Ok(rows)
    }

    fn insert_vote(&self, user_id: i64, post_id: i64) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if !inner.votes.insert((user_id, post_id)) {
            return Err(StoreError::Duplicate("votes(user_id, post_id)"));
        }
        Ok(())
    }

    fn delete_vote(&self, user_id: i64, post_id: i64) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        Ok(inner.votes.remove(&(user_id, post_id)))
    }
}

use anyhow::anyhow;
use rusqlite::{Connection, OptionalExtension};

use burrow_core::store::{PostFilter, Store, StoreError, StoredCredential};
use burrow_types::api::PostDraft;
use burrow_types::models::{CountedPost, Post, User};

use crate::Database;
use crate::models::{PostRow, UserRow};

impl Store for Database {
    // -- Users --

    fn find_user_by_email(&self, email: &str) -> Result<Option<StoredCredential>, StoreError> {
        self.with_conn(|conn| {
            Ok(query_user_by_email(conn, email)?.map(|row| StoredCredential {
                password_hash: row.password.clone(),
                user: row.into_user(),
            }))
        })
    }

    fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        self.with_conn(|conn| Ok(query_user_by_id(conn, id)?.map(UserRow::into_user)))
    }

    fn insert_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (email, password) VALUES (?1, ?2)",
                (email, password_hash),
            )
            .map_err(|e| {
                if unique_violation(&e) {
                    StoreError::Duplicate("users.email")
                } else {
                    backend(e)
                }
            })?;

            let id = conn.last_insert_rowid();
            let row = query_user_by_id(conn, id)?
                .ok_or_else(|| StoreError::Backend(anyhow!("inserted user {id} missing")))?;
            Ok(row.into_user())
        })
    }

    // -- Posts --

    fn find_post_by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        self.with_conn(|conn| Ok(query_post_by_id(conn, id)?.map(PostRow::into_post)))
    }

    fn insert_post(&self, owner_id: i64, draft: &PostDraft) -> Result<Post, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (title, content, is_published, owner_id) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![draft.title, draft.content, draft.is_published, owner_id],
            )
            .map_err(backend)?;

            let id = conn.last_insert_rowid();
            let row = query_post_by_id(conn, id)?
                .ok_or_else(|| StoreError::Backend(anyhow!("inserted post {id} missing")))?;
            Ok(row.into_post())
        })
    }

    fn update_post(&self, id: i64, draft: &PostDraft) -> Result<Post, StoreError> {
        self.with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE posts SET title = ?1, content = ?2, is_published = ?3 WHERE id = ?4",
                    rusqlite::params![draft.title, draft.content, draft.is_published, id],
                )
                .map_err(backend)?;
            if changed == 0 {
                return Err(StoreError::Backend(anyhow!("post {id} vanished mid-update")));
            }

            let row = query_post_by_id(conn, id)?
                .ok_or_else(|| StoreError::Backend(anyhow!("updated post {id} missing")))?;
            Ok(row.into_post())
        })
    }

    fn delete_post(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM posts WHERE id = ?1", [id])
                .map_err(backend)?;
            Ok(())
        })
    }

    // -- Vote aggregation --

    fn find_post_with_vote_count(&self, id: i64) -> Result<Option<CountedPost>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT p.id, p.title, p.content, p.is_published, p.owner_id, p.created_at,
                        COUNT(v.post_id) AS votes
                 FROM posts p
                 LEFT JOIN votes v ON v.post_id = p.id
                 WHERE p.id = ?1
                 GROUP BY p.id",
                [id],
                counted_post_from_row,
            )
            .optional()
            .map_err(backend)
        })
    }

    fn list_posts_with_vote_counts(
        &self,
        filter: &PostFilter,
    ) -> Result<Vec<CountedPost>, StoreError> {
        self.with_conn(|conn| {
            // LEFT JOIN so zero-vote posts come back with votes = 0.
            let mut stmt = conn
                .prepare(
                    "SELECT p.id, p.title, p.content, p.is_published, p.owner_id, p.created_at,
                            COUNT(v.post_id) AS votes
                     FROM posts p
                     LEFT JOIN votes v ON v.post_id = p.id
                     WHERE p.title LIKE '%' || ?1 || '%'
                     GROUP BY p.id
                     ORDER BY p.id
                     LIMIT ?2 OFFSET ?3",
                )
                .map_err(backend)?;

            let rows = stmt
                .query_map(
                    rusqlite::params![filter.search, filter.limit, filter.offset],
                    counted_post_from_row,
                )
                .map_err(backend)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(backend)?;

            Ok(rows)
        })
    }

    // -- Votes --

    fn insert_vote(&self, user_id: i64, post_id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO votes (user_id, post_id) VALUES (?1, ?2)",
                [user_id, post_id],
            )
            .map_err(|e| {
                if unique_violation(&e) {
                    StoreError::Duplicate("votes(user_id, post_id)")
                } else {
                    backend(e)
                }
            })?;
            Ok(())
        })
    }

    fn delete_vote(&self, user_id: i64, post_id: i64) -> Result<bool, StoreError> {
        self.with_conn(|conn| {
            let removed = conn
                .execute(
                    "DELETE FROM votes WHERE user_id = ?1 AND post_id = ?2",
                    [user_id, post_id],
                )
                .map_err(backend)?;
            Ok(removed > 0)
        })
    }
}

fn counted_post_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CountedPost> {
    let post_row = PostRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        is_published: row.get(3)?,
        owner_id: row.get(4)?,
        created_at: row.get(5)?,
    };
    Ok(CountedPost {
        post: post_row.into_post(),
        votes: row.get(6)?,
    })
}

fn query_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>, StoreError> {
    conn.query_row(
        "SELECT id, email, password, created_at FROM users WHERE email = ?1",
        [email],
        |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(backend)
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>, StoreError> {
    conn.query_row(
        "SELECT id, email, password, created_at FROM users WHERE id = ?1",
        [id],
        |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(backend)
}

fn query_post_by_id(conn: &Connection, id: i64) -> Result<Option<PostRow>, StoreError> {
    conn.query_row(
        "SELECT id, title, content, is_published, owner_id, created_at FROM posts WHERE id = ?1",
        [id],
        |row| {
            Ok(PostRow {
                id: row.get(0)?,
                title: row.get(1)?,
                content: row.get(2)?,
                is_published: row.get(3)?,
                owner_id: row.get(4)?,
                created_at: row.get(5)?,
            })
        },
    )
    .optional()
    .map_err(backend)
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.into())
}

fn unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(f, _)
            if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.into(),
            content: "body".into(),
            is_published: true,
        }
    }

    fn filter(search: &str) -> PostFilter {
        PostFilter {
            search: search.into(),
            limit: 10,
            offset: 0,
        }
    }

    #[test]
    fn user_round_trip_keeps_hash_in_credential() {
        let db = db();
        let user = db.insert_user("ada@example.com", "$argon2id$fake").unwrap();

        let cred = db.find_user_by_email("ada@example.com").unwrap().unwrap();
        assert_eq!(cred.user.id, user.id);
        assert_eq!(cred.password_hash, "$argon2id$fake");

        let by_id = db.find_user_by_id(user.id).unwrap().unwrap();
        assert_eq!(by_id.email, "ada@example.com");
        assert!(db.find_user_by_id(999).unwrap().is_none());
    }

    #[test]
    fn duplicate_email_reports_duplicate() {
        let db = db();
        db.insert_user("ada@example.com", "h1").unwrap();
        let err = db.insert_user("ada@example.com", "h2").unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[test]
    fn vote_pair_constraint_is_enforced() {
        let db = db();
        let user = db.insert_user("v@example.com", "h").unwrap();
        let post = db.insert_post(user.id, &draft("p")).unwrap();

        db.insert_vote(user.id, post.id).unwrap();
        let err = db.insert_vote(user.id, post.id).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        assert!(db.delete_vote(user.id, post.id).unwrap());
        assert!(!db.delete_vote(user.id, post.id).unwrap());
    }

    #[test]
    fn zero_vote_posts_counted_not_omitted() {
        let db = db();
        let user = db.insert_user("v@example.com", "h").unwrap();
        let voted = db.insert_post(user.id, &draft("voted")).unwrap();
        let silent = db.insert_post(user.id, &draft("silent")).unwrap();
        db.insert_vote(user.id, voted.id).unwrap();

        let rows = db.list_posts_with_vote_counts(&filter("")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].post.id, voted.id);
        assert_eq!(rows[0].votes, 1);
        assert_eq!(rows[1].post.id, silent.id);
        assert_eq!(rows[1].votes, 0);

        let detail = db.find_post_with_vote_count(silent.id).unwrap().unwrap();
        assert_eq!(detail.votes, 0);
        assert!(db.find_post_with_vote_count(999).unwrap().is_none());
    }

    #[test]
    fn listing_filters_and_paginates_in_id_order() {
        let db = db();
        let user = db.insert_user("v@example.com", "h").unwrap();
        for title in ["alpha one", "beta two", "alpha three"] {
            db.insert_post(user.id, &draft(title)).unwrap();
        }

        let alphas = db.list_posts_with_vote_counts(&filter("alpha")).unwrap();
        assert_eq!(alphas.len(), 2);
        assert!(alphas[0].post.id < alphas[1].post.id);

        let page = db
            .list_posts_with_vote_counts(&PostFilter {
                search: String::new(),
                limit: 2,
                offset: 1,
            })
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].post.title, "beta two");
        assert_eq!(page[1].post.title, "alpha three");
    }

    #[test]
    fn post_update_and_delete() {
        let db = db();
        let user = db.insert_user("v@example.com", "h").unwrap();
        let post = db.insert_post(user.id, &draft("before")).unwrap();
        assert!(post.is_published);

        let updated = db
            .update_post(
                post.id,
                &PostDraft {
                    title: "after".into(),
                    content: "edited".into(),
                    is_published: false,
                },
            )
            .unwrap();
        assert_eq!(updated.title, "after");
        assert!(!updated.is_published);

        db.delete_post(post.id).unwrap();
        assert!(db.find_post_by_id(post.id).unwrap().is_none());
    }
}

//! The vote ledger: a two-state toggle per (user, post) pair, stored as
//! row presence, plus the count aggregation that feeds listings.

use burrow_types::models::{CountedPost, User, VoteDirection};

use crate::error::CoreError;
use crate::store::{PostFilter, Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Cast,
    Retracted,
}

/// Toggle the acting user's vote on a post.
///
/// `Up` requires no existing vote; a duplicate cast is `Conflict` and
/// changes nothing. `Retract` requires an existing vote; retracting an
/// absent vote is `NotFound`. Concurrent duplicate casts are settled by
/// the storage uniqueness constraint on the pair — the loser gets the
/// same `Conflict`, with no locking here.
pub fn cast_vote<S: Store>(
    store: &S,
    acting: &User,
    post_id: i64,
    direction: VoteDirection,
) -> Result<VoteOutcome, CoreError> {
    store
        .find_post_by_id(post_id)?
        .ok_or(CoreError::NotFound("post"))?;

    match direction {
        VoteDirection::Up => match store.insert_vote(acting.id, post_id) {
            Ok(()) => Ok(VoteOutcome::Cast),
            Err(StoreError::Duplicate(_)) => Err(CoreError::Conflict("vote")),
            Err(e) => Err(e.into()),
        },
        VoteDirection::Retract => {
            if store.delete_vote(acting.id, post_id)? {
                Ok(VoteOutcome::Retracted)
            } else {
                Err(CoreError::NotFound("vote"))
            }
        }
    }
}

pub fn post_with_votes<S: Store>(store: &S, post_id: i64) -> Result<CountedPost, CoreError> {
    store
        .find_post_with_vote_count(post_id)?
        .ok_or(CoreError::NotFound("post"))
}

pub fn list_posts<S: Store>(
    store: &S,
    filter: &PostFilter,
) -> Result<Vec<CountedPost>, CoreError> {
    Ok(store.list_posts_with_vote_counts(filter)?)
}

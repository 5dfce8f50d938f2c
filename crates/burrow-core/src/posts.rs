//! Post mutations. Creation belongs to whoever is acting; update and
//! delete load the post, run the ownership guard, and only then touch
//! storage, so a rejected call changes nothing.

use burrow_types::api::PostDraft;
use burrow_types::models::{Post, User};

use crate::error::CoreError;
use crate::guard;
use crate::store::Store;

pub fn create_post<S: Store>(
    store: &S,
    acting: &User,
    draft: &PostDraft,
) -> Result<Post, CoreError> {
    Ok(store.insert_post(acting.id, draft)?)
}

pub fn update_post<S: Store>(
    store: &S,
    acting: &User,
    post_id: i64,
    draft: &PostDraft,
) -> Result<Post, CoreError> {
    let post = store
        .find_post_by_id(post_id)?
        .ok_or(CoreError::NotFound("post"))?;
    guard::assert_owner(&post, acting)?;
    Ok(store.update_post(post_id, draft)?)
}

pub fn delete_post<S: Store>(store: &S, acting: &User, post_id: i64) -> Result<(), CoreError> {
    let post = store
        .find_post_by_id(post_id)?
        .ok_or(CoreError::NotFound("post"))?;
    guard::assert_owner(&post, acting)?;
    store.delete_post(post_id)?;
    Ok(())
}

use burrow_types::models::{Post, User};

use crate::error::CoreError;

/// Pure ownership check, run after the resource is loaded and before any
/// mutation, so a failure leaves storage untouched.
pub fn assert_owner(post: &Post, acting: &User) -> Result<(), CoreError> {
    if post.owner_id == acting.id {
        Ok(())
    } else {
        Err(CoreError::Forbidden)
    }
}

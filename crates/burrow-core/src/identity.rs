//! Turning credentials into tokens and tokens back into users.

use tracing::warn;

use burrow_types::models::User;

use crate::error::CoreError;
use crate::password;
use crate::store::{Store, StoreError};
use crate::token::TokenService;

/// Create an account: hash the password, insert the row. A duplicate
/// email surfaces as `Conflict`. Callers validate input shape first.
pub fn register<S: Store>(store: &S, email: &str, password: &str) -> Result<User, CoreError> {
    let hash = password::hash_password(password)?;
    match store.insert_user(email, &hash) {
        Ok(user) => Ok(user),
        Err(StoreError::Duplicate(_)) => Err(CoreError::Conflict("email")),
        Err(e) => Err(e.into()),
    }
}

/// The login flow: look up by email, verify, issue a token. Unknown email
/// and wrong password both come back as `Unauthorized` — the response never
/// reveals which half was wrong.
pub fn authenticate<S: Store>(
    store: &S,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> Result<String, CoreError> {
    let credential = store
        .find_user_by_email(email)?
        .ok_or(CoreError::Unauthorized)?;

    if !password::verify_password(password, &credential.password_hash)? {
        return Err(CoreError::Unauthorized);
    }

    tokens.issue(credential.user.id)
}

/// Resolve a bearer token to the acting user. Every token failure and a
/// subject that no longer exists collapse to `Unauthorized`.
pub fn resolve<S: Store>(
    store: &S,
    tokens: &TokenService,
    bearer: &str,
) -> Result<User, CoreError> {
    let user_id = tokens.validate(bearer).map_err(|e| {
        warn!("rejected bearer token: {e}");
        CoreError::Unauthorized
    })?;

    store
        .find_user_by_id(user_id)?
        .ok_or(CoreError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn tokens() -> TokenService {
        TokenService::new("test-secret", 30)
    }

    #[test]
    fn register_then_login_then_resolve() {
        let store = MemoryStore::new();
        let tokens = tokens();

        let user = register(&store, "ada@example.com", "engine-no-9").unwrap();
        let token = authenticate(&store, &tokens, "ada@example.com", "engine-no-9").unwrap();
        let resolved = resolve(&store, &tokens, &token).unwrap();
        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.email, "ada@example.com");
    }

    #[test]
    fn login_failure_is_uniform() {
        let store = MemoryStore::new();
        let tokens = tokens();
        register(&store, "ada@example.com", "engine-no-9").unwrap();

        let unknown_email =
            authenticate(&store, &tokens, "nobody@example.com", "engine-no-9").unwrap_err();
        let wrong_password =
            authenticate(&store, &tokens, "ada@example.com", "wrong").unwrap_err();

        assert!(matches!(unknown_email, CoreError::Unauthorized));
        assert!(matches!(wrong_password, CoreError::Unauthorized));
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
    }

    #[test]
    fn duplicate_email_conflicts() {
        let store = MemoryStore::new();
        register(&store, "ada@example.com", "engine-no-9").unwrap();
        let err = register(&store, "ada@example.com", "other-pass").unwrap_err();
        assert!(matches!(err, CoreError::Conflict("email")));
    }

    #[test]
    fn resolve_rejects_bad_token_and_missing_user() {
        let store = MemoryStore::new();
        let tokens = tokens();

        let err = resolve(&store, &tokens, "not-a-token").unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized));

        // Valid token whose subject was never created.
        let ghost = tokens.issue(999).unwrap();
        let err = resolve(&store, &tokens, &ghost).unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized));
    }
}

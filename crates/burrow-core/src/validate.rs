//! Input shape checks, run at the boundary before any core operation.
//! Each returns a typed `Validation` error rather than panicking or
//! silently clamping.

use burrow_types::api::PostDraft;
use burrow_types::models::VoteDirection;

use crate::error::CoreError;

const MAX_TITLE_LEN: usize = 200;
const MIN_PASSWORD_LEN: usize = 8;

pub fn email(raw: &str) -> Result<(), CoreError> {
    let well_formed = raw
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if well_formed && !raw.contains(char::is_whitespace) {
        Ok(())
    } else {
        Err(CoreError::Validation("email is not well-formed".into()))
    }
}

pub fn password(raw: &str) -> Result<(), CoreError> {
    if raw.len() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn post_draft(draft: &PostDraft) -> Result<(), CoreError> {
    if draft.title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }
    if draft.title.len() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if draft.content.is_empty() {
        return Err(CoreError::Validation("content must not be empty".into()));
    }
    Ok(())
}

/// The wire `dir` field: 1 casts a vote, 0 retracts one. Nothing else
/// has ever meant anything, so nothing else is accepted.
pub fn vote_direction(dir: u8) -> Result<VoteDirection, CoreError> {
    match dir {
        1 => Ok(VoteDirection::Up),
        0 => Ok(VoteDirection::Retract),
        other => Err(CoreError::Validation(format!(
            "vote dir must be 0 or 1, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(email("ada@example.com").is_ok());
        assert!(email("@example.com").is_err());
        assert!(email("ada@nodot").is_err());
        assert!(email("ada lovelace@example.com").is_err());
        assert!(email("").is_err());
    }

    #[test]
    fn vote_direction_mapping() {
        assert_eq!(vote_direction(1).unwrap(), VoteDirection::Up);
        assert_eq!(vote_direction(0).unwrap(), VoteDirection::Retract);
        assert!(matches!(vote_direction(2), Err(CoreError::Validation(_))));
        assert!(matches!(vote_direction(255), Err(CoreError::Validation(_))));
    }

    #[test]
    fn draft_bounds() {
        let ok = PostDraft {
            title: "hello".into(),
            content: "world".into(),
            is_published: true,
        };
        assert!(post_draft(&ok).is_ok());

        let blank_title = PostDraft {
            title: "   ".into(),
            ..ok.clone()
        };
        assert!(post_draft(&blank_title).is_err());

        let long_title = PostDraft {
            title: "x".repeat(201),
            ..ok.clone()
        };
        assert!(post_draft(&long_title).is_err());

        let empty_content = PostDraft {
            content: String::new(),
            ..ok
        };
        assert!(post_draft(&empty_content).is_err());
    }

    #[test]
    fn password_minimum() {
        assert!(password("short").is_err());
        assert!(password("long-enough").is_ok());
    }
}

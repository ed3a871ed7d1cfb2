//! Backlog space (tenant domain) handling.

use crate::error::{DomainError, DomainResult};

/// Domain suffixes accepted for a Backlog space.
pub const SPACE_SUFFIXES: [&str; 2] = [".backlog.com", ".backlog.jp"];

/// Checks that a space domain ends in one of the accepted suffixes.
///
/// # Errors
///
/// Returns `DomainError::InvalidSpaceFormat` otherwise.
pub fn validate_space(space: &str) -> DomainResult<()> {
    let valid = SPACE_SUFFIXES
        .iter()
        .any(|suffix| space.ends_with(suffix));

    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidSpaceFormat(space.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_both_suffixes() {
        assert!(validate_space("foo.backlog.com").is_ok());
        assert!(validate_space("bar.backlog.jp").is_ok());
        assert!(validate_space("my-team.backlog.com").is_ok());
    }

    #[test]
    fn test_rejects_other_domains() {
        for space in [
            "",
            "foo",
            "foo.backlog.net",
            "foo.backlog.com.evil.io",
            "foo.backlogjp",
            "https://foo.backlog.com/",
        ] {
            assert_eq!(
                validate_space(space),
                Err(DomainError::InvalidSpaceFormat(space.to_string())),
                "{space} should be rejected"
            );
        }
    }
}

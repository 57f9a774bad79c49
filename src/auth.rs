// Credential rules and password hashing.
//
// Usernames: Latin letters, digits and underscore, minimum 5 characters,
// stored and compared lowercase. Passwords: minimum 6 characters, stored
// as bcrypt hashes. Authentication failure is indistinguishable between
// an unknown username and a wrong password.

use anyhow::Result;
use regex_lite::Regex;
use std::sync::OnceLock;

use crate::db::models::User;
use crate::db::Database;

pub const MIN_USERNAME_LEN: usize = 5;
pub const MIN_PASSWORD_LEN: usize = 6;

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap())
}

/// Why a set of submitted credentials was rejected before touching the DB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// Not `[A-Za-z0-9_]+` or shorter than MIN_USERNAME_LEN
    BadUsername,
    /// Shorter than MIN_PASSWORD_LEN
    BadPassword,
    /// Registration only: confirmation didn't match
    PasswordMismatch,
}

impl CredentialError {
    pub fn message(&self) -> &'static str {
        match self {
            CredentialError::BadUsername => {
                "Username must contain only Latin letters, numbers and \"_\"; min. length 5 chars"
            }
            CredentialError::BadPassword => "Password must be at least 6 chars long",
            CredentialError::PasswordMismatch => "Passwords do not match",
        }
    }
}

/// Validate a username against the character and length rules.
/// Returns the lowercased form ready for storage/lookup.
pub fn validate_username(username: &str) -> Result<String, CredentialError> {
    if username.chars().count() < MIN_USERNAME_LEN || !username_re().is_match(username) {
        return Err(CredentialError::BadUsername);
    }
    Ok(username.to_lowercase())
}

/// Validate a password (and, for registration, its confirmation).
pub fn validate_password(
    password: &str,
    confirmation: Option<&str>,
) -> Result<(), CredentialError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialError::BadPassword);
    }
    if let Some(confirm) = confirmation {
        if confirm != password {
            return Err(CredentialError::PasswordMismatch);
        }
    }
    Ok(())
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Check a plain password against a stored bcrypt hash.
/// A malformed stored hash counts as a failed check, not an error.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    bcrypt::verify(password, hashed).unwrap_or(false)
}

/// Look up the user and check the password.
///
/// The username must already be validated/lowercased. Returns None on
/// unknown username or wrong password alike.
pub async fn authenticate_user(
    db: &dyn Database,
    username: &str,
    password: &str,
) -> Result<Option<User>> {
    match db.get_user(username).await? {
        Some(user) if verify_password(password, &user.hashed_password) => Ok(Some(user)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert_eq!(validate_username("Alice_99"), Ok("alice_99".to_string()));
        assert_eq!(validate_username("ab_cd"), Ok("ab_cd".to_string()));

        // Too short
        assert_eq!(validate_username("abcd"), Err(CredentialError::BadUsername));
        // Illegal characters
        assert_eq!(
            validate_username("alice!"),
            Err(CredentialError::BadUsername)
        );
        assert_eq!(
            validate_username("али́са_99"),
            Err(CredentialError::BadUsername)
        );
        assert_eq!(validate_username(""), Err(CredentialError::BadUsername));
        assert_eq!(
            validate_username("with space"),
            Err(CredentialError::BadUsername)
        );
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("secret", None).is_ok());
        assert_eq!(
            validate_password("short", None),
            Err(CredentialError::BadPassword)
        );
        assert!(validate_password("secret", Some("secret")).is_ok());
        assert_eq!(
            validate_password("secret", Some("secreT")),
            Err(CredentialError::PasswordMismatch)
        );
    }

    #[test]
    fn test_hash_roundtrip() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}

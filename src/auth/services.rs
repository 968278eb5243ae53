use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use tracing::error;

lazy_static! {
    /// Loose shape check: one `@`, no whitespace, a dot in the domain.
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Expects an address already passed through [`normalize_email`].
pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Canonical form used for storage and lookup.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Salted one-way hash of a password, as an argon2id PHC string
/// (`$argon2id$v=19$...`). Argon2 stands in for bcrypt; what matters is that
/// the stored value is salted and never equals the plaintext. The PHC string is
/// what `GET /user/{id}` exposes in its `password` field.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            anyhow::anyhow!("hash password: {e}")
        })
}

/// `Ok(false)` on mismatch; `Err` only when `stored` is not a PHC string,
/// which callers treat as a failed login.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| anyhow::anyhow!("parse stored hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}


#[cfg(test)]
mod email_tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("john.doe+swap@example.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "alice", "a@x", "@x.com", "a b@x.com", "a@@x.com"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_email("  Alice@X.com "), "alice@x.com");
    }
}

/// Session token utilities
///
/// This module generates and validates the opaque tokens carried in the
/// session cookie. These work in conjunction with the `models::session`
/// module for database operations.
///
/// # Security
///
/// - **Format**: `sess_{32_chars}` (prefix + 32 random alphanumeric chars)
/// - **Storage**: Tokens are hashed with SHA-256 before storage, so a
///   leaked sessions table cannot be replayed as cookies
/// - **Entropy**: base62^32 ≈ 2^190 combinations
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::token::{generate_session_token, hash_session_token, validate_session_token_format};
///
/// let (token, hash) = generate_session_token();
/// assert!(token.starts_with("sess_"));
/// assert_eq!(token.len(), 37);
///
/// assert!(validate_session_token_format(&token));
/// assert_eq!(hash, hash_session_token(&token));
/// ```

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of the random part of the session token (characters)
const TOKEN_RANDOM_LENGTH: usize = 32;

/// Session token prefix
const TOKEN_PREFIX: &str = "sess_";

/// Total length of a session token (prefix + random)
pub const SESSION_TOKEN_LENGTH: usize = TOKEN_PREFIX.len() + TOKEN_RANDOM_LENGTH;

/// Generates a new session token
///
/// Creates a cryptographically random token with the format
/// `sess_{32_chars}` and returns it together with the SHA-256 hash used
/// for database storage.
///
/// # Returns
///
/// Tuple of (plaintext_token, sha256_hash)
pub fn generate_session_token() -> (String, String) {
    let random_part = generate_random_string(TOKEN_RANDOM_LENGTH);
    let token = format!("{}{}", TOKEN_PREFIX, random_part);
    let hash = hash_session_token(&token);

    (token, hash)
}

/// Generates a random alphanumeric string
///
/// Uses base62 encoding (A-Z, a-z, 0-9) for cookie-safe tokens.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Hashes a session token using SHA-256
///
/// # Returns
///
/// Hex-encoded SHA-256 hash (64 characters)
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Validates session token format
///
/// Checks that the token:
/// - Starts with "sess_"
/// - Has correct length (37 chars)
/// - Contains only alphanumeric characters after the prefix
///
/// This is a cheap pre-filter before the database lookup; a token that
/// fails it can never match a stored hash.
pub fn validate_session_token_format(token: &str) -> bool {
    if token.len() != SESSION_TOKEN_LENGTH {
        return false;
    }

    let Some(random_part) = token.strip_prefix(TOKEN_PREFIX) else {
        return false;
    };

    random_part.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_token_format() {
        let (token, hash) = generate_session_token();

        assert!(token.starts_with("sess_"));
        assert_eq!(token.len(), SESSION_TOKEN_LENGTH);
        assert_eq!(hash.len(), 64); // SHA-256 hex is 64 chars
    }

    #[test]
    fn test_generate_session_token_unique() {
        let (token1, _) = generate_session_token();
        let (token2, _) = generate_session_token();

        assert_ne!(token1, token2);
    }

    #[test]
    fn test_hash_session_token_deterministic() {
        let hash1 = hash_session_token("sess_test123");
        let hash2 = hash_session_token("sess_test123");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_validate_session_token_format_valid() {
        let (token, _) = generate_session_token();
        assert!(validate_session_token_format(&token));
    }

    #[test]
    fn test_validate_session_token_format_invalid() {
        // Wrong prefix
        assert!(!validate_session_token_format(
            "wrong_abcdefghijklmnopqrstuvwxyz123456"
        ));

        // Too short
        assert!(!validate_session_token_format("sess_short"));

        // Non-alphanumeric characters
        assert!(!validate_session_token_format(
            "sess_abcdefghijklmnopqrstuvwxyz1234!@"
        ));

        // Empty
        assert!(!validate_session_token_format(""));
    }
}

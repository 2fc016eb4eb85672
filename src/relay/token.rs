// ABOUTME: Relay token generation and shape validation
// Tokens are short human-typeable credentials, unique only among live sessions

use rand::Rng;

pub const TOKEN_LEN: usize = 8;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a candidate token. Randomness alone does not guarantee
/// liveness-uniqueness; callers check the store and regenerate on collision.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();

    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// Whether `candidate` has the token shape: exactly 8 uppercase
/// alphanumeric characters.
pub fn is_valid(candidate: &str) -> bool {
    candidate.len() == TOKEN_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

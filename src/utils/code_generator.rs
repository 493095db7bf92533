//! Short code generation.
//!
//! Codes are drawn from a cryptographically secure RNG and mapped onto a
//! 62-character alphanumeric alphabet, so they are safe in URL paths as-is.

use rand::RngCore;

/// Characters a generated code may contain.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Code length used when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Generates a random short code of [`DEFAULT_CODE_LENGTH`] characters.
pub fn generate_code() -> String {
    generate_code_with_length(DEFAULT_CODE_LENGTH)
}

/// Generates a random short code of exactly `length` characters.
///
/// Draws `length` random bytes from the thread-local CSPRNG (seeded from the
/// operating system) and maps each byte to `ALPHABET[byte % 62]`.
///
/// Global uniqueness is not guaranteed here; the store rejects duplicates and
/// the link service retries with a fresh code.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code_with_length(10);
/// assert_eq!(code.len(), 10);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code_with_length(length: usize) -> String {
    let mut buffer = vec![0u8; length];
    rand::rng().fill_bytes(&mut buffer);

    buffer
        .iter()
        .map(|byte| ALPHABET[*byte as usize % ALPHABET.len()] as char)
        .collect()
}

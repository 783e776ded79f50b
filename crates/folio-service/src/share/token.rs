//! Share token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

use folio_core::config::sharing::SharingConfig;
use folio_core::error::AppError;

/// Tokens shorter than 256 bits are guessable enough to matter.
const MIN_TOKEN_BYTES: usize = 32;

/// Generates opaque share tokens from CSPRNG output.
///
/// Tokens are base64 URL-safe without padding, so they contain only
/// `A–Z a–z 0–9 - _` and can be pasted into a path segment untouched.
/// With the default 32 bytes of randomness a collision is negligible;
/// the database unique constraint backstops the impossible case.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    byte_length: usize,
}

impl TokenGenerator {
    /// Creates a generator, rejecting configurations below the minimum
    /// entropy.
    pub fn new(config: &SharingConfig) -> Result<Self, AppError> {
        if config.token_bytes < MIN_TOKEN_BYTES {
            return Err(AppError::configuration(format!(
                "sharing.token_bytes must be at least {MIN_TOKEN_BYTES}, got {}",
                config.token_bytes
            )));
        }
        Ok(Self {
            byte_length: config.token_bytes,
        })
    }

    /// Generates one fresh token.
    pub fn generate(&self) -> String {
        let mut bytes = vec![0u8; self.byte_length];
        rand::rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(&bytes)
    }
}

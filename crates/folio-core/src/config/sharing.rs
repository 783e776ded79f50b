//! Share-link configuration.

use serde::{Deserialize, Serialize};

/// Share token generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Number of random bytes per share token. Must be at least 32
    /// (256 bits); smaller values are rejected at startup.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            token_bytes: default_token_bytes(),
        }
    }
}

fn default_token_bytes() -> usize {
    32
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Password encoding.
//!
//! The authentication core never sees a password; registration and login go
//! through this collaborator and the store only ever holds encoded values.

use bcrypt::{hash, verify, DEFAULT_COST};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password encoding failed: {0}")]
    Encoding(#[from] bcrypt::BcryptError),
}

/// Encodes raw passwords for storage and checks raw candidates against
/// stored encodings.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> Result<String, PasswordError>;

    /// Whether `raw` matches the stored encoding. A stored value that is not
    /// a valid encoding compares as non-matching.
    fn matches(&self, raw: &str, encoded: &str) -> bool;
}

/// bcrypt-backed encoder.
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl BcryptPasswordEncoder {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Encoder with an explicit cost factor. Anything below bcrypt's
    /// minimum is rejected by the library at encode time.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String, PasswordError> {
        Ok(hash(raw, self.cost)?)
    }

    fn matches(&self, raw: &str, encoded: &str) -> bool {
        verify(raw, encoded).unwrap_or(false)
    }
}

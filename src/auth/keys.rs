// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Signing key material.
//!
//! The HS512 signing key is derived exactly once at startup from a
//! [`SecretSource`] and is immutable for the lifetime of the process. The
//! configured form of the secret is base64url text (without padding); the
//! decoded bytes are what feed the MAC. Key bytes are never logged and the
//! `Debug` form of [`SigningKey`] is redacted.

use base64ct::{Base64UrlUnpadded, Encoding};

/// Minimum decoded key length for HMAC-SHA-512, per RFC 7518 §3.2.
const MIN_KEY_BYTES: usize = 64;

/// Errors while loading or validating key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The environment variable holding the secret is not set.
    #[error("signing secret environment variable {0} is not set")]
    MissingSecret(String),

    /// The configured secret is not valid unpadded base64url.
    #[error("signing secret is not valid base64url")]
    InvalidEncoding,

    /// The decoded secret is too short for HS512.
    #[error("signing secret is {0} bits; HS512 requires at least 512")]
    WeakKey(usize),
}

/// Provider of the raw signing secret.
///
/// Implementations return the decoded key bytes. The caller reads the source
/// once, at startup; there is no rotation or re-read path.
pub trait SecretSource: Send + Sync {
    /// Decoded secret bytes.
    fn current_secret(&self) -> Result<Vec<u8>, KeyError>;
}

/// Secret held directly as base64url text, decoded on read.
pub struct Base64UrlSecret(String);

impl Base64UrlSecret {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl SecretSource for Base64UrlSecret {
    fn current_secret(&self) -> Result<Vec<u8>, KeyError> {
        Base64UrlUnpadded::decode_vec(self.0.trim()).map_err(|_| KeyError::InvalidEncoding)
    }
}

/// Secret read from a named environment variable holding base64url text.
pub struct EnvSecret {
    var: String,
}

impl EnvSecret {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretSource for EnvSecret {
    fn current_secret(&self) -> Result<Vec<u8>, KeyError> {
        let encoded =
            std::env::var(&self.var).map_err(|_| KeyError::MissingSecret(self.var.clone()))?;
        Base64UrlSecret::new(encoded).current_secret()
    }
}

/// Validated HS512 key bytes.
///
/// Construction is the only way to obtain one, so any `SigningKey` in the
/// program is known to meet the minimum length.
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl SigningKey {
    /// Read the secret from `source` and validate it for HS512 use.
    pub fn derive(source: &dyn SecretSource) -> Result<Self, KeyError> {
        let bytes = source.current_secret()?;
        if bytes.len() < MIN_KEY_BYTES {
            return Err(KeyError::WeakKey(bytes.len() * 8));
        }
        Ok(Self { bytes })
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

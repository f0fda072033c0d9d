// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Compact-token issue and verify (HS512).
//!
//! Wire format: `b64url(header) "." b64url(payload) "." b64url(signature)`
//! with unpadded base64url throughout. The header is fixed to
//! `{"alg":"HS512","typ":"JWT"}`; the signature is HMAC-SHA-512 over the
//! first two segments joined by a dot.
//!
//! Verification applies its checks in a fixed order (emptiness, structure,
//! signature, expiry) so that a given bad token always maps to the same
//! [`AuthError`] variant. The codec is stateless apart from the key: same
//! token and same `now` always give the same answer, and no I/O happens
//! anywhere in this module.

use std::time::Duration;

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha512;

use super::claims::Claims;
use super::error::AuthError;
use super::keys::SigningKey;

type HmacSha512 = Hmac<Sha512>;

/// The only algorithm this service issues or accepts.
const TOKEN_ALGORITHM: &str = "HS512";

/// Header fields we care about when parsing. Extra fields are ignored.
#[derive(Deserialize)]
struct Header {
    alg: String,
}

/// Signs and verifies membership passes with a single HS512 key.
///
/// Holds the key and the precomputed encoded header; everything else is
/// per-call. Construction cannot fail: any [`SigningKey`] is already
/// validated for HS512 use.
pub struct TokenCodec {
    key: SigningKey,
    encoded_header: String,
}

impl TokenCodec {
    pub fn new(key: SigningKey) -> Self {
        let header = serde_json::json!({ "alg": TOKEN_ALGORITHM, "typ": "JWT" });
        let header_bytes =
            serde_json::to_vec(&header).expect("header serialization cannot fail");
        Self {
            key,
            encoded_header: Base64UrlUnpadded::encode_string(&header_bytes),
        }
    }

    /// Issue a signed token for `subject`, valid from `now` until
    /// `now + ttl` inclusive.
    pub fn issue(&self, subject: &str, now: DateTime<Utc>, ttl: Duration) -> String {
        debug_assert!(!subject.trim().is_empty(), "token subject must be non-empty");
        let issued_at = now.timestamp();
        let claims = Claims {
            sub: subject.to_owned(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl.as_secs() as i64),
        };
        let payload_bytes =
            serde_json::to_vec(&claims).expect("claims serialization cannot fail");
        let signing_input = format!(
            "{}.{}",
            self.encoded_header,
            Base64UrlUnpadded::encode_string(&payload_bytes)
        );
        let signature = self.sign(signing_input.as_bytes());
        format!(
            "{signing_input}.{}",
            Base64UrlUnpadded::encode_string(&signature)
        )
    }

    /// Validate `token` as of `now` and return its claims.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// [`AuthError::Empty`], then [`AuthError::Malformed`] for any
    /// structural problem (segment count, base64, header JSON, unsupported
    /// `alg`, payload shape), then [`AuthError::BadSignature`], then
    /// [`AuthError::Expired`]. A token is still valid at exactly its `exp`
    /// second.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::Empty);
        }

        let mut segments = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(AuthError::Malformed);
        };
        if header_b64.is_empty() || payload_b64.is_empty() || signature_b64.is_empty() {
            return Err(AuthError::Malformed);
        }

        let header_bytes =
            Base64UrlUnpadded::decode_vec(header_b64).map_err(|_| AuthError::Malformed)?;
        let payload_bytes =
            Base64UrlUnpadded::decode_vec(payload_b64).map_err(|_| AuthError::Malformed)?;
        let signature =
            Base64UrlUnpadded::decode_vec(signature_b64).map_err(|_| AuthError::Malformed)?;

        let header: Header =
            serde_json::from_slice(&header_bytes).map_err(|_| AuthError::Malformed)?;
        // Anything other than our one algorithm (including "none") is
        // structurally unacceptable; the key is never touched for it.
        if header.alg != TOKEN_ALGORITHM {
            return Err(AuthError::Malformed);
        }
        let claims: Claims =
            serde_json::from_slice(&payload_bytes).map_err(|_| AuthError::Malformed)?;

        let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
        let mut mac = HmacSha512::new_from_slice(self.key.bytes())
            .expect("HMAC-SHA-512 accepts keys of any length");
        mac.update(signing_input.as_bytes());
        // Constant-time comparison.
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        if now.timestamp() > claims.exp {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }

    fn sign(&self, input: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha512::new_from_slice(self.key.bytes())
            .expect("HMAC-SHA-512 accepts keys of any length");
        mac.update(input);
        mac.finalize().into_bytes().to_vec()
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Authentication failure taxonomy.
//!
//! Every way a presented credential can fail is one tagged variant here.
//! The variants exist for server-side logs and tests; on the wire all of
//! them collapse into one uniform 401 body (see `middleware::FailureReporter`)
//! so a caller can never distinguish a forged signature from a malformed
//! token. Nothing in this module builds HTTP responses.

/// Why a presented credential was rejected.
///
/// Ordering of checks is fixed: emptiness, then structure, then signature,
/// then expiry, then subject resolution. A token failing an earlier check is
/// never reported under a later variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// A credential slot was presented but held no token text.
    #[error("credential is empty")]
    Empty,

    /// The token is structurally unparseable, or names an unsupported
    /// algorithm.
    #[error("credential is malformed")]
    Malformed,

    /// Structure is sound but the signature does not verify under the
    /// service key.
    #[error("credential signature does not verify")]
    BadSignature,

    /// Signature verified but the expiry instant has passed.
    #[error("credential has expired")]
    Expired,

    /// The token's subject resolves to no stored member.
    #[error("credential subject is not a known member")]
    UnknownMember,

    /// Unexpected internal failure while authenticating, e.g. the member
    /// store was unreachable.
    #[error("credential could not be evaluated")]
    Unknown,
}

impl AuthError {
    /// Whether this failure indicates possible tampering and deserves an
    /// audit-level log entry. Expired or malformed tokens are routine;
    /// a well-formed token with a wrong signature is not.
    pub fn is_security_event(&self) -> bool {
        matches!(self, AuthError::BadSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bad_signature_is_a_security_event() {
        assert!(AuthError::BadSignature.is_security_event());
        for routine in [
            AuthError::Empty,
            AuthError::Malformed,
            AuthError::Expired,
            AuthError::UnknownMember,
            AuthError::Unknown,
        ] {
            assert!(!routine.is_security_event(), "{routine:?}");
        }
    }

    #[test]
    fn display_distinguishes_variants_for_logs() {
        let messages: Vec<String> = [
            AuthError::Empty,
            AuthError::Malformed,
            AuthError::BadSignature,
            AuthError::Expired,
            AuthError::UnknownMember,
            AuthError::Unknown,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        let mut unique = messages.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), messages.len());
    }
}

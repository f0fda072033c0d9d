// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Token claims and the authenticated member representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by a membership pass.
///
/// The payload is a plain JSON object with exactly these required fields;
/// unknown extra fields are tolerated on the way in and never produced on
/// the way out. Timestamps are epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the member's canonical email.
    pub sub: String,

    /// Issued-at instant.
    pub iat: i64,

    /// Expiry instant. The token is still valid at exactly this second.
    pub exp: i64,
}

/// The resolved identity attached to a request after its credential passed
/// verification and the subject was found in the member store.
///
/// Immutable value object; it carries no credential material and lives only
/// as long as the request it was resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthenticatedMember {
    /// Canonical member email (the token's `sub`).
    pub email: String,

    /// Single authority string derived from the stored role,
    /// e.g. `ROLE_USER`.
    pub authority: String,
}

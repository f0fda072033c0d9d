// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Axum extractor for the authenticated member.
//!
//! Use `Auth` in handlers that require an identity:
//!
//! ```rust,ignore
//! async fn create_post(Auth(member): Auth, ...) -> impl IntoResponse {
//!     // member is the AuthenticatedMember resolved by the middleware
//! }
//! ```
//!
//! The extractor only reads what the authentication middleware attached to
//! the request extensions. It never touches the `Authorization` header and
//! never re-verifies, so the credential check runs exactly once per request.
//! Reaching a handler without an identity means the request was anonymous,
//! and for an `Auth`-taking handler that is a 401.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::claims::AuthenticatedMember;
use crate::error::ApiError;

/// Requires an authenticated member for the handler it appears in.
#[derive(Debug)]
pub struct Auth(pub AuthenticatedMember);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedMember>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| ApiError::unauthorized("authentication is required"))
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Per-request authentication.
//!
//! [`authenticate_requests`] runs once, ahead of every handler, and drives a
//! three-way decision:
//!
//! - no credential presented: the request continues anonymously, and
//!   whether that is acceptable is the route's own business;
//! - a credential presented and verified: the resolved
//!   [`AuthenticatedMember`] is attached to the request extensions and the
//!   request continues;
//! - a credential presented and failed: the request ends here with the
//!   uniform 401 built by the [`FailureReporter`]. A failed credential is
//!   never downgraded to anonymous.
//!
//! Handlers never see raw tokens and never re-verify; they read the
//! extension through the `Auth` extractor.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::claims::AuthenticatedMember;
use super::clock::Clock;
use super::codec::TokenCodec;
use super::error::AuthError;
use super::identity::IdentityResolver;
use crate::error::ErrorResponse;

/// Scheme prefix for the `Authorization` header, case-sensitive, exactly
/// one space.
const BEARER_PREFIX: &str = "Bearer ";

/// What all rejected credentials look like on the wire, regardless of why
/// they failed.
const REJECTION_MESSAGE: &str = "authentication failed";

/// Decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// No credential was presented; proceed without an identity.
    Anonymous,
    /// Credential verified and resolved; proceed with this identity.
    Authenticated(AuthenticatedMember),
    /// Credential presented and failed; terminate the request.
    Rejected(AuthError),
}

/// Turns an authentication failure into the terminal wire response.
///
/// This is the only place a failure becomes a response, which keeps the
/// no-distinguishing-information rule in one spot.
pub trait FailureReporter: Send + Sync {
    fn reject(&self, failure: &AuthError) -> Response;
}

/// Default reporter: logs the variant server-side, answers with one uniform
/// 401 JSON body for every variant.
pub struct JsonFailureReporter;

impl FailureReporter for JsonFailureReporter {
    fn reject(&self, failure: &AuthError) -> Response {
        if failure.is_security_event() {
            tracing::warn!(target: "audit", reason = %failure, "request credential rejected");
        } else {
            tracing::info!(reason = %failure, "request credential rejected");
        }
        let body = ErrorResponse::new(StatusCode::UNAUTHORIZED, REJECTION_MESSAGE);
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// The per-request decision machine: credential extraction, verification,
/// subject resolution and failure reporting behind one call.
pub struct RequestAuthenticator {
    codec: Arc<TokenCodec>,
    resolver: IdentityResolver,
    clock: Arc<dyn Clock>,
    reporter: Arc<dyn FailureReporter>,
}

impl RequestAuthenticator {
    pub fn new(
        codec: Arc<TokenCodec>,
        resolver: IdentityResolver,
        clock: Arc<dyn Clock>,
        reporter: Arc<dyn FailureReporter>,
    ) -> Self {
        Self {
            codec,
            resolver,
            clock,
            reporter,
        }
    }

    /// Decide the outcome for a request based on its headers.
    ///
    /// Pure with respect to the request: reads headers, consults the clock
    /// and the member store, produces no response and mutates nothing.
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthOutcome {
        let Some(credential) = bearer_token(headers) else {
            return AuthOutcome::Anonymous;
        };
        let now = self.clock.now();
        let verdict = self
            .codec
            .verify(credential, now)
            .and_then(|claims| self.resolver.resolve(&claims.sub));
        match verdict {
            Ok(member) => AuthOutcome::Authenticated(member),
            Err(failure) => AuthOutcome::Rejected(failure),
        }
    }

    /// Build the terminal response for a rejected credential.
    pub fn reject(&self, failure: &AuthError) -> Response {
        self.reporter.reject(failure)
    }
}

/// Extract the bearer credential from the headers, if one was presented.
///
/// The scheme match is strict: the header must begin with `Bearer ` exactly
/// (case-sensitive, one space); everything after the prefix is the
/// credential, taken verbatim. A header that does not match the scheme is
/// treated the same as no header at all. An empty remainder still counts as
/// a presented credential; the codec rejects it as empty.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}

/// Axum middleware wrapping the whole router.
pub async fn authenticate_requests(
    State(authenticator): State<Arc<RequestAuthenticator>>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticator.authenticate(request.headers()) {
        AuthOutcome::Anonymous => next.run(request).await,
        AuthOutcome::Authenticated(member) => {
            tracing::debug!(subject = %member.email, "request authenticated");
            request.extensions_mut().insert(member);
            next.run(request).await
        }
        AuthOutcome::Rejected(failure) => authenticator.reject(&failure),
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! # API Data Models
//!
//! Request and response structures for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! Success responses that carry a status message use the [`Envelope`]
//! wrapper: `{ "status_code": ..., "message": ..., "data": ... }` with the
//! HTTP status mirrored in the body and `data` omitted when absent.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthenticatedMember;
use crate::store::StoredPost;

// =============================================================================
// Response Envelope
// =============================================================================

/// Uniform success envelope.
///
/// The wire status and the `status_code` field always agree; construction is
/// the only way to build one, so they cannot drift apart.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(skip)]
    status: StatusCode,
    status_code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl Envelope<()> {
    /// Envelope with a message and no payload.
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            status_code: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

impl<T> Envelope<T> {
    /// Envelope carrying a payload.
    pub fn with_data(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            status_code: status.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

// =============================================================================
// Member Models
// =============================================================================

/// Request to register a new member.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterMemberRequest {
    /// Member email; becomes the token subject after login.
    pub email: String,
    /// Raw password; stored only in encoded form.
    pub password: String,
    /// Display name, 1 to 8 characters.
    pub nickname: String,
}

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Canonical member email.
    pub email: String,
    /// Signed membership pass for the `Authorization: Bearer` header.
    pub token: String,
}

/// The caller's own identity, as resolved by the authentication layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberMeResponse {
    pub email: String,
    pub authority: String,
}

impl From<AuthenticatedMember> for MemberMeResponse {
    fn from(member: AuthenticatedMember) -> Self {
        Self {
            email: member.email,
            authority: member.authority,
        }
    }
}

// =============================================================================
// Board Models
// =============================================================================

/// Request to create a board post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// A single board post.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoredPost> for PostResponse {
    fn from(post: StoredPost) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

/// The authenticated member's posts, oldest first.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
}

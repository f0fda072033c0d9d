// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Board endpoints. Both routes require an authenticated member.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreatePostRequest, Envelope, PostListResponse, PostResponse},
    state::AppState,
};

/// Publish a post under the caller's identity.
///
/// The author is always the authenticated member; the request body
/// carries no author field, so a stolen body cannot write as someone
/// else.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    tag = "Board",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Post created"),
        (status = 400, description = "Blank title or content"),
        (status = 401, description = "Missing or rejected credential"),
    )
)]
pub async fn create_post(
    Auth(member): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<Envelope<()>, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("title must not be blank"));
    }
    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("content must not be blank"));
    }

    let post = state
        .store
        .add_post(&member.email, request.title, request.content);
    tracing::info!(post_id = %post.id, author = %post.author_email, "post created");
    Ok(Envelope::message(StatusCode::CREATED, "post created"))
}

/// List the caller's own posts, oldest first.
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Board",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The caller's posts", body = PostListResponse),
        (status = 401, description = "Missing or rejected credential"),
    )
)]
pub async fn list_my_posts(
    Auth(member): Auth,
    State(state): State<AppState>,
) -> Json<PostListResponse> {
    let posts = state
        .store
        .posts_by_author(&member.email)
        .into_iter()
        .map(PostResponse::from)
        .collect();
    Json(PostListResponse { posts })
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Member endpoints: registration, login, and the caller's own identity.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Envelope, LoginRequest, LoginResponse, MemberMeResponse, RegisterMemberRequest},
    state::AppState,
    store::{MemberRecord, Role, StoreError},
};

/// Register a new member.
#[utoipa::path(
    post,
    path = "/members",
    request_body = RegisterMemberRequest,
    tag = "Members",
    responses(
        (status = 201, description = "Member registered"),
        (status = 400, description = "Duplicate email or invalid input"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterMemberRequest>,
) -> Result<Envelope<()>, ApiError> {
    let password_hash = state.passwords.encode(&request.password)?;
    let record = MemberRecord::new(&request.email, password_hash, request.nickname, Role::User)?;
    state.store.register(record)?;
    tracing::info!("member registered");
    Ok(Envelope::message(StatusCode::CREATED, "member registered"))
}

/// Log in and receive a membership pass.
///
/// The token's subject is the canonical email; its lifetime is the
/// configured TTL starting now.
#[utoipa::path(
    post,
    path = "/members/login",
    request_body = LoginRequest,
    tag = "Members",
    responses(
        (status = 202, description = "Login accepted, token issued"),
        (status = 400, description = "Password does not match"),
        (status = 404, description = "No member under this email"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Envelope<LoginResponse>, ApiError> {
    let member = state
        .store
        .find_member(&request.email)
        .ok_or(StoreError::MemberNotFound)?;
    if !state.passwords.matches(&request.password, &member.password_hash) {
        return Err(ApiError::bad_request("password does not match"));
    }

    let token = state
        .tokens
        .issue(&member.email, state.clock.now(), state.token_ttl);
    tracing::info!(subject = %member.email, "login token issued");

    Ok(Envelope::with_data(
        StatusCode::ACCEPTED,
        "login succeeded",
        LoginResponse {
            email: member.email,
            token,
        },
    ))
}

/// The authenticated caller's identity.
#[utoipa::path(
    get,
    path = "/members/me",
    tag = "Members",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller identity", body = MemberMeResponse),
        (status = 401, description = "Missing or rejected credential"),
    )
)]
pub async fn me(Auth(member): Auth) -> Json<MemberMeResponse> {
    Json(member.into())
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Lodge - Membership and Board Service
//!
//! This crate provides a small membership service with a stateless
//! HS512 bearer-token scheme: members register and log in, receive a
//! signed pass, and use it to write to and read from their own board.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuance, verification, and request authentication
//! - `store` - In-memory member and post records
//! - `passwords` - Password hashing (bcrypt)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod passwords;
pub mod state;
pub mod store;

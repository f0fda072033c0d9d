// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

use std::{env, net::SocketAddr};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lodge_server::{
    api::router,
    auth::{EnvSecret, SigningKey},
    config,
    state::AppState,
    store::{MemberRecord, Role},
};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    let json = env::var(config::LOG_FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Registers the admin account named by `SEED_ADMIN_EMAIL` and
/// `SEED_ADMIN_PASSWORD`, if both are set. The store starts empty on
/// every boot, so this runs before the server accepts traffic.
fn seed_admin(state: &AppState) {
    let (Ok(email), Ok(password)) = (
        env::var(config::SEED_ADMIN_EMAIL_ENV),
        env::var(config::SEED_ADMIN_PASSWORD_ENV),
    ) else {
        return;
    };

    let password_hash = state
        .passwords
        .encode(&password)
        .expect("Failed to hash the seed admin password");
    let record = MemberRecord::new(&email, password_hash, "admin", Role::Admin)
        .expect("SEED_ADMIN_EMAIL must be a valid email address");
    state
        .store
        .register(record)
        .expect("Failed to register the seed admin");
    tracing::info!("seed admin registered");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for the shutdown signal");
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Key material is mandatory; refuse to start with a weak or missing secret.
    let key = SigningKey::derive(&EnvSecret::new(config::JWT_SECRET_ENV))
        .expect("JWT_SECRET must hold a base64url-encoded secret of at least 64 bytes");

    let state = AppState::new(key, config::token_ttl());
    seed_admin(&state);
    let app = router(state);

    // Parse bind address
    let host = env::var(config::HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var(config::PORT_ENV)
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind the server address");
    tracing::info!("Lodge server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

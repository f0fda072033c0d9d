// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{
    Clock, IdentityResolver, JsonFailureReporter, RequestAuthenticator, SigningKey, SystemClock,
    TokenCodec,
};
use crate::passwords::{BcryptPasswordEncoder, PasswordEncoder};
use crate::store::InMemoryStore;

/// Shared application state: the member store plus the authentication
/// collaborators, wired once at startup. The signing key lives inside the
/// codec and is not reachable from handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub tokens: Arc<TokenCodec>,
    pub authenticator: Arc<RequestAuthenticator>,
    pub clock: Arc<dyn Clock>,
    pub passwords: Arc<dyn PasswordEncoder>,
    pub token_ttl: Duration,
}

impl AppState {
    /// Production wiring: system clock, bcrypt passwords, JSON failure
    /// reporting.
    pub fn new(key: SigningKey, token_ttl: Duration) -> Self {
        Self::new_with(key, token_ttl, Arc::new(SystemClock))
    }

    /// Wiring with an injected clock, for deterministic expiry behavior in
    /// tests.
    pub fn new_with(key: SigningKey, token_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let tokens = Arc::new(TokenCodec::new(key));
        let authenticator = Arc::new(RequestAuthenticator::new(
            Arc::clone(&tokens),
            IdentityResolver::new(store.clone()),
            Arc::clone(&clock),
            Arc::new(JsonFailureReporter),
        ));
        Self {
            store,
            tokens,
            authenticator,
            clock,
            passwords: Arc::new(BcryptPasswordEncoder::new()),
            token_ttl,
        }
    }
}

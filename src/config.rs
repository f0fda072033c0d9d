// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! # Runtime Configuration Constants
//!
//! Environment variable names and defaults. Configuration is read from the
//! environment once, at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | base64url-encoded signing secret, at least 64 decoded bytes | Required |
//! | `TOKEN_TTL_SECS` | Token lifetime in seconds | `3600` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SEED_ADMIN_EMAIL` | Admin member registered at boot | Optional |
//! | `SEED_ADMIN_PASSWORD` | Password for the seeded admin | Optional |

use std::time::Duration;

/// Environment variable holding the base64url-encoded HS512 signing secret.
///
/// Read exactly once, at startup; the process refuses to start without a
/// decodable secret of at least 64 bytes.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable for the token lifetime, in seconds.
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECS";

/// Lifetime applied when `TOKEN_TTL_SECS` is unset or unparseable.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Server bind address variable.
pub const HOST_ENV: &str = "HOST";

/// Server bind port variable.
pub const PORT_ENV: &str = "PORT";

/// Logging format variable (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Optional admin member seeded into the store at boot.
pub const SEED_ADMIN_EMAIL_ENV: &str = "SEED_ADMIN_EMAIL";

/// Password for the seeded admin member.
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";

/// Token lifetime from the environment, falling back to the default.
pub fn token_ttl() -> Duration {
    token_ttl_from(std::env::var(TOKEN_TTL_ENV).ok().as_deref())
}

fn token_ttl_from(raw: Option<&str>) -> Duration {
    match raw {
        None => DEFAULT_TOKEN_TTL,
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                tracing::warn!(
                    value,
                    default_secs = DEFAULT_TOKEN_TTL.as_secs(),
                    "ignoring unusable {TOKEN_TTL_ENV} value"
                );
                DEFAULT_TOKEN_TTL
            }
        },
    }
}

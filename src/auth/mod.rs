// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! # Authentication Module
//!
//! Stateless HS512 token authentication for the Lodge API.
//!
//! ## Flow
//!
//! 1. A member logs in at `POST /members/login`; the service issues a
//!    signed pass: `b64url(header).b64url(payload).b64url(signature)` with
//!    claims `{sub, iat, exp}` (epoch seconds), signed with HMAC-SHA-512.
//! 2. The client sends `Authorization: Bearer <token>` on later requests.
//! 3. The middleware, once per request:
//!    - extracts the credential (strict `Bearer ` prefix; a non-matching
//!      header means the request is anonymous),
//!    - verifies structure, signature and expiry against the process-wide
//!      signing key and the injected clock,
//!    - resolves the `sub` claim to a stored member,
//!    - attaches the [`AuthenticatedMember`] to the request extensions, or
//!      terminates the request with one uniform 401.
//!
//! ## Security
//!
//! - One key, one algorithm (HS512); tokens naming any other `alg` are
//!   structurally rejected before the key is used.
//! - Signature comparison is constant-time.
//! - No token state is kept server-side; expiry is the only lifetime
//!   control.
//! - Rejections are indistinguishable on the wire; the reason lives only in
//!   server logs, with signature mismatches flagged for audit.

pub mod claims;
pub mod clock;
pub mod codec;
pub mod error;
pub mod extractor;
pub mod identity;
pub mod keys;
pub mod middleware;

pub use claims::{AuthenticatedMember, Claims};
pub use clock::{Clock, SystemClock};
pub use codec::TokenCodec;
pub use error::AuthError;
pub use extractor::Auth;
pub use identity::{IdentityResolver, LookupError, MemberLookup, SubjectRecord};
pub use keys::{Base64UrlSecret, EnvSecret, KeyError, SecretSource, SigningKey};
pub use middleware::{
    authenticate_requests, AuthOutcome, FailureReporter, JsonFailureReporter, RequestAuthenticator,
};

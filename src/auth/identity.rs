// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! Subject-to-member resolution.
//!
//! A verified token only proves possession of a signed subject string. This
//! module turns that subject into an [`AuthenticatedMember`] by consulting
//! the member store through the narrow [`MemberLookup`] seam. A subject with
//! no stored member is an authentication failure like any other, not a
//! panic and not an anonymous fallback.

use std::sync::Arc;

use super::claims::AuthenticatedMember;
use super::error::AuthError;

/// Failure surfaced by a lookup backend.
pub type LookupError = Box<dyn std::error::Error + Send + Sync>;

/// The one row the authentication layer needs about a member.
#[derive(Debug, Clone)]
pub struct SubjectRecord {
    /// Canonical member email.
    pub subject: String,

    /// Authority string derived from the stored role, e.g. `ROLE_USER`.
    pub authority: String,
}

/// Synchronous member lookup by token subject.
///
/// Implemented by the member store. Returning `Ok(None)` means the subject
/// is unknown; returning `Err` means the backend itself failed.
pub trait MemberLookup: Send + Sync {
    fn find_by_subject(&self, subject: &str) -> Result<Option<SubjectRecord>, LookupError>;
}

/// Maps verified token subjects to authenticated members.
pub struct IdentityResolver {
    members: Arc<dyn MemberLookup>,
}

impl IdentityResolver {
    pub fn new(members: Arc<dyn MemberLookup>) -> Self {
        Self { members }
    }

    /// Resolve `subject` to an identity value object.
    ///
    /// An unknown subject (for example a member deleted after the token was
    /// issued) is [`AuthError::UnknownMember`]; a failing backend is
    /// [`AuthError::Unknown`] with the cause logged here, since the uniform
    /// wire response will not carry it.
    pub fn resolve(&self, subject: &str) -> Result<AuthenticatedMember, AuthError> {
        match self.members.find_by_subject(subject) {
            Ok(Some(record)) => Ok(AuthenticatedMember {
                email: record.subject,
                authority: record.authority,
            }),
            Ok(None) => Err(AuthError::UnknownMember),
            Err(error) => {
                tracing::error!(%error, "member lookup failed during authentication");
                Err(AuthError::Unknown)
            }
        }
    }
}

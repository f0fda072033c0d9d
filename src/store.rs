// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Lodge Project

//! In-memory member and board storage.
//!
//! Lookups have to be callable synchronously from the authentication path,
//! so the store keeps its interior mutability private (`std::sync::RwLock`)
//! and exposes `&self` methods. No lock is ever held across an `await`.
//!
//! Emails are canonicalized once at this boundary (trim, NFC, lowercase);
//! the canonical form is the member key and the token subject everywhere
//! else in the service.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::auth::{LookupError, MemberLookup, SubjectRecord};

const MAX_NICKNAME_CHARS: usize = 8;

/// Domain failures raised by the store and its record constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("a member with this email is already registered")]
    DuplicateEmail,

    #[error("email must not be blank and must contain '@'")]
    InvalidEmail,

    #[error("nickname must be between 1 and 8 characters")]
    InvalidNickname,

    #[error("no member is registered under this email")]
    MemberNotFound,
}

/// Stored member role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// The single authority string carried by an authenticated identity.
    pub fn authority(self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.authority())
    }
}

/// A registered member. The email is canonical; the password is stored only
/// in encoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub email: String,
    pub password_hash: String,
    pub nickname: String,
    pub role: Role,
}

impl MemberRecord {
    /// Build a record, canonicalizing the email and validating the domain
    /// rules: a non-blank email containing `@`, a nickname of 1 to 8
    /// characters.
    pub fn new(
        email: &str,
        password_hash: impl Into<String>,
        nickname: impl Into<String>,
        role: Role,
    ) -> Result<Self, StoreError> {
        let email = canonical_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(StoreError::InvalidEmail);
        }
        let nickname = nickname.into();
        let nickname_chars = nickname.chars().count();
        if nickname_chars == 0 || nickname_chars > MAX_NICKNAME_CHARS {
            return Err(StoreError::InvalidNickname);
        }
        Ok(Self {
            email,
            password_hash: password_hash.into(),
            nickname,
            role,
        })
    }
}

/// A board post.
#[derive(Debug, Clone)]
pub struct StoredPost {
    pub id: String,
    pub author_email: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Canonical form used as member key and token subject.
pub fn canonical_email(raw: &str) -> String {
    raw.trim().nfc().collect::<String>().to_lowercase()
}

#[derive(Default)]
pub struct InMemoryStore {
    members: RwLock<HashMap<String, MemberRecord>>,
    posts: RwLock<Vec<StoredPost>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new member; the canonical email must be unused.
    pub fn register(&self, record: MemberRecord) -> Result<(), StoreError> {
        let mut members = self.members.write().unwrap_or_else(PoisonError::into_inner);
        if members.contains_key(&record.email) {
            return Err(StoreError::DuplicateEmail);
        }
        members.insert(record.email.clone(), record);
        Ok(())
    }

    pub fn find_member(&self, email: &str) -> Option<MemberRecord> {
        let members = self.members.read().unwrap_or_else(PoisonError::into_inner);
        members.get(&canonical_email(email)).cloned()
    }

    pub fn add_post(
        &self,
        author_email: &str,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> StoredPost {
        let post = StoredPost {
            id: Uuid::new_v4().to_string(),
            author_email: canonical_email(author_email),
            title: title.into(),
            content: content.into(),
            created_at: Utc::now(),
        };
        let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
        posts.push(post.clone());
        post
    }

    /// Posts by one author, oldest first.
    pub fn posts_by_author(&self, email: &str) -> Vec<StoredPost> {
        let author = canonical_email(email);
        let posts = self.posts.read().unwrap_or_else(PoisonError::into_inner);
        posts
            .iter()
            .filter(|post| post.author_email == author)
            .cloned()
            .collect()
    }
}

impl MemberLookup for InMemoryStore {
    fn find_by_subject(&self, subject: &str) -> Result<Option<SubjectRecord>, LookupError> {
        Ok(self.find_member(subject).map(|member| SubjectRecord {
            subject: member.email,
            authority: member.role.authority().to_string(),
        }))
    }
}

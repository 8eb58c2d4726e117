// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile and session models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Placeholder for profile fields the visitor never supplied.
pub const NOT_PROVIDED: &str = "Not provided";

/// Avatar handed to accounts created through the local forms.
pub const DEFAULT_AVATAR_URL: &str = "https://i.pravatar.cc/150?img=3";

/// User profile held by the session.
///
/// Field names on the wire match the persisted session entry, so a profile
/// written by an older build (name, email and avatar only) still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub display_name: String,
    pub email: String,
    #[serde(rename = "avatar", default)]
    pub avatar_url: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub member_since: String,
}

impl UserProfile {
    /// Demo profile used by the local email/password sign-in.
    pub fn demo(email: impl Into<String>) -> Self {
        Self {
            display_name: "John Doe".to_string(),
            email: email.into(),
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            address: "123 Pet Street, Animal City, PC 12345".to_string(),
            member_since: "January 2024".to_string(),
        }
    }

    /// Profile shown on the profile view when nobody is signed in.
    pub fn guest() -> Self {
        Self {
            display_name: "Guest User".to_string(),
            email: "guest@example.com".to_string(),
            avatar_url: generated_avatar_url("Guest User"),
            phone: "+1 (555) 123-4567".to_string(),
            address: "123 Pet Street, Animal City, PC 12345".to_string(),
            member_since: "January 2024".to_string(),
        }
    }

    /// Avatar to display, falling back to a generated one when none is set.
    pub fn display_avatar(&self) -> String {
        if self.avatar_url.trim().is_empty() {
            let name = if self.display_name.is_empty() {
                "User"
            } else {
                &self.display_name
            };
            generated_avatar_url(name)
        } else {
            self.avatar_url.clone()
        }
    }
}

/// Initials avatar rendered by ui-avatars.com.
pub fn generated_avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=0D8ABC&color=fff",
        urlencoding::encode(name)
    )
}

/// Snapshot of the visitor's session.
///
/// `is_logged_in` is derived from `user`, so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserProfile>,
}

impl Session {
    /// Logged-out session.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Session for a signed-in user.
    pub fn signed_in(user: UserProfile) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}

/// Session as exposed to the front-end.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionView {
    pub is_logged_in: bool,
    pub user: Option<UserProfile>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            is_logged_in: session.is_logged_in(),
            user: session.user().cloned(),
        }
    }
}

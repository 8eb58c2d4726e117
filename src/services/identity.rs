// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Third-party identity provider seam.

use crate::models::user::{generated_avatar_url, NOT_PROVIDED};
use crate::models::UserProfile;
use async_trait::async_trait;
use chrono::NaiveDate;

/// The four profile fields this app reads from a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderProfile {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub phone_number: Option<String>,
}

/// Identity provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IdentityError {
    /// The credential was invalid or consent was denied.
    #[error("Sign-in rejected: {0}")]
    Rejected(String),
    /// The provider could not be reached.
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Authenticate a visitor and return their provider profile.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credential: &str) -> Result<ProviderProfile, IdentityError>;
}

/// Build the session profile for a provider sign-in on `today`.
pub fn profile_from_provider(provider: ProviderProfile, today: NaiveDate) -> UserProfile {
    let display_name = provider
        .display_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "User".to_string());
    let email = provider.email.unwrap_or_default();

    let avatar_url = provider
        .photo_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| {
            let seed = if display_name == "User" && !email.is_empty() {
                email.as_str()
            } else {
                display_name.as_str()
            };
            generated_avatar_url(seed)
        });

    UserProfile {
        display_name,
        email,
        avatar_url,
        phone: provider
            .phone_number
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
        address: NOT_PROVIDED.to_string(),
        member_since: crate::time_utils::month_year(today),
    }
}

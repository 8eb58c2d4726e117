// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod catalog;
pub mod content;
pub mod google_oidc;
pub mod identity;
pub mod session;

pub use catalog::{CatalogError, CatalogService};
pub use content::{ContentError, HomeContent};
pub use google_oidc::GoogleIdentityProvider;
pub use identity::{IdentityError, IdentityProvider, ProviderProfile};
pub use session::SessionStore;

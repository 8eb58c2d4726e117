// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in, sign-up, profile and booking flows.
//!
//! Every flow validates its form before touching the session, so a rejected
//! submission leaves the previous state intact.

use crate::error::{AppError, Result};
use crate::middleware::auth::{post_login_target, LOGIN_PATH};
use crate::models::forms::{
    check, BookingForm, ForgotPasswordForm, LoginForm, ProfileUpdateForm, ProviderSignInForm,
    RegisterForm,
};
use crate::models::booking::sample_bookings;
use crate::models::user::{DEFAULT_AVATAR_URL, NOT_PROVIDED};
use crate::models::{Notice, UserProfile};
use crate::services::catalog::CatalogService;
use crate::services::identity::{profile_from_provider, IdentityProvider};
use crate::services::session::SessionStore;
use crate::time_utils::month_year;
use chrono::NaiveDate;

/// Result of a completed form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub notice: Notice,
    /// Where the front-end should navigate next, if anywhere.
    pub redirect_to: Option<String>,
}

impl Outcome {
    fn new(notice: Notice, redirect_to: Option<String>) -> Self {
        let outcome = Self {
            notice,
            redirect_to,
        };
        tracing::debug!(message = %outcome.notice.message, redirect_to = ?outcome.redirect_to, "Form accepted");
        outcome
    }
}

/// Email/password sign-in. Accounts are mocked: any valid pair signs in to the
/// demo profile and its booking history.
pub fn sign_in_local(sessions: &SessionStore, form: LoginForm) -> Result<Outcome> {
    check(&form)?;

    sessions.login_with_bookings(UserProfile::demo(form.email.trim()), sample_bookings());

    let notice = Notice::success("Login successful! Welcome back!");
    sessions.notify(notice.clone());
    Ok(Outcome::new(
        notice,
        Some(post_login_target(form.from.as_deref())),
    ))
}

/// Create an account and sign it in.
pub fn register(sessions: &SessionStore, form: RegisterForm, today: NaiveDate) -> Result<Outcome> {
    check(&form)?;

    sessions.login(UserProfile {
        display_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        avatar_url: DEFAULT_AVATAR_URL.to_string(),
        phone: NOT_PROVIDED.to_string(),
        address: NOT_PROVIDED.to_string(),
        member_since: month_year(today),
    });

    let notice = Notice::success("Registration successful! Welcome to WarmPaws!");
    sessions.notify(notice.clone());
    Ok(Outcome::new(notice, Some(post_login_target(None))))
}

/// Sign in through the identity provider. Failures are not retried.
pub async fn sign_in_with_provider(
    sessions: &SessionStore,
    provider: &dyn IdentityProvider,
    form: ProviderSignInForm,
    today: NaiveDate,
) -> Result<Outcome> {
    let provider_profile = match provider.sign_in(&form.credential).await {
        Ok(profile) => profile,
        Err(e) => {
            sessions.notify(Notice::error(crate::error::PROVIDER_SIGN_IN_FAILED));
            return Err(e.into());
        }
    };

    let profile = profile_from_provider(provider_profile, today);
    let notice = Notice::success(format!("Welcome {}!", profile.display_name));
    sessions.login(profile);
    sessions.notify(notice.clone());

    Ok(Outcome::new(
        notice,
        Some(post_login_target(form.from.as_deref())),
    ))
}

/// Replace the signed-in visitor's display name and photo.
pub fn update_profile(sessions: &SessionStore, form: ProfileUpdateForm) -> Result<UserProfile> {
    check(&form)?;

    let current = sessions.current();
    let user = current.user().ok_or(AppError::Unauthorized)?;

    let updated = UserProfile {
        display_name: form.display_name.trim().to_string(),
        avatar_url: form
            .photo_url
            .map(|u| u.trim().to_string())
            .unwrap_or_else(|| user.avatar_url.clone()),
        ..user.clone()
    };

    let updated = sessions
        .update_profile(updated)
        .ok_or(AppError::Unauthorized)?;
    sessions.notify(Notice::success("Profile updated successfully!"));
    Ok(updated)
}

/// Password reset request. Nothing is sent; the visitor is sent back to sign-in.
pub fn forgot_password(form: ForgotPasswordForm) -> Result<Outcome> {
    check(&form)?;
    tracing::info!(email = %form.email.trim(), "Password reset requested");

    Ok(Outcome::new(
        Notice::success("Password reset link sent!"),
        Some(LOGIN_PATH.to_string()),
    ))
}

/// Simulated booking: records a pending booking without reserving a slot.
pub fn book(
    sessions: &SessionStore,
    catalog: &CatalogService,
    service_id: u32,
    form: BookingForm,
    today: NaiveDate,
) -> Result<Outcome> {
    let service = catalog
        .find(service_id)
        .ok_or_else(|| AppError::NotFound(format!("Service {service_id} not found")))?;

    if !service.is_bookable() {
        return Err(AppError::BadRequest("No slots available".to_string()));
    }

    check(&form)?;

    let booking = sessions
        .record_booking(service, today)
        .ok_or(AppError::Unauthorized)?;

    tracing::info!(
        service_id,
        booking_id = booking.id,
        service = %service.name,
        "Booking confirmed"
    );

    Ok(Outcome::new(
        Notice::success(format!(
            "Booking Confirmed! {}. We'll contact you at {}",
            service.name,
            form.email.trim()
        )),
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::ServiceRecord;
    use crate::services::identity::{IdentityError, ProviderProfile};
    use async_trait::async_trait;
    use std::sync::Arc;

    fn sessions() -> SessionStore {
        SessionStore::initialize(Arc::new(MemoryStore::new()))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn register_form(password: &str) -> RegisterForm {
        RegisterForm {
            full_name: "Mia Chen".to_string(),
            email: "mia@example.com".to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
        }
    }

    struct FixedProvider(std::result::Result<ProviderProfile, IdentityError>);

    #[async_trait]
    impl IdentityProvider for FixedProvider {
        async fn sign_in(
            &self,
            _credential: &str,
        ) -> std::result::Result<ProviderProfile, IdentityError> {
            self.0.clone()
        }
    }

    #[test]
    fn weak_password_is_rejected_before_login() {
        let sessions = sessions();
        let err = register(&sessions, register_form("abc123"), today()).unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(!sessions.current().is_logged_in());
    }

    #[test]
    fn registration_signs_in_and_goes_home() {
        let sessions = sessions();
        let outcome = register(&sessions, register_form("Snowy1"), today()).unwrap();

        assert_eq!(outcome.redirect_to.as_deref(), Some("/"));
        let user = sessions.current().user().cloned().unwrap();
        assert_eq!(user.display_name, "Mia Chen");
        assert_eq!(user.member_since, "October 2026");
    }

    #[test]
    fn local_sign_in_returns_to_remembered_path() {
        let sessions = sessions();
        let form = LoginForm {
            email: "mia@example.com".to_string(),
            password: "anything".to_string(),
            from: Some("/service/2".to_string()),
        };
        let outcome = sign_in_local(&sessions, form).unwrap();

        assert_eq!(outcome.redirect_to.as_deref(), Some("/service/2"));
        assert_eq!(
            sessions.current().user().map(|u| u.email.as_str()),
            Some("mia@example.com")
        );
    }

    #[tokio::test]
    async fn provider_failure_leaves_session_untouched() {
        let sessions = sessions();
        let provider = FixedProvider(Err(IdentityError::Unavailable("offline".to_string())));
        let form = ProviderSignInForm {
            credential: "token".to_string(),
            from: None,
        };

        let err = sign_in_with_provider(&sessions, &provider, form, today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Identity(_)));
        assert!(!sessions.current().is_logged_in());
    }

    #[tokio::test]
    async fn provider_success_greets_by_name() {
        let sessions = sessions();
        let provider = FixedProvider(Ok(ProviderProfile {
            display_name: Some("Mia".to_string()),
            email: Some("mia@example.com".to_string()),
            ..Default::default()
        }));
        let form = ProviderSignInForm {
            credential: "token".to_string(),
            from: Some("/service/1".to_string()),
        };

        let outcome = sign_in_with_provider(&sessions, &provider, form, today())
            .await
            .unwrap();
        assert_eq!(outcome.notice.message, "Welcome Mia!");
        assert_eq!(outcome.redirect_to.as_deref(), Some("/service/1"));
        assert!(sessions.current().is_logged_in());
    }

    #[test]
    fn profile_update_requires_sign_in() {
        let sessions = sessions();
        let form = ProfileUpdateForm {
            display_name: "Mia".to_string(),
            photo_url: None,
        };
        assert!(matches!(
            update_profile(&sessions, form),
            Err(AppError::Unauthorized)
        ));
        assert!(!sessions.current().is_logged_in());
    }

    #[test]
    fn profile_update_keeps_contact_fields() {
        let sessions = sessions();
        sessions.login(UserProfile::demo("mia@example.com"));
        let form = ProfileUpdateForm {
            display_name: "Mia".to_string(),
            photo_url: Some("https://photos.example/mia.jpg".to_string()),
        };

        let updated = update_profile(&sessions, form).unwrap();
        assert_eq!(updated.display_name, "Mia");
        assert_eq!(updated.avatar_url, "https://photos.example/mia.jpg");
        assert_eq!(updated.email, "mia@example.com");
        assert_eq!(sessions.current().user(), Some(&updated));
    }

    #[test]
    fn booking_rules() {
        let full = ServiceRecord {
            id: 1,
            name: "Paw Balm Treatment".to_string(),
            category: "Grooming".to_string(),
            description: "Snowy paw protection".to_string(),
            price: 20.0,
            rating: 4.7,
            provider_name: "PawCare".to_string(),
            provider_email: "hello@pawcare.example".to_string(),
            image: "https://images.example/balm.jpg".to_string(),
            available_slots: 0,
        };
        let mut open = full.clone();
        open.id = 2;
        open.available_slots = 4;
        let catalog = CatalogService::from_records(vec![full, open]).unwrap();
        let form = || BookingForm {
            name: "Mia".to_string(),
            email: "mia@example.com".to_string(),
        };
        let sessions = sessions();

        assert!(matches!(
            book(&sessions, &catalog, 2, form(), today()),
            Err(AppError::Unauthorized)
        ));

        sessions.login(UserProfile::demo("mia@example.com"));
        assert!(matches!(
            book(&sessions, &catalog, 9, form(), today()),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            book(&sessions, &catalog, 1, form(), today()),
            Err(AppError::BadRequest(_))
        ));

        let outcome = book(&sessions, &catalog, 2, form(), today()).unwrap();
        assert_eq!(
            outcome.notice.message,
            "Booking Confirmed! Paw Balm Treatment. We'll contact you at mia@example.com"
        );
        assert_eq!(catalog.find(2).unwrap().available_slots, 4);

        let history = sessions.bookings();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].service_id, 2);
        assert_eq!(history[0].date, today());
    }

    #[test]
    fn local_sign_in_loads_demo_history() {
        let sessions = sessions();
        let form = LoginForm {
            email: "mia@example.com".to_string(),
            password: "anything".to_string(),
            from: None,
        };
        sign_in_local(&sessions, form).unwrap();

        assert_eq!(sessions.bookings(), sample_bookings());
    }
}

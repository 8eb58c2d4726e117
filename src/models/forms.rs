// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form submissions and their validation rules.

use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Minimum length for a new account password.
pub const MIN_PASSWORD_LEN: u64 = 6;

/// Forms that report validation failures in a fixed field order.
pub trait FormFields: Validate {
    /// Field names in the order they appear on the form.
    const FIELDS: &'static [&'static str];
}

/// A rejected form: the first message in form order plus all field failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRejection {
    pub message: String,
    pub fields: Vec<String>,
}

/// Validate a form, flattening `validator`'s errors into a [`FormRejection`].
pub fn check<F: FormFields>(form: &F) -> Result<(), FormRejection> {
    form.validate()
        .map_err(|errors| FormRejection::from_errors(&errors, F::FIELDS))
}

impl FormRejection {
    fn from_errors(errors: &ValidationErrors, order: &[&str]) -> Self {
        let field_errors = errors.field_errors();
        let mut fields = Vec::new();
        let mut message = None;

        for name in order {
            let Some(list) = field_errors.get(*name) else {
                continue;
            };
            for err in list.iter() {
                let text = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{name} is invalid"));
                if message.is_none() {
                    message = Some(text.clone());
                }
                fields.push(format!("{name}: {text}"));
            }
        }

        Self {
            message: message.unwrap_or_else(|| "Invalid form submission".to_string()),
            fields,
        }
    }
}

/// Local email/password sign-in.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter your password"))]
    pub password: String,
    /// Path remembered by the route guard.
    #[serde(default)]
    pub from: Option<String>,
}

impl FormFields for LoginForm {
    const FIELDS: &'static [&'static str] = &["email", "password"];
}

/// New account sign-up.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[validate(custom(function = "not_blank", message = "Please enter your full name"))]
    pub full_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "password_strength"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match!"))]
    pub confirm_password: String,
}

impl FormFields for RegisterForm {
    const FIELDS: &'static [&'static str] =
        &["full_name", "email", "password", "confirm_password"];
}

/// Simulated booking request for a service.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingForm {
    #[validate(custom(function = "not_blank", message = "Please enter your full name"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

impl FormFields for BookingForm {
    const FIELDS: &'static [&'static str] = &["name", "email"];
}

/// Profile edit from the profile view.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateForm {
    #[validate(custom(function = "not_blank", message = "Please enter a display name"))]
    pub display_name: String,
    /// Blank means keep the current avatar.
    #[validate(url(message = "Photo URL must be a valid URL"))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub photo_url: Option<String>,
}

impl FormFields for ProfileUpdateForm {
    const FIELDS: &'static [&'static str] = &["display_name", "photo_url"];
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordForm {
    #[validate(custom(function = "not_blank", message = "Please enter your email address"))]
    pub email: String,
}

impl FormFields for ForgotPasswordForm {
    const FIELDS: &'static [&'static str] = &["email"];
}

/// Google Sign-In credential posted by the front-end.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSignInForm {
    pub credential: String,
    #[serde(default)]
    pub from: Option<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// At least six characters with one uppercase and one lowercase letter.
fn password_strength(password: &str) -> Result<(), ValidationError> {
    let reject = |code: &'static str, message: &'static str| -> Result<(), ValidationError> {
        Err(ValidationError::new(code).with_message(Cow::Borrowed(message)))
    };

    if (password.chars().count() as u64) < MIN_PASSWORD_LEN {
        return reject(
            "password_length",
            "Password must be at least 6 characters long",
        );
    }
    if !password.chars().any(char::is_uppercase) {
        return reject(
            "password_uppercase",
            "Password must contain at least one uppercase letter",
        );
    }
    if !password.chars().any(char::is_lowercase) {
        return reject(
            "password_lowercase",
            "Password must contain at least one lowercase letter",
        );
    }
    Ok(())
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Sign-In: verify the ID token the browser received from Google.

use crate::config::Config;
use crate::services::identity::{IdentityError, IdentityProvider, ProviderProfile};
use anyhow::Context;
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
const CLOCK_SKEW_SECS: u64 = 60;
/// Unknown key ids may force a refetch at most this often.
const MIN_FORCED_REFRESH: Duration = Duration::from_secs(30);

enum KeySource {
    /// Keys fetched from Google's JWKS endpoint.
    Jwks { url: String },
    /// One fixed key, for deterministic tests.
    Static {
        kid: String,
        algorithm: Algorithm,
        key: Arc<DecodingKey>,
    },
}

struct CachedKeys {
    by_kid: HashMap<String, Arc<DecodingKey>>,
    fetched_at: Instant,
    expires_at: Instant,
}

/// Identity provider backed by Google ID tokens.
pub struct GoogleIdentityProvider {
    http_client: reqwest::Client,
    client_id: String,
    source: KeySource,
    cache: RwLock<Option<CachedKeys>>,
    refresh_lock: Mutex<()>,
    min_forced_refresh: Duration,
}

impl GoogleIdentityProvider {
    /// Provider that validates tokens against Google's published keys.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        tracing::info!(
            client_id = %config.google_client_id,
            jwks_url = %config.google_jwks_url,
            "Initialized Google identity provider"
        );
        Self::build(
            &config.google_client_id,
            KeySource::Jwks {
                url: config.google_jwks_url.clone(),
            },
        )
    }

    /// Provider that trusts a single key, for tests.
    pub fn with_static_key(
        client_id: &str,
        kid: impl Into<String>,
        algorithm: Algorithm,
        key: DecodingKey,
    ) -> anyhow::Result<Self> {
        let kid = kid.into();
        if kid.trim().is_empty() {
            anyhow::bail!("static key id must not be empty");
        }
        Self::build(
            client_id,
            KeySource::Static {
                kid,
                algorithm,
                key: Arc::new(key),
            },
        )
    }

    fn build(client_id: &str, source: KeySource) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed building identity provider HTTP client")?;

        Ok(Self {
            http_client,
            client_id: client_id.to_string(),
            source,
            cache: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            min_forced_refresh: MIN_FORCED_REFRESH,
        })
    }

    fn expected_algorithm(&self) -> Algorithm {
        match &self.source {
            KeySource::Jwks { .. } => Algorithm::RS256,
            KeySource::Static { algorithm, .. } => *algorithm,
        }
    }

    async fn key_for(&self, kid: &str) -> Result<Arc<DecodingKey>, IdentityError> {
        let url = match &self.source {
            KeySource::Static { kid: known, key, .. } => {
                return if kid == known {
                    Ok(key.clone())
                } else {
                    Err(IdentityError::Rejected(format!("unknown key id: {kid}")))
                };
            }
            KeySource::Jwks { url } => url,
        };

        if let Some(key) = self.cached_key(kid).await {
            return Ok(key);
        }

        let fetched = self.refresh_keys(url, false).await?;
        if let Some(key) = self.cached_key(kid).await {
            return Ok(key);
        }

        // A new kid right after Google rotates keys needs a forced refresh,
        // unless the keys were just fetched.
        if !fetched && self.refresh_keys(url, true).await? {
            if let Some(key) = self.cached_key(kid).await {
                return Ok(key);
            }
        }

        Err(IdentityError::Rejected(format!(
            "key id not published by Google: {kid}"
        )))
    }

    async fn cached_key(&self, kid: &str) -> Option<Arc<DecodingKey>> {
        let now = Instant::now();
        self.cache
            .read()
            .await
            .as_ref()
            .filter(|c| c.expires_at > now)
            .and_then(|c| c.by_kid.get(kid).cloned())
    }

    /// Fetch the JWKS unless the cache makes it unnecessary. Returns whether a fetch happened.
    ///
    /// A forced refresh ignores expiry but not `min_forced_refresh`.
    async fn refresh_keys(&self, url: &str, force: bool) -> Result<bool, IdentityError> {
        let _guard = self.refresh_lock.lock().await;

        let now = Instant::now();
        let skip = match self.cache.read().await.as_ref() {
            None => false,
            Some(c) if force => now.duration_since(c.fetched_at) < self.min_forced_refresh,
            Some(c) => c.expires_at > now,
        };
        if skip {
            return Ok(false);
        }

        tracing::debug!(jwks_url = %url, "Refreshing Google signing keys");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("JWKS request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(IdentityError::Unavailable(format!(
                "JWKS request returned status {}",
                response.status()
            )));
        }

        let ttl = response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(max_age)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CACHE_TTL);

        let jwks: Jwks = response
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("invalid JWKS JSON: {e}")))?;

        let by_kid = usable_keys(jwks);
        if by_kid.is_empty() {
            return Err(IdentityError::Unavailable(
                "JWKS response had no usable RSA keys".to_string(),
            ));
        }

        let fetched_at = Instant::now();
        *self.cache.write().await = Some(CachedKeys {
            by_kid,
            fetched_at,
            expires_at: fetched_at + ttl,
        });

        tracing::debug!(ttl_secs = ttl.as_secs(), "Google signing keys cached");
        Ok(true)
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn sign_in(&self, credential: &str) -> Result<ProviderProfile, IdentityError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(IdentityError::Rejected("empty credential".to_string()));
        }

        let header = decode_header(credential)
            .map_err(|e| IdentityError::Rejected(format!("invalid token header: {e}")))?;

        let algorithm = self.expected_algorithm();
        if header.alg != algorithm {
            return Err(IdentityError::Rejected(format!(
                "unexpected token alg: {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| IdentityError::Rejected("token has no key id".to_string()))?;
        let key = self.key_for(&kid).await?;

        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.set_issuer(&GOOGLE_ISSUERS);
        validation.set_audience(&[self.client_id.as_str()]);
        validation.validate_nbf = true;
        validation.leeway = CLOCK_SKEW_SECS;

        let claims = decode::<IdTokenClaims>(credential, key.as_ref(), &validation)
            .map_err(|e| IdentityError::Rejected(format!("token validation failed: {e}")))?
            .claims;

        if claims.email_verified == Some(false) {
            return Err(IdentityError::Rejected(
                "email address is not verified".to_string(),
            ));
        }

        tracing::info!(
            subject = %claims.sub,
            email = claims.email.as_deref().unwrap_or("<missing>"),
            "Google sign-in verified"
        );

        Ok(ProviderProfile {
            display_name: claims.name,
            email: claims.email,
            photo_url: claims.picture,
            phone_number: claims.phone_number,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Jwks {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    alg: Option<String>,
    n: String,
    e: String,
    #[serde(rename = "use")]
    use_: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    email: Option<String>,
    email_verified: Option<bool>,
    name: Option<String>,
    picture: Option<String>,
    phone_number: Option<String>,
}

/// RS256 signing keys from a JWKS document, keyed by kid.
fn usable_keys(jwks: Jwks) -> HashMap<String, Arc<DecodingKey>> {
    jwks.keys
        .into_iter()
        .filter(|k| k.kty == "RSA" && !k.kid.trim().is_empty())
        .filter(|k| k.alg.as_deref().map_or(true, |a| a == "RS256"))
        .filter(|k| k.use_.as_deref().map_or(true, |u| u == "sig"))
        .filter_map(|k| match DecodingKey::from_rsa_components(&k.n, &k.e) {
            Ok(key) => Some((k.kid, Arc::new(key))),
            Err(e) => {
                tracing::warn!(error = %e, kid = %k.kid, "Skipping invalid JWKS key");
                None
            }
        })
        .collect()
}

/// `max-age` seconds from a Cache-Control header value.
fn max_age(value: &str) -> Option<u64> {
    value
        .split(',')
        .filter_map(|d| d.trim().strip_prefix("max-age="))
        .find_map(|raw| raw.trim_matches('"').parse().ok())
}

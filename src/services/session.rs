// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-wide session holder.
//!
//! The session lives in a `watch` channel: every transition replaces the
//! snapshot atomically and subscribers see each committed state. Each change
//! is written through to the key-value store; persistence failures are logged
//! and never reach the caller. The visitor's booking history travels with the
//! session and is cleared on sign-out.

use crate::db::{keys, KeyValueStore};
use crate::models::{BookingStatus, BookingSummary, Notice, ServiceRecord, Session, UserProfile};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use tokio::sync::{broadcast, watch};

const NOTICE_CAPACITY: usize = 16;

pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    state: watch::Sender<Session>,
    notices: broadcast::Sender<Notice>,
    bookings: RwLock<Vec<BookingSummary>>,
}

impl SessionStore {
    /// Hydrate the session from the persisted entry.
    ///
    /// Missing, unreadable or malformed data yields a logged-out session.
    pub fn initialize(store: Arc<dyn KeyValueStore>) -> Self {
        let session = match store.get(keys::SESSION_USER) {
            Ok(Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => {
                    tracing::info!(email = %user.email, "Restored persisted session");
                    Session::signed_in(user)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring malformed persisted session");
                    Session::anonymous()
                }
            },
            Ok(None) => Session::anonymous(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted session");
                Session::anonymous()
            }
        };

        let bookings = if session.is_logged_in() {
            load_bookings(store.as_ref())
        } else {
            Vec::new()
        };

        let (state, _) = watch::channel(session);
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);

        Self {
            store,
            state,
            notices,
            bookings: RwLock::new(bookings),
        }
    }

    /// Current session snapshot.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Sign in with `profile`. The profile is trusted as given.
    pub fn login(&self, profile: UserProfile) {
        self.login_with_bookings(profile, Vec::new());
    }

    /// Sign in with `profile` and an existing booking history.
    pub fn login_with_bookings(&self, profile: UserProfile, bookings: Vec<BookingSummary>) {
        tracing::info!(email = %profile.email, bookings = bookings.len(), "User signed in");
        self.write_json(keys::SESSION_USER, &profile);
        self.write_json(keys::BOOKINGS, &bookings);
        *self.bookings.write().unwrap_or_else(|e| e.into_inner()) = bookings;
        self.state.send_replace(Session::signed_in(profile));
    }

    /// Sign out and return the confirmation notice shown to the visitor.
    pub fn logout(&self) -> Notice {
        self.state.send_replace(Session::anonymous());
        self.bookings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        for key in [keys::SESSION_USER, keys::BOOKINGS] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(error = %e, key, "Failed to clear persisted session");
            }
        }
        tracing::info!("User signed out");

        let notice = Notice::success("Logged out successfully!");
        self.notify(notice.clone());
        notice
    }

    /// Replace the signed-in profile wholesale.
    ///
    /// Returns `None` and leaves the session alone when nobody is signed in.
    pub fn update_profile(&self, profile: UserProfile) -> Option<UserProfile> {
        if !self.state.borrow().is_logged_in() {
            return None;
        }
        self.write_json(keys::SESSION_USER, &profile);
        self.state.send_replace(Session::signed_in(profile.clone()));
        Some(profile)
    }

    /// Booking history of the signed-in visitor, oldest first. Empty when signed out.
    pub fn bookings(&self) -> Vec<BookingSummary> {
        if !self.state.borrow().is_logged_in() {
            return Vec::new();
        }
        self.bookings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Add a pending booking of `service` to the visitor's history.
    ///
    /// Returns `None` when nobody is signed in.
    pub fn record_booking(
        &self,
        service: &ServiceRecord,
        date: NaiveDate,
    ) -> Option<BookingSummary> {
        if !self.state.borrow().is_logged_in() {
            return None;
        }

        let mut bookings = self.bookings.write().unwrap_or_else(|e| e.into_inner());
        let booking = BookingSummary {
            id: bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1,
            service_id: service.id,
            service_name: service.name.clone(),
            date,
            status: BookingStatus::Pending,
        };
        bookings.push(booking.clone());
        self.write_json(keys::BOOKINGS, &*bookings);
        Some(booking)
    }

    /// Observe session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Observe user-visible notices.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Publish a notice to subscribers. Having no subscribers is fine.
    pub fn notify(&self, notice: Notice) {
        tracing::debug!(level = ?notice.level, message = %notice.message, "Notice");
        let _ = self.notices.send(notice);
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(|e| e.to_string())
            .and_then(|json| self.store.set(key, &json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            tracing::warn!(error = %e, key, "Failed to persist session");
        }
    }
}

fn load_bookings(store: &dyn KeyValueStore) -> Vec<BookingSummary> {
    match store.get(keys::BOOKINGS) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring malformed booking history");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read booking history");
            Vec::new()
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod booking;
pub mod content;
pub mod forms;
pub mod notice;
pub mod service;
pub mod user;

pub use booking::{BookingStatus, BookingSummary};
pub use content::{Expert, WinterTip};
pub use notice::{Notice, NoticeLevel};
pub use service::ServiceRecord;
pub use user::{Session, SessionView, UserProfile};

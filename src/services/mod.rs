// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Services module - business logic layer.

pub mod google_auth;

pub use google_auth::{AuthError, GoogleAuthVerifier, GoogleIdentity};

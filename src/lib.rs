// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Fitmint: weekly workout routines, daily check-offs, progress stats.
//!
//! This crate provides the backend API for the Fitmint web app: routine
//! plan storage, per-day completion tracking, streak/total statistics, and
//! plan export/import.

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::GoogleAuthVerifier;

/// Shared application state, built once in `main` and injected into the
/// router.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub google_verifier: GoogleAuthVerifier,
}

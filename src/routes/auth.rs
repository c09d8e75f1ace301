// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Sign-in routes.
//!
//! The web client completes Google Sign-In in the browser and posts the ID
//! token here. A successful verification upserts the user's profile document
//! and mints a session JWT, returned both as an HTTP-only cookie and in the
//! response body.

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::User;
use crate::routes::api::UserResponse;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/google", post(google_sign_in))
        .route("/auth/logout", post(logout))
}

/// Request body for Google sign-in.
#[derive(Deserialize)]
pub struct GoogleSignInRequest {
    id_token: String,
}

/// Successful sign-in response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Verify a Google ID token and establish a session.
///
/// First sign-in creates the profile document; later sign-ins refresh the
/// identity fields while leaving the user's own settings untouched.
async fn google_sign_in(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<GoogleSignInRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let identity = state
        .google_verifier
        .verify_id_token(&body.id_token)
        .await?;

    let now = chrono::Utc::now().to_rfc3339();

    let user = match state.db.get_user(&identity.sub).await? {
        Some(mut existing) => {
            existing.apply_identity(&identity, &now);
            existing
        }
        None => User::from_identity(&identity, &now),
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(uid = %user.uid, "User signed in");

    let jwt = create_jwt(&user.uid, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let jar = jar.add(session_cookie(&state, jwt.clone()));

    Ok((
        jar,
        Json(LoginResponse {
            token: jwt,
            user: UserResponse::from(user),
        }),
    ))
}

/// Clear the session cookie. The client also drops its stored token.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let jar = jar.remove(session_cookie(&state, String::new()));
    (jar, Json(serde_json::json!({ "success": true })))
}

fn session_cookie(state: &AppState, value: String) -> Cookie<'static> {
    // Local development runs the frontend on plain HTTP
    let secure = !state.config.frontend_url.starts_with("http://localhost")
        && !state.config.frontend_url.starts_with("http://127.0.0.1");

    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Feedback submission route.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::Result;
use crate::models::Feedback;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/feedback", post(submit_feedback))
}

#[derive(Deserialize, Validate)]
struct FeedbackRequest {
    #[validate(length(min = 1, max = 200))]
    name: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = 1, max = 5000))]
    message: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FeedbackResponse {
    pub success: bool,
}

/// Store a feedback submission. Write-only: nothing reads these back.
async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>> {
    body.validate()?;

    let feedback = Feedback {
        name: body.name,
        email: body.email,
        message: body.message,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    state.db.add_feedback(&feedback).await?;

    tracing::info!("Feedback submitted");
    Ok(Json(FeedbackResponse { success: true }))
}

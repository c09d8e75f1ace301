// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! API routes for authenticated users.
//!
//! Routine edits follow the storage model's contract: load the latest plan
//! snapshot, apply one change in memory, write the whole document back.
//! Nothing here coordinates concurrent sessions; the document store keeps
//! the last write.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::export::{self, ImportPolicy};
use crate::middleware::auth::AuthUser;
use crate::models::{DailyProgress, Exercise, ProgressStats, RoutinePlan, User, Weekday};
use crate::time_utils;
use crate::AppState;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/me/language", put(update_language))
        .route("/api/routine", get(get_routine).put(put_routine))
        .route("/api/routine/{day}/exercises", post(add_exercise))
        .route(
            "/api/routine/{day}/exercises/{index}",
            put(update_exercise).delete(delete_exercise),
        )
        .route("/api/routine/{day}/note", put(update_note))
        .route("/api/routine/export", get(export_routine))
        .route("/api/routine/template", get(export_template))
        .route("/api/routine/import", post(import_routine))
        .route("/api/today", get(get_today))
        .route("/api/progress/{date}", get(get_progress))
        .route("/api/progress/{date}/toggle", post(toggle_progress))
        .route("/api/stats", get(get_stats))
        .route("/api/account", delete(delete_account))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub uid: String,
    pub display_name: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub language: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uid: user.uid,
            display_name: user.display_name,
            email: user.email,
            photo_url: user.photo_url,
            language: user.language,
        }
    }
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .db
        .get_user(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.uid)))?;

    Ok(Json(UserResponse::from(profile)))
}

#[derive(Deserialize, Validate)]
struct LanguageRequest {
    #[validate(length(min = 2, max = 16))]
    language: String,
}

/// Update the preferred UI language (read-modify-write of the profile).
async fn update_language(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<LanguageRequest>,
) -> Result<Json<UserResponse>> {
    body.validate()?;

    let mut profile = state
        .db
        .get_user(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.uid)))?;

    profile.language = body.language;
    state.db.upsert_user(&profile).await?;

    Ok(Json(UserResponse::from(profile)))
}

// ─── Routine Plan ────────────────────────────────────────────

fn parse_day(raw: &str) -> Result<Weekday> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown weekday: {raw}")))
}

fn validate_plan(plan: &RoutinePlan) -> Result<()> {
    for (day, schedule) in plan.days() {
        for exercise in &schedule.exercises {
            exercise
                .validate()
                .map_err(|e| AppError::Validation(format!("invalid exercise on {day}: {e}")))?;
        }
    }
    Ok(())
}

/// Load the routine plan. A user who never saved one gets the empty 7-day
/// default, not an error.
async fn get_routine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<RoutinePlan>> {
    let plan = state.db.get_plan(&user.uid).await?.unwrap_or_default();
    Ok(Json(plan))
}

/// Replace the whole routine plan.
async fn put_routine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(plan): Json<RoutinePlan>,
) -> Result<Json<RoutinePlan>> {
    validate_plan(&plan)?;
    state.db.set_plan(&user.uid, &plan).await?;
    Ok(Json(plan))
}

/// Add an exercise to a day's schedule.
async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(day): Path<String>,
    Json(exercise): Json<Exercise>,
) -> Result<Json<RoutinePlan>> {
    let day = parse_day(&day)?;
    exercise.validate()?;

    let mut plan = state.db.get_plan(&user.uid).await?.unwrap_or_default();
    plan.add_exercise(day, exercise);
    state.db.set_plan(&user.uid, &plan).await?;

    tracing::debug!(uid = %user.uid, %day, "Exercise added");
    Ok(Json(plan))
}

/// Replace the exercise at a position in a day's schedule.
async fn update_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((day, index)): Path<(String, usize)>,
    Json(exercise): Json<Exercise>,
) -> Result<Json<RoutinePlan>> {
    let day = parse_day(&day)?;
    exercise.validate()?;

    let mut plan = state.db.get_plan(&user.uid).await?.unwrap_or_default();
    if !plan.update_exercise(day, index, exercise) {
        return Err(AppError::NotFound(format!(
            "No exercise at {day}[{index}]"
        )));
    }
    state.db.set_plan(&user.uid, &plan).await?;

    Ok(Json(plan))
}

/// Remove the exercise at a position in a day's schedule.
async fn delete_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((day, index)): Path<(String, usize)>,
) -> Result<Json<RoutinePlan>> {
    let day = parse_day(&day)?;

    let mut plan = state.db.get_plan(&user.uid).await?.unwrap_or_default();
    let removed = plan
        .remove_exercise(day, index)
        .ok_or_else(|| AppError::NotFound(format!("No exercise at {day}[{index}]")))?;
    state.db.set_plan(&user.uid, &plan).await?;

    tracing::debug!(uid = %user.uid, %day, name = %removed.name, "Exercise removed");
    Ok(Json(plan))
}

#[derive(Deserialize, Validate)]
struct NoteRequest {
    #[validate(length(max = 5000))]
    note: String,
}

/// Overwrite a day's note.
async fn update_note(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(day): Path<String>,
    Json(body): Json<NoteRequest>,
) -> Result<Json<RoutinePlan>> {
    let day = parse_day(&day)?;
    body.validate()?;

    let mut plan = state.db.get_plan(&user.uid).await?.unwrap_or_default();
    plan.set_note(day, body.note);
    state.db.set_plan(&user.uid, &plan).await?;

    Ok(Json(plan))
}

// ─── Export / Import ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ExportFormat {
    #[default]
    Json,
    Csv,
    Report,
}

#[derive(Deserialize)]
struct ExportQuery {
    #[serde(default)]
    format: ExportFormat,
}

fn render_export(plan: &RoutinePlan, format: ExportFormat, stem: &str) -> impl IntoResponse {
    let (content_type, extension, body) = match format {
        ExportFormat::Json => ("application/json", "json", export::to_json(plan)),
        ExportFormat::Csv => ("text/csv", "csv", export::to_csv(plan)),
        ExportFormat::Report => ("text/plain; charset=utf-8", "txt", export::to_report(plan)),
    };

    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{stem}.{extension}\""),
            ),
        ],
        body,
    )
}

/// Download the current plan as JSON, CSV, or a formatted report.
async fn export_routine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let plan = state.db.get_plan(&user.uid).await?.unwrap_or_default();
    Ok(render_export(
        &plan,
        params.format,
        "fitmint-workout-routine",
    ))
}

/// Download an empty plan in any export format, for filling in offline.
async fn export_template(Query(params): Query<ExportQuery>) -> impl IntoResponse {
    render_export(
        &export::template(),
        params.format,
        "fitmint-workout-template",
    )
}

#[derive(Deserialize)]
struct ImportQuery {
    #[serde(default = "default_policy")]
    policy: ImportPolicy,
}

fn default_policy() -> ImportPolicy {
    ImportPolicy::Merge
}

/// Import a JSON plan file, merging or overwriting the current plan.
///
/// A file that fails validation aborts the import before anything is
/// written.
async fn import_routine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ImportQuery>,
    body: String,
) -> Result<Json<RoutinePlan>> {
    let imported = export::from_json(&body)?;

    let current = state.db.get_plan(&user.uid).await?.unwrap_or_default();
    let merged = export::apply_import(&current, imported, params.policy);
    state.db.set_plan(&user.uid, &merged).await?;

    tracing::info!(uid = %user.uid, policy = ?params.policy, "Routine imported");
    Ok(Json(merged))
}

// ─── Today / Progress ────────────────────────────────────────

/// Today's schedule with completion state.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TodayResponse {
    /// Date key (`YYYY-MM-DD`)
    pub date: String,
    pub day: Weekday,
    pub exercises: Vec<Exercise>,
    pub note: String,
    pub completed: Vec<u32>,
    /// Completion percentage, 0-100
    pub percent: u32,
}

/// Get today's workout: the scheduled exercises plus the completion set.
async fn get_today(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TodayResponse>> {
    let today = time_utils::today();
    let day = time_utils::weekday_of(today);

    let plan = state.db.get_plan(&user.uid).await?.unwrap_or_default();
    let progress = state
        .db
        .get_progress(&user.uid, today)
        .await?
        .unwrap_or_default();

    let schedule = plan.day(day).clone();

    // Indices left behind by plan edits may point past the current list;
    // they stay in storage but do not count toward completion.
    let valid = progress
        .completed
        .iter()
        .filter(|&&index| (index as usize) < schedule.exercises.len())
        .count();
    let percent = if schedule.exercises.is_empty() {
        0
    } else {
        (valid * 100 / schedule.exercises.len()) as u32
    };

    Ok(Json(TodayResponse {
        date: time_utils::date_key(today),
        day,
        exercises: schedule.exercises,
        note: schedule.note,
        completed: progress.completed,
        percent,
    }))
}

fn parse_date(raw: &str) -> Result<chrono::NaiveDate> {
    time_utils::parse_date_key(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date key: {raw}")))
}

/// Get the completion set for a date. Absent document ⇒ empty set.
async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> Result<Json<DailyProgress>> {
    let date = parse_date(&date)?;
    let progress = state
        .db
        .get_progress(&user.uid, date)
        .await?
        .unwrap_or_default();
    Ok(Json(progress))
}

#[derive(Deserialize)]
struct ToggleRequest {
    index: u32,
}

/// Flip one exercise's completion for a date and persist the result.
///
/// Read-before-write: two sessions toggling the same date can lose one
/// update to the other. Each document has a single human owner, so this
/// stays a documented trade-off rather than a transaction.
async fn toggle_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(date): Path<String>,
    Json(body): Json<ToggleRequest>,
) -> Result<Json<DailyProgress>> {
    let date = parse_date(&date)?;

    let mut progress = state
        .db
        .get_progress(&user.uid, date)
        .await?
        .unwrap_or_default();
    progress.toggle(body.index);
    state.db.set_progress(&user.uid, date, &progress).await?;

    tracing::debug!(uid = %user.uid, date = %date, index = body.index, "Toggled completion");
    Ok(Json(progress))
}

// ─── Stats ───────────────────────────────────────────────────

/// Get progress statistics (streak, total completions, last active day).
///
/// Scans the user's full progress history; there is no server-side
/// aggregate to read.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProgressStats>> {
    let entries = state.db.list_progress(&user.uid).await?;
    let stats = ProgressStats::compute(
        entries
            .into_iter()
            .map(|(date, progress)| (date, progress.len())),
    );
    Ok(Json(stats))
}

// ─── Account Deletion ────────────────────────────────────────

/// Response for account deletion.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub message: String,
}

/// Delete the user's account and all associated data.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(uid = %user.uid, "User-initiated account deletion");

    let deleted = state.db.delete_user_data(&user.uid).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        message: format!("Account deleted ({deleted} documents removed)."),
    }))
}

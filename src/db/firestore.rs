// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage)
//! - Routine plans (one document per user)
//! - Daily progress (one document per user per date)
//! - Feedback (write-only submissions)
//!
//! All per-user data lives under `users/{uid}`; the owner's uid is the only
//! key, and no coordination is attempted between concurrent writers to the
//! same document (last write wins).

use chrono::NaiveDate;
use futures_util::{stream, StreamExt};
use serde::Deserialize;

use crate::db::collections;
use crate::error::AppError;
use crate::models::{DailyProgress, Feedback, RoutinePlan, User};
use crate::time_utils;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

/// Shape of a progress document as it comes back from a collection scan.
/// The date key is the document ID, surfaced via the `_firestore_id` alias.
#[derive(Debug, Deserialize)]
struct ProgressDocument {
    #[serde(alias = "_firestore_id", default)]
    date: String,
    #[serde(default)]
    completed: Vec<u32>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by uid.
    pub async fn get_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user profile.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.uid)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Routine Plan Operations ─────────────────────────────────

    /// Load a user's routine plan.
    ///
    /// An absent document is not an error; callers treat it as an empty
    /// 7-day plan.
    pub async fn get_plan(&self, uid: &str) -> Result<Option<RoutinePlan>, AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .select()
            .by_id_in(collections::ROUTINE)
            .parent(&parent_path)
            .obj()
            .one(collections::PLAN_DOC)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a user's routine plan (whole document, last writer wins).
    pub async fn set_plan(&self, uid: &str, plan: &RoutinePlan) -> Result<(), AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))?;

        let _: () = client
            .fluent()
            .update()
            .in_col(collections::ROUTINE)
            .document_id(collections::PLAN_DOC)
            .parent(&parent_path)
            .object(plan)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Progress Operations ─────────────────────────────────────

    /// Load the completion document for one date. Absent ⇒ empty set.
    pub async fn get_progress(
        &self,
        uid: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyProgress>, AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .select()
            .by_id_in(collections::PROGRESS)
            .parent(&parent_path)
            .obj()
            .one(time_utils::date_key(date))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store the completion document for one date (other dates untouched).
    pub async fn set_progress(
        &self,
        uid: &str,
        date: NaiveDate,
        progress: &DailyProgress,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))?;

        let _: () = client
            .fluent()
            .update()
            .in_col(collections::PROGRESS)
            .document_id(time_utils::date_key(date))
            .parent(&parent_path)
            .object(progress)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Scan the full progress history for a user.
    ///
    /// Documents whose ID is not a valid date key are skipped with a warning
    /// rather than failing the whole scan.
    pub async fn list_progress(
        &self,
        uid: &str,
    ) -> Result<Vec<(NaiveDate, DailyProgress)>, AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))?;

        let documents: Vec<ProgressDocument> = client
            .fluent()
            .select()
            .from(collections::PROGRESS)
            .parent(&parent_path)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut entries = Vec::with_capacity(documents.len());
        for document in documents {
            match time_utils::parse_date_key(&document.date) {
                Some(date) => entries.push((
                    date,
                    DailyProgress {
                        completed: document.completed,
                    },
                )),
                None => {
                    tracing::warn!(uid, doc_id = %document.date, "Skipping progress document with non-date ID");
                }
            }
        }

        Ok(entries)
    }

    // ─── Feedback Operations ─────────────────────────────────────

    /// Store a feedback submission with an auto-generated document ID.
    pub async fn add_feedback(&self, feedback: &Feedback) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::FEEDBACK)
            .generate_document_id()
            .object(feedback)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── User Data Deletion (GDPR) ───────────────────────────────

    /// Delete ALL data for a user: every progress document, the routine
    /// plan, and the profile.
    ///
    /// Progress deletions run concurrently with a bounded fan-out to avoid
    /// overloading Firestore. Returns the number of documents deleted.
    pub async fn delete_user_data(&self, uid: &str) -> Result<usize, AppError> {
        let client = self.get_client()?;
        let parent_path = client
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))?;

        // 1. Delete all progress documents
        let documents: Vec<ProgressDocument> = client
            .fluent()
            .select()
            .from(collections::PROGRESS)
            .parent(&parent_path)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let progress_count = documents.len();

        stream::iter(documents)
            .map(|document| {
                let parent_path = parent_path.clone();
                async move {
                    client
                        .fluent()
                        .delete()
                        .from(collections::PROGRESS)
                        .parent(&parent_path)
                        .document_id(&document.date)
                        .execute()
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))
                }
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        tracing::debug!(uid, count = progress_count, "Deleted progress documents");

        // 2. Delete the routine plan
        client
            .fluent()
            .delete()
            .from(collections::ROUTINE)
            .parent(&parent_path)
            .document_id(collections::PLAN_DOC)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        tracing::debug!(uid, "Deleted routine plan");

        // 3. Delete the user profile
        client
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(uid)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        tracing::debug!(uid, "Deleted user profile");

        let deleted_count = progress_count + 2;
        tracing::info!(uid, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }
}

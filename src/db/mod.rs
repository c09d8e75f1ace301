//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection and document names as constants.
pub mod collections {
    /// User profiles, keyed by uid
    pub const USERS: &str = "users";
    /// Per-user routine subcollection (`users/{uid}/routine`)
    pub const ROUTINE: &str = "routine";
    /// The single plan document inside the routine subcollection
    pub const PLAN_DOC: &str = "plan";
    /// Per-user progress subcollection, documents keyed by date
    pub const PROGRESS: &str = "progress";
    /// Write-only feedback submissions (auto-id)
    pub const FEEDBACK: &str = "feedback";
}

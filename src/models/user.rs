//! User model for storage and API.

use serde::{Deserialize, Serialize};

use crate::services::google_auth::GoogleIdentity;

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque user ID (also used as document ID)
    pub uid: String,
    /// Display name from the identity provider
    pub display_name: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// Profile picture URL
    pub photo_url: Option<String>,
    /// Preferred UI language code ("en", "hi", ...)
    #[serde(default = "default_language")]
    pub language: String,
    /// When the user first signed in (ISO 8601)
    pub created_at: String,
    /// Most recent sign-in (ISO 8601)
    pub last_login_at: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl User {
    /// Build a fresh profile from a verified sign-in.
    pub fn from_identity(identity: &GoogleIdentity, now: &str) -> Self {
        Self {
            uid: identity.sub.clone(),
            display_name: identity
                .name
                .clone()
                .unwrap_or_else(|| "User".to_string()),
            email: identity.email.clone(),
            photo_url: identity.picture.clone(),
            language: identity
                .locale
                .clone()
                .unwrap_or_else(default_language),
            created_at: now.to_string(),
            last_login_at: now.to_string(),
        }
    }

    /// Merge a repeat sign-in into an existing profile.
    ///
    /// Identity fields are refreshed from the provider; `language` and
    /// `created_at` are the user's own and survive unchanged.
    pub fn apply_identity(&mut self, identity: &GoogleIdentity, now: &str) {
        if let Some(name) = &identity.name {
            self.display_name = name.clone();
        }
        if identity.email.is_some() {
            self.email = identity.email.clone();
        }
        if identity.picture.is_some() {
            self.photo_url = identity.picture.clone();
        }
        self.last_login_at = now.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> GoogleIdentity {
        GoogleIdentity {
            sub: "uid-123".to_string(),
            email: Some("jo@example.com".to_string()),
            name: Some("Jo Lifter".to_string()),
            picture: Some("https://lh3.googleusercontent.com/photo".to_string()),
            locale: Some("hi".to_string()),
        }
    }

    #[test]
    fn test_first_sign_in_creates_profile() {
        let user = User::from_identity(&identity(), "2024-01-01T00:00:00Z");
        assert_eq!(user.uid, "uid-123");
        assert_eq!(user.display_name, "Jo Lifter");
        assert_eq!(user.language, "hi");
        assert_eq!(user.created_at, user.last_login_at);
    }

    #[test]
    fn test_repeat_sign_in_preserves_language_and_created_at() {
        let mut user = User::from_identity(&identity(), "2024-01-01T00:00:00Z");
        user.language = "fr".to_string();

        let mut updated = identity();
        updated.name = Some("Jo L.".to_string());
        updated.locale = Some("en".to_string());
        user.apply_identity(&updated, "2024-02-01T00:00:00Z");

        assert_eq!(user.display_name, "Jo L.");
        assert_eq!(user.language, "fr");
        assert_eq!(user.created_at, "2024-01-01T00:00:00Z");
        assert_eq!(user.last_login_at, "2024-02-01T00:00:00Z");
    }

    #[test]
    fn test_missing_identity_fields_keep_existing_values() {
        let mut user = User::from_identity(&identity(), "2024-01-01T00:00:00Z");
        let bare = GoogleIdentity {
            sub: "uid-123".to_string(),
            email: None,
            name: None,
            picture: None,
            locale: None,
        };
        user.apply_identity(&bare, "2024-02-01T00:00:00Z");

        assert_eq!(user.display_name, "Jo Lifter");
        assert_eq!(user.email.as_deref(), Some("jo@example.com"));
    }
}

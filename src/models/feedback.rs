//! Feedback submission model.
//!
//! Feedback documents are write-only from the application's point of view;
//! nothing in the API reads them back.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A feedback document stored in the top-level `feedback` collection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Feedback {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    /// Server-side submission timestamp (ISO 8601)
    #[serde(default)]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_validation() {
        let feedback = Feedback {
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            message: "Love the streak counter".to_string(),
            created_at: String::new(),
        };
        assert!(feedback.validate().is_ok());

        let bad_email = Feedback {
            email: "not-an-email".to_string(),
            ..feedback.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_message = Feedback {
            message: String::new(),
            ..feedback
        };
        assert!(empty_message.validate().is_err());
    }
}

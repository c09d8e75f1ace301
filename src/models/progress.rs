// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Daily completion record for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Per-date completion document, stored at `users/{uid}/progress/{YYYY-MM-DD}`.
///
/// `completed` holds positions into that weekday's exercise list as it stood
/// when each box was checked. Editing the plan afterwards can leave entries
/// stale or out of range; they are kept as written and skipped by readers
/// that need a valid position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyProgress {
    #[serde(default)]
    pub completed: Vec<u32>,
}

impl DailyProgress {
    /// Flip membership of `index` in the completed set.
    pub fn toggle(&mut self, index: u32) {
        if let Some(pos) = self.completed.iter().position(|&i| i == index) {
            self.completed.remove(pos);
        } else {
            self.completed.push(index);
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        self.completed.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_an_involution() {
        let mut progress = DailyProgress {
            completed: vec![0, 2],
        };
        let original = progress.clone();

        progress.toggle(1);
        assert!(progress.contains(1));
        progress.toggle(1);
        assert_eq!(progress, original);

        progress.toggle(0);
        assert!(!progress.contains(0));
        progress.toggle(0);
        assert_eq!(progress.completed, vec![2, 0]);
    }

    #[test]
    fn test_absent_document_reads_as_empty_set() {
        let progress: DailyProgress = serde_json::from_str("{}").unwrap();
        assert!(progress.is_empty());
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Progress statistics derived from the full completion history.
//!
//! There is no server-side aggregation; the caller scans the user's progress
//! collection and feeds every (date, completed-count) pair through
//! [`ProgressStats::compute`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Aggregate statistics over all active days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressStats {
    /// Consecutive calendar days with activity, ending at `last`
    pub streak: u32,
    /// Total completed exercises across all days
    pub total: u32,
    /// Most recent active date
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last: Option<NaiveDate>,
}

impl ProgressStats {
    /// Aggregate (date, completed-count) pairs into streak/total/last.
    ///
    /// Days with zero completions do not count as active and break a streak.
    /// The walk subtracts calendar days, so it crosses month and year
    /// boundaries correctly.
    pub fn compute<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, usize)>,
    {
        let mut days: Vec<NaiveDate> = Vec::new();
        let mut total: usize = 0;

        for (date, count) in entries {
            if count > 0 {
                days.push(date);
                total += count;
            }
        }

        // Most recent first; duplicate dates collapse to one active day
        days.sort_unstable_by(|a, b| b.cmp(a));
        days.dedup();

        let last = days.first().copied();

        let mut streak = 0u32;
        if let Some(first) = last {
            let mut expected = first;
            for &day in &days {
                if day != expected {
                    break;
                }
                streak += 1;
                match expected.pred_opt() {
                    Some(previous) => expected = previous,
                    None => break,
                }
            }
        }

        Self {
            streak,
            total: total as u32,
            last,
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Data models for the application.

pub mod feedback;
pub mod progress;
pub mod routine;
pub mod stats;
pub mod user;

pub use feedback::Feedback;
pub use progress::DailyProgress;
pub use routine::{DaySchedule, Exercise, RoutinePlan, Weekday};
pub use stats::ProgressStats;
pub use user::User;

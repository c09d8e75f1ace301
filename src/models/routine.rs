// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Weekly routine plan model for storage and API.
//!
//! The plan document maps the seven weekday names to a day schedule. Stored
//! documents may predate a full write and miss some day keys; those days
//! deserialize as empty schedules, and every write puts all seven keys back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Days of the week, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in calendar order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = ();

    /// Case-insensitive parse of a weekday name ("Monday", "monday", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// A single exercise entry in a day's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    #[validate(length(min = 1, max = 200), custom(function = non_blank))]
    pub name: String,
    #[validate(range(min = 1, max = 1000))]
    pub sets: u32,
    #[validate(range(min = 1, max = 10000))]
    pub reps: u32,
}

fn non_blank(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message("must not be blank".into()));
    }
    Ok(())
}

/// One day of the weekly plan: the exercise list and a free-text note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DaySchedule {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub note: String,
}

impl DaySchedule {
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty() && self.note.is_empty()
    }
}

/// The per-user weekly routine plan document.
///
/// Stored at `users/{uid}/routine/plan`, keyed by weekday name. The struct
/// fields keep the document honest: a serialized plan always carries all
/// seven days, and a partial stored document reads back with empty defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RoutinePlan {
    #[serde(rename = "Monday", default)]
    pub monday: DaySchedule,
    #[serde(rename = "Tuesday", default)]
    pub tuesday: DaySchedule,
    #[serde(rename = "Wednesday", default)]
    pub wednesday: DaySchedule,
    #[serde(rename = "Thursday", default)]
    pub thursday: DaySchedule,
    #[serde(rename = "Friday", default)]
    pub friday: DaySchedule,
    #[serde(rename = "Saturday", default)]
    pub saturday: DaySchedule,
    #[serde(rename = "Sunday", default)]
    pub sunday: DaySchedule,
}

impl RoutinePlan {
    pub fn day(&self, day: Weekday) -> &DaySchedule {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DaySchedule {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    /// Iterate over the days in calendar order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        Weekday::ALL.into_iter().map(move |day| (day, self.day(day)))
    }

    /// Append an exercise to a day's schedule.
    pub fn add_exercise(&mut self, day: Weekday, exercise: Exercise) {
        self.day_mut(day).exercises.push(exercise);
    }

    /// Replace the exercise at `index`. Returns `false` if out of range.
    pub fn update_exercise(&mut self, day: Weekday, index: usize, exercise: Exercise) -> bool {
        match self.day_mut(day).exercises.get_mut(index) {
            Some(slot) => {
                *slot = exercise;
                true
            }
            None => false,
        }
    }

    /// Remove and return the exercise at `index`, if present.
    pub fn remove_exercise(&mut self, day: Weekday, index: usize) -> Option<Exercise> {
        let exercises = &mut self.day_mut(day).exercises;
        if index < exercises.len() {
            Some(exercises.remove(index))
        } else {
            None
        }
    }

    /// Overwrite a day's note.
    pub fn set_note(&mut self, day: Weekday, note: impl Into<String>) {
        self.day_mut(day).note = note.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(name: &str, sets: u32, reps: u32) -> Exercise {
        Exercise {
            name: name.to_string(),
            sets,
            reps,
        }
    }

    #[test]
    fn test_weekday_parse() {
        assert_eq!("Monday".parse(), Ok(Weekday::Monday));
        assert_eq!("sunday".parse(), Ok(Weekday::Sunday));
        assert_eq!("WEDNESDAY".parse(), Ok(Weekday::Wednesday));
        assert!("Funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_missing_days_read_as_empty() {
        // A document written before the plan was ever saved in full
        let partial = r#"{"Monday":{"exercises":[{"name":"Squats","sets":4,"reps":8}],"note":"leg day"}}"#;
        let plan: RoutinePlan = serde_json::from_str(partial).unwrap();

        assert_eq!(plan.monday.exercises.len(), 1);
        assert_eq!(plan.monday.note, "leg day");
        for day in [
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ] {
            assert_eq!(plan.day(day), &DaySchedule::default());
        }
    }

    #[test]
    fn test_serialized_plan_has_all_seven_days() {
        let plan = RoutinePlan::default();
        let value = serde_json::to_value(&plan).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 7);
        for day in Weekday::ALL {
            assert!(object.contains_key(day.as_str()), "missing {day}");
        }
        // Field order gives calendar order in the dump
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys[0], "Monday");
        assert_eq!(keys[6], "Sunday");
    }

    #[test]
    fn test_exercise_mutations() {
        let mut plan = RoutinePlan::default();
        plan.add_exercise(Weekday::Monday, exercise("Bench Press", 3, 10));
        plan.add_exercise(Weekday::Monday, exercise("Squats", 4, 8));

        assert!(plan.update_exercise(Weekday::Monday, 1, exercise("Front Squats", 4, 8)));
        assert_eq!(plan.monday.exercises[1].name, "Front Squats");
        assert!(!plan.update_exercise(Weekday::Monday, 2, exercise("Nope", 1, 1)));

        let removed = plan.remove_exercise(Weekday::Monday, 0).unwrap();
        assert_eq!(removed.name, "Bench Press");
        assert_eq!(plan.monday.exercises.len(), 1);
        assert!(plan.remove_exercise(Weekday::Tuesday, 0).is_none());
    }

    #[test]
    fn test_exercise_validation() {
        assert!(exercise("Push Ups", 3, 12).validate().is_ok());
        assert!(exercise("", 3, 12).validate().is_err());
        assert!(exercise("   ", 3, 12).validate().is_err());
        assert!(exercise("Push Ups", 0, 12).validate().is_err());
        assert!(exercise("Push Ups", 3, 0).validate().is_err());
    }
}

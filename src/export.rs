// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Export and import of the weekly routine plan.
//!
//! Exports are pure transforms of a [`RoutinePlan`]: JSON (the interchange
//! format, round-trips exactly), CSV (one row per exercise, empty days still
//! emit a blank-exercise row), and a human-readable report grouped by day.
//! Only JSON can be imported back.

use std::fmt::Write as _;

use validator::Validate;

use crate::error::AppError;
use crate::models::routine::{RoutinePlan, Weekday};

/// CSV header row for plan exports.
pub const CSV_HEADER: &str = "Day,Exercise,Sets,Reps,Note";

/// How an imported plan is combined with the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPolicy {
    /// Imported plan fully replaces the current plan.
    Overwrite,
    /// Per-day union of exercise lists, notes concatenated.
    Merge,
}

/// An empty 7-day plan, offered for download as an import template.
pub fn template() -> RoutinePlan {
    RoutinePlan::default()
}

/// Serialize a plan to pretty-printed interchange JSON.
pub fn to_json(plan: &RoutinePlan) -> String {
    // RoutinePlan serialization is infallible: string keys, no non-string maps
    serde_json::to_string_pretty(plan).unwrap_or_default()
}

/// Parse and validate an uploaded JSON plan.
///
/// All seven weekday keys must be present, each with an `exercises` array and
/// a string `note`; every exercise must carry a non-blank name and positive
/// sets/reps. Anything else is a validation error surfaced to the caller, and
/// nothing is written.
pub fn from_json(text: &str) -> Result<RoutinePlan, AppError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| AppError::Validation(format!("not valid JSON: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| AppError::Validation("plan must be a JSON object".to_string()))?;

    for day in Weekday::ALL {
        let entry = object.get(day.as_str()).ok_or_else(|| {
            AppError::Validation(format!("missing day: {day}"))
        })?;
        let entry = entry
            .as_object()
            .ok_or_else(|| AppError::Validation(format!("{day} must be an object")))?;

        if !entry.get("exercises").is_some_and(serde_json::Value::is_array) {
            return Err(AppError::Validation(format!(
                "{day} must have an exercises array"
            )));
        }
        if !entry.get("note").is_some_and(serde_json::Value::is_string) {
            return Err(AppError::Validation(format!("{day} must have a note string")));
        }
    }

    let plan: RoutinePlan = serde_json::from_value(value)
        .map_err(|e| AppError::Validation(format!("malformed exercise entry: {e}")))?;

    for (day, schedule) in plan.days() {
        for exercise in &schedule.exercises {
            exercise.validate().map_err(|e| {
                AppError::Validation(format!("invalid exercise on {day}: {e}"))
            })?;
        }
    }

    Ok(plan)
}

/// Combine an imported plan with the current one under the given policy.
///
/// Merge unions each day's exercise list, skipping exact `(name, sets, reps)`
/// duplicates, and joins differing non-empty notes with a newline. Either
/// policy produces a single plan for one full write-back.
pub fn apply_import(
    current: &RoutinePlan,
    imported: RoutinePlan,
    policy: ImportPolicy,
) -> RoutinePlan {
    match policy {
        ImportPolicy::Overwrite => imported,
        ImportPolicy::Merge => {
            let mut merged = current.clone();
            for day in Weekday::ALL {
                let incoming = imported.day(day);
                let target = merged.day_mut(day);

                for exercise in &incoming.exercises {
                    if !target.exercises.contains(exercise) {
                        target.exercises.push(exercise.clone());
                    }
                }

                if !incoming.note.is_empty() && incoming.note != target.note {
                    if target.note.is_empty() {
                        target.note = incoming.note.clone();
                    } else {
                        target.note.push('\n');
                        target.note.push_str(&incoming.note);
                    }
                }
            }
            merged
        }
    }
}

/// Render a plan as CSV.
///
/// One row per exercise; a day with no exercises still contributes one row
/// with blank exercise fields so its note survives the export. Newlines in
/// notes are flattened to spaces.
pub fn to_csv(plan: &RoutinePlan) -> String {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for (day, schedule) in plan.days() {
        let note = csv_field(&schedule.note.replace('\n', " "));
        if schedule.exercises.is_empty() {
            let _ = writeln!(csv, "{day},,,,{note}");
        } else {
            for exercise in &schedule.exercises {
                let _ = writeln!(
                    csv,
                    "{day},{},{},{},{note}",
                    csv_field(&exercise.name),
                    exercise.sets,
                    exercise.reps,
                );
            }
        }
    }

    csv
}

/// Quote a CSV field when it contains a delimiter or quote.
fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Render a plan as a human-readable report, grouped by day.
///
/// Not meant for re-import; the layout mirrors the printable document the
/// web client produces.
pub fn to_report(plan: &RoutinePlan) -> String {
    const TITLE: &str = "Fitmint Workout Routine";

    let name_width = plan
        .days()
        .flat_map(|(_, schedule)| schedule.exercises.iter())
        .map(|exercise| exercise.name.len())
        .max()
        .unwrap_or(0)
        .max("Exercise".len());

    let mut report = String::new();
    let _ = writeln!(report, "{TITLE}");
    let _ = writeln!(report, "{}", "=".repeat(TITLE.len()));

    for (day, schedule) in plan.days() {
        let _ = writeln!(report);
        let _ = writeln!(report, "{day}");
        let _ = writeln!(report, "{}", "-".repeat(day.as_str().len()));

        if schedule.exercises.is_empty() {
            let _ = writeln!(report, "  - No exercises");
        } else {
            let _ = writeln!(report, "  {:<name_width$}  Sets  Reps", "Exercise");
            for exercise in &schedule.exercises {
                let _ = writeln!(
                    report,
                    "  {:<name_width$}  {:>4}  {:>4}",
                    exercise.name, exercise.sets, exercise.reps,
                );
            }
        }

        if !schedule.note.is_empty() {
            let _ = writeln!(report, "  Note: {}", schedule.note.replace('\n', "\n        "));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::routine::Exercise;

    fn exercise(name: &str, sets: u32, reps: u32) -> Exercise {
        Exercise {
            name: name.to_string(),
            sets,
            reps,
        }
    }

    fn monday_plan() -> RoutinePlan {
        let mut plan = RoutinePlan::default();
        plan.add_exercise(Weekday::Monday, exercise("Bench Press", 3, 10));
        plan.add_exercise(Weekday::Monday, exercise("Squats", 4, 8));
        plan.set_note(Weekday::Monday, "go heavy");
        plan
    }

    #[test]
    fn test_json_round_trip() {
        let plan = monday_plan();
        let restored = from_json(&to_json(&plan)).unwrap();
        assert_eq!(restored, plan);
    }

    #[test]
    fn test_template_round_trips_and_is_empty() {
        let restored = from_json(&to_json(&template())).unwrap();
        assert_eq!(restored, RoutinePlan::default());
    }

    #[test]
    fn test_import_rejects_missing_day() {
        let mut value = serde_json::to_value(template()).unwrap();
        value.as_object_mut().unwrap().remove("Thursday");

        let err = from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("Thursday"));
    }

    #[test]
    fn test_import_rejects_wrong_shapes() {
        assert!(from_json("[]").is_err());
        assert!(from_json("not json at all").is_err());

        let mut value = serde_json::to_value(template()).unwrap();
        value["Friday"]["exercises"] = serde_json::json!("push ups");
        assert!(from_json(&value.to_string()).is_err());

        let mut value = serde_json::to_value(template()).unwrap();
        value["Friday"]["note"] = serde_json::json!(42);
        assert!(from_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_import_rejects_invalid_exercise() {
        let mut value = serde_json::to_value(template()).unwrap();
        value["Monday"]["exercises"] =
            serde_json::json!([{"name": "Rows", "sets": 0, "reps": 10}]);
        let err = from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("Monday"));
    }

    #[test]
    fn test_csv_emits_one_blank_row_per_empty_day() {
        let csv = to_csv(&monday_plan());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        // 2 rows for Monday + 1 blank row for each of the other 6 days
        assert_eq!(lines.len(), 1 + 8);
        assert_eq!(lines[1], "Monday,Bench Press,3,10,go heavy");
        assert_eq!(lines[2], "Monday,Squats,4,8,go heavy");
        assert_eq!(lines[3], "Tuesday,,,,");
        assert_eq!(lines[8], "Sunday,,,,");
    }

    #[test]
    fn test_csv_flattens_and_quotes_notes() {
        let mut plan = RoutinePlan::default();
        plan.set_note(Weekday::Tuesday, "warm up,\nthen stretch");

        let csv = to_csv(&plan);
        let tuesday = csv.lines().nth(2).unwrap();
        assert_eq!(tuesday, "Tuesday,,,,\"warm up, then stretch\"");
    }

    #[test]
    fn test_merge_deduplicates_exact_triples() {
        let current = monday_plan();
        let mut imported = RoutinePlan::default();
        imported.add_exercise(Weekday::Monday, exercise("Squats", 4, 8)); // duplicate
        imported.add_exercise(Weekday::Monday, exercise("Squats", 5, 8)); // differs on sets
        imported.add_exercise(Weekday::Tuesday, exercise("Deadlifts", 3, 6));

        let merged = apply_import(&current, imported, ImportPolicy::Merge);

        let names: Vec<&str> = merged
            .monday
            .exercises
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bench Press", "Squats", "Squats"]);
        assert_eq!(merged.monday.exercises[2].sets, 5);
        assert_eq!(merged.tuesday.exercises.len(), 1);
    }

    #[test]
    fn test_merge_concatenates_differing_notes() {
        let current = monday_plan();
        let mut imported = RoutinePlan::default();
        imported.set_note(Weekday::Monday, "deload week");
        imported.set_note(Weekday::Tuesday, "rest");

        let merged = apply_import(&current, imported, ImportPolicy::Merge);

        assert_eq!(merged.monday.note, "go heavy\ndeload week");
        // Empty current note takes the imported note without a separator
        assert_eq!(merged.tuesday.note, "rest");
    }

    #[test]
    fn test_merge_keeps_identical_note_once() {
        let current = monday_plan();
        let mut imported = RoutinePlan::default();
        imported.set_note(Weekday::Monday, "go heavy");

        let merged = apply_import(&current, imported, ImportPolicy::Merge);
        assert_eq!(merged.monday.note, "go heavy");
    }

    #[test]
    fn test_overwrite_replaces_plan() {
        let current = monday_plan();
        let mut imported = RoutinePlan::default();
        imported.add_exercise(Weekday::Sunday, exercise("Yoga", 1, 1));

        let replaced = apply_import(&current, imported.clone(), ImportPolicy::Overwrite);
        assert_eq!(replaced, imported);
    }

    #[test]
    fn test_report_groups_by_day() {
        let report = to_report(&monday_plan());

        assert!(report.starts_with("Fitmint Workout Routine"));
        assert!(report.contains("Monday"));
        assert!(report.contains("Bench Press"));
        assert!(report.contains("Note: go heavy"));
        assert!(report.contains("- No exercises"));
    }
}

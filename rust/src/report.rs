//! Plain-text rendering of schedules.

use std::collections::BTreeMap;

use crate::models::{minutes_to_time, Interview, MINUTES_PER_DAY};

const RULE_WIDTH: usize = 52;

/// Render minutes from midnight as a 12-hour clock time, e.g. `9:00 AM`.
///
/// The end of the day (1440) renders as `12:00 PM`.
pub fn format_minutes(minutes: i32) -> String {
    if minutes == MINUTES_PER_DAY {
        return "12:00 PM".to_string();
    }
    match minutes_to_time(minutes) {
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => format!("{} min", minutes),
    }
}

/// Table of one candidate's interviews. Rows appear in the order given.
pub fn format_student_schedule(student_id: &str, interviews: &[Interview]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} Schedule:\n", student_id));
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{:>12}{:>8}{:>12}{:>12}{:>8}\n",
        "Company", "Round", "Start", "End", "Panel"
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for interview in interviews {
        out.push_str(&format!(
            "{:>12}{:>8}{:>12}{:>12}{:>8}\n",
            interview.organization,
            interview.round,
            format_minutes(interview.interval.start),
            format_minutes(interview.interval.end),
            interview.panel + 1
        ));
    }
    out
}

/// Tables for every candidate with interviews, in candidate id order, each
/// sorted by start time.
pub fn format_complete_schedule(interviews: &[Interview]) -> String {
    let mut by_student: BTreeMap<&str, Vec<Interview>> = BTreeMap::new();
    for interview in interviews {
        by_student
            .entry(interview.student_id.as_str())
            .or_default()
            .push(interview.clone());
    }

    by_student
        .into_iter()
        .map(|(student_id, mut rows)| {
            rows.sort_by_key(|row| row.interval.start);
            format_student_schedule(student_id, &rows)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeInterval;

    fn interview(student: &str, org: &str, round: i32, start: i32, end: i32) -> Interview {
        Interview {
            student_id: student.into(),
            organization: org.into(),
            round,
            interval: TimeInterval::new(start, end),
            panel: 0,
        }
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(540), "9:00 AM");
        assert_eq!(format_minutes(750), "12:30 PM");
        assert_eq!(format_minutes(1020), "5:00 PM");
        assert_eq!(format_minutes(15), "12:15 AM");
        assert_eq!(format_minutes(0), "12:00 AM");
    }

    #[test]
    fn test_end_of_day_renders_as_noon_text() {
        assert_eq!(format_minutes(1440), "12:00 PM");
        assert_eq!(format_minutes(1425), "11:45 PM");

        let text = format_student_schedule("s1", &[interview("s1", "Late", 1, 1410, 1440)]);
        let row = text.lines().nth(4).unwrap();
        assert!(row.contains("11:30 PM"));
        assert!(row.contains("12:00 PM"));
    }

    #[test]
    fn test_student_table_uses_one_based_panels() {
        let text = format_student_schedule("s1", &[interview("s1", "Acme", 1, 540, 570)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "s1 Schedule:");
        assert_eq!(lines.len(), 5);
        assert!(lines[4].contains("Acme"));
        assert!(lines[4].contains("9:00 AM"));
        assert!(lines[4].contains("9:30 AM"));
        assert!(lines[4].trim_end().ends_with('1'));
    }

    #[test]
    fn test_complete_schedule_groups_and_sorts() {
        let text = format_complete_schedule(&[
            interview("s2", "Acme", 1, 600, 630),
            interview("s1", "Globex", 1, 630, 660),
            interview("s1", "Acme", 1, 540, 570),
        ]);
        let s1 = text.find("s1 Schedule:").unwrap();
        let s2 = text.find("s2 Schedule:").unwrap();
        assert!(s1 < s2);

        let acme = text.find("9:00 AM").unwrap();
        let globex = text.find("10:30 AM").unwrap();
        assert!(acme < globex);
    }

    #[test]
    fn test_empty_schedule_renders_nothing() {
        assert_eq!(format_complete_schedule(&[]), "");
    }
}

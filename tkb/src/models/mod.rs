// Core data structures shared by the parser, the conflict detector and the planner.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of teaching periods in a day.
pub const PERIODS_PER_DAY: u8 = 12;

/// Teaching days, Monday to Saturday. There is no Sunday slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Column index in the weekly grid (0 = Monday).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Token used by the course sheet ("T.Hai" .. "T.Bảy").
    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "T.Hai",
            Day::Tuesday => "T.Ba",
            Day::Wednesday => "T.Tư",
            Day::Thursday => "T.Năm",
            Day::Friday => "T.Sáu",
            Day::Saturday => "T.Bảy",
        }
    }

    pub fn from_label(label: &str) -> Option<Day> {
        Day::ALL.into_iter().find(|d| d.label() == label)
    }
}

/// A recurring weekly block: one day, an inclusive range of periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub day: Day,
    pub start_period: u8,
    pub end_period: u8,
}

impl Interval {
    /// Builds an interval, rejecting empty or out-of-day period ranges.
    pub fn new(day: Day, start_period: u8, end_period: u8) -> Option<Interval> {
        if start_period == 0 || start_period > end_period || end_period > PERIODS_PER_DAY {
            return None;
        }
        Some(Interval { day, start_period, end_period })
    }

    pub fn period_count(&self) -> u8 {
        self.end_period - self.start_period + 1
    }

    /// Same day and intersecting period ranges.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.day == other.day
            && self.start_period <= other.end_period
            && other.start_period <= self.end_period
    }
}

/// Row fields after normalization, before the schedule strings are parsed.
/// Both the tabular and the structured ingestion paths converge here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRow {
    pub course_code: String,
    pub sequence: String,
    pub title: String,
    pub capacity: u32,
    pub enrolled: u32,
    pub instructor: String,
    pub schedule: String,
    pub weeks: String,
}

/// One offered class instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSection {
    pub id: String,
    pub course_code: String,
    pub sequence: String,
    pub title: String,
    pub instructor: String,
    pub capacity: u32,
    pub enrolled: u32,
    pub raw_schedule: String,
    pub raw_weeks: String,
    pub time_slot: Option<Interval>,
    pub weeks: BTreeSet<u32>,
}

impl CourseSection {
    pub fn from_row(id: String, row: SectionRow) -> CourseSection {
        let time_slot = crate::algorithm::parse_schedule(&row.schedule);
        let weeks = crate::algorithm::parse_weeks(&row.weeks);
        CourseSection {
            id,
            course_code: row.course_code,
            sequence: row.sequence,
            title: row.title,
            instructor: row.instructor,
            capacity: row.capacity,
            enrolled: row.enrolled,
            raw_schedule: row.schedule,
            raw_weeks: row.weeks,
            time_slot,
            weeks,
        }
    }

    pub fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }
}

/// Stable section identifier: `{code}-{sequence or fallback}-{index}`.
/// The row index disambiguates a code offered several times.
pub fn section_id(course_code: &str, sequence: &str, index: usize) -> String {
    if sequence.is_empty() {
        format!("{}-{}-{}", course_code, index, index)
    } else {
        format!("{}-{}-{}", course_code, sequence, index)
    }
}

/// Result of a toggle on the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// Added; carries the title of the first selected section it collides with.
    Added { conflict_with: Option<String> },
    Removed,
    RejectedFull,
    NotFound,
}

/// Listing status of a section relative to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Selected,
    Full,
    Conflict,
    Available,
}

/// Listing tab applied after the text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Available,
    Selected,
}

/// Section as shown in a listing, with its status and display color.
#[derive(Debug, Clone, Serialize)]
pub struct CourseListing {
    pub id: String,
    pub course_code: String,
    pub title: String,
    pub instructor: String,
    pub schedule: String,
    pub weeks: String,
    pub enrolled: u32,
    pub capacity: u32,
    pub status: CourseStatus,
    pub color: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_rejects_bad_ranges() {
        assert!(Interval::new(Day::Monday, 0, 2).is_none());
        assert!(Interval::new(Day::Monday, 4, 3).is_none());
        assert!(Interval::new(Day::Monday, 11, 13).is_none());
        assert_eq!(Interval::new(Day::Monday, 3, 3).map(|i| i.period_count()), Some(1));
    }

    #[test]
    fn day_labels_round_trip() {
        for d in Day::ALL {
            assert_eq!(Day::from_label(d.label()), Some(d));
        }
        assert_eq!(Day::from_label("T.CN"), None);
        assert_eq!(Day::Saturday.index(), 5);
    }

    #[test]
    fn section_id_falls_back_to_index() {
        assert_eq!(section_id("1001", "2", 7), "1001-2-7");
        assert_eq!(section_id("1001", "", 7), "1001-7-7");
    }

    #[test]
    fn full_when_enrolled_reaches_capacity() {
        let row = SectionRow { capacity: 40, enrolled: 40, ..Default::default() };
        assert!(CourseSection::from_row("x".into(), row).is_full());
        let row = SectionRow { capacity: 40, enrolled: 12, ..Default::default() };
        assert!(!CourseSection::from_row("y".into(), row).is_full());
    }
}

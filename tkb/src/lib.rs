// Root of the `tkb` crate: course timetable planning.
// Parses the published course sheet, detects schedule conflicts and keeps
// the student's selection in a key-value snapshot.
pub mod algorithm;
pub mod catalog;
pub mod colors;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod planner;
pub mod server;
pub mod storage;

pub use algorithm::{any_selection_conflict, conflicts_for, overlaps, parse_schedule, parse_weeks};
pub use catalog::{load_catalog, Catalog, CatalogSource};
pub use colors::ColorAssignment;
pub use error::{CatalogError, StoreError};
pub use models::{CourseSection, Day, Interval, ToggleOutcome};
pub use planner::Planner;

/// Runs the HTTP server (re-exported for `main`).
pub use server::run_server;

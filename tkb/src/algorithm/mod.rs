// Pure scheduling logic: string parsing, conflict tests, listing filters and
// the weekly grid. Nothing here touches I/O.
pub mod conflict;
pub mod filters;
pub mod grid;
pub mod slots;

pub use conflict::{any_selection_conflict, conflicting_pairs, conflicts_for, overlaps};
pub use filters::{apply_status_filter, course_status, search};
pub use grid::{layout, GridBlock, GridRow, TimetableGrid};
pub use slots::{leading_int, parse_schedule, parse_weeks, UNSCHEDULED};

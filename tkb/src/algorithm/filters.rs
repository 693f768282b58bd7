/// Listing filters: free-text search followed by a status tab.
///
/// Both steps keep the catalog order of the sections they receive.
use crate::models::{CourseSection, CourseStatus, StatusFilter};

/// Case-insensitive substring search over title and instructor.
/// A blank query keeps every section.
pub fn search<'a, I>(sections: I, query: &str) -> Vec<&'a CourseSection>
where
    I: IntoIterator<Item = &'a CourseSection>,
{
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return sections.into_iter().collect();
    }
    sections
        .into_iter()
        .filter(|s| s.title.to_lowercase().contains(&q) || s.instructor.to_lowercase().contains(&q))
        .collect()
}

/// Applies the status tab. `is_selected` tells whether a section is in the selection.
pub fn apply_status_filter<'a, F>(
    sections: Vec<&'a CourseSection>,
    filter: StatusFilter,
    is_selected: F,
) -> Vec<&'a CourseSection>
where
    F: Fn(&CourseSection) -> bool,
{
    match filter {
        StatusFilter::All => sections,
        StatusFilter::Available => sections.into_iter().filter(|s| !s.is_full()).collect(),
        StatusFilter::Selected => sections.into_iter().filter(|s| is_selected(*s)).collect(),
    }
}

/// Status shown next to a section. A selected section is reported as
/// selected even when it collides with another selected one.
pub fn course_status(section: &CourseSection, selected: bool, has_conflict: bool) -> CourseStatus {
    if selected {
        CourseStatus::Selected
    } else if section.is_full() {
        CourseStatus::Full
    } else if has_conflict {
        CourseStatus::Conflict
    } else {
        CourseStatus::Available
    }
}

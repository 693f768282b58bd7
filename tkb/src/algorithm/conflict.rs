// Overlap tests between sections: same day, intersecting periods and at least
// one shared week.
use crate::models::CourseSection;

/// True when both sections meet at the same time in at least one common week.
/// Sections without a time slot never conflict.
pub fn overlaps(a: &CourseSection, b: &CourseSection) -> bool {
    let (Some(s1), Some(s2)) = (a.time_slot.as_ref(), b.time_slot.as_ref()) else {
        return false;
    };
    if !s1.overlaps(s2) {
        return false;
    }
    !a.weeks.is_disjoint(&b.weeks)
}

/// Every member of `pool` (other than `target` itself) that overlaps `target`,
/// in pool order.
pub fn conflicts_for<'a, I>(target: &CourseSection, pool: I) -> Vec<&'a CourseSection>
where
    I: IntoIterator<Item = &'a CourseSection>,
{
    pool.into_iter()
        .filter(|s| s.id != target.id && overlaps(target, s))
        .collect()
}

/// True if any unordered pair of the selection overlaps.
pub fn any_selection_conflict<'a, I>(selection: I) -> bool
where
    I: IntoIterator<Item = &'a CourseSection>,
{
    let items: Vec<&CourseSection> = selection.into_iter().collect();
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if overlaps(items[i], items[j]) {
                return true;
            }
        }
    }
    false
}

/// All overlapping pairs of the selection as `(id, id)`, in selection order.
pub fn conflicting_pairs<'a, I>(selection: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = &'a CourseSection>,
{
    let items: Vec<&CourseSection> = selection.into_iter().collect();
    let mut out = Vec::new();
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if overlaps(items[i], items[j]) {
                out.push((items[i].id.clone(), items[j].id.clone()));
            }
        }
    }
    out
}

//! Selection Set Manager.
//!
//! `Planner` owns the session state: the catalog, the chosen sections, the
//! snapshot store and the color map. All mutations go through `toggle` and
//! `clear`, which write the snapshot before touching memory so the two never
//! diverge once a call returns.
//!
//! Conflicting sections are allowed into the selection; the caller gets the
//! title of the first collision back as a warning. Full sections are refused.

use crate::algorithm::{self, TimetableGrid};
use crate::catalog::Catalog;
use crate::colors::ColorAssignment;
use crate::error::StoreError;
use crate::export::export_text;
use crate::models::{CourseListing, CourseSection, StatusFilter, ToggleOutcome};
use crate::storage::{self, StorageBackend};
use tracing::{debug, info};

pub struct Planner {
    catalog: Catalog,
    /// Catalog positions of the selected sections, in selection order.
    selected: Vec<usize>,
    store: Box<dyn StorageBackend + Send>,
    colors: ColorAssignment,
}

impl Planner {
    /// Start a session, restoring the saved selection. Saved ids missing
    /// from the catalog are dropped; the rest come back in catalog order.
    pub fn open(catalog: Catalog, store: Box<dyn StorageBackend + Send>) -> Planner {
        let saved = storage::load_selection(&*store);
        let selected: Vec<usize> = (0..catalog.len())
            .filter(|&i| saved.iter().any(|id| *id == catalog.sections()[i].id))
            .collect();
        if saved.len() != selected.len() {
            info!(saved = saved.len(), restored = selected.len(), "dropped unknown saved ids");
        }
        Planner { catalog, selected, store, colors: ColorAssignment::new() }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected(&self) -> Vec<&CourseSection> {
        self.selected.iter().map(|&i| &self.catalog.sections()[i]).collect()
    }

    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected.iter().map(|&i| self.catalog.sections()[i].id.as_str()).collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.catalog.position(id).is_some_and(|p| self.selected.contains(&p))
    }

    /// Add or remove a section.
    pub fn toggle(&mut self, id: &str) -> Result<ToggleOutcome, StoreError> {
        let Some(pos) = self.catalog.position(id) else {
            return Ok(ToggleOutcome::NotFound);
        };

        if self.selected.contains(&pos) {
            let next: Vec<usize> = self.selected.iter().copied().filter(|&p| p != pos).collect();
            self.commit(next)?;
            debug!(id, "section removed");
            return Ok(ToggleOutcome::Removed);
        }

        let section = &self.catalog.sections()[pos];
        if section.is_full() {
            return Ok(ToggleOutcome::RejectedFull);
        }

        let conflict_with = algorithm::conflicts_for(section, self.selected())
            .first()
            .map(|c| c.title.clone());
        let mut next = self.selected.clone();
        next.push(pos);
        self.commit(next)?;
        debug!(id, conflict = conflict_with.is_some(), "section added");
        Ok(ToggleOutcome::Added { conflict_with })
    }

    /// Empty the selection unconditionally.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.commit(Vec::new())
    }

    fn commit(&mut self, next: Vec<usize>) -> Result<(), StoreError> {
        let ids: Vec<&str> = next.iter().map(|&i| self.catalog.sections()[i].id.as_str()).collect();
        storage::save_selection(&mut *self.store, &ids)?;
        self.selected = next;
        Ok(())
    }

    /// Selected sections colliding with `id` (which need not be selected).
    pub fn conflicts_of(&self, id: &str) -> Vec<&CourseSection> {
        match self.catalog.get(id) {
            Some(target) => algorithm::conflicts_for(target, self.selected()),
            None => Vec::new(),
        }
    }

    pub fn has_any_conflict(&self) -> bool {
        algorithm::any_selection_conflict(self.selected())
    }

    pub fn conflicting_pairs(&self) -> Vec<(String, String)> {
        algorithm::conflicting_pairs(self.selected())
    }

    pub fn color_for(&mut self, course_code: &str) -> &'static str {
        self.colors.color_for(course_code)
    }

    pub fn reset_colors(&mut self) {
        self.colors.reset();
    }

    /// Search + status tab, each entry annotated with status and color.
    pub fn listing(&mut self, query: &str, filter: StatusFilter) -> Vec<CourseListing> {
        let Planner { catalog, selected, colors, .. } = self;
        let chosen: Vec<&CourseSection> = selected.iter().map(|&i| &catalog.sections()[i]).collect();
        let is_selected = |s: &CourseSection| chosen.iter().any(|c| c.id == s.id);

        let found = algorithm::search(catalog.sections(), query);
        let shown = algorithm::apply_status_filter(found, filter, is_selected);
        shown
            .into_iter()
            .map(|s| {
                let sel = is_selected(s);
                let has_conflict = !sel && !algorithm::conflicts_for(s, chosen.iter().copied()).is_empty();
                CourseListing {
                    id: s.id.clone(),
                    course_code: s.course_code.clone(),
                    title: s.title.clone(),
                    instructor: s.instructor.clone(),
                    schedule: s.raw_schedule.clone(),
                    weeks: s.raw_weeks.clone(),
                    enrolled: s.enrolled,
                    capacity: s.capacity,
                    status: algorithm::course_status(s, sel, has_conflict),
                    color: colors.color_for(&s.course_code),
                }
            })
            .collect()
    }

    pub fn timetable(&mut self) -> TimetableGrid {
        let Planner { catalog, selected, colors, .. } = self;
        let chosen: Vec<&CourseSection> = selected.iter().map(|&i| &catalog.sections()[i]).collect();
        algorithm::layout(chosen, |s| colors.color_for(&s.course_code).to_string())
    }

    pub fn export(&self) -> String {
        export_text(self.selected())
    }

    pub fn note_closed(&self) -> bool {
        storage::note_closed(&*self.store)
    }

    pub fn close_note(&mut self) -> Result<(), StoreError> {
        storage::close_note(&mut *self.store)
    }
}

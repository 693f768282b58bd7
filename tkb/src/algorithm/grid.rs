// Weekly grid: 12 period rows by 6 day columns, one block per scheduled
// section anchored at its first period.
use crate::models::{CourseSection, PERIODS_PER_DAY};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridBlock {
    pub id: String,
    pub title: String,
    pub instructor: String,
    /// Number of periods the block spans downward from its row.
    pub span: u8,
    pub conflict: bool,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    pub period: u8,
    pub cells: [Option<GridBlock>; 6],
}

#[derive(Debug, Clone, Serialize)]
pub struct TimetableGrid {
    pub rows: Vec<GridRow>,
    pub has_conflict: bool,
}

impl TimetableGrid {
    pub fn cell(&self, period: u8, day_index: usize) -> Option<&GridBlock> {
        let row = self.rows.get(usize::from(period).checked_sub(1)?)?;
        row.cells.get(day_index)?.as_ref()
    }
}

/// Lays out the selection. Unscheduled sections are left out; when two
/// sections start in the same cell the later one in selection order wins.
pub fn layout<'a, I, F>(selection: I, mut color_of: F) -> TimetableGrid
where
    I: IntoIterator<Item = &'a CourseSection>,
    F: FnMut(&CourseSection) -> String,
{
    let items: Vec<&CourseSection> = selection.into_iter().collect();
    let mut rows: Vec<GridRow> = (1..=PERIODS_PER_DAY)
        .map(|period| GridRow { period, cells: Default::default() })
        .collect();

    for s in items.iter() {
        let Some(slot) = s.time_slot else { continue };
        let conflict = !super::conflict::conflicts_for(s, items.iter().copied()).is_empty();
        let block = GridBlock {
            id: s.id.clone(),
            title: s.title.clone(),
            instructor: s.instructor.clone(),
            span: slot.period_count(),
            conflict,
            color: color_of(s),
        };
        if let Some(row) = rows.get_mut(usize::from(slot.start_period) - 1) {
            row.cells[slot.day.index()] = Some(block);
        }
    }

    TimetableGrid {
        rows,
        has_conflict: super::conflict::any_selection_conflict(items.iter().copied()),
    }
}

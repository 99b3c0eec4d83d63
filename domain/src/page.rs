//! # Week Page Module
//!
//! Client-side model of the rendered availability grid.
//!
//! ## Responsibilities:
//! - Per-cell selection state, kept apart from the server-confirmed baseline
//! - The toggle transition table (Scheduled cells never change)
//! - Building the selection diff submitted to `PUT /availability`

use chrono::{DateTime, Utc};
use shared::{AvailabilityWeek, PutAvailabilityRequest, SlotState};
use std::collections::BTreeSet;

/// One rendered cell of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlotCell {
    pub utc: DateTime<Utc>,
    pub time: String,
    pub date: String,
    pub state: SlotState,
    /// State the server confirmed when the page was rendered or last saved
    pub baseline: SlotState,
}

impl TimeSlotCell {
    pub fn new(utc: DateTime<Utc>, time: String, date: String, state: SlotState) -> Self {
        Self { utc, time, date, state, baseline: state }
    }

    /// Flips Available-Selected and Available-Unselected. Scheduled cells stay
    /// as they are. Returns true when the state changed.
    pub fn toggle(&mut self) -> bool {
        self.state = match self.state {
            SlotState::Scheduled => return false,
            SlotState::AvailableSelected => SlotState::AvailableUnselected,
            SlotState::AvailableUnselected => SlotState::AvailableSelected,
        };
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.state != self.baseline
    }
}

/// One column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: String,
    pub cells: Vec<TimeSlotCell>,
}

/// The week currently rendered by the board
#[derive(Debug, Clone, PartialEq)]
pub struct WeekPage {
    pub page_index: u32,
    pub timezone_offset: i32,
    pub days: Vec<DayColumn>,
}

impl From<AvailabilityWeek> for WeekPage {
    fn from(week: AvailabilityWeek) -> Self {
        let days = week
            .days
            .into_iter()
            .map(|day| DayColumn {
                date: day.date,
                cells: day
                    .slots
                    .into_iter()
                    .map(|slot| {
                        let state = slot.state();
                        TimeSlotCell::new(slot.utc_encoding, slot.time, slot.date, state)
                    })
                    .collect(),
            })
            .collect();

        Self {
            page_index: week.page,
            timezone_offset: week.timezone_offset,
            days,
        }
    }
}

impl WeekPage {
    /// Cells in document order (day by day)
    pub fn cells(&self) -> impl Iterator<Item = &TimeSlotCell> {
        self.days.iter().flat_map(|day| day.cells.iter())
    }

    fn cells_mut(&mut self) -> impl Iterator<Item = &mut TimeSlotCell> {
        self.days.iter_mut().flat_map(|day| day.cells.iter_mut())
    }

    pub fn cell(&self, utc: DateTime<Utc>) -> Option<&TimeSlotCell> {
        self.cells().find(|cell| cell.utc == utc)
    }

    pub fn cell_mut(&mut self, utc: DateTime<Utc>) -> Option<&mut TimeSlotCell> {
        self.cells_mut().find(|cell| cell.utc == utc)
    }

    pub fn is_empty(&self) -> bool {
        self.cells().next().is_none()
    }

    /// Any cell differs from what the server last confirmed
    pub fn is_dirty(&self) -> bool {
        self.cells().any(TimeSlotCell::is_dirty)
    }

    /// Row labels, taken from the first day
    pub fn time_labels(&self) -> Vec<String> {
        self.days
            .first()
            .map(|day| day.cells.iter().map(|cell| cell.time.clone()).collect())
            .unwrap_or_default()
    }

    /// Builds the diff for this page. `None` when the page has no cells, since
    /// there is no window to reconcile.
    pub fn selection_diff(&self) -> Option<SelectionDiff> {
        let first_slot = self.cells().next()?.utc;
        let last_slot = self.cells().last()?.utc;
        let marked_slots = self
            .cells()
            .filter(|cell| cell.state.is_marked())
            .map(|cell| cell.utc)
            .collect();

        Some(SelectionDiff {
            page_index: self.page_index,
            first_slot,
            last_slot,
            marked_slots,
        })
    }

    /// Records what the server now holds after `diff` was accepted. Cells
    /// toggled after the diff was taken stay dirty.
    pub fn confirm(&mut self, diff: &SelectionDiff) {
        for cell in self.cells_mut() {
            if cell.utc < diff.first_slot || cell.utc > diff.last_slot {
                continue;
            }
            cell.baseline = match cell.state {
                SlotState::Scheduled => SlotState::Scheduled,
                _ if diff.marked_slots.contains(&cell.utc) => SlotState::AvailableSelected,
                _ => SlotState::AvailableUnselected,
            };
        }
    }
}

/// The slots the client believes should be marked, within one page's window
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionDiff {
    /// Page the diff was taken from
    pub page_index: u32,
    pub first_slot: DateTime<Utc>,
    pub last_slot: DateTime<Utc>,
    /// Selected and Scheduled slots, deduplicated and in chronological order
    pub marked_slots: BTreeSet<DateTime<Utc>>,
}

impl SelectionDiff {
    pub fn into_request(self) -> PutAvailabilityRequest {
        PutAvailabilityRequest {
            first_slot: self.first_slot,
            last_slot: self.last_slot,
            marked_slots: self.marked_slots.into_iter().collect(),
        }
    }
}

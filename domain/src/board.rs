//! # Availability Board
//!
//! Synchronous state of the availability page: which week is shown, whether
//! a drag is in progress, the rendered cells, and which in-flight request is
//! still allowed to update the view.
//!
//! Every request that can replace the page carries a generation number. Only
//! a response whose generation is still current is applied; anything older is
//! dropped, so overlapping navigations can't leave the grid showing a
//! different week than `page_index`.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use shared::{AvailabilityWeek, SlotState, WeekQuery};

use crate::error::{BoardError, BoardResult};
use crate::page::{SelectionDiff, WeekPage};
use crate::timezone::TimezoneOffset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}

/// What the grid area should show
#[derive(Debug, Clone, PartialEq)]
pub enum BoardView {
    /// Nothing requested yet
    Idle,
    Loading { page: u32 },
    /// Submitting the page before reloading it
    Saving { page: u32 },
    Ready,
    Failed { message: String },
}

/// Pointer state used to gate toggles to drags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    pub mouse_down: bool,
}

/// A week fetch issued by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRequest {
    pub generation: u64,
    pub query: WeekQuery,
}

/// A page step that passed the boundary check
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub from: u32,
    pub to: u32,
    pub generation: u64,
    /// Selection of the page being left; `None` when there is nothing to send
    pub flush: Option<SelectionDiff>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { page: u32 },
    /// A newer request was issued; this response was dropped
    Stale,
}

/// Copy of the board state handed to the UI
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub page_index: u32,
    pub max_weeks_ahead: u32,
    pub drag: DragState,
    pub view: BoardView,
    pub page: Option<WeekPage>,
}

impl BoardSnapshot {
    pub fn can_go_back(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.page_index < self.max_weeks_ahead
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, BoardView::Loading { .. })
    }

    /// A request that will replace the rendered page is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self.view, BoardView::Loading { .. } | BoardView::Saving { .. })
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.page.as_ref().map(WeekPage::is_dirty).unwrap_or(false)
    }
}

#[derive(Debug)]
pub struct AvailabilityBoard {
    max_weeks_ahead: u32,
    page_index: u32,
    drag: DragState,
    page: Option<WeekPage>,
    generation: u64,
    view: BoardView,
}

impl AvailabilityBoard {
    pub fn new(max_weeks_ahead: u32) -> Self {
        Self {
            max_weeks_ahead,
            page_index: 0,
            drag: DragState::default(),
            page: None,
            generation: 0,
            view: BoardView::Idle,
        }
    }

    /// Back to week 0 with no drag in progress, as on a fresh page view
    pub fn reset(&mut self) {
        self.page_index = 0;
        self.drag = DragState::default();
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn max_weeks_ahead(&self) -> u32 {
        self.max_weeks_ahead
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn page(&self) -> Option<&WeekPage> {
        self.page.as_ref()
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn mark_mouse_down(&mut self) {
        self.drag.mouse_down = true;
    }

    pub fn mark_mouse_up(&mut self) {
        self.drag.mouse_down = false;
    }

    /// Flips the cell at `utc` while a drag is in progress. Returns the new
    /// state, or `None` when nothing changed (no drag, unknown cell, a
    /// Scheduled cell, or a page about to be replaced).
    pub fn toggle_tile(&mut self, utc: DateTime<Utc>) -> Option<SlotState> {
        if !self.drag.mouse_down {
            return None;
        }
        // The outgoing diff is already taken; an edit now would never be sent
        if matches!(self.view, BoardView::Loading { .. } | BoardView::Saving { .. }) {
            debug!("🗓️ BOARD: Ignoring toggle of {} while page {} is loading", utc, self.page_index);
            return None;
        }
        let cell = self.page.as_mut()?.cell_mut(utc)?;
        if cell.toggle() {
            debug!("🗓️ BOARD: Toggled {} to {:?}", utc, cell.state);
            Some(cell.state)
        } else {
            None
        }
    }

    /// Diff of the rendered page
    pub fn selection_diff(&self) -> Option<SelectionDiff> {
        self.page.as_ref()?.selection_diff()
    }

    /// Starts a fetch of `page`. Any response still in flight becomes stale.
    pub fn begin_load(&mut self, page: u32, offset: TimezoneOffset) -> BoardResult<WeekRequest> {
        if page > self.max_weeks_ahead {
            return Err(BoardError::PageOutOfRange { page, max: self.max_weeks_ahead });
        }
        self.generation += 1;
        self.page_index = page;
        self.view = BoardView::Loading { page };
        debug!("🗓️ BOARD: Loading page {} ({}), generation {}", page, offset, self.generation);

        Ok(WeekRequest {
            generation: self.generation,
            query: WeekQuery::new(offset.minutes(), page),
        })
    }

    /// Applies a week response if it is still wanted. The replaced page's
    /// unsaved edits are dropped. On failure the old page is dropped too, so
    /// nothing is shown or edited under the wrong week.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: BoardResult<AvailabilityWeek>,
    ) -> BoardResult<LoadOutcome> {
        if !self.is_current(generation) {
            debug!("🗓️ BOARD: Dropping stale response for generation {}", generation);
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(week) => {
                let page = week.page;
                if page != self.page_index {
                    warn!("🗓️ BOARD: Server answered page {} for page {}", page, self.page_index);
                }
                self.page = Some(WeekPage::from(week));
                self.view = BoardView::Ready;
                info!("🗓️ BOARD: Rendered page {}", page);
                Ok(LoadOutcome::Applied { page })
            }
            Err(e) => {
                warn!("🗓️ BOARD: Failed to load page {}: {}", self.page_index, e);
                self.page = None;
                self.view = BoardView::Failed { message: e.to_string() };
                Err(e)
            }
        }
    }

    /// Moves one page back or forward. Returns `None` at the window edge, in
    /// which case nothing changed. Otherwise `page_index` already points at
    /// the target and in-flight loads are stale.
    pub fn begin_navigation(&mut self, direction: Direction, skip_unchanged: bool) -> Option<Navigation> {
        let from = self.page_index;
        let to = match direction {
            Direction::Back => from.checked_sub(1)?,
            Direction::Forward if from < self.max_weeks_ahead => from + 1,
            Direction::Forward => return None,
        };

        let flush = match &self.page {
            Some(page) if skip_unchanged && !page.is_dirty() => {
                debug!("🗓️ BOARD: Page {} unchanged, skipping flush", page.page_index);
                None
            }
            Some(page) => page.selection_diff(),
            None => None,
        };

        self.generation += 1;
        self.page_index = to;
        self.view = BoardView::Loading { page: to };
        info!("🗓️ BOARD: Navigating from page {} to page {}", from, to);

        Some(Navigation { from, to, generation: self.generation, flush })
    }

    /// Locks the page while it is submitted ahead of a reload. Returns the
    /// page being saved.
    pub fn begin_save(&mut self) -> u32 {
        self.view = BoardView::Saving { page: self.page_index };
        self.page_index
    }

    /// Unlocks the page after a failed save, unless a newer request took over
    pub fn abort_save(&mut self, page: u32) {
        if self.view == (BoardView::Saving { page }) {
            self.view = BoardView::Ready;
        }
    }

    /// Undoes a navigation whose flush failed, unless a newer request has
    /// taken over since.
    pub fn abort_navigation(&mut self, navigation: &Navigation) {
        if !self.is_current(navigation.generation) {
            return;
        }
        self.page_index = navigation.from;
        self.view = if self.page.is_some() { BoardView::Ready } else { BoardView::Idle };
        warn!("🗓️ BOARD: Navigation to page {} abandoned, staying on page {}", navigation.to, navigation.from);
    }

    /// Marks the slots of `diff` as saved on the page it came from
    pub fn confirm_flush(&mut self, diff: &SelectionDiff) {
        if let Some(page) = self.page.as_mut().filter(|page| page.page_index == diff.page_index) {
            page.confirm(diff);
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            page_index: self.page_index,
            max_weeks_ahead: self.max_weeks_ahead,
            drag: self.drag,
            view: self.view.clone(),
            page: self.page.clone(),
        }
    }
}

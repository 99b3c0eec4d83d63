//! # Board Controller
//!
//! Async driver around [`AvailabilityBoard`]. Holds the API client and the
//! board, and implements the operations the availability page wires to DOM
//! events.
//!
//! The board lives in a `RefCell` because the UI runtime is single threaded
//! and several operations may be in flight at once (a second click on
//! "next week" while the first is still loading). No borrow is held across
//! an `.await`.
//!
//! An optional observer gets a fresh [`BoardSnapshot`] after every state
//! change, including the ones made before a request is awaited, so a view can
//! show the loading state and disable the grid while a page is in flight.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use shared::SlotState;
use std::cell::RefCell;

use crate::api::SchedulerApi;
use crate::board::{AvailabilityBoard, BoardSnapshot, Direction, LoadOutcome};
use crate::config::BoardConfig;
use crate::error::{BoardError, BoardResult};
use crate::gate::{GateOutcome, SessionGate};
use crate::page::SelectionDiff;
use crate::timezone::{LocalOffset, OffsetSource, TimezoneOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Already on the first or last page; nothing was sent
    AtBoundary,
    Loaded { page: u32 },
    /// A newer navigation or reload took over
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// No page rendered, so there is no window to submit
    NothingToFlush,
    Submitted { reloaded: bool },
}

pub struct BoardController<A> {
    api: A,
    config: BoardConfig,
    gate: SessionGate,
    board: RefCell<AvailabilityBoard>,
    offsets: Box<dyn OffsetSource>,
    observer: Option<Box<dyn Fn(&BoardSnapshot)>>,
}

impl<A: SchedulerApi> BoardController<A> {
    pub fn new(api: A, config: BoardConfig) -> Self {
        Self {
            gate: SessionGate::new(config.home_url.clone()),
            board: RefCell::new(AvailabilityBoard::new(config.max_weeks_ahead)),
            offsets: Box::new(LocalOffset),
            observer: None,
            api,
            config,
        }
    }

    /// Replaces the local-timezone lookup (the browser build reads it from `Date`)
    pub fn with_offset_source(mut self, source: impl OffsetSource + 'static) -> Self {
        self.offsets = Box::new(source);
        self
    }

    /// Called with the new board state whenever it changes
    pub fn with_observer(mut self, observer: impl Fn(&BoardSnapshot) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.borrow().snapshot()
    }

    fn current_offset(&self) -> BoardResult<TimezoneOffset> {
        self.offsets.current_offset()
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            let snapshot = self.snapshot();
            observer(&snapshot);
        }
    }

    /// Entry point of the availability page: runs the session gate and, for
    /// a registered viewer, renders week 0. A failed week fetch shows up in
    /// the board view rather than as an error here.
    pub async fn on_availability_load(&self) -> BoardResult<GateOutcome> {
        let outcome = self.gate.check(&self.api).await?;
        if let GateOutcome::Ready { person, .. } = &outcome {
            info!("🗓️ BOARD: Opening availability for {}", person.email);
            self.board.borrow_mut().reset();
            self.notify();
            let offset = self.current_offset()?;
            if let Err(e) = self.load_week(0, offset).await {
                warn!("🗓️ BOARD: Initial week failed to load: {}", e);
            }
        }
        Ok(outcome)
    }

    /// Fetches and renders `page`. Unsaved edits on the replaced page are
    /// lost; call [`Self::update_availability`] first to keep them.
    pub async fn load_week(&self, page: u32, offset: TimezoneOffset) -> BoardResult<LoadOutcome> {
        let request = self.board.borrow_mut().begin_load(page, offset)?;
        self.notify();
        let result = self.api.availability_week(request.query).await;
        let outcome = self.board.borrow_mut().finish_load(request.generation, result);
        self.notify();
        outcome
    }

    pub fn mark_mouse_down(&self) {
        self.board.borrow_mut().mark_mouse_down();
        self.notify();
    }

    pub fn mark_mouse_up(&self) {
        self.board.borrow_mut().mark_mouse_up();
        self.notify();
    }

    /// Ignored while a page load or save-and-reload is in flight
    pub fn toggle_tile(&self, utc: DateTime<Utc>) -> Option<SlotState> {
        let state = self.board.borrow_mut().toggle_tile(utc);
        if state.is_some() {
            self.notify();
        }
        state
    }

    pub async fn go_back(&self) -> BoardResult<NavigationOutcome> {
        self.navigate(Direction::Back).await
    }

    pub async fn go_forward(&self) -> BoardResult<NavigationOutcome> {
        self.navigate(Direction::Forward).await
    }

    /// Handler of the page's Save action
    pub async fn update_availability(&self, reload: bool) -> BoardResult<FlushOutcome> {
        self.flush_selection(reload).await
    }

    /// Submits the rendered page's selection. With `reload`, the page is
    /// locked while the PUT is in flight and fetched again afterwards so it
    /// shows what the server stored. On failure the local selection is left
    /// as it was.
    pub async fn flush_selection(&self, reload: bool) -> BoardResult<FlushOutcome> {
        let diff = self.board.borrow().selection_diff();
        let Some(diff) = diff else {
            debug!("🗓️ BOARD: No page rendered, nothing to submit");
            return Ok(FlushOutcome::NothingToFlush);
        };

        if !reload {
            self.submit(&diff).await?;
            return Ok(FlushOutcome::Submitted { reloaded: false });
        }

        let offset = self.current_offset()?;
        let page = self.board.borrow_mut().begin_save();
        self.notify();
        if let Err(e) = self.submit(&diff).await {
            self.board.borrow_mut().abort_save(page);
            self.notify();
            return Err(e);
        }

        self.load_week(page, offset).await?;
        Ok(FlushOutcome::Submitted { reloaded: true })
    }

    async fn navigate(&self, direction: Direction) -> BoardResult<NavigationOutcome> {
        let offset = self.current_offset()?;
        let navigation = self
            .board
            .borrow_mut()
            .begin_navigation(direction, self.config.skip_unchanged_flush);
        let Some(navigation) = navigation else {
            debug!("🗓️ BOARD: {:?} blocked at the edge of the window", direction);
            return Ok(NavigationOutcome::AtBoundary);
        };
        self.notify();

        if let Some(diff) = &navigation.flush {
            if let Err(e) = self.submit(diff).await {
                self.board.borrow_mut().abort_navigation(&navigation);
                self.notify();
                return Err(e);
            }
        }

        if !self.board.borrow().is_current(navigation.generation) {
            return Ok(NavigationOutcome::Superseded);
        }

        match self.load_week(navigation.to, offset).await? {
            LoadOutcome::Applied { page } => Ok(NavigationOutcome::Loaded { page }),
            LoadOutcome::Stale => Ok(NavigationOutcome::Superseded),
        }
    }

    async fn submit(&self, diff: &SelectionDiff) -> BoardResult<()> {
        let request = diff.clone().into_request();
        request
            .validate()
            .map_err(|e| BoardError::InvalidRequest(e.to_string()))?;

        info!(
            "🗓️ BOARD: Submitting page {} with {} marked slots",
            diff.page_index,
            request.marked_slots.len()
        );
        self.api.put_availability(&request).await.map_err(|e| {
            warn!("🗓️ BOARD: Availability update failed: {}", e);
            e
        })?;

        self.board.borrow_mut().confirm_flush(diff);
        self.notify();
        Ok(())
    }
}

//! # Interview Scheduler Domain
//!
//! Availability-grid engine for the interview scheduler: the week page model,
//! the selection and paging state machine, and the async controller that
//! flushes selections and fetches weeks through a [`SchedulerApi`].
//!
//! Nothing here touches the DOM, so the whole crate is tested natively with
//! an in-memory API.

pub mod api;
pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod page;
pub mod timezone;

#[cfg(test)]
mod testing;

pub use api::{PersonLookup, SchedulerApi};
pub use board::{AvailabilityBoard, BoardSnapshot, BoardView, Direction, DragState, LoadOutcome};
pub use config::{BoardConfig, Endpoints};
pub use controller::{BoardController, FlushOutcome, NavigationOutcome};
pub use error::{BoardError, BoardResult};
pub use gate::{GateOutcome, SessionGate};
pub use page::{DayColumn, SelectionDiff, TimeSlotCell, WeekPage};
pub use timezone::{LocalOffset, OffsetSource, TimezoneOffset};

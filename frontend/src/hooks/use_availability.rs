use chrono::{DateTime, Utc};
use interview_scheduler_domain::{
    AvailabilityBoard, BoardConfig, BoardController, BoardError, BoardSnapshot, BoardView,
    GateOutcome, SchedulerApi,
};
use shared::{LoginInfo, Person};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::browser::{alert, redirect, BrowserOffset};
use crate::services::logging::Logger;

pub type Controller = BoardController<ApiClient>;

const COMPONENT: &str = "availability-hook";

/// Progress of the login and registration check
#[derive(Clone, PartialEq)]
pub enum SessionState {
    Checking,
    Ready { login: LoginInfo, person: Person },
    /// A redirect was issued; nothing more to render
    Leaving,
    Failed(String),
}

pub struct UseAvailabilityResult {
    pub session: SessionState,
    pub board: BoardSnapshot,
    pub actions: UseAvailabilityActions,
}

#[derive(Clone, PartialEq)]
pub struct UseAvailabilityActions {
    /// Starts a drag and flips the cell under the pointer
    pub press_tile: Callback<DateTime<Utc>>,
    /// Flips a cell the drag passes over
    pub enter_tile: Callback<DateTime<Utc>>,
    pub release: Callback<MouseEvent>,
    pub go_back: Callback<MouseEvent>,
    pub go_forward: Callback<MouseEvent>,
    pub save: Callback<MouseEvent>,
    pub log_out: Callback<MouseEvent>,
}

/// Load failures already show in the grid; everything else needs the user's
/// attention before they carry on.
fn report(controller: &Controller, action: &str, error: BoardError) {
    Logger::error_with_component(COMPONENT, &format!("{} failed: {}", action, error));
    if !matches!(controller.snapshot().view, BoardView::Failed { .. }) {
        alert(&format!("{} failed: {}", action, error));
    }
}

#[hook]
pub fn use_availability(config: &BoardConfig) -> UseAvailabilityResult {
    let board = {
        let max_weeks_ahead = config.max_weeks_ahead;
        use_state(move || AvailabilityBoard::new(max_weeks_ahead).snapshot())
    };
    // Every board change, including the Loading state set before a fetch is
    // awaited, lands in `board` so the grid re-renders mid-flight
    let controller: Rc<Controller> = {
        let board = board.clone();
        use_memo(config.clone(), move |config| {
            BoardController::new(ApiClient::from_config(config), config.clone())
                .with_offset_source(BrowserOffset)
                .with_observer(move |snapshot: &BoardSnapshot| board.set(snapshot.clone()))
        })
    };
    let session = use_state(|| SessionState::Checking);

    // Gate and first week on mount
    {
        let controller = controller.clone();
        let session = session.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match controller.on_availability_load().await {
                    Ok(GateOutcome::Ready { login, person }) => {
                        session.set(SessionState::Ready { login, person });
                    }
                    Ok(outcome) => {
                        session.set(SessionState::Leaving);
                        if let Some(url) = outcome.redirect_url() {
                            redirect(url);
                        }
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Session check failed: {}", e));
                        session.set(SessionState::Failed(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let press_tile = {
        let controller = controller.clone();
        Callback::from(move |utc: DateTime<Utc>| {
            controller.mark_mouse_down();
            controller.toggle_tile(utc);
        })
    };

    let enter_tile = {
        let controller = controller.clone();
        Callback::from(move |utc: DateTime<Utc>| {
            controller.toggle_tile(utc);
        })
    };

    let release = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            controller.mark_mouse_up();
        })
    };

    let go_back = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                if let Err(e) = controller.go_back().await {
                    report(&controller, "Previous week", e);
                }
            });
        })
    };

    let go_forward = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                if let Err(e) = controller.go_forward().await {
                    report(&controller, "Next week", e);
                }
            });
        })
    };

    let save = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                match controller.update_availability(true).await {
                    Ok(outcome) => {
                        Logger::info_with_component(COMPONENT, &format!("Availability saved: {:?}", outcome));
                    }
                    Err(e) => report(&controller, "Saving availability", e),
                }
            });
        })
    };

    let log_out = {
        let controller = controller.clone();
        let session = session.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let fallback = match &*session {
                SessionState::Ready { login, .. } => login.change_log_in_status_url.clone(),
                _ => controller.config().home_url.clone(),
            };
            let controller = controller.clone();
            spawn_local(async move {
                match controller.api().logout().await {
                    Ok(Some(url)) => redirect(&url),
                    Ok(None) => redirect(&fallback),
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("Logout request failed: {}", e));
                        redirect(&fallback);
                    }
                }
            });
        })
    };

    UseAvailabilityResult {
        session: (*session).clone(),
        board: (*board).clone(),
        actions: UseAvailabilityActions {
            press_tile,
            enter_tile,
            release,
            go_back,
            go_forward,
            save,
            log_out,
        },
    }
}

use interview_scheduler_domain::BoardConfig;
use log::LevelFilter;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::availability_grid::AvailabilityGrid;
use components::header::Header;
use components::week_navigation::WeekNavigation;
use hooks::use_availability::{use_availability, SessionState};
use services::logging::{self, Logger};

#[derive(Properties, PartialEq)]
struct AppProps {
    config: BoardConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let availability = use_availability(&props.config);
    let actions = availability.actions.clone();

    let (login, person) = match &availability.session {
        SessionState::Ready { login, person } => (Some(login.clone()), Some(person.clone())),
        _ => (None, None),
    };

    html! {
        <div class="app">
            <Header {login} {person} on_log_out={actions.log_out.clone()} />
            <main class="main">
                <div class="container">
                    {match &availability.session {
                        SessionState::Checking | SessionState::Leaving => html! {
                            <div class="loading">{"Checking your session..."}</div>
                        },
                        SessionState::Failed(message) => html! {
                            <div class="alert alert-danger">{format!("Could not check your session: {}", message)}</div>
                        },
                        SessionState::Ready { .. } => html! {
                            <section class="availability">
                                <p class="instructions">
                                    {"Click and drag over the times you are free to interview. Changes are saved when you switch weeks."}
                                </p>
                                <WeekNavigation
                                    board={availability.board.clone()}
                                    on_back={actions.go_back.clone()}
                                    on_forward={actions.go_forward.clone()}
                                    on_save={actions.save.clone()}
                                />
                                <AvailabilityGrid
                                    view={availability.board.view.clone()}
                                    page={availability.board.page.clone()}
                                    on_press={actions.press_tile.clone()}
                                    on_enter={actions.enter_tile.clone()}
                                    on_release={actions.release.clone()}
                                />
                            </section>
                        },
                    }}
                </div>
            </main>
        </div>
    }
}

fn main() {
    logging::init(LevelFilter::Info);

    let config = BoardConfig::from_build_env().unwrap_or_else(|e| {
        Logger::error_with_component("app", &format!("Invalid build configuration, using defaults: {:#}", e));
        BoardConfig::default()
    });
    Logger::info_with_component("app", &format!("Starting availability page with {:?}", config));

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}

use interview_scheduler_domain::BoardSnapshot;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WeekNavigationProps {
    pub board: BoardSnapshot,
    pub on_back: Callback<MouseEvent>,
    pub on_forward: Callback<MouseEvent>,
    pub on_save: Callback<MouseEvent>,
}

/// "Week 2 of 4"
pub fn week_label(page_index: u32, max_weeks_ahead: u32) -> String {
    format!("Week {} of {}", page_index + 1, max_weeks_ahead + 1)
}

#[function_component(WeekNavigation)]
pub fn week_navigation(props: &WeekNavigationProps) -> Html {
    let board = &props.board;
    html! {
        <div class="week-navigation">
            <button class="btn btn-outline-secondary"
                    disabled={!board.can_go_back()}
                    onclick={props.on_back.clone()}>
                {"← Previous"}
            </button>
            <span class="week-label">{week_label(board.page_index, board.max_weeks_ahead)}</span>
            <button class="btn btn-outline-secondary"
                    disabled={!board.can_go_forward()}
                    onclick={props.on_forward.clone()}>
                {"Next →"}
            </button>
            <button class="btn btn-primary"
                    disabled={board.page.is_none() || board.is_busy()}
                    onclick={props.on_save.clone()}>
                {if board.has_unsaved_changes() { "Save changes" } else { "Save" }}
            </button>
        </div>
    }
}

use chrono::{DateTime, Utc};
use interview_scheduler_domain::{BoardView, TimeSlotCell, WeekPage};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AvailabilityGridProps {
    pub view: BoardView,
    pub page: Option<WeekPage>,
    pub on_press: Callback<DateTime<Utc>>,
    pub on_enter: Callback<DateTime<Utc>>,
    pub on_release: Callback<MouseEvent>,
}

/// Classes for a tile; unsaved tiles get an extra marker
pub fn tile_class(cell: &TimeSlotCell) -> String {
    let mut class = format!("tile {}", cell.state.css_class());
    if cell.is_dirty() {
        class.push_str(" tile-unsaved");
    }
    class
}

#[function_component(AvailabilityGrid)]
pub fn availability_grid(props: &AvailabilityGridProps) -> Html {
    let status = match &props.view {
        BoardView::Idle => Some(html! { <div class="loading">{"Loading availability..."}</div> }),
        BoardView::Loading { page } => {
            Some(html! { <div class="loading">{format!("Loading week {}...", page + 1)}</div> })
        }
        BoardView::Saving { page } => {
            Some(html! { <div class="loading">{format!("Saving week {}...", page + 1)}</div> })
        }
        BoardView::Failed { message } => Some(html! {
            <div class="alert alert-danger">{format!("Could not load availability: {}", message)}</div>
        }),
        BoardView::Ready => None,
    };

    // Tiles ignore presses while the page is being replaced
    let busy = matches!(props.view, BoardView::Loading { .. } | BoardView::Saving { .. });

    let Some(page) = &props.page else {
        return status.unwrap_or_default();
    };

    let rows = page.time_labels().into_iter().enumerate().map(|(row, label)| {
        html! {
            <tr>
                <th scope="row" class="time-label">{label}</th>
                {for page.days.iter().map(|day| match day.cells.get(row) {
                    Some(cell) => {
                        let utc = cell.utc;
                        let onmousedown = {
                            let on_press = props.on_press.clone();
                            Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                on_press.emit(utc);
                            })
                        };
                        let onmouseenter = props.on_enter.reform(move |_: MouseEvent| utc);
                        html! {
                            <td class={tile_class(cell)}
                                title={format!("{} {}", cell.date, cell.time)}
                                {onmousedown}
                                {onmouseenter}>
                            </td>
                        }
                    }
                    None => html! { <td class="tile tile-empty"></td> },
                })}
            </tr>
        }
    });

    html! {
        <>
            {status.unwrap_or_default()}
            <table class={classes!("table", "table-bordered", "availability-table", busy.then_some("busy"))}
                   onmouseup={props.on_release.clone()}
                   onmouseleave={props.on_release.clone()}>
                <thead>
                    <tr>
                        <th></th>
                        {for page.days.iter().map(|day| html! { <th scope="col">{day.date.clone()}</th> })}
                    </tr>
                </thead>
                <tbody>
                    {for rows}
                </tbody>
            </table>
        </>
    }
}

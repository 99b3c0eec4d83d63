use shared::{LoginInfo, Person};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub login: Option<LoginInfo>,
    pub person: Option<Person>,
    pub on_log_out: Callback<MouseEvent>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>
                    {match &props.person {
                        Some(person) => format!("{}'s Availability", person.first_name),
                        None => "My Availability".to_string(),
                    }}
                </h1>
                <div class="header-right">
                    {if let Some(person) = &props.person {
                        html! { <span class="header-user">{person.display_name()}</span> }
                    } else {
                        html! {}
                    }}
                    {if let Some(login) = &props.login {
                        html! {
                            <a class="btn btn-link logout-link"
                               href={login.change_log_in_status_url.clone()}
                               onclick={props.on_log_out.clone()}>
                                {"Log out"}
                            </a>
                        }
                    } else {
                        html! {}
                    }}
                </div>
            </div>
        </header>
    }
}

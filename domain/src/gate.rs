use log::info;
use shared::{LoginInfo, Person};

use crate::api::{PersonLookup, SchedulerApi};
use crate::error::BoardResult;

/// Where a page view may continue after the login/registration check
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Not logged in; leave the page
    RedirectHome { url: String },
    /// Logged in but never registered
    RedirectRegistration { url: String },
    Ready { login: LoginInfo, person: Person },
}

impl GateOutcome {
    /// Target of a redirect outcome
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            GateOutcome::RedirectHome { url } | GateOutcome::RedirectRegistration { url } => Some(url),
            GateOutcome::Ready { .. } => None,
        }
    }
}

/// Login and registration check run before a restricted page renders
#[derive(Debug, Clone)]
pub struct SessionGate {
    home_url: String,
}

impl SessionGate {
    pub fn new(home_url: impl Into<String>) -> Self {
        Self { home_url: home_url.into() }
    }

    pub async fn check<A: SchedulerApi + ?Sized>(&self, api: &A) -> BoardResult<GateOutcome> {
        let login = api.login_info().await?;
        if !login.logged_in {
            info!("🔒 GATE: Viewer is logged out, redirecting to {}", self.home_url);
            return Ok(GateOutcome::RedirectHome { url: self.home_url.clone() });
        }

        match api.current_person(&login.email).await? {
            PersonLookup::Registered(person) => {
                info!("🔒 GATE: {} is registered", person.email);
                Ok(GateOutcome::Ready { login, person })
            }
            PersonLookup::Unregistered { registration_url } => {
                info!("🔒 GATE: {} is not registered, redirecting to {}", login.email, registration_url);
                Ok(GateOutcome::RedirectRegistration { url: registration_url })
            }
        }
    }
}

//! # Scheduler API Port
//!
//! The board and the session gate reach the backend only through this trait,
//! so the browser client (`gloo-net`) and the in-memory test double are
//! interchangeable.

use async_trait::async_trait;
use shared::{AvailabilityWeek, LoginInfo, Person, PutAvailabilityRequest, WeekQuery};

use crate::error::BoardResult;

/// Result of looking up the logged-in user's person record
#[derive(Debug, Clone, PartialEq)]
pub enum PersonLookup {
    Registered(Person),
    /// The person endpoint redirected; the user has not registered yet
    Unregistered { registration_url: String },
}

/// Backend operations used by the availability page.
///
/// `?Send` because browser fetch futures are bound to the UI thread.
#[async_trait(?Send)]
pub trait SchedulerApi {
    /// `GET /login`
    async fn login_info(&self) -> BoardResult<LoginInfo>;

    /// `GET /person?email=`
    async fn current_person(&self, email: &str) -> BoardResult<PersonLookup>;

    /// `GET /availabilityTable?timeZoneOffset=&page=`
    async fn availability_week(&self, query: WeekQuery) -> BoardResult<AvailabilityWeek>;

    /// `PUT /availability`
    async fn put_availability(&self, request: &PutAvailabilityRequest) -> BoardResult<()>;

    /// `GET /logout`; returns where the server redirected, if anywhere
    async fn logout(&self) -> BoardResult<Option<String>>;
}

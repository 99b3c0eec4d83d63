//! In-memory `SchedulerApi` used by the unit tests.
//!
//! Keeps a tiny availability store so a saved selection comes back on the
//! next week fetch, records every call, and can hold a week response until
//! the test releases it.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use shared::{
    AvailabilityDay, AvailabilityWeek, LoginInfo, Person, PutAvailabilityRequest, TimeSlot,
    WeekQuery,
};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::oneshot;

use crate::api::{PersonLookup, SchedulerApi};
use crate::error::{BoardError, BoardResult};
use crate::page::tests::slot_at;

pub(crate) const DAYS: i64 = 2;
pub(crate) const SLOTS_PER_DAY: i64 = 4;

pub(crate) fn person() -> Person {
    Person {
        email: "ada@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        company: "Analytical Engines".to_string(),
        job: "SWE".to_string(),
        linked_in: String::new(),
        qualified_jobs: vec!["SOFTWARE_ENGINEER".to_string()],
    }
}

/// Start instant of a slot on `page`
pub(crate) fn page_slot(page: u32, day: i64, index: i64) -> DateTime<Utc> {
    slot_at(day, index) + Duration::weeks(page as i64)
}

pub(crate) struct FakeApi {
    login: RefCell<BoardResult<LoginInfo>>,
    person: PersonLookup,
    stored: RefCell<BTreeSet<DateTime<Utc>>>,
    scheduled: RefCell<BTreeSet<DateTime<Utc>>>,
    calls: RefCell<Vec<String>>,
    puts: RefCell<Vec<PutAvailabilityRequest>>,
    put_failure: RefCell<Option<BoardError>>,
    week_failure: RefCell<Option<BoardError>>,
    held_weeks: RefCell<HashMap<u32, oneshot::Receiver<()>>>,
}

impl FakeApi {
    fn with(login: BoardResult<LoginInfo>, person: PersonLookup) -> Self {
        Self {
            login: RefCell::new(login),
            person,
            stored: RefCell::new(BTreeSet::new()),
            scheduled: RefCell::new(BTreeSet::new()),
            calls: RefCell::new(Vec::new()),
            puts: RefCell::new(Vec::new()),
            put_failure: RefCell::new(None),
            week_failure: RefCell::new(None),
            held_weeks: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn registered() -> Self {
        Self::with(
            Ok(LoginInfo {
                logged_in: true,
                change_log_in_status_url: "/_ah/logout".to_string(),
                email: "ada@example.com".to_string(),
            }),
            PersonLookup::Registered(person()),
        )
    }

    pub(crate) fn unregistered(registration_url: &str) -> Self {
        Self::with(
            Ok(LoginInfo {
                logged_in: true,
                change_log_in_status_url: "/_ah/logout".to_string(),
                email: "new@example.com".to_string(),
            }),
            PersonLookup::Unregistered { registration_url: registration_url.to_string() },
        )
    }

    pub(crate) fn logged_out() -> Self {
        Self::with(
            Ok(LoginInfo {
                logged_in: false,
                change_log_in_status_url: "/_ah/login".to_string(),
                email: String::new(),
            }),
            PersonLookup::Registered(person()),
        )
    }

    pub(crate) fn fail_login(&self, error: BoardError) {
        *self.login.borrow_mut() = Err(error);
    }

    pub(crate) fn fail_puts(&self, error: Option<BoardError>) {
        *self.put_failure.borrow_mut() = error;
    }

    pub(crate) fn fail_weeks(&self, error: Option<BoardError>) {
        *self.week_failure.borrow_mut() = error;
    }

    pub(crate) fn store(&self, slot: DateTime<Utc>) {
        self.stored.borrow_mut().insert(slot);
    }

    pub(crate) fn schedule(&self, slot: DateTime<Utc>) {
        self.stored.borrow_mut().insert(slot);
        self.scheduled.borrow_mut().insert(slot);
    }

    /// The week response for `page` waits until the returned sender fires
    pub(crate) fn hold_week(&self, page: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.held_weeks.borrow_mut().insert(page, rx);
        tx
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn week_calls(&self) -> Vec<String> {
        self.calls().into_iter().filter(|c| c.starts_with("week:")).collect()
    }

    pub(crate) fn puts(&self) -> Vec<PutAvailabilityRequest> {
        self.puts.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
        self.puts.borrow_mut().clear();
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn build_week(&self, query: WeekQuery) -> AvailabilityWeek {
        let stored = self.stored.borrow();
        let scheduled = self.scheduled.borrow();
        AvailabilityWeek {
            page: query.page,
            timezone_offset: query.timezone_offset,
            days: (0..DAYS)
                .map(|day| AvailabilityDay {
                    date: format!("Day {}", day),
                    slots: (0..SLOTS_PER_DAY)
                        .map(|index| {
                            let utc = page_slot(query.page, day, index);
                            TimeSlot {
                                utc_encoding: utc,
                                time: format!("slot {}", index),
                                date: format!("Day {}", day),
                                selected: stored.contains(&utc),
                                scheduled: scheduled.contains(&utc),
                            }
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[async_trait(?Send)]
impl SchedulerApi for FakeApi {
    async fn login_info(&self) -> BoardResult<LoginInfo> {
        self.record("login".to_string());
        self.login.borrow().clone()
    }

    async fn current_person(&self, email: &str) -> BoardResult<PersonLookup> {
        self.record(format!("person:{}", email));
        Ok(self.person.clone())
    }

    async fn availability_week(&self, query: WeekQuery) -> BoardResult<AvailabilityWeek> {
        self.record(format!("week:{}", query.to_query_string()));
        let hold = self.held_weeks.borrow_mut().remove(&query.page);
        if let Some(rx) = hold {
            let _ = rx.await;
        }
        if let Some(error) = self.week_failure.borrow().clone() {
            return Err(error);
        }
        Ok(self.build_week(query))
    }

    async fn put_availability(&self, request: &PutAvailabilityRequest) -> BoardResult<()> {
        self.record("put".to_string());
        if let Some(error) = self.put_failure.borrow().clone() {
            return Err(error);
        }
        self.puts.borrow_mut().push(request.clone());

        let end = request.window_end();
        let mut stored = self.stored.borrow_mut();
        stored.retain(|slot| *slot < request.first_slot || *slot >= end);
        stored.extend(request.marked_slots.iter().copied());
        Ok(())
    }

    async fn logout(&self) -> BoardResult<Option<String>> {
        self.record("logout".to_string());
        Ok(Some("/".to_string()))
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of one availability slot in minutes
pub const SLOT_MINUTES: i64 = 15;

/// Largest timezone offset magnitude (minutes) the availability endpoints accept
pub const MAX_TIMEZONE_OFFSET_MINUTES: i32 = 720;

/// Logged-in status as reported by `GET /login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInfo {
    pub logged_in: bool,
    /// Login URL when logged out, logout URL when logged in
    #[serde(rename = "changeLogInStatusURL", alias = "loginUrl")]
    pub change_log_in_status_url: String,
    /// Empty when logged out
    #[serde(default)]
    pub email: String,
}

/// A registered user as returned by `GET /person?email=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job: String,
    #[serde(default, rename = "linkedIn", alias = "linkedin")]
    pub linked_in: String,
    #[serde(default)]
    pub qualified_jobs: Vec<String>,
}

impl Person {
    /// Name shown in the page header
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

/// The three states a rendered slot can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotState {
    /// Free and not offered by the user
    AvailableUnselected,
    /// Free and offered by the user
    AvailableSelected,
    /// Already booked server-side; never toggled by the client
    Scheduled,
}

impl SlotState {
    /// Build the state from the two flags the server sends
    pub fn from_flags(selected: bool, scheduled: bool) -> Self {
        if scheduled {
            SlotState::Scheduled
        } else if selected {
            SlotState::AvailableSelected
        } else {
            SlotState::AvailableUnselected
        }
    }

    /// Whether the slot belongs in the marked set of a PUT /availability body
    pub fn is_marked(self) -> bool {
        matches!(self, SlotState::AvailableSelected | SlotState::Scheduled)
    }

    /// CSS class used by the grid for this state
    pub fn css_class(self) -> &'static str {
        match self {
            SlotState::AvailableUnselected => "slot-unselected",
            SlotState::AvailableSelected => "slot-selected table-success",
            SlotState::Scheduled => "slot-scheduled table-primary",
        }
    }
}

/// A single 15 minute slot of the availability grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// UTC start instant, unique within a week
    pub utc_encoding: DateTime<Utc>,
    /// Local start time label, e.g. "8:15 AM"
    pub time: String,
    /// Local date label, e.g. "Tue 7/7"
    pub date: String,
    /// The user offered this slot
    pub selected: bool,
    /// An interview is booked in this slot
    pub scheduled: bool,
}

impl TimeSlot {
    pub fn state(&self) -> SlotState {
        SlotState::from_flags(self.selected, self.scheduled)
    }
}

/// One column of the availability grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityDay {
    /// Local date label, e.g. "Tue 7/7"
    pub date: String,
    pub slots: Vec<TimeSlot>,
}

/// A week page of the availability grid, as served for one `page`/offset pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWeek {
    pub page: u32,
    pub timezone_offset: i32,
    pub days: Vec<AvailabilityDay>,
}

/// Query parameters of the week endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekQuery {
    /// Minutes east of UTC (negated browser `getTimezoneOffset()`)
    #[serde(rename = "timeZoneOffset")]
    pub timezone_offset: i32,
    /// Weeks ahead of the current week
    pub page: u32,
}

impl WeekQuery {
    pub fn new(timezone_offset: i32, page: u32) -> Self {
        Self { timezone_offset, page }
    }

    /// Query string in the form `timeZoneOffset=-240&page=1`
    pub fn to_query_string(&self) -> String {
        format!("timeZoneOffset={}&page={}", self.timezone_offset, self.page)
    }
}

/// Body of `PUT /availability`
///
/// The server clears every availability of the user in
/// `[first_slot, last_slot + 15min)` and then stores each marked slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutAvailabilityRequest {
    pub first_slot: DateTime<Utc>,
    pub last_slot: DateTime<Utc>,
    pub marked_slots: Vec<DateTime<Utc>>,
}

impl PutAvailabilityRequest {
    /// End of the window the server reconciles
    pub fn window_end(&self) -> DateTime<Utc> {
        self.last_slot + Duration::minutes(SLOT_MINUTES)
    }

    /// Checks the request the way the availability endpoint would
    pub fn validate(&self) -> Result<(), AvailabilityRequestError> {
        if self.first_slot > self.last_slot {
            return Err(AvailabilityRequestError::InvertedWindow);
        }
        let end = self.window_end();
        if let Some(slot) = self
            .marked_slots
            .iter()
            .find(|slot| **slot < self.first_slot || **slot >= end)
        {
            return Err(AvailabilityRequestError::SlotOutsideWindow(*slot));
        }
        Ok(())
    }
}

/// Error for PUT /availability bodies the server would reject
#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityRequestError {
    InvertedWindow,
    SlotOutsideWindow(DateTime<Utc>),
}

impl fmt::Display for AvailabilityRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityRequestError::InvertedWindow => {
                write!(f, "firstSlot is after lastSlot")
            }
            AvailabilityRequestError::SlotOutsideWindow(slot) => {
                write!(f, "Marked slot {} is outside the submitted window", slot.to_rfc3339())
            }
        }
    }
}

impl std::error::Error for AvailabilityRequestError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 7, 7, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_login_info_wire_names() {
        let json = r#"{"loggedIn":true,"changeLogInStatusURL":"/_ah/logout","email":"a@b.com"}"#;
        let info: LoginInfo = serde_json::from_str(json).unwrap();
        assert!(info.logged_in);
        assert_eq!(info.change_log_in_status_url, "/_ah/logout");
        assert_eq!(info.email, "a@b.com");

        // Older pages send loginUrl and omit the email when logged out
        let json = r#"{"loggedIn":false,"loginUrl":"/_ah/login"}"#;
        let info: LoginInfo = serde_json::from_str(json).unwrap();
        assert!(!info.logged_in);
        assert_eq!(info.change_log_in_status_url, "/_ah/login");
        assert!(info.email.is_empty());
    }

    #[test]
    fn test_person_defaults_and_display_name() {
        let json = r#"{"email":"a@b.com","firstName":"Ada","lastName":"Lovelace","linkedIn":"ada"}"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert!(person.qualified_jobs.is_empty());
        assert_eq!(person.linked_in, "ada");
        assert_eq!(person.display_name(), "Ada Lovelace");

        let anonymous = Person { first_name: " ".into(), last_name: String::new(), ..person };
        assert_eq!(anonymous.display_name(), "a@b.com");
    }

    #[test]
    fn test_slot_state_from_flags() {
        assert_eq!(SlotState::from_flags(false, false), SlotState::AvailableUnselected);
        assert_eq!(SlotState::from_flags(true, false), SlotState::AvailableSelected);
        assert_eq!(SlotState::from_flags(true, true), SlotState::Scheduled);
        // Scheduled wins even if the selected flag is missing
        assert_eq!(SlotState::from_flags(false, true), SlotState::Scheduled);

        assert!(!SlotState::AvailableUnselected.is_marked());
        assert!(SlotState::AvailableSelected.is_marked());
        assert!(SlotState::Scheduled.is_marked());
    }

    #[test]
    fn test_time_slot_wire_format() {
        let json = r#"{"utcEncoding":"2020-07-07T12:00:00Z","time":"8:00 AM","date":"Tue 7/7","selected":true,"scheduled":false}"#;
        let slot: TimeSlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.utc_encoding, at(12, 0));
        assert_eq!(slot.state(), SlotState::AvailableSelected);

        let back = serde_json::to_value(&slot).unwrap();
        assert_eq!(back["utcEncoding"], "2020-07-07T12:00:00Z");
    }

    #[test]
    fn test_week_query_string_keeps_negative_offset() {
        assert_eq!(WeekQuery::new(-240, 0).to_query_string(), "timeZoneOffset=-240&page=0");
        assert_eq!(WeekQuery::new(330, 3).to_query_string(), "timeZoneOffset=330&page=3");
    }

    #[test]
    fn test_week_wire_format() {
        let json = r#"{"page":2,"timezoneOffset":-240,"days":[
            {"date":"Tue 7/7","slots":[{"utcEncoding":"2020-07-07T12:00:00Z","time":"8:00 AM","date":"Tue 7/7","selected":false,"scheduled":true}]},
            {"date":"Wed 7/8","slots":[]}
        ]}"#;
        let week: AvailabilityWeek = serde_json::from_str(json).unwrap();
        assert_eq!(week.page, 2);
        assert_eq!(week.timezone_offset, -240);
        assert_eq!(week.days.len(), 2);
        assert_eq!(week.days[0].slots[0].state(), SlotState::Scheduled);
        assert!(week.days[1].slots.is_empty());
    }

    #[test]
    fn test_put_request_wire_format() {
        let request = PutAvailabilityRequest {
            first_slot: at(12, 0),
            last_slot: at(23, 45),
            marked_slots: vec![at(13, 0)],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["firstSlot"], "2020-07-07T12:00:00Z");
        assert_eq!(value["lastSlot"], "2020-07-07T23:45:00Z");
        assert_eq!(value["markedSlots"][0], "2020-07-07T13:00:00Z");
    }

    #[test]
    fn test_put_request_validation() {
        let ok = PutAvailabilityRequest {
            first_slot: at(12, 0),
            last_slot: at(12, 45),
            marked_slots: vec![at(12, 0), at(12, 45)],
        };
        assert!(ok.validate().is_ok());

        let inverted = PutAvailabilityRequest { first_slot: at(13, 0), last_slot: at(12, 0), marked_slots: vec![] };
        assert_eq!(inverted.validate(), Err(AvailabilityRequestError::InvertedWindow));

        let outside = PutAvailabilityRequest { marked_slots: vec![at(13, 0)], ..ok };
        assert_eq!(outside.validate(), Err(AvailabilityRequestError::SlotOutsideWindow(at(13, 0))));
    }
}

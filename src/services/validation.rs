use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::America::New_York;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::dialog::{Slot, Slots};

const VALID_LOCATIONS: &[&str] = &["manhattan"];
const VALID_CUISINES: &[&str] = &["chinese", "italian", "mexican"];
const MAX_PARTY_SIZE: i64 = 20;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// First slot that failed validation, carrying the re-prompt message shown
/// to the user.
#[derive(Debug, PartialEq, Eq)]
pub enum SlotError {
    UnsupportedLocation(String),
    UnsupportedCuisine(String),
    InvalidDate,
    InvalidTime,
    PartySizeOutOfRange,
    InvalidEmail,
}

impl SlotError {
    pub fn slot_to_elicit(&self) -> &'static str {
        match self {
            SlotError::UnsupportedLocation(_) => "Location",
            SlotError::UnsupportedCuisine(_) => "Cuisine",
            SlotError::InvalidDate => "DiningDate",
            SlotError::InvalidTime => "DiningTime",
            SlotError::PartySizeOutOfRange => "PartySize",
            SlotError::InvalidEmail => "Email",
        }
    }
}

impl std::fmt::Display for SlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotError::UnsupportedLocation(location) => {
                write!(
                    f,
                    "Sorry, {location} is not supported yet. Please try another location."
                )
            }
            SlotError::UnsupportedCuisine(cuisine) => {
                write!(
                    f,
                    "Sorry, {cuisine} is not supported yet. Please try another cuisine."
                )
            }
            SlotError::InvalidDate => {
                write!(f, "The date entered is not valid. Please enter a valid date.")
            }
            SlotError::InvalidTime => {
                write!(f, "The time entered is not valid. Please enter a valid time.")
            }
            SlotError::PartySizeOutOfRange => {
                write!(f, "Please enter a party size between 1 and 20.")
            }
            SlotError::InvalidEmail => {
                write!(f, "Please enter a valid email address.")
            }
        }
    }
}

/// Current wall-clock time at the restaurants (America/New_York).
pub fn business_now() -> NaiveDateTime {
    Utc::now().with_timezone(&New_York).naive_local()
}

fn parse_date(slot: &Slot) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(slot.interpreted(), "%Y-%m-%d").ok()
}

/// Validate the slots collected so far, in fixed order, stopping at the
/// first failure. Slots the engine has not filled yet are skipped; Delegate
/// lets the engine keep prompting for them.
pub fn validate_slots(slots: &Slots, today: NaiveDate, now: NaiveTime) -> Result<(), SlotError> {
    if let Some(location) = &slots.location {
        if !VALID_LOCATIONS.contains(&location.interpreted().to_lowercase().as_str()) {
            return Err(SlotError::UnsupportedLocation(
                location.interpreted().to_string(),
            ));
        }
    }

    if let Some(cuisine) = &slots.cuisine {
        if !VALID_CUISINES.contains(&cuisine.interpreted().to_lowercase().as_str()) {
            return Err(SlotError::UnsupportedCuisine(
                cuisine.interpreted().to_string(),
            ));
        }
    }

    if let Some(date) = &slots.dining_date {
        match parse_date(date) {
            Some(d) if d >= today => {}
            _ => return Err(SlotError::InvalidDate),
        }
    }

    if let Some(time) = &slots.dining_time {
        match NaiveTime::parse_from_str(time.interpreted(), "%H:%M") {
            Ok(t) => {
                // A time only needs checking on same-day requests.
                let is_today = slots.dining_date.as_ref().and_then(parse_date) == Some(today);
                if is_today && t <= now {
                    return Err(SlotError::InvalidTime);
                }
            }
            Err(_) => return Err(SlotError::InvalidTime),
        }
    }

    if let Some(party_size) = &slots.party_size {
        match party_size.interpreted().parse::<i64>() {
            Ok(n) if (1..=MAX_PARTY_SIZE).contains(&n) => {}
            _ => return Err(SlotError::PartySizeOutOfRange),
        }
    }

    if let Some(email) = &slots.email {
        if !EMAIL_PATTERN.is_match(email.interpreted()) {
            return Err(SlotError::InvalidEmail);
        }
    }

    Ok(())
}

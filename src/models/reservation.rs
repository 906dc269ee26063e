use anyhow::Context;

use crate::models::dialog::{Slot, Slots};
use crate::models::queue::{MessageAttribute, MessageAttributes};

/// The six validated slot values of a completed dining request, as carried
/// through the queue between fulfillment and notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    pub location: String,
    pub cuisine: String,
    pub dining_date: String,
    pub dining_time: String,
    pub party_size: String,
    pub email: String,
}

impl ReservationRequest {
    /// Only callable once validation passed on a fulfillment turn, so every
    /// slot is expected to be filled.
    pub fn from_slots(slots: &Slots) -> anyhow::Result<Self> {
        let value = |slot: &Option<Slot>, name: &str| {
            slot.as_ref()
                .map(|s| s.interpreted().to_string())
                .with_context(|| format!("slot {name} missing at fulfillment"))
        };
        Ok(Self {
            location: value(&slots.location, "Location")?,
            cuisine: value(&slots.cuisine, "Cuisine")?,
            dining_date: value(&slots.dining_date, "DiningDate")?,
            dining_time: value(&slots.dining_time, "DiningTime")?,
            party_size: value(&slots.party_size, "PartySize")?,
            email: value(&slots.email, "Email")?,
        })
    }

    pub fn from_attributes(attributes: &MessageAttributes) -> anyhow::Result<Self> {
        let value = |name: &str| {
            attributes
                .get(name)
                .map(|a| a.string_value.clone())
                .with_context(|| format!("message attribute {name} missing"))
        };
        Ok(Self {
            location: value("Location")?,
            cuisine: value("Cuisine")?,
            dining_date: value("DiningDate")?,
            dining_time: value("DiningTime")?,
            party_size: value("PartySize")?,
            email: value("Email")?,
        })
    }

    pub fn to_attributes(&self) -> MessageAttributes {
        let mut attributes = MessageAttributes::new();
        attributes.insert("Location".to_string(), MessageAttribute::string(&self.location));
        attributes.insert("Cuisine".to_string(), MessageAttribute::string(&self.cuisine));
        attributes.insert("DiningDate".to_string(), MessageAttribute::string(&self.dining_date));
        attributes.insert("DiningTime".to_string(), MessageAttribute::string(&self.dining_time));
        attributes.insert("PartySize".to_string(), MessageAttribute::number(&self.party_size));
        attributes.insert("Email".to_string(), MessageAttribute::string(&self.email));
        attributes
    }
}

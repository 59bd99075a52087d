//! Food log entry types.
//!
//! Entries are serialized with the same field names the journal has always
//! stored (`foodName`, `mealType`, `consumedAt`, `imageUrl`), so an existing
//! `foodLogs` value loads unchanged.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Which meal of the day an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Capitalized label for listings ("Breakfast").
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(ValidationError::InvalidValue {
                field: "meal_type".to_string(),
                message: format!("'{other}' is not one of breakfast, lunch, dinner, snack"),
            }),
        }
    }
}

/// One recorded meal observation.
///
/// Entries are immutable once created; the only mutation the log supports is
/// deleting an entry by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLogEntry {
    /// Unique id assigned at creation
    pub id: String,

    /// What was eaten, if the user typed a name
    #[serde(rename = "foodName", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Meal of the day
    pub meal_type: MealType,

    /// When the meal was eaten, as entered. See [`parse_consumed_at`].
    pub consumed_at: String,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Opaque image reference (a `data:` URL); never interpreted
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl FoodLogEntry {
    /// The consumption time as an instant, if `consumed_at` parses.
    pub fn consumed_instant(&self) -> Option<DateTime<Utc>> {
        parse_consumed_at(&self.consumed_at)
    }

    /// Name to show for the entry; image-only entries have none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("image-only")
    }

    /// Lowercased `name + " " + notes`, with missing fields as empty text.
    pub fn haystack(&self) -> String {
        format!(
            "{} {}",
            self.name.as_deref().unwrap_or(""),
            self.notes.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }

    /// Consumption time rendered in local time, falling back to the raw text.
    pub fn consumed_display(&self) -> String {
        match self.consumed_instant() {
            Some(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            None => self.consumed_at.clone(),
        }
    }
}

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a stored consumption time.
///
/// Accepts an RFC 3339 instant, a zone-less wall-clock value
/// (`2024-05-01T12:30`, read as local time), or a bare date (read as UTC
/// midnight). Anything else yields `None`.
pub fn parse_consumed_at(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }

    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|at| at.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Minute-precision local wall-clock text, the default for a new entry.
pub fn local_minute_stamp(now: DateTime<Utc>) -> String {
    now.with_timezone(&Local).format("%Y-%m-%dT%H:%M").to_string()
}

//! The "new entry" form and its validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::entry::{local_minute_stamp, FoodLogEntry, MealType};
use crate::error::ValidationError;

/// How the user describes the meal: by name, by photo, or either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Name,
    Image,
    #[default]
    Both,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputMode::Name => "name",
            InputMode::Image => "image",
            InputMode::Both => "both",
        })
    }
}

impl FromStr for InputMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(InputMode::Name),
            "image" => Ok(InputMode::Image),
            "both" => Ok(InputMode::Both),
            other => Err(ValidationError::InvalidValue {
                field: "input_mode".to_string(),
                message: format!("'{other}' is not one of name, image, both"),
            }),
        }
    }
}

/// Raw form state for logging a meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntryForm {
    pub input_mode: InputMode,
    pub food_name: String,
    pub meal_type: MealType,
    pub consumed_at: String,
    pub notes: String,
    pub image_ref: String,
}

impl LogEntryForm {
    /// A blank form: snack, eaten now.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            input_mode: InputMode::default(),
            food_name: String::new(),
            meal_type: MealType::Snack,
            consumed_at: local_minute_stamp(now),
            notes: String::new(),
            image_ref: String::new(),
        }
    }

    /// Check the form against its input mode.
    ///
    /// # Errors
    ///
    /// Returns the message to show next to the form when a required field is
    /// missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_name = !self.food_name.trim().is_empty();
        let has_image = !self.image_ref.is_empty();

        match self.input_mode {
            InputMode::Name if !has_name => {
                return Err(ValidationError::missing("food_name", "Please enter a food name."));
            }
            InputMode::Image if !has_image => {
                return Err(ValidationError::missing("image", "Please upload an image."));
            }
            InputMode::Both if !has_name && !has_image => {
                return Err(ValidationError::missing(
                    "food_name",
                    "Please provide a food name or upload an image.",
                ));
            }
            _ => {}
        }

        if self.consumed_at.trim().is_empty() {
            return Err(ValidationError::missing(
                "consumed_at",
                "Please enter when the food was consumed.",
            ));
        }

        Ok(())
    }

    /// Validate and build an entry with a fresh id.
    ///
    /// Blank optional fields are stored as absent.
    pub fn into_entry(self) -> Result<FoodLogEntry, ValidationError> {
        self.validate()?;

        Ok(FoodLogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            name: non_blank(self.food_name),
            meal_type: self.meal_type,
            consumed_at: self.consumed_at.trim().to_string(),
            notes: non_blank(self.notes),
            image_ref: non_blank(self.image_ref),
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(mode: InputMode, name: &str, image: &str) -> LogEntryForm {
        LogEntryForm {
            input_mode: mode,
            food_name: name.into(),
            image_ref: image.into(),
            ..LogEntryForm::new(Utc::now())
        }
    }

    #[test]
    fn name_mode_requires_name() {
        let err = form(InputMode::Name, "   ", "data:image/png;base64,AA==").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please enter a food name.");
    }

    #[test]
    fn image_mode_requires_image() {
        let err = form(InputMode::Image, "Toast", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please upload an image.");
    }

    #[test]
    fn both_mode_requires_either() {
        let err = form(InputMode::Both, "", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please provide a food name or upload an image.");
        assert!(form(InputMode::Both, "", "data:image/png;base64,AA==").validate().is_ok());
        assert!(form(InputMode::Both, "Toast", "").validate().is_ok());
    }

    #[test]
    fn blank_time_is_rejected() {
        let mut f = form(InputMode::Name, "Toast", "");
        f.consumed_at = " ".into();
        assert_eq!(f.validate().unwrap_err().field(), Some("consumed_at"));
    }

    #[test]
    fn into_entry_drops_blank_optionals() {
        let mut f = form(InputMode::Both, "  Pasta ", "");
        f.notes = "   ".into();
        let entry = f.into_entry().unwrap();
        assert_eq!(entry.name.as_deref(), Some("Pasta"));
        assert!(entry.notes.is_none());
        assert!(entry.image_ref.is_none());
        assert!(uuid::Uuid::parse_str(&entry.id).is_ok());
    }

    #[test]
    fn new_form_defaults_to_snack_now() {
        let f = LogEntryForm::new(Utc::now());
        assert_eq!(f.meal_type, MealType::Snack);
        assert_eq!(f.input_mode, InputMode::Both);
        assert!(crate::food_log::parse_consumed_at(&f.consumed_at).is_some());
    }
}

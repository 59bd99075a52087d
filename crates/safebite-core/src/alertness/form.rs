//! Alertness form state and its conversion into scorer inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::inference::InferredMealAttributes;
use crate::storage::config::AlertnessConfig;

/// Caffeine note filled in when the last meal mentions a caffeinated drink.
pub const INFERRED_CAFFEINE_NOTE: &str = "1 inferred cup";

/// Self-reported physical activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            other => Err(ValidationError::InvalidValue {
                field: "activity_level".to_string(),
                message: format!("'{other}' is not one of sedentary, light, moderate, active"),
            }),
        }
    }
}

/// Validated inputs to the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertnessInputs {
    /// Hours slept, never negative
    pub sleep_hours: f64,

    /// Sleep as typed, echoed by the report. Blank shows `sleep_hours`.
    #[serde(default)]
    pub sleep_text: String,

    /// Free-text caffeine intake; any non-blank text counts as caffeine
    pub caffeine_note: String,

    pub activity_level: ActivityLevel,

    /// Stress from 1 (calm) to 10
    pub stress_level: u8,
}

impl Default for AlertnessInputs {
    fn default() -> Self {
        Self {
            sleep_hours: 7.0,
            sleep_text: String::new(),
            caffeine_note: String::new(),
            activity_level: ActivityLevel::Moderate,
            stress_level: 5,
        }
    }
}

/// Raw form state as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertnessForm {
    pub sleep_hours: String,
    /// Informational only; the scorer uses the inferred timing.
    pub meal_timing: String,
    pub caffeine_note: String,
    pub activity_level: ActivityLevel,
    pub stress_level: i32,
}

impl Default for AlertnessForm {
    fn default() -> Self {
        Self {
            sleep_hours: "7".to_string(),
            meal_timing: String::new(),
            caffeine_note: String::new(),
            activity_level: ActivityLevel::Moderate,
            stress_level: 5,
        }
    }
}

impl AlertnessForm {
    /// Form pre-filled from the configured defaults.
    pub fn from_config(config: &AlertnessConfig) -> Self {
        Self {
            sleep_hours: config.sleep_hours.to_string(),
            activity_level: config.activity_level,
            stress_level: i32::from(config.stress_level),
            ..Self::default()
        }
    }

    /// Copy what the last logged meal tells us into the form.
    ///
    /// Sets the meal timing text and, when the meal looked caffeinated and no
    /// caffeine note was typed, a placeholder note. Does nothing without an
    /// inferred meal.
    pub fn apply_last_meal(&mut self, inferred: Option<&InferredMealAttributes<'_>>) {
        let Some(inferred) = inferred else {
            return;
        };

        self.meal_timing = inferred
            .hours_since_consumed
            .map(|h| format!("{h:.1} hours ago"))
            .unwrap_or_default();

        if inferred.caffeine_detected && self.caffeine_note.is_empty() {
            self.caffeine_note = INFERRED_CAFFEINE_NOTE.to_string();
        }
    }

    /// Convert into scorer inputs.
    ///
    /// Sleep hours are coerced leniently (see [`coerce_number`]); stress must
    /// be on the 1-10 scale.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the stress level is out of range.
    pub fn validate(&self) -> Result<AlertnessInputs, ValidationError> {
        let stress_level = u8::try_from(self.stress_level)
            .ok()
            .filter(|s| (1..=10).contains(s))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "stress_level".to_string(),
                message: format!("{} is outside 1-10", self.stress_level),
            })?;

        Ok(AlertnessInputs {
            sleep_hours: coerce_number(&self.sleep_hours),
            sleep_text: self.sleep_hours.trim().to_string(),
            caffeine_note: self.caffeine_note.clone(),
            activity_level: self.activity_level,
            stress_level,
        })
    }
}

/// Best-effort numeric parse.
///
/// Reads the longest numeric prefix of `text` ("7.5h" is 7.5). Blank text,
/// text with no numeric prefix, negative and non-finite values all become 0.
pub fn coerce_number(text: &str) -> f64 {
    let text = text.trim_start();
    let prefix_len = numeric_prefix_len(text);

    text[..prefix_len]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
        .unwrap_or(0.0)
}

// sign? digits [. digits] [e sign? digits]
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food_log::{FoodLogEntry, MealType};
    use crate::inference::MealWeight;

    fn latte() -> FoodLogEntry {
        FoodLogEntry {
            id: "1".into(),
            name: Some("Latte".into()),
            meal_type: MealType::Snack,
            consumed_at: "2024-05-01T12:00:00Z".into(),
            notes: None,
            image_ref: None,
        }
    }

    #[test]
    fn coerces_like_a_lenient_float_parse() {
        assert_eq!(coerce_number("7"), 7.0);
        assert_eq!(coerce_number("  6.5 hours"), 6.5);
        assert_eq!(coerce_number(".5"), 0.5);
        assert_eq!(coerce_number("8."), 8.0);
        assert_eq!(coerce_number("1e1"), 10.0);
        assert_eq!(coerce_number("1e"), 1.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("lots"), 0.0);
        assert_eq!(coerce_number("."), 0.0);
        assert_eq!(coerce_number("-3"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
    }

    #[test]
    fn validate_rejects_out_of_range_stress() {
        let form = AlertnessForm { stress_level: 11, ..AlertnessForm::default() };
        assert_eq!(form.validate().unwrap_err().field(), Some("stress_level"));
        let form = AlertnessForm { stress_level: 0, ..AlertnessForm::default() };
        assert!(form.validate().is_err());
        let form = AlertnessForm { stress_level: -4, ..AlertnessForm::default() };
        assert!(form.validate().is_err());
    }

    #[test]
    fn validate_coerces_sleep() {
        let form = AlertnessForm { sleep_hours: "abc".into(), ..AlertnessForm::default() };
        assert_eq!(form.validate().unwrap().sleep_hours, 0.0);
    }

    #[test]
    fn default_form_matches_default_inputs() {
        let inputs = AlertnessForm::default().validate().unwrap();
        assert_eq!(inputs.sleep_text, "7");
        assert_eq!(
            inputs,
            AlertnessInputs {
                sleep_text: "7".into(),
                ..AlertnessInputs::default()
            }
        );
    }

    #[test]
    fn apply_last_meal_fills_timing_and_caffeine() {
        let entry = latte();
        let inferred = InferredMealAttributes {
            hours_since_consumed: Some(2.4),
            meal_weight: MealWeight::Light,
            caffeine_detected: true,
            source_entry: &entry,
        };
        let mut form = AlertnessForm::default();
        form.apply_last_meal(Some(&inferred));
        assert_eq!(form.meal_timing, "2.4 hours ago");
        assert_eq!(form.caffeine_note, INFERRED_CAFFEINE_NOTE);
    }

    #[test]
    fn apply_last_meal_keeps_typed_caffeine_note() {
        let entry = latte();
        let inferred = InferredMealAttributes {
            hours_since_consumed: None,
            meal_weight: MealWeight::Light,
            caffeine_detected: true,
            source_entry: &entry,
        };
        let mut form = AlertnessForm { caffeine_note: "2 espressos".into(), ..AlertnessForm::default() };
        form.apply_last_meal(Some(&inferred));
        assert_eq!(form.meal_timing, "");
        assert_eq!(form.caffeine_note, "2 espressos");
    }

    #[test]
    fn apply_last_meal_without_inference_is_noop() {
        let mut form = AlertnessForm { meal_timing: "noon".into(), ..AlertnessForm::default() };
        form.apply_last_meal(None);
        assert_eq!(form.meal_timing, "noon");
    }

    #[test]
    fn activity_level_parses() {
        assert_eq!("Active".parse::<ActivityLevel>().unwrap(), ActivityLevel::Active);
        assert!("extreme".parse::<ActivityLevel>().is_err());
    }
}

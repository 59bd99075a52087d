//! Meal inference from the latest food log entry.
//!
//! Classification is plain substring matching over the entry's name and
//! notes against fixed keyword tables. The tables are part of the observable
//! behavior; keep them in sync with the tests below.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::food_log::{latest_entry, FoodLogEntry, MealType};

/// Keywords that mark a meal as heavy. Checked before [`LIGHT_KEYWORDS`].
pub const HEAVY_KEYWORDS: &[&str] = &[
    "burger", "pizza", "fried", "steak", "pasta", "curry", "chips", "fries", "ice cream", "heavy",
];

/// Keywords that mark a meal as light.
pub const LIGHT_KEYWORDS: &[&str] = &[
    "salad", "soup", "yogurt", "fruit", "smoothie", "sandwich", "light",
];

/// Keywords that indicate caffeine.
pub const CAFFEINE_KEYWORDS: &[&str] = &[
    "coffee", "espresso", "latte", "tea", "cola", "energy", "matcha",
];

/// How filling a meal was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealWeight {
    Light,
    Heavy,
    #[default]
    Unknown,
}

impl MealWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealWeight::Light => "light",
            MealWeight::Heavy => "heavy",
            MealWeight::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MealWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes derived from the most recent meal. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferredMealAttributes<'a> {
    /// Hours between consumption and the time of inference
    pub hours_since_consumed: Option<f64>,

    /// Heavy/light classification
    pub meal_weight: MealWeight,

    /// Whether the text mentions a caffeinated drink
    pub caffeine_detected: bool,

    /// The entry these attributes were derived from
    pub source_entry: &'a FoodLogEntry,
}

/// Infer attributes from the latest entry in `entries`.
///
/// Returns `None` for an empty log.
pub fn infer_latest_meal(
    entries: &[FoodLogEntry],
    now: DateTime<Utc>,
) -> Option<InferredMealAttributes<'_>> {
    let latest = latest_entry(entries)?;
    let inferred = classify_entry(latest, now);
    tracing::debug!(
        entry_id = %latest.id,
        weight = %inferred.meal_weight,
        caffeine = inferred.caffeine_detected,
        hours = ?inferred.hours_since_consumed,
        "inferred latest meal"
    );
    Some(inferred)
}

/// Classify a single entry.
pub fn classify_entry(entry: &FoodLogEntry, now: DateTime<Utc>) -> InferredMealAttributes<'_> {
    let haystack = entry.haystack();

    InferredMealAttributes {
        hours_since_consumed: entry.consumed_instant().map(|at| hours_between(at, now)),
        meal_weight: meal_weight(&haystack, entry.meal_type),
        caffeine_detected: detect_caffeine(&haystack),
        source_entry: entry,
    }
}

/// Heavy keywords win over light ones; snacks with no keyword count as light.
pub fn meal_weight(haystack: &str, meal_type: MealType) -> MealWeight {
    if contains_any(haystack, HEAVY_KEYWORDS) {
        MealWeight::Heavy
    } else if contains_any(haystack, LIGHT_KEYWORDS) || meal_type == MealType::Snack {
        MealWeight::Light
    } else {
        MealWeight::Unknown
    }
}

pub fn detect_caffeine(haystack: &str) -> bool {
    contains_any(haystack, CAFFEINE_KEYWORDS)
}

/// Elapsed hours from `consumed` to `now`; future times count as zero.
pub fn hours_between(consumed: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - consumed).num_milliseconds();
    (millis as f64 / 3_600_000.0).max(0.0)
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(name: Option<&str>, notes: Option<&str>, meal_type: MealType, at: &str) -> FoodLogEntry {
        FoodLogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.map(String::from),
            meal_type,
            consumed_at: at.into(),
            notes: notes.map(String::from),
            image_ref: None,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T14:00:00Z").unwrap().with_timezone(&Utc)
    }

    #[test]
    fn empty_log_yields_none() {
        assert!(infer_latest_meal(&[], now()).is_none());
    }

    #[test]
    fn cheeseburger_is_heavy_without_caffeine() {
        let log = vec![entry(Some("Cheeseburger"), None, MealType::Lunch, "2024-05-01T12:00:00Z")];
        let inferred = infer_latest_meal(&log, now()).unwrap();
        assert_eq!(inferred.meal_weight, MealWeight::Heavy);
        assert!(!inferred.caffeine_detected);
        assert_eq!(inferred.hours_since_consumed, Some(2.0));
    }

    #[test]
    fn iced_latte_snack_falls_back_to_light() {
        let log = vec![entry(Some("Iced Latte"), None, MealType::Snack, "2024-05-01T13:30:00Z")];
        let inferred = infer_latest_meal(&log, now()).unwrap();
        assert_eq!(inferred.meal_weight, MealWeight::Light);
        assert!(inferred.caffeine_detected);
    }

    #[test]
    fn heavy_beats_light() {
        assert_eq!(meal_weight("fried chicken salad", MealType::Dinner), MealWeight::Heavy);
    }

    #[test]
    fn notes_are_searched() {
        let e = entry(Some("Lunch"), Some("Had a GREEN TEA and soup"), MealType::Lunch, "2024-05-01T12:00:00Z");
        let inferred = classify_entry(&e, now());
        assert_eq!(inferred.meal_weight, MealWeight::Light);
        assert!(inferred.caffeine_detected);
    }

    #[test]
    fn unmatched_non_snack_is_unknown() {
        assert_eq!(meal_weight("rice and beans", MealType::Dinner), MealWeight::Unknown);
    }

    #[test]
    fn multi_word_keyword_matches() {
        assert_eq!(meal_weight("mint ice cream", MealType::Dinner), MealWeight::Heavy);
        assert_eq!(meal_weight("ice and cream", MealType::Dinner), MealWeight::Unknown);
    }

    #[test]
    fn substring_matching_is_literal() {
        // "steak" inside "steakhouse", "tea" inside "steak"
        assert!(detect_caffeine("steakhouse dinner"));
        assert_eq!(meal_weight("steakhouse dinner", MealType::Dinner), MealWeight::Heavy);
    }

    #[test]
    fn source_entry_is_latest() {
        let log = vec![
            entry(Some("Soup"), None, MealType::Lunch, "2024-05-01T12:00:00Z"),
            entry(Some("Pizza"), None, MealType::Dinner, "2024-05-01T13:00:00Z"),
            entry(Some("Fruit"), None, MealType::Breakfast, "2024-05-01T08:00:00Z"),
        ];
        let inferred = infer_latest_meal(&log, now()).unwrap();
        assert_eq!(inferred.source_entry.name.as_deref(), Some("Pizza"));
        assert_eq!(inferred.meal_weight, MealWeight::Heavy);
    }

    #[test]
    fn unparseable_time_leaves_hours_absent() {
        let log = vec![entry(Some("Salad"), None, MealType::Lunch, "around noon")];
        let inferred = infer_latest_meal(&log, now()).unwrap();
        assert!(inferred.hours_since_consumed.is_none());
        assert_eq!(inferred.meal_weight, MealWeight::Light);
    }

    #[test]
    fn future_time_counts_as_zero_hours() {
        let future = now() + Duration::hours(2);
        assert_eq!(hours_between(future, now()), 0.0);
    }
}

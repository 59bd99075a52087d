//! Alertness prediction.
//!
//! Combines the user's answers (sleep, caffeine, activity, stress) with
//! whatever [`inference`](crate::inference) derived from the last logged
//! meal into a 1-10 score, a category and a plain-text report.

mod form;
mod score;

pub use form::{
    coerce_number, ActivityLevel, AlertnessForm, AlertnessInputs, INFERRED_CAFFEINE_NOTE,
};
pub use score::{
    compute_score, raw_score, AlertnessCategory, BASE_SCORE, MAX_SCORE, MIN_SCORE,
    NEUTRAL_SLEEP_HOURS,
};

use indoc::formatdoc;
use serde::Serialize;

use crate::inference::{InferredMealAttributes, MealWeight};

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertnessReport {
    pub score: u8,
    pub category: AlertnessCategory,
    /// Rendered report, ready to print
    pub text: String,
}

/// Score the inputs and render the report.
pub fn analyze(
    inputs: &AlertnessInputs,
    inferred: Option<&InferredMealAttributes<'_>>,
) -> AlertnessReport {
    let score = compute_score(inputs, inferred);
    let category = AlertnessCategory::from_score(score);
    let text = render_report(inputs, inferred, score, category);

    tracing::debug!(score, category = ?category, inferred = inferred.is_some(), "alertness analyzed");

    AlertnessReport {
        score,
        category,
        text,
    }
}

fn render_report(
    inputs: &AlertnessInputs,
    inferred: Option<&InferredMealAttributes<'_>>,
    score: u8,
    category: AlertnessCategory,
) -> String {
    let caffeine_note = if inputs.caffeine_note.is_empty() {
        "none"
    } else {
        inputs.caffeine_note.as_str()
    };
    let inferred_caffeine = if inferred.is_some_and(|i| i.caffeine_detected) {
        "yes"
    } else {
        "no"
    };
    let time_since_meal = inferred
        .and_then(|i| i.hours_since_consumed)
        .map(|h| format!("{h:.1} hrs"))
        .unwrap_or_else(|| "unknown".to_string());
    let meal_weight = inferred.map_or(MealWeight::Unknown, |i| i.meal_weight);
    let sleep = if inputs.sleep_text.is_empty() {
        inputs.sleep_hours.to_string()
    } else {
        inputs.sleep_text.clone()
    };

    let mut report = formatdoc! {"
        Alertness Analysis:
        - Score: {score}/10
        - Sleep: {sleep} hrs
        - Caffeine (user): {caffeine_note}
        - Inferred caffeine: {inferred_caffeine}
        - Time since meal: {time_since_meal}
        - Meal weight: {meal_weight}
        - Activity: {activity}
        - Stress: {stress}/10

        Prediction: {category}

        Recommendations:
        • Maintain regular sleep and light meals.
        • Avoid heavy meals close to important work.
        • Moderate caffeine for sustainable alertness.",
        score = score,
        caffeine_note = caffeine_note,
        inferred_caffeine = inferred_caffeine,
        time_since_meal = time_since_meal,
        meal_weight = meal_weight,
        category = category,
        sleep = sleep,
        activity = inputs.activity_level,
        stress = inputs.stress_level,
    };

    if let Some(inferred) = inferred {
        let entry = inferred.source_entry;
        report.push_str(&format!(
            "\n\nInferred from last logged meal: {} ({}) at {}",
            entry.display_name(),
            entry.meal_type,
            entry.consumed_display()
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food_log::{FoodLogEntry, MealType};
    use crate::inference::classify_entry;
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T14:00:00Z").unwrap().with_timezone(&Utc)
    }

    #[test]
    fn report_without_inference() {
        let report = analyze(&AlertnessInputs::default(), None);
        assert_eq!(report.score, 5);
        assert_eq!(report.category, AlertnessCategory::Moderate);

        let expected = "\
Alertness Analysis:
- Score: 5/10
- Sleep: 7 hrs
- Caffeine (user): none
- Inferred caffeine: no
- Time since meal: unknown
- Meal weight: unknown
- Activity: moderate
- Stress: 5/10

Prediction: Moderate alertness likely

Recommendations:
• Maintain regular sleep and light meals.
• Avoid heavy meals close to important work.
• Moderate caffeine for sustainable alertness.";
        assert_eq!(report.text, expected);
    }

    #[test]
    fn report_with_inference_lists_derived_values() {
        let entry = FoodLogEntry {
            id: "1".into(),
            name: Some("Pepperoni Pizza".into()),
            meal_type: MealType::Dinner,
            consumed_at: "2024-05-01T13:30:00Z".into(),
            notes: Some("with cola".into()),
            image_ref: None,
        };
        let inferred = classify_entry(&entry, now());
        let inputs = AlertnessInputs {
            sleep_hours: 6.5,
            activity_level: ActivityLevel::Sedentary,
            stress_level: 7,
            ..AlertnessInputs::default()
        };

        let report = analyze(&inputs, Some(&inferred));
        // 5 - 0.3 - 1.2 - 0.8 + 1.0 - 0.3 = 3.4
        assert_eq!(report.score, 3);
        assert_eq!(report.category, AlertnessCategory::Low);
        assert!(report.text.contains("- Sleep: 6.5 hrs"));
        assert!(report.text.contains("- Inferred caffeine: yes"));
        assert!(report.text.contains("- Time since meal: 0.5 hrs"));
        assert!(report.text.contains("- Meal weight: heavy"));
        assert!(report.text.contains("- Activity: sedentary"));
        assert!(report.text.contains("- Stress: 7/10"));
        assert!(report.text.contains("Prediction: Low alertness predicted"));
        assert!(report
            .text
            .contains("\n\nInferred from last logged meal: Pepperoni Pizza (dinner) at "));
    }

    #[test]
    fn report_echoes_sleep_as_typed() {
        let form = AlertnessForm {
            sleep_hours: "7.5h".into(),
            ..AlertnessForm::default()
        };
        let inputs = form.validate().unwrap();
        assert_eq!(inputs.sleep_hours, 7.5);

        let report = analyze(&inputs, None);
        assert!(report.text.contains("- Sleep: 7.5h hrs"));
        // 5 + 0.3 = 5.3
        assert_eq!(report.score, 5);
    }

    #[test]
    fn image_only_entry_is_named_in_report() {
        let entry = FoodLogEntry {
            id: "1".into(),
            name: None,
            meal_type: MealType::Snack,
            consumed_at: "whenever".into(),
            notes: None,
            image_ref: Some("data:image/png;base64,AA==".into()),
        };
        let inferred = classify_entry(&entry, now());
        let report = analyze(&AlertnessInputs::default(), Some(&inferred));
        assert!(report
            .text
            .ends_with("Inferred from last logged meal: image-only (snack) at whenever"));
    }
}

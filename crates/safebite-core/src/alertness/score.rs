//! The alertness heuristic.
//!
//! A fixed linear sum starting at [`BASE_SCORE`], clamped to
//! [`MIN_SCORE`]..=[`MAX_SCORE`] and rounded. Every term is independent of the
//! others, so the order of accumulation does not matter.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::form::{ActivityLevel, AlertnessInputs};
use crate::inference::{InferredMealAttributes, MealWeight};

pub const BASE_SCORE: f64 = 5.0;
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Sleep duration that contributes nothing to the score.
pub const NEUTRAL_SLEEP_HOURS: f64 = 7.0;
const SLEEP_WEIGHT: f64 = 0.6;

const HEAVY_MEAL_PENALTY: f64 = 1.2;
const LIGHT_MEAL_BONUS: f64 = 0.4;

const RECENT_MEAL_PENALTY: f64 = 0.8;
const DIGESTED_MEAL_BONUS: f64 = 0.3;
const STALE_MEAL_PENALTY: f64 = 0.4;

const REPORTED_CAFFEINE_BONUS: f64 = 0.8;
const INFERRED_CAFFEINE_BONUS: f64 = 1.0;

const NEUTRAL_STRESS: f64 = 5.0;
const STRESS_WEIGHT: f64 = 0.15;

const ACTIVE_BONUS: f64 = 0.5;
const LIGHT_ACTIVITY_BONUS: f64 = 0.2;

/// Unclamped, unrounded score.
pub fn raw_score(inputs: &AlertnessInputs, inferred: Option<&InferredMealAttributes<'_>>) -> f64 {
    let mut score = BASE_SCORE;

    score += (inputs.sleep_hours - NEUTRAL_SLEEP_HOURS) * SLEEP_WEIGHT;

    match inferred.map(|i| i.meal_weight) {
        Some(MealWeight::Heavy) => score -= HEAVY_MEAL_PENALTY,
        Some(MealWeight::Light) => score += LIGHT_MEAL_BONUS,
        Some(MealWeight::Unknown) | None => {}
    }

    if let Some(hours) = inferred.and_then(|i| i.hours_since_consumed) {
        if hours < 1.0 {
            score -= RECENT_MEAL_PENALTY;
        } else if hours <= 3.0 {
            score += DIGESTED_MEAL_BONUS;
        } else {
            score -= STALE_MEAL_PENALTY;
        }
    }

    // A typed note takes priority over what the log suggests.
    if !inputs.caffeine_note.trim().is_empty() {
        score += REPORTED_CAFFEINE_BONUS;
    } else if inferred.is_some_and(|i| i.caffeine_detected) {
        score += INFERRED_CAFFEINE_BONUS;
    }

    score -= (f64::from(inputs.stress_level) - NEUTRAL_STRESS) * STRESS_WEIGHT;

    match inputs.activity_level {
        ActivityLevel::Active => score += ACTIVE_BONUS,
        ActivityLevel::Light => score += LIGHT_ACTIVITY_BONUS,
        ActivityLevel::Moderate | ActivityLevel::Sedentary => {}
    }

    score
}

/// Final score on the 1-10 scale.
pub fn compute_score(inputs: &AlertnessInputs, inferred: Option<&InferredMealAttributes<'_>>) -> u8 {
    let raw = raw_score(inputs, inferred);
    if raw.is_nan() {
        return MIN_SCORE as u8;
    }
    raw.clamp(MIN_SCORE, MAX_SCORE).round() as u8
}

/// Coarse bucket for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertnessCategory {
    High,
    Moderate,
    Low,
}

impl AlertnessCategory {
    pub fn from_score(score: u8) -> Self {
        match score {
            8..=u8::MAX => AlertnessCategory::High,
            5..=7 => AlertnessCategory::Moderate,
            _ => AlertnessCategory::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertnessCategory::High => "High alertness expected",
            AlertnessCategory::Moderate => "Moderate alertness likely",
            AlertnessCategory::Low => "Low alertness predicted",
        }
    }
}

impl fmt::Display for AlertnessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

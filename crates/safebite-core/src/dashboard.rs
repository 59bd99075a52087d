//! Dashboard summary of the open journal.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use std::fmt::Write as _;

use crate::food_log::{FoodLog, MealType};
use crate::session::User;

/// Count of entries for one meal type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealTypeCount {
    pub meal_type: MealType,
    pub count: usize,
}

/// The most recently eaten meal, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestMeal {
    pub id: String,
    pub name: String,
    pub meal_type: MealType,
    pub consumed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub email: String,
    pub total_entries: usize,
    /// Entries eaten since local midnight
    pub entries_today: usize,
    /// One row per meal type, in breakfast-to-snack order
    pub by_meal_type: Vec<MealTypeCount>,
    pub latest: Option<LatestMeal>,
}

impl DashboardSummary {
    pub fn build(user: &User, log: &FoodLog, now: DateTime<Utc>) -> Self {
        let by_meal_type = MealType::ALL
            .iter()
            .map(|&meal_type| MealTypeCount {
                meal_type,
                count: log.entries().iter().filter(|e| e.meal_type == meal_type).count(),
            })
            .collect();

        let entries_today = local_midnight(now)
            .map(|midnight| log.consumed_since(midnight).count())
            .unwrap_or(0);

        let latest = log.latest().map(|e| LatestMeal {
            id: e.id.clone(),
            name: e.display_name().to_string(),
            meal_type: e.meal_type,
            consumed: e.consumed_display(),
        });

        Self {
            email: user.email.clone(),
            total_entries: log.len(),
            entries_today,
            by_meal_type,
            latest,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Welcome back, {}", self.email);
        let _ = writeln!(out);
        let _ = writeln!(out, "Meals logged: {}", self.total_entries);
        let _ = writeln!(out, "Eaten today: {}", self.entries_today);
        for row in &self.by_meal_type {
            let _ = writeln!(out, "  {:<10} {}", row.meal_type.label(), row.count);
        }
        let _ = writeln!(out);
        match &self.latest {
            Some(latest) => {
                let _ = write!(
                    out,
                    "Last meal: {} ({}) at {}",
                    latest.name, latest.meal_type, latest.consumed
                );
            }
            None => out.push_str("No meals logged yet."),
        }
        out
    }
}

fn local_midnight(now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let midnight = now.with_timezone(&Local).date_naive().and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
}

//! "Predict cause" form: which food might be behind a symptom.

use indoc::formatdoc;
use serde::{Deserialize, Serialize};

use super::require;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CauseForm {
    /// e.g. "Headache, stomach discomfort, fatigue"
    pub symptom: String,
    /// 1-10, shown as typed
    pub severity: String,
    /// e.g. "2 hours, all day"
    pub duration: String,
    /// Foods eaten before the symptom started
    pub suspected_foods: String,
    #[serde(default)]
    pub additional_info: String,
}

impl Default for CauseForm {
    fn default() -> Self {
        Self {
            symptom: String::new(),
            severity: "5".to_string(),
            duration: String::new(),
            suspected_foods: String::new(),
            additional_info: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CauseReport {
    pub text: String,
}

impl CauseForm {
    /// # Errors
    ///
    /// Returns the message for the first blank required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.symptom, "symptom", "symptom")?;
        require(&self.duration, "duration", "duration")?;
        require(&self.suspected_foods, "suspected_foods", "suspected foods")?;
        Ok(())
    }

    /// Validate and render the report.
    pub fn analyze(&self) -> Result<CauseReport, ValidationError> {
        self.validate()?;

        let text = formatdoc! {"
            Based on your input:
            - Symptom: {symptom}
            - Severity: {severity}/10
            - Duration: {duration}
            - Suspected Foods: {foods}

            Potential triggers identified:
            • Common allergens found in mentioned foods
            • Consider keeping a detailed food diary
            • Recommend elimination diet to identify specific triggers
            • Consult with a healthcare professional for personalized advice",
            symptom = self.symptom,
            severity = self.severity,
            duration = self.duration,
            foods = self.suspected_foods,
        };

        Ok(CauseReport { text })
    }
}

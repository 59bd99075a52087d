//! "Medical insight" form: a summary to bring to a healthcare provider.

use indoc::formatdoc;
use serde::{Deserialize, Serialize};

use super::{or_fallback, require};
use crate::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalForm {
    pub symptoms: String,
    pub duration: String,
    /// e.g. "Daily, after meals"
    pub frequency: String,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub current_medications: String,
    #[serde(default)]
    pub dietary_restrictions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicalReport {
    pub text: String,
}

impl MedicalForm {
    /// # Errors
    ///
    /// Returns the message for the first blank required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.symptoms, "symptoms", "symptoms")?;
        require(&self.duration, "duration", "duration")?;
        require(&self.frequency, "frequency", "frequency")?;
        Ok(())
    }

    /// Validate and render the assessment summary.
    pub fn analyze(&self) -> Result<MedicalReport, ValidationError> {
        self.validate()?;

        let text = formatdoc! {"
            Medical Assessment Summary:

            Symptoms Reported: {symptoms}
            Duration: {duration}
            Frequency: {frequency}
            Medical History: {history}
            Current Medications: {medications}
            Dietary Restrictions: {restrictions}

            Preliminary Insights:
            • Based on your symptoms, consider consulting with a healthcare provider
            • Track symptom patterns in relation to specific foods
            • Keep a detailed log for your medical appointments
            • Consider allergy testing if symptoms are consistent

            IMPORTANT DISCLAIMER:
            This is NOT a medical diagnosis. Please consult with qualified healthcare professionals for:
            - Persistent or severe symptoms
            - Sudden changes in health
            - Any concerns about food allergies or intolerances
            - Personalized medical advice

            Recommended Actions:
            1. Schedule an appointment with your primary care physician
            2. Continue logging food intake and symptoms
            3. Share this information with your healthcare provider
            4. Consider consulting an allergist or nutritionist",
            symptoms = self.symptoms,
            duration = self.duration,
            frequency = self.frequency,
            history = or_fallback(&self.medical_history, "Not specified"),
            medications = or_fallback(&self.current_medications, "None reported"),
            restrictions = or_fallback(&self.dietary_restrictions, "None reported"),
        };

        Ok(MedicalReport { text })
    }
}

//! Alertness, cause and medical predictions.

use chrono::Utc;
use clap::{Args, Subcommand};
use safebite_core::alertness::analyze;
use safebite_core::{ActivityLevel, AlertnessForm, CauseForm, Config, MedicalForm};

use super::{open_signed_in, CommandResult};

#[derive(Subcommand)]
pub enum PredictAction {
    /// Predict alertness from sleep, caffeine, activity, stress and the last meal
    Alertness(AlertnessArgs),
    /// Suggest what may have caused a symptom
    Cause(CauseArgs),
    /// Summarize symptoms for a medical conversation
    Medical(MedicalArgs),
}

#[derive(Args)]
pub struct AlertnessArgs {
    /// Hours slept (lenient: "7.5h" reads as 7.5)
    #[arg(long, allow_hyphen_values = true)]
    pub sleep: Option<String>,
    /// Free-text meal timing, e.g. "2 hours ago"
    #[arg(long)]
    pub meal_timing: Option<String>,
    /// Free-text caffeine intake, e.g. "2 cups"
    #[arg(long)]
    pub caffeine: Option<String>,
    /// Activity level (sedentary/light/moderate/active)
    #[arg(long)]
    pub activity: Option<ActivityLevel>,
    /// Stress level from 1 to 10
    #[arg(long, allow_negative_numbers = true)]
    pub stress: Option<i32>,
    /// Pre-fill meal timing and caffeine from the last logged meal
    #[arg(long)]
    pub use_last_meal: bool,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CauseArgs {
    #[arg(long)]
    pub symptom: String,
    /// Severity from 1 to 10
    #[arg(long, default_value = "5")]
    pub severity: String,
    #[arg(long)]
    pub duration: String,
    /// Foods you suspect, comma-separated
    #[arg(long)]
    pub suspected_foods: String,
    #[arg(long, default_value = "")]
    pub additional_info: String,
}

#[derive(Args)]
pub struct MedicalArgs {
    #[arg(long)]
    pub symptoms: String,
    #[arg(long)]
    pub duration: String,
    #[arg(long)]
    pub frequency: String,
    #[arg(long, default_value = "")]
    pub medical_history: String,
    #[arg(long, default_value = "")]
    pub current_medications: String,
    #[arg(long, default_value = "")]
    pub dietary_restrictions: String,
}

pub fn run(action: PredictAction, config: &Config) -> CommandResult {
    match action {
        PredictAction::Alertness(args) => alertness(args, config),
        PredictAction::Cause(args) => cause(args),
        PredictAction::Medical(args) => medical(args),
    }
}

fn alertness(args: AlertnessArgs, config: &Config) -> CommandResult {
    let state = open_signed_in()?;
    let inferred = state.latest_meal(Utc::now());

    let mut form = AlertnessForm::from_config(&config.alertness);
    if let Some(sleep) = args.sleep {
        form.sleep_hours = sleep;
    }
    if let Some(caffeine) = args.caffeine {
        form.caffeine_note = caffeine;
    }
    if let Some(activity) = args.activity {
        form.activity_level = activity;
    }
    if let Some(stress) = args.stress {
        form.stress_level = stress;
    }
    if let Some(meal_timing) = args.meal_timing {
        form.meal_timing = meal_timing;
    }
    if args.use_last_meal {
        if inferred.is_none() {
            eprintln!("No meals logged yet; nothing to pre-fill.");
        }
        form.apply_last_meal(inferred.as_ref());
    }

    let inputs = form.validate()?;
    let report = analyze(&inputs, inferred.as_ref());

    if args.json {
        let output = serde_json::json!({
            "form": {
                "sleep_hours": form.sleep_hours,
                "meal_timing": form.meal_timing,
                "caffeine_note": form.caffeine_note,
                "activity_level": form.activity_level,
                "stress_level": form.stress_level,
            },
            "inferred": inferred,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if !form.meal_timing.is_empty() {
            println!("Meal timing: {}\n", form.meal_timing);
        }
        println!("{}", report.text);
    }
    Ok(())
}

fn cause(args: CauseArgs) -> CommandResult {
    open_signed_in()?;
    let form = CauseForm {
        symptom: args.symptom,
        severity: args.severity,
        duration: args.duration,
        suspected_foods: args.suspected_foods,
        additional_info: args.additional_info,
    };
    println!("{}", form.analyze()?.text);
    Ok(())
}

fn medical(args: MedicalArgs) -> CommandResult {
    open_signed_in()?;
    let form = MedicalForm {
        symptoms: args.symptoms,
        duration: args.duration,
        frequency: args.frequency,
        medical_history: args.medical_history,
        current_medications: args.current_medications,
        dietary_restrictions: args.dietary_restrictions,
    };
    println!("{}", form.analyze()?.text);
    Ok(())
}

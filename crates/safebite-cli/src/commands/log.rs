//! Food log commands.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use safebite_core::food_log::image::load_image_ref;
use safebite_core::{FoodLogEntry, InputMode, LogEntryForm, MealType};

use super::{open_signed_in, CommandResult};

#[derive(Subcommand)]
pub enum LogAction {
    /// Log a meal
    Add {
        /// Food name
        #[arg(long)]
        name: Option<String>,
        /// Meal type (breakfast/lunch/dinner/snack)
        #[arg(long, default_value = "snack")]
        meal_type: MealType,
        /// When it was eaten (RFC 3339 or "YYYY-MM-DD HH:MM" local); defaults to now
        #[arg(long)]
        at: Option<String>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
        /// Photo of the meal, embedded into the log
        #[arg(long)]
        image: Option<PathBuf>,
        /// Which inputs are required (name/image/both)
        #[arg(long, default_value = "both")]
        mode: InputMode,
    },
    /// List logged meals, most recently eaten first
    List {
        /// Keep the order meals were added in instead
        #[arg(long)]
        stored_order: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a meal by id
    Delete {
        /// Entry ID
        id: String,
    },
}

pub fn run(action: LogAction) -> CommandResult {
    match action {
        LogAction::Add {
            name,
            meal_type,
            at,
            notes,
            image,
            mode,
        } => {
            let mut state = open_signed_in()?;

            let image_ref = match image {
                Some(path) => load_image_ref(&path)
                    .map_err(|e| format!("could not read image {}: {e}", path.display()))?,
                None => String::new(),
            };

            let mut form = LogEntryForm::new(Utc::now());
            form.input_mode = mode;
            form.meal_type = meal_type;
            form.food_name = name.unwrap_or_default();
            form.notes = notes.unwrap_or_default();
            form.image_ref = image_ref;
            if let Some(at) = at {
                form.consumed_at = at;
            }

            let entry = state.add_entry(form)?;
            println!("Meal logged: {}", entry.id);
            print_entry(entry);
        }
        LogAction::List { stored_order, json } => {
            let state = open_signed_in()?;
            let entries: Vec<&FoodLogEntry> = if stored_order {
                state.entries().iter().collect()
            } else {
                state.log().recent()
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No meals logged yet.");
            } else {
                for entry in entries {
                    println!("{}", entry.id);
                    print_entry(entry);
                }
            }
        }
        LogAction::Delete { id } => {
            let mut state = open_signed_in()?;
            match state.delete_entry(&id) {
                Some(entry) => println!("Deleted {} ({})", entry.display_name(), entry.id),
                None => return Err(format!("no entry with id {id}").into()),
            }
        }
    }
    Ok(())
}

fn print_entry(entry: &FoodLogEntry) {
    println!("  Name:     {}", entry.display_name());
    println!("  Meal:     {}", entry.meal_type.label());
    println!("  Eaten:    {}", entry.consumed_display());
    if let Some(notes) = &entry.notes {
        println!("  Notes:    {notes}");
    }
    if entry.image_ref.is_some() {
        println!("  Image:    attached");
    }
}

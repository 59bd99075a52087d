//! # Safe Bite Core Library
//!
//! This library provides the core logic for the Safe Bite food journal.
//! Every operation is available through the `safebite` CLI, which is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Food Log**: ordered list of meal entries with validated add and
//!   delete-by-id
//! - **Inference**: keyword classification of the latest meal (heavy/light,
//!   caffeine, hours since eaten)
//! - **Alertness**: fixed linear heuristic turning sleep, caffeine, activity,
//!   stress and the inferred meal into a 1-10 score and report
//! - **Insight**: templated cause and medical reports
//! - **Storage**: key-value persistence and TOML configuration
//!
//! Everything is synchronous and single-threaded. State lives in an explicit
//! [`AppState`] that reads from and writes to a [`KvStore`].
//!
//! ## Key Components
//!
//! - [`AppState`]: owner of the food log and the session
//! - [`infer_latest_meal`]: meal inference
//! - [`alertness::analyze`]: alertness scoring and report
//! - [`Config`]: application configuration management

pub mod alertness;
pub mod dashboard;
pub mod error;
pub mod food_log;
pub mod inference;
pub mod insight;
pub mod session;
pub mod state;
pub mod storage;

pub use alertness::{ActivityLevel, AlertnessCategory, AlertnessForm, AlertnessInputs, AlertnessReport};
pub use dashboard::DashboardSummary;
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use food_log::{FoodLog, FoodLogEntry, InputMode, LogEntryForm, MealType};
pub use inference::{infer_latest_meal, InferredMealAttributes, MealWeight};
pub use insight::{CauseForm, CauseReport, MedicalForm, MedicalReport};
pub use session::{LoginForm, User};
pub use state::AppState;
pub use storage::{Config, FileStore, KvStore, MemoryStore};

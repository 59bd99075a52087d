//! The food log: an ordered list of meal entries.
//!
//! New entries go to the front of the list. [`FoodLog::recent`] re-sorts by
//! consumption time, so a backdated entry lands where it was eaten rather
//! than where it was added.

mod entry;
mod form;
pub mod image;

pub use entry::{local_minute_stamp, parse_consumed_at, FoodLogEntry, MealType};
pub use form::{InputMode, LogEntryForm};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::error::ValidationError;

/// Insertion-ordered collection of [`FoodLogEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodLog {
    entries: Vec<FoodLogEntry>,
}

impl FoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<FoodLogEntry>) -> Self {
        Self { entries }
    }

    /// Entries in stored order.
    pub fn entries(&self) -> &[FoodLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FoodLogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Validate `form` and prepend the resulting entry.
    ///
    /// # Errors
    ///
    /// Returns the form's validation message; the log is left unchanged.
    pub fn add(&mut self, form: LogEntryForm) -> Result<&FoodLogEntry, ValidationError> {
        let entry = form.into_entry()?;
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    /// Remove the entry with `id`, keeping the others in order.
    pub fn delete(&mut self, id: &str) -> Option<FoodLogEntry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Entries sorted by consumption time, newest first.
    ///
    /// Entries with unparseable times sort last; ties keep stored order.
    pub fn recent(&self) -> Vec<&FoodLogEntry> {
        let mut sorted: Vec<&FoodLogEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| Reverse(e.consumed_instant()));
        sorted
    }

    /// The entry with the latest consumption time.
    pub fn latest(&self) -> Option<&FoodLogEntry> {
        latest_entry(&self.entries)
    }

    /// Entries eaten on or after `since`.
    pub fn consumed_since(&self, since: DateTime<Utc>) -> impl Iterator<Item = &FoodLogEntry> {
        self.entries
            .iter()
            .filter(move |e| e.consumed_instant().is_some_and(|at| at >= since))
    }
}

/// Select the entry with the maximum consumption time.
///
/// Unparseable times rank below every parseable one. On ties the earlier
/// entry in `entries` wins.
pub fn latest_entry(entries: &[FoodLogEntry]) -> Option<&FoodLogEntry> {
    entries.iter().reduce(|best, candidate| {
        if candidate.consumed_instant() > best.consumed_instant() {
            candidate
        } else {
            best
        }
    })
}

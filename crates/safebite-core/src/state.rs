//! Application state: the food log and the signed-in user.
//!
//! [`AppState`] is the single owner of both. It reads them from a
//! [`KvStore`] once, on load, and writes back after every change. Storage
//! problems never surface as errors; they are logged and the in-memory state
//! carries on for the rest of the run.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::food_log::{FoodLog, FoodLogEntry, LogEntryForm};
use crate::inference::{infer_latest_meal, InferredMealAttributes};
use crate::session::{LoginForm, User};
use crate::storage::{KvStore, FOOD_LOGS_KEY, USER_KEY};

pub struct AppState<S> {
    store: S,
    log: FoodLog,
    user: Option<User>,
}

impl<S: KvStore> AppState<S> {
    /// Read the log and the remembered user from `store`.
    ///
    /// Missing or unreadable values load as an empty log and no user.
    pub fn load(store: S) -> Self {
        let log = read_json::<FoodLog>(&store, FOOD_LOGS_KEY).unwrap_or_default();
        let user = read_json::<User>(&store, USER_KEY);
        tracing::debug!(entries = log.len(), signed_in = user.is_some(), "state loaded");
        Self { store, log, user }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn log(&self) -> &FoodLog {
        &self.log
    }

    /// Entries in stored order (newest added first).
    pub fn entries(&self) -> &[FoodLogEntry] {
        self.log.entries()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The signed-in user, or [`ValidationError::NotSignedIn`].
    pub fn require_user(&self) -> Result<&User, ValidationError> {
        self.user.as_ref().ok_or(ValidationError::NotSignedIn)
    }

    /// Validate `form`, add the entry and persist the log.
    ///
    /// # Errors
    ///
    /// Returns the form's validation message; nothing is written.
    pub fn add_entry(&mut self, form: LogEntryForm) -> Result<&FoodLogEntry, ValidationError> {
        self.log.add(form)?;
        self.persist_log();
        let entry = &self.log.entries()[0];
        tracing::debug!(entry_id = %entry.id, meal_type = %entry.meal_type, "entry added");
        Ok(entry)
    }

    /// Remove the entry with `id` and persist the remaining log.
    pub fn delete_entry(&mut self, id: &str) -> Option<FoodLogEntry> {
        let removed = self.log.delete(id)?;
        self.persist_log();
        tracing::debug!(entry_id = %removed.id, "entry deleted");
        Some(removed)
    }

    /// Attributes of the latest meal, `None` for an empty log.
    pub fn latest_meal(&self, now: DateTime<Utc>) -> Option<InferredMealAttributes<'_>> {
        infer_latest_meal(self.log.entries(), now)
    }

    /// Sign in. The user is written to the store only when `form.remember`.
    ///
    /// # Errors
    ///
    /// Returns the form's validation message when a credential is blank.
    pub fn login(&mut self, form: &LoginForm) -> Result<&User, ValidationError> {
        let user = form.validate()?;
        if form.remember {
            write_json(&mut self.store, USER_KEY, &user);
        }
        tracing::debug!(email = %user.email, remember = form.remember, "signed in");
        let user: &User = self.user.insert(user);
        Ok(user)
    }

    /// Sign out and forget the remembered user.
    pub fn logout(&mut self) -> Option<User> {
        if let Err(e) = self.store.remove(USER_KEY) {
            tracing::warn!(error = %e, "could not clear remembered user");
        }
        self.user.take()
    }

    fn persist_log(&mut self) {
        write_json(&mut self.store, FOOD_LOGS_KEY, &self.log);
    }
}

fn write_json<T: serde::Serialize>(store: &mut impl KvStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not serialize value");
            return;
        }
    };
    if let Err(e) = store.set(key, &raw) {
        tracing::warn!(key, error = %e, "store unavailable; keeping change in memory only");
    }
}

fn read_json<T: serde::de::DeserializeOwned>(store: &impl KvStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(key, error = %e, "store unavailable; starting empty");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable stored value");
            None
        }
    }
}

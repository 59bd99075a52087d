//! Mock sign-in.
//!
//! There are no accounts: any non-empty email and password pair signs in.
//! The session only exists to gate the rest of the application and to show
//! whose journal is open.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The signed-in user, as remembered in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Keep the user signed in across runs
    pub remember: bool,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember: true,
        }
    }

    /// Check the credentials are present. Their values are never checked.
    ///
    /// # Errors
    ///
    /// Returns "Please enter an email" or "Please enter a password".
    pub fn validate(&self) -> Result<User, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::missing("email", "Please enter an email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::missing("password", "Please enter a password"));
        }
        Ok(User {
            email: email.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_non_empty_pair_is_accepted() {
        let user = LoginForm::new(" me@example.com ", "x").validate().unwrap();
        assert_eq!(user.email, "me@example.com");
    }

    #[test]
    fn email_checked_before_password() {
        let err = LoginForm::new("", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please enter an email");
        let err = LoginForm::new("me@example.com", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "Please enter a password");
    }

    #[test]
    fn user_record_shape() {
        let json = serde_json::to_string(&User { email: "a@b.c".into() }).unwrap();
        assert_eq!(json, r#"{"email":"a@b.c"}"#);
    }
}

//! Required-field checks and the user-facing messages they produce.

use crate::error::CoreError;

pub const MSG_FIRST_NAME_REQUIRED: &str = "Enter a first name.";
pub const MSG_LAST_NAME_REQUIRED: &str = "Enter a last name.";
pub const MSG_USERNAME_REQUIRED: &str = "Enter a username.";
pub const MSG_PASSWORD_REQUIRED: &str = "Enter a password.";

/// Return the value when it is present and not blank, otherwise a
/// [`CoreError::Validation`] carrying `message`.
///
/// The value is returned untrimmed; usernames are compared exactly.
pub fn require<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::Validation(message.to_string())),
    }
}

/// Message for a username that is already registered.
pub fn username_taken_message(username: &str) -> String {
    format!("Username {username} already exists.")
}

//! Collect field validation results for a whole form

use super::validators::FieldResult;
use crate::core::error::{FieldValidationError, ValidationError};

/// Accumulates the first failing rule of every field, in form order
///
/// # Usage
///
/// ```rust,ignore
/// let result = FormValidator::new()
///     .field("email", [required(&json!(email_input)), email(&email_input)])
///     .field("password", [password(&password_input)])
///     .finish();
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    errors: Vec<FieldValidationError>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a field against its rules; only the first failure is kept
    pub fn field(mut self, name: &str, rules: impl IntoIterator<Item = FieldResult>) -> Self {
        if let Some(message) = rules.into_iter().find_map(Result::err) {
            self.errors.push(FieldValidationError {
                field: name.to_string(),
                message,
            });
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors collected so far
    pub fn errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    /// Message of the first failing rule of `name`
    pub fn error_for(&self, name: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == name)
            .map(|e| e.message.as_str())
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

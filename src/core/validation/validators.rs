//! Reusable field validators
//!
//! Pure checks used by form bindings. Each returns `Ok(())` when the value
//! is acceptable and `Err(message)` with the text to display otherwise.
//! None of them panics on any string or JSON input.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Outcome of a single field check
pub type FieldResult = Result<(), String>;

pub const REQUIRED_MESSAGE: &str = "Champs requis.";
pub const EMAIL_MESSAGE: &str = "Adresse email invalide.";
pub const PASSWORD_MESSAGE: &str = "Le mot de passe doit contenir au moins 8 caractères dont 1 lettre majuscule, 1 lettre minuscule, 1 chiffre et 1 caractère spécial.";
pub const PASSWORD_CONFIRMATION_MESSAGE: &str =
    "La confirmation du mot de passe doit être identique au mot de passe.";
pub const FLOAT_MESSAGE: &str = "Veuillez entrer un nombre valide.";
pub const DATE_MESSAGE: &str = "Veuillez entrer une date valide.";

/// Characters accepted as the "special" class of a password
pub const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&";

const PASSWORD_MIN_LEN: usize = 8;

fn check(valid: bool, message: &str) -> FieldResult {
    if valid {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Validator: value is present
///
/// `null`, `""` and `false` are missing; numeric zero counts as present.
pub fn required(value: &Value) -> FieldResult {
    let present = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(_) | Value::Array(_) | Value::Object(_) => true,
    };
    check(present, REQUIRED_MESSAGE)
}

/// Validator: `local@domain.tld` with a TLD of at least 2 letters
pub fn email(value: &str) -> FieldResult {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
    check(regex.is_match(value), EMAIL_MESSAGE)
}

/// Validator: strong password
///
/// At least 8 characters drawn from letters, digits and `@$!%*?&`, with at
/// least one lowercase letter, one uppercase letter, one digit and one
/// special character.
pub fn password(value: &str) -> FieldResult {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIAL_CHARS.contains(c));
    let valid = allowed
        && value.chars().count() >= PASSWORD_MIN_LEN
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));
    check(valid, PASSWORD_MESSAGE)
}

/// Validator: confirmation is exactly the password (case and whitespace sensitive)
pub fn password_confirmation(value: &str, password: &str) -> FieldResult {
    check(value == password, PASSWORD_CONFIRMATION_MESSAGE)
}

/// Validator: non-negative number with at most 2 decimals
pub fn is_float(value: &str) -> FieldResult {
    static FLOAT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = FLOAT_REGEX.get_or_init(|| Regex::new(r"^\d+(\.\d{1,2})?$").unwrap());
    check(regex.is_match(value), FLOAT_MESSAGE)
}

/// Validator: `DD/MM/YYYY` digit grouping (shape only, no calendar check)
pub fn is_date(value: &str) -> FieldResult {
    static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DATE_REGEX.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap());
    check(regex.is_match(value), DATE_MESSAGE)
}

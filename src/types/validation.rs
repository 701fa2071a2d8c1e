use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::error::AppError;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";

/// Per-field error messages, keyed by the request field name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(" "))?;
        }
        Ok(())
    }
}

/// Reads a JSON object one field at a time and collects every problem before failing.
///
/// In full mode (create, replace) missing required fields are errors. In partial mode
/// (patch) only the fields present in the body are read. Keys the reader never asks
/// for are ignored, which is how read-only fields such as `id` or `user` are dropped.
pub struct FieldReader {
    body: Map<String, Value>,
    partial: bool,
    errors: FieldErrors,
}

impl FieldReader {
    pub fn new(body: Map<String, Value>, partial: bool) -> Self {
        Self { body, partial, errors: FieldErrors::default() }
    }

    /// Must be present on a full write; never null.
    pub fn required<T: DeserializeOwned>(&mut self, field: &str) -> Option<T> {
        match self.body.remove(field) {
            None => {
                if !self.partial {
                    self.errors.add(field, REQUIRED);
                }
                None
            }
            Some(Value::Null) => {
                self.errors.add(field, NOT_NULL);
                None
            }
            Some(v) => self.parse(field, v),
        }
    }

    /// May be omitted; never null.
    pub fn optional<T: DeserializeOwned>(&mut self, field: &str) -> Option<T> {
        match self.body.remove(field) {
            None => None,
            Some(Value::Null) => {
                self.errors.add(field, NOT_NULL);
                None
            }
            Some(v) => self.parse(field, v),
        }
    }

    /// May be omitted or null. `Some(None)` means "clear the column".
    pub fn nullable<T: DeserializeOwned>(&mut self, field: &str) -> Option<Option<T>> {
        match self.body.remove(field) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(v) => self.parse(field, v).map(Some),
        }
    }

    /// Optional enumerated value; anything outside `T` is reported as an invalid choice.
    pub fn choice<T: DeserializeOwned>(&mut self, field: &str) -> Option<T> {
        match self.body.remove(field) {
            None => None,
            Some(Value::Null) => {
                self.errors.add(field, NOT_NULL);
                None
            }
            Some(v) => match serde_json::from_value::<T>(v.clone()) {
                Ok(choice) => Some(choice),
                Err(_) => {
                    self.errors.add(field, invalid_choice(&v));
                    None
                }
            },
        }
    }

    /// Runs `rule` on a value that was read successfully.
    pub fn check<T>(
        &mut self,
        field: &str,
        value: Option<T>,
        rule: impl FnOnce(&T) -> Result<(), String>,
    ) -> Option<T> {
        let value = value?;
        match rule(&value) {
            Ok(()) => Some(value),
            Err(message) => {
                self.errors.add(field, message);
                None
            }
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, AppError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(AppError::Validation(self.errors))
        }
    }

    fn parse<T: DeserializeOwned>(&mut self, field: &str, value: Value) -> Option<T> {
        match serde_json::from_value::<T>(value) {
            Ok(v) => Some(v),
            Err(e) => {
                self.errors.add(field, format!("Invalid value: {e}."));
                None
            }
        }
    }
}

pub fn invalid_choice(raw: &Value) -> String {
    match raw {
        Value::String(s) => format!("\"{s}\" is not a valid choice."),
        other => format!("\"{other}\" is not a valid choice."),
    }
}

pub fn not_blank(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(NOT_BLANK.to_string());
    }
    Ok(())
}

pub fn max_length(value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("Ensure this field has no more than {max} characters."));
    }
    Ok(())
}

pub fn text(value: &str, max: Option<usize>) -> Result<(), String> {
    not_blank(value)?;
    match max {
        Some(max) => max_length(value, max),
        None => Ok(()),
    }
}

pub fn nullable_text(value: &Option<String>, max: Option<usize>) -> Result<(), String> {
    match (value, max) {
        (Some(v), Some(max)) => max_length(v, max),
        _ => Ok(()),
    }
}

pub fn username(value: &str) -> Result<(), String> {
    text(value, Some(150))?;
    let ok = value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !ok {
        return Err("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.".to_string());
    }
    Ok(())
}

/// Blank is allowed; anything else needs a local part and a dotted domain.
pub fn email(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    max_length(value, 254)?;
    let invalid = || Err("Enter a valid email address.".to_string());
    let Some((local, domain)) = value.rsplit_once('@') else {
        return invalid();
    };
    if local.is_empty() || value.chars().any(char::is_whitespace) {
        return invalid();
    }
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !domain.ends_with('.') => Ok(()),
        _ => invalid(),
    }
}

/// Fixed-point check matching a `NUMERIC(max_digits, places)` column.
pub fn decimal(value: &Decimal, max_digits: u32, places: u32) -> Result<(), String> {
    let normalized = value.normalize();
    if normalized.scale() > places {
        return Err(format!("Ensure that there are no more than {places} decimal places."));
    }
    let whole = normalized.trunc().abs();
    let whole_digits = if whole.is_zero() { 0 } else { whole.to_string().len() as u32 };
    if whole_digits > max_digits - places {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            max_digits - places
        ));
    }
    Ok(())
}

pub fn non_negative(value: &Decimal) -> Result<(), String> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err("Ensure this value is greater than or equal to 0.".to_string());
    }
    Ok(())
}

pub fn within(value: i32, min: i32, max: i32) -> Result<(), String> {
    if value < min || value > max {
        return Err(invalid_choice(&Value::from(value)));
    }
    Ok(())
}

//! Field-level validation shared by the request models.

use crate::core::{AppError, Result};

/// Column width for names, categories and emails
pub const MAX_NAME_LENGTH: usize = 255;
/// Column width for transaction descriptions
pub const MAX_DESCRIPTION_LENGTH: usize = 512;
/// Column width for icon identifiers
pub const MAX_ICON_LENGTH: usize = 64;

/// Trims a required text field and rejects it when blank or longer than
/// `MAX_NAME_LENGTH` characters.
pub fn required_text(field: &str, value: &str) -> Result<String> {
    required_text_max(field, value, MAX_NAME_LENGTH)
}

/// `required_text` with an explicit character limit.
pub fn required_text_max(field: &str, value: &str, max_chars: usize) -> Result<String> {
    let trimmed = bounded_text(field, value, max_chars)?;
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(trimmed)
}

/// Trims an optional text field and rejects it when longer than `max_chars`.
pub fn bounded_text(field: &str, value: &str, max_chars: usize) -> Result<String> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();
    if length > max_chars {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters, got {}",
            field, max_chars, length
        )));
    }
    Ok(trimmed.to_string())
}

/// Accepts `#RRGGBB` with hex digits in either case.
pub fn hex_color(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !valid {
        return Err(AppError::validation(format!(
            "{} must be a color in #RRGGBB format, got '{}'",
            field, value
        )));
    }
    Ok(value.to_string())
}

/// Normalises an email (trimmed, lower-cased) and checks it has the shape
/// `local@domain.tld` without whitespace.
pub fn email(value: &str) -> Result<String> {
    let normalized = value.trim().to_lowercase();

    let shaped = match normalized.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .rsplit_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    };

    if !shaped
        || normalized.chars().any(char::is_whitespace)
        || normalized.chars().count() > MAX_NAME_LENGTH
    {
        return Err(AppError::validation(format!("Invalid email: '{}'", value.trim())));
    }
    Ok(normalized)
}

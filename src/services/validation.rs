//! Input checks shared by the services. Each returns the message the caller
//! should surface as a validation error.

/// Trims a required text field, rejecting blank input.
pub fn require_text(field: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field. Blank input becomes `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

pub fn require_positive(field: &str, value: i32) -> Result<i32, String> {
    if value <= 0 {
        return Err(format!("{field} must be greater than zero"));
    }
    Ok(value)
}

/// A PIN is exactly four ASCII digits.
pub fn validate_pin(pin: &str) -> Result<&str, String> {
    if pin.len() != 4 || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err("PIN must be exactly 4 digits".to_string());
    }
    Ok(pin)
}

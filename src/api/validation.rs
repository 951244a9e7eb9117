use chrono::NaiveDate;

use super::ApiError;
use crate::domain::Role;

pub fn validate_id(kind: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {kind} ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

pub fn parse_role(role: &str) -> Result<Role, ApiError> {
    role.parse()
        .map_err(|e: crate::domain::UnknownVariant| ApiError::validation(e.to_string()))
}

/// Parses an optional `YYYY-MM-DD` query value. Blank means "not given".
pub fn parse_date(date: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ApiError::validation(format!("Invalid date: '{raw}'. Expected YYYY-MM-DD"))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("location", 1).is_ok());
        assert!(validate_id("location", 0).is_err());
        assert!(validate_id("task", -5).is_err());
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("barista").unwrap(), Role::Barista);
        assert!(parse_role("owner").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(None).unwrap(), None);
        assert_eq!(parse_date(Some(" ")).unwrap(), None);
        assert_eq!(
            parse_date(Some("2026-03-01")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert!(parse_date(Some("01/03/2026")).is_err());
    }
}

//! Input validation shared by the session's create and edit flows
//!
//! These checks never touch the store. A failure is always recoverable:
//! the session reports it and re-enters the same state.

use thiserror::Error;

use crate::core::entity::title_case;

/// Rejected operator input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("'{input}' is not a valid salary (expected a non-negative number)")]
    InvalidSalary { input: String },

    #[error("'{input}' is not a first and last name (expected e.g. 'Jane Doe')")]
    InvalidFullName { input: String },

    #[error("{field} must be a single word, got '{input}'")]
    MultiWordName { field: &'static str, input: String },
}

/// Require non-blank text and normalize it to title case
pub fn require_text(field: &'static str, input: &str) -> Result<String, ValidationError> {
    let normalized = title_case(input);
    if normalized.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(normalized)
}

/// Require a single-word name, title-cased
///
/// The edit flow looks employees up by "first last", so neither half may
/// contain whitespace.
pub fn require_name(field: &'static str, input: &str) -> Result<String, ValidationError> {
    let name = require_text(field, input)?;
    if name.split_whitespace().count() > 1 {
        return Err(ValidationError::MultiWordName {
            field,
            input: input.trim().to_string(),
        });
    }
    Ok(name)
}

/// Parse a non-negative, finite salary
pub fn parse_salary(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "Salary" });
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != ',' && *c != '$').collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ValidationError::InvalidSalary {
            input: trimmed.to_string(),
        }),
    }
}

/// Split "first last" into title-cased parts; exactly two words are required
pub fn split_full_name(input: &str) -> Result<(String, String), ValidationError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.as_slice() {
        [] => Err(ValidationError::Empty { field: "Name" }),
        [first, last] => Ok((title_case(first), title_case(last))),
        _ => Err(ValidationError::InvalidFullName {
            input: input.trim().to_string(),
        }),
    }
}

/// Format a salary for display
pub fn format_salary(salary: f64) -> String {
    format!("{:.2}", salary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("Name", "  sales "), Ok("Sales".to_string()));
        assert_eq!(
            require_text("Name", "   "),
            Err(ValidationError::Empty { field: "Name" })
        );
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name("First name", " mary "), Ok("Mary".to_string()));
        assert_eq!(
            require_name("First name", ""),
            Err(ValidationError::Empty { field: "First name" })
        );
        assert_eq!(
            require_name("First name", "mary ann"),
            Err(ValidationError::MultiWordName {
                field: "First name",
                input: "mary ann".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_salary() {
        assert_eq!(parse_salary("80000"), Ok(80000.0));
        assert_eq!(parse_salary(" 1,250.50 "), Ok(1250.5));
        assert_eq!(parse_salary("$0"), Ok(0.0));
        assert_eq!(parse_salary(""), Err(ValidationError::Empty { field: "Salary" }));
        assert!(matches!(
            parse_salary("-1"),
            Err(ValidationError::InvalidSalary { .. })
        ));
        assert!(matches!(
            parse_salary("lots"),
            Err(ValidationError::InvalidSalary { .. })
        ));
        assert!(parse_salary("inf").is_err());
        assert!(parse_salary("NaN").is_err());
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(
            split_full_name("jane doe"),
            Ok(("Jane".to_string(), "Doe".to_string()))
        );
        assert_eq!(
            split_full_name("  Jane    Doe "),
            Ok(("Jane".to_string(), "Doe".to_string()))
        );
        assert_eq!(split_full_name(" "), Err(ValidationError::Empty { field: "Name" }));
        assert!(matches!(
            split_full_name("Jane"),
            Err(ValidationError::InvalidFullName { .. })
        ));
        assert!(matches!(
            split_full_name("Mary Jane Doe"),
            Err(ValidationError::InvalidFullName { .. })
        ));
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(80000.0), "80000.00");
        assert_eq!(format_salary(1250.5), "1250.50");
    }
}

//! Validation of submitted parameter values against a job schema.
//!
//! The control surface collects raw string values; before a job is scheduled
//! every value must parse according to its parameter kind. All violations
//! are collected so a form round-trip reports everything at once.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{JobSchema, ParameterDefinition, ParameterKind};
use crate::error::ValidationError;

/// Date format accepted for DATE parameters
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time format accepted for DATETIME parameters
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Validate raw string values against the schema.
///
/// Returns every violation found; `Ok(())` means the values are schedulable.
pub fn validate_values(
    schema: &JobSchema,
    values: &HashMap<String, String>,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for key in values.keys() {
        if schema.parameter(key).is_none() {
            errors.push(ValidationError::UnknownParameter(key.clone()));
        }
    }

    for parameter in &schema.parameters {
        match values.get(&parameter.name) {
            None => {
                if parameter.required {
                    errors.push(ValidationError::MissingRequired(parameter.name.clone()));
                }
            }
            Some(value) if value.trim().is_empty() => {
                if parameter.required {
                    errors.push(ValidationError::MissingRequired(parameter.name.clone()));
                }
            }
            Some(value) => {
                if let Err(error) = check_value(parameter, value) {
                    errors.push(error);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_value(parameter: &ParameterDefinition, value: &str) -> Result<(), ValidationError> {
    let name = &parameter.name;
    match parameter.kind {
        ParameterKind::String | ParameterKind::Multiline => Ok(()),
        ParameterKind::Integer => value
            .trim()
            .parse::<i64>()
            .map(|_| ())
            .map_err(|_| ValidationError::NotAnInteger(name.clone())),
        ParameterKind::Boolean => {
            let lowered = value.trim().to_ascii_lowercase();
            if lowered == "true" || lowered == "false" {
                Ok(())
            } else {
                Err(ValidationError::NotABoolean(name.clone()))
            }
        }
        ParameterKind::Date => NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
            .map(|_| ())
            .map_err(|_| ValidationError::NotADate(name.clone())),
        ParameterKind::DateTime => NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT)
            .map(|_| ())
            .map_err(|_| ValidationError::NotADateTime(name.clone())),
        ParameterKind::Enum => check_enum_member(parameter, value.trim()),
        ParameterKind::MultiEnum => {
            // Comma-separated selection; blanks between commas are ignored
            for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                check_enum_member(parameter, entry)?;
            }
            Ok(())
        }
    }
}

fn check_enum_member(parameter: &ParameterDefinition, entry: &str) -> Result<(), ValidationError> {
    if parameter.enum_values.iter().any(|v| v == entry) {
        Ok(())
    } else {
        Err(ValidationError::UnknownEnumValue(
            parameter.name.clone(),
            entry.to_string(),
        ))
    }
}

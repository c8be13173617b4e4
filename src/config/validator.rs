use thiserror::Error;

use crate::config::{FormSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_form(&settings.form) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_form(form: &FormSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if form.max_depth == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "form.max_depth".to_string(),
                reason: "Depth limit must be greater than 0".to_string(),
            });
        }

        if form.multiline_threshold == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "form.multiline_threshold".to_string(),
                reason: "Threshold must be greater than 0".to_string(),
            });
        }

        if form.raw_key.trim().is_empty() {
            errors.push(ValidationError::MissingField("form.raw_key".to_string()));
        } else if form.raw_key.contains('.') {
            errors.push(ValidationError::InvalidValue {
                field: "form.raw_key".to_string(),
                reason: "Key must not contain '.'".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

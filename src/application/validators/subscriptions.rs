use std::fmt::Display;

use chrono::Utc;

use crate::domain::value_objects::{
    enums::providers::Provider, subscriptions::CreateSubscriptionModel,
};

pub const INVALID_USER_ID: u16 = 100;
pub const INVALID_NAME: u16 = 101;
pub const INVALID_PROVIDER: u16 = 102;
pub const INVALID_EXPIRATION_DATE: u16 = 103;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: u16,
    pub message: String,
}

impl ValidationError {
    pub fn of(code: u16, message: impl Into<String>) -> Self {
        ValidationError {
            code,
            message: message.into(),
        }
    }
}

/// Collected field violations from one validation pass. Insertion order is
/// preserved and nothing is deduplicated; empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn codes(&self) -> Vec<u16> {
        self.errors.iter().map(|error| error.code).collect()
    }
}

impl Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.code, error.message)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SubscriptionValidator: Send + Sync {
    fn validate(&self, model: &CreateSubscriptionModel) -> ValidationResult;
}

/// Checks a creation request field by field. All violations are collected
/// in rule order rather than short-circuiting on the first one.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateSubscriptionValidator;

impl CreateSubscriptionValidator {
    pub fn new() -> Self {
        Self
    }
}

impl SubscriptionValidator for CreateSubscriptionValidator {
    fn validate(&self, model: &CreateSubscriptionModel) -> ValidationResult {
        let mut result = ValidationResult::new();

        if model.user_id.is_none() {
            result.add(ValidationError::of(INVALID_USER_ID, "userId is invalid"));
        }

        if model.name.as_deref().is_none_or(str::is_empty) {
            result.add(ValidationError::of(INVALID_NAME, "name is invalid"));
        }

        let provider_known = model
            .provider
            .as_deref()
            .and_then(Provider::find_by_name)
            .is_some();
        if !provider_known {
            result.add(ValidationError::of(INVALID_PROVIDER, "provider is invalid"));
        }

        // Strictly in the future; the instant itself is not acceptable.
        let expiration_valid = model
            .expiration_date
            .is_some_and(|expiration| expiration > Utc::now());
        if !expiration_valid {
            result.add(ValidationError::of(
                INVALID_EXPIRATION_DATE,
                "expirationDate is invalid",
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_model() -> CreateSubscriptionModel {
        CreateSubscriptionModel {
            user_id: Some(22),
            name: Some("Andrey".to_string()),
            provider: Some("Google".to_string()),
            expiration_date: Some(Utc::now() + Duration::days(10)),
        }
    }

    #[test]
    fn valid_request_passes() {
        let validator = CreateSubscriptionValidator::new();

        let result = validator.validate(&valid_model());

        assert!(!result.has_errors());
    }

    #[test]
    fn code_100_when_user_id_missing() {
        let validator = CreateSubscriptionValidator::new();
        let model = CreateSubscriptionModel {
            user_id: None,
            ..valid_model()
        };

        let result = validator.validate(&model);

        assert_eq!(result.codes(), vec![INVALID_USER_ID]);
    }

    #[test]
    fn code_101_when_name_empty() {
        let validator = CreateSubscriptionValidator::new();
        let model = CreateSubscriptionModel {
            name: Some(String::new()),
            ..valid_model()
        };

        let result = validator.validate(&model);

        assert_eq!(result.codes(), vec![INVALID_NAME]);
    }

    #[test]
    fn code_101_when_name_missing() {
        let validator = CreateSubscriptionValidator::new();
        let model = CreateSubscriptionModel {
            name: None,
            ..valid_model()
        };

        let result = validator.validate(&model);

        assert_eq!(result.codes(), vec![INVALID_NAME]);
    }

    #[test]
    fn code_102_when_provider_unknown() {
        let validator = CreateSubscriptionValidator::new();
        let model = CreateSubscriptionModel {
            provider: Some("dummy".to_string()),
            ..valid_model()
        };

        let result = validator.validate(&model);

        assert_eq!(result.codes(), vec![INVALID_PROVIDER]);
    }

    #[test]
    fn code_103_when_expiration_in_the_past() {
        let validator = CreateSubscriptionValidator::new();
        let model = CreateSubscriptionModel {
            expiration_date: Some(Utc::now() - Duration::days(10)),
            ..valid_model()
        };

        let result = validator.validate(&model);

        assert_eq!(result.codes(), vec![INVALID_EXPIRATION_DATE]);
    }

    #[test]
    fn code_103_when_expiration_missing() {
        let validator = CreateSubscriptionValidator::new();
        let model = CreateSubscriptionModel {
            expiration_date: None,
            ..valid_model()
        };

        let result = validator.validate(&model);

        assert_eq!(result.codes(), vec![INVALID_EXPIRATION_DATE]);
    }

    #[test]
    fn collects_all_violations_in_rule_order() {
        let validator = CreateSubscriptionValidator::new();
        let model = CreateSubscriptionModel {
            user_id: None,
            name: Some(String::new()),
            provider: Some("Google".to_string()),
            expiration_date: Some(Utc::now() - Duration::days(10)),
        };

        let result = validator.validate(&model);

        assert_eq!(
            result.codes(),
            vec![INVALID_USER_ID, INVALID_NAME, INVALID_EXPIRATION_DATE]
        );
    }

    #[test]
    fn every_field_invalid_yields_every_code() {
        let validator = CreateSubscriptionValidator::new();
        let model = CreateSubscriptionModel {
            user_id: None,
            name: Some(String::new()),
            provider: Some("dummy".to_string()),
            expiration_date: Some(Utc::now() - Duration::days(10)),
        };

        let result = validator.validate(&model);

        assert_eq!(
            result.codes(),
            vec![
                INVALID_USER_ID,
                INVALID_NAME,
                INVALID_PROVIDER,
                INVALID_EXPIRATION_DATE
            ]
        );
    }
}

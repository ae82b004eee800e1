use anyhow::{Result, anyhow};

use crate::domain::value_objects::{
    enums::{providers::Provider, subscription_statuses::SubscriptionStatus},
    subscriptions::{CreateSubscriptionModel, SubscriptionModel},
};

#[cfg_attr(test, mockall::automock)]
pub trait SubscriptionMapper: Send + Sync {
    fn map(&self, model: &CreateSubscriptionModel) -> Result<SubscriptionModel>;
}

/// Turns a validated creation request into a fresh Active subscription with
/// no id. Callers run the validator first; a field that is still absent or
/// an unresolvable provider here is a broken precondition and comes back as
/// an error, not a validation result.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateSubscriptionMapper;

impl CreateSubscriptionMapper {
    pub fn new() -> Self {
        Self
    }
}

impl SubscriptionMapper for CreateSubscriptionMapper {
    fn map(&self, model: &CreateSubscriptionModel) -> Result<SubscriptionModel> {
        let provider_name = model
            .provider
            .as_deref()
            .ok_or_else(|| anyhow!("provider is missing on a validated request"))?;
        let provider = Provider::find_by_name(provider_name)
            .ok_or_else(|| anyhow!("no provider named {:?}", provider_name))?;

        Ok(SubscriptionModel {
            id: None,
            user_id: model
                .user_id
                .ok_or_else(|| anyhow!("userId is missing on a validated request"))?,
            name: model
                .name
                .clone()
                .ok_or_else(|| anyhow!("name is missing on a validated request"))?,
            provider,
            status: SubscriptionStatus::Active,
            expiration_date: model
                .expiration_date
                .ok_or_else(|| anyhow!("expirationDate is missing on a validated request"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn maps_request_to_new_active_subscription() {
        let expiration_date = Utc::now() + Duration::days(10);
        let mapper = CreateSubscriptionMapper::new();
        let model = CreateSubscriptionModel {
            user_id: Some(22),
            name: Some("Andrey".to_string()),
            provider: Some("Google".to_string()),
            expiration_date: Some(expiration_date),
        };

        let actual = mapper.map(&model).unwrap();

        assert_eq!(
            actual,
            SubscriptionModel {
                id: None,
                user_id: 22,
                name: "Andrey".to_string(),
                provider: Provider::Google,
                status: SubscriptionStatus::Active,
                expiration_date,
            }
        );
    }

    #[test]
    fn unknown_provider_text_is_an_error() {
        let mapper = CreateSubscriptionMapper::new();
        let model = CreateSubscriptionModel {
            user_id: Some(22),
            name: Some("Andrey".to_string()),
            provider: Some("dummy".to_string()),
            expiration_date: Some(Utc::now() + Duration::days(10)),
        };

        assert!(mapper.map(&model).is_err());
    }

    #[test]
    fn missing_field_is_an_error() {
        let mapper = CreateSubscriptionMapper::new();
        let model = CreateSubscriptionModel {
            user_id: None,
            name: Some("Andrey".to_string()),
            provider: Some("Google".to_string()),
            expiration_date: Some(Utc::now() + Duration::days(10)),
        };

        assert!(mapper.map(&model).is_err());
    }
}

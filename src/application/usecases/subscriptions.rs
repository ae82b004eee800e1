use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::{
    mappers::subscriptions::SubscriptionMapper,
    validators::subscriptions::{SubscriptionValidator, ValidationResult},
};
use crate::domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus,
        subscriptions::{CreateSubscriptionModel, SubscriptionModel},
    },
};

/// Source of the current instant, injected so `expire` is deterministic
/// under test.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("subscription request is invalid: {0}")]
    Validation(ValidationResult),
    #[error("subscription id is required")]
    MissingId,
    #[error("subscription {0} not found")]
    NotFound(i32),
    #[error("subscription {id} is {status}, only active subscriptions can transition")]
    NotActive { id: i32, status: SubscriptionStatus },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

/// Orchestrates the subscription lifecycle: validate → map → upsert for
/// creation, and the Active → Canceled / Active → Expired transitions.
/// Holds no state of its own between calls.
pub struct SubscriptionUseCase<R, V, M, C>
where
    R: SubscriptionRepository + Send + Sync + 'static,
    V: SubscriptionValidator + Send + Sync + 'static,
    M: SubscriptionMapper + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    subscription_repo: Arc<R>,
    validator: Arc<V>,
    mapper: Arc<M>,
    clock: Arc<C>,
}

impl<R, V, M, C> SubscriptionUseCase<R, V, M, C>
where
    R: SubscriptionRepository + Send + Sync + 'static,
    V: SubscriptionValidator + Send + Sync + 'static,
    M: SubscriptionMapper + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<R>, validator: Arc<V>, mapper: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            subscription_repo,
            validator,
            mapper,
            clock,
        }
    }

    pub async fn upsert(&self, model: CreateSubscriptionModel) -> UseCaseResult<SubscriptionModel> {
        let validation_result = self.validator.validate(&model);
        if validation_result.has_errors() {
            warn!(
                codes = ?validation_result.codes(),
                "subscriptions: creation request rejected by validation"
            );
            return Err(SubscriptionError::Validation(validation_result));
        }

        let subscription = self.mapper.map(&model).map_err(|err| {
            error!(error = ?err, "subscriptions: mapping a validated request failed");
            SubscriptionError::Internal(err)
        })?;

        // A request for a user/name/provider combination that already exists
        // adopts the stored row's id, so the upsert renews that subscription
        // instead of inserting a duplicate.
        let existing = self
            .subscription_repo
            .find_by_user_id(subscription.user_id)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscriptions: lookup of existing subscriptions failed");
                SubscriptionError::Internal(err)
            })?;
        let subscription = match existing.into_iter().find(|candidate| {
            candidate.name == subscription.name && candidate.provider == subscription.provider
        }) {
            Some(found) => SubscriptionModel {
                id: found.id,
                ..subscription
            },
            None => subscription,
        };

        let stored = self
            .subscription_repo
            .upsert(subscription)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscriptions: upsert failed");
                SubscriptionError::Internal(err)
            })?;

        info!(
            subscription_id = ?stored.id,
            user_id = stored.user_id,
            "subscriptions: upsert completed"
        );
        Ok(stored)
    }

    pub async fn cancel(&self, id: Option<i32>) -> UseCaseResult<()> {
        let mut subscription = self.find_active(id, "cancel").await?;

        subscription.status = SubscriptionStatus::Canceled;
        self.persist_transition(&subscription, "cancel").await?;

        info!(
            subscription_id = ?subscription.id,
            user_id = subscription.user_id,
            "subscriptions: canceled"
        );
        Ok(())
    }

    pub async fn expire(&self, id: Option<i32>) -> UseCaseResult<()> {
        let mut subscription = self.find_active(id, "expire").await?;

        subscription.status = SubscriptionStatus::Expired;
        subscription.expiration_date = self.clock.now();
        self.persist_transition(&subscription, "expire").await?;

        info!(
            subscription_id = ?subscription.id,
            user_id = subscription.user_id,
            "subscriptions: expired"
        );
        Ok(())
    }

    async fn find_active(&self, id: Option<i32>, operation: &str) -> UseCaseResult<SubscriptionModel> {
        let id = id.ok_or_else(|| {
            warn!(operation, "subscriptions: transition requested without an id");
            SubscriptionError::MissingId
        })?;

        let subscription = self
            .subscription_repo
            .find_by_id(id)
            .await
            .map_err(|err| {
                error!(
                    subscription_id = id,
                    db_error = ?err,
                    "subscriptions: lookup before transition failed"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(subscription_id = id, operation, "subscriptions: not found");
                SubscriptionError::NotFound(id)
            })?;

        if subscription.status != SubscriptionStatus::Active {
            warn!(
                subscription_id = id,
                status = %subscription.status,
                operation,
                "subscriptions: transition rejected, subscription is not active"
            );
            return Err(SubscriptionError::NotActive {
                id,
                status: subscription.status,
            });
        }

        Ok(subscription)
    }

    async fn persist_transition(
        &self,
        subscription: &SubscriptionModel,
        operation: &str,
    ) -> UseCaseResult<()> {
        let updated = self
            .subscription_repo
            .update(subscription)
            .await
            .map_err(|err| {
                error!(
                    subscription_id = ?subscription.id,
                    operation,
                    db_error = ?err,
                    "subscriptions: persisting transition failed"
                );
                SubscriptionError::Internal(err)
            })?;

        // The row vanished between lookup and update.
        if !updated {
            let id = subscription.id.unwrap_or_default();
            warn!(subscription_id = id, operation, "subscriptions: update affected no rows");
            return Err(SubscriptionError::NotFound(id));
        }

        Ok(())
    }
}

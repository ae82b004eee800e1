use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::subscriptions::SubscriptionModel;

/// Persistence gateway for the `subscriptions` table. Every call acquires
/// its own connection; row-level atomicity is delegated to the store.
#[async_trait]
#[automock]
pub trait SubscriptionRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<SubscriptionModel>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<SubscriptionModel>>;

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<SubscriptionModel>>;

    /// Inserts a new row and returns the model with its assigned id.
    async fn insert(&self, subscription: SubscriptionModel) -> Result<SubscriptionModel>;

    /// Full-row overwrite by id. Returns whether a row was actually
    /// affected, so a missing id is visible to the caller.
    async fn update(&self, subscription: &SubscriptionModel) -> Result<bool>;

    /// Insert when the id is absent, update otherwise. The returned model
    /// always carries an id.
    async fn upsert(&self, subscription: SubscriptionModel) -> Result<SubscriptionModel>;

    /// Returns true iff a row was removed.
    async fn delete(&self, id: i32) -> Result<bool>;
}

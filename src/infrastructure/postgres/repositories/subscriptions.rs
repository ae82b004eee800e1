use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    repositories::subscriptions::SubscriptionRepository,
    value_objects::subscriptions::SubscriptionModel,
};
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::subscriptions};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn find_all(&self) -> Result<Vec<SubscriptionModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = subscriptions::table
            .select(SubscriptionEntity::as_select())
            .load::<SubscriptionEntity>(&mut conn)?;

        rows.into_iter().map(SubscriptionModel::try_from).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<SubscriptionModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = subscriptions::table
            .filter(subscriptions::id.eq(id))
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        row.map(SubscriptionModel::try_from).transpose()
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<SubscriptionModel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .select(SubscriptionEntity::as_select())
            .load::<SubscriptionEntity>(&mut conn)?;

        rows.into_iter().map(SubscriptionModel::try_from).collect()
    }

    async fn insert(&self, subscription: SubscriptionModel) -> Result<SubscriptionModel> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let id = insert_into(subscriptions::table)
            .values(&InsertSubscriptionEntity::from(&subscription))
            .returning(subscriptions::id)
            .get_result::<i32>(&mut conn)?;

        Ok(SubscriptionModel {
            id: Some(id),
            ..subscription
        })
    }

    async fn update(&self, subscription: &SubscriptionModel) -> Result<bool> {
        let Some(id) = subscription.id else {
            return Ok(false);
        };
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(subscriptions::table)
            .filter(subscriptions::id.eq(id))
            .set((
                subscriptions::user_id.eq(subscription.user_id),
                subscriptions::name.eq(&subscription.name),
                subscriptions::provider.eq(subscription.provider.to_string()),
                subscriptions::status.eq(subscription.status.to_string()),
                subscriptions::expiration_date.eq(subscription.expiration_date),
            ))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn upsert(&self, subscription: SubscriptionModel) -> Result<SubscriptionModel> {
        match subscription.id {
            None => self.insert(subscription).await,
            Some(_) => {
                self.update(&subscription).await?;
                Ok(subscription)
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(subscriptions::table)
            .filter(subscriptions::id.eq(id))
            .execute(&mut conn)?;

        Ok(affected > 0)
    }
}

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::value_objects::{
    enums::{providers::Provider, subscription_statuses::SubscriptionStatus},
    subscriptions::SubscriptionModel,
};
use crate::infrastructure::postgres::schema::subscriptions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscriptions)]
pub struct SubscriptionEntity {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub provider: String,
    pub status: String,
    pub expiration_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub struct InsertSubscriptionEntity {
    pub user_id: i32,
    pub name: String,
    pub provider: String,
    pub status: String,
    pub expiration_date: DateTime<Utc>,
}

impl TryFrom<SubscriptionEntity> for SubscriptionModel {
    type Error = anyhow::Error;

    fn try_from(entity: SubscriptionEntity) -> Result<Self, Self::Error> {
        let provider = Provider::find_by_name(&entity.provider)
            .ok_or_else(|| anyhow!("stored provider {:?} is unknown", entity.provider))?;
        let status = SubscriptionStatus::from_str(&entity.status)
            .ok_or_else(|| anyhow!("stored status {:?} is unknown", entity.status))?;

        Ok(SubscriptionModel {
            id: Some(entity.id),
            user_id: entity.user_id,
            name: entity.name,
            provider,
            status,
            expiration_date: entity.expiration_date,
        })
    }
}

impl From<&SubscriptionModel> for InsertSubscriptionEntity {
    fn from(model: &SubscriptionModel) -> Self {
        InsertSubscriptionEntity {
            user_id: model.user_id,
            name: model.name.clone(),
            provider: model.provider.to_string(),
            status: model.status.to_string(),
            expiration_date: model.expiration_date,
        }
    }
}

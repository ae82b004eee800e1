use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::{
    providers::Provider, subscription_statuses::SubscriptionStatus,
};

/// A subscription as the domain sees it. Plain value object: structural
/// equality only, `id` is `None` until the store has assigned one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionModel {
    pub id: Option<i32>,
    pub user_id: i32,
    pub name: String,
    pub provider: Provider,
    pub status: SubscriptionStatus,
    pub expiration_date: DateTime<Utc>,
}

/// Incoming creation request. Consumed once by the validator and mapper,
/// never persisted directly; every field may be absent and is checked by
/// the validator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateSubscriptionModel {
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub provider: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}

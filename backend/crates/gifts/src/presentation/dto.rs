//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::Gift;

/// Gift response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    pub condition: String,
    pub posted_by: String,
    pub zipcode: String,
    pub date_added_ms: i64,
    pub age_days: i32,
    pub age_years: i32,
    pub description: String,
    pub image: Option<String>,
}

impl From<&Gift> for GiftResponse {
    fn from(gift: &Gift) -> Self {
        Self {
            id: gift.public_id.clone(),
            name: gift.name.clone(),
            category: gift.category.clone(),
            condition: gift.condition.clone(),
            posted_by: gift.posted_by.clone(),
            zipcode: gift.zipcode.clone(),
            date_added_ms: gift.date_added_ms,
            age_days: gift.age_days,
            age_years: gift.age_years,
            description: gift.description.clone(),
            image: gift.image.clone(),
        }
    }
}

/// Create gift request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGiftRequest {
    pub name: String,
    pub category: String,
    pub condition: String,
    #[serde(default)]
    pub posted_by: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub age_days: i32,
    #[serde(default)]
    pub age_years: i32,
    #[serde(default)]
    pub description: String,
    pub image: Option<String>,
}

/// Search query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub name: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    #[serde(alias = "age_years")]
    pub age_years: Option<i32>,
}

//! Gift Entity

use chrono::Utc;
use kernel::id::{Id, markers};

pub type GiftId = Id<markers::Gift>;

/// Gift catalog entry
#[derive(Debug, Clone)]
pub struct Gift {
    /// Internal UUID identifier
    pub gift_id: GiftId,
    /// External string id used in URLs (unique)
    pub public_id: String,
    pub name: String,
    pub category: String,
    pub condition: String,
    pub posted_by: String,
    pub zipcode: String,
    /// Posting time, unix millis
    pub date_added_ms: i64,
    pub age_days: i32,
    pub age_years: i32,
    pub description: String,
    pub image: Option<String>,
}

impl Gift {
    /// Create a new gift posted now
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        category: String,
        condition: String,
        posted_by: String,
        zipcode: String,
        age_days: i32,
        age_years: i32,
        description: String,
        image: Option<String>,
    ) -> Self {
        let gift_id = GiftId::new();

        Self {
            // The external id mirrors the internal one; uniqueness
            // rides on the UUID
            public_id: gift_id.to_string(),
            gift_id,
            name,
            category,
            condition,
            posted_by,
            zipcode,
            date_added_ms: Utc::now().timestamp_millis(),
            age_days,
            age_years,
            description,
            image,
        }
    }
}

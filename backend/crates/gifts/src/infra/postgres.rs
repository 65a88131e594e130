//! PostgreSQL Repository Implementation

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Gift, GiftId};
use crate::domain::repository::GiftRepository;
use crate::domain::value_object::GiftFilter;
use crate::error::{GiftError, GiftResult};

/// Postgres unique_violation error code
const UNIQUE_VIOLATION: &str = "23505";

const GIFT_COLUMNS: &str = r#"
    gift_id,
    public_id,
    name,
    category,
    condition,
    posted_by,
    zipcode,
    date_added_ms,
    age_days,
    age_years,
    description,
    image
"#;

/// PostgreSQL-backed gift repository
#[derive(Clone)]
pub struct PgGiftRepository {
    pool: PgPool,
}

impl PgGiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl GiftRepository for PgGiftRepository {
    async fn list(&self) -> GiftResult<Vec<Gift>> {
        let rows = sqlx::query_as::<_, GiftRow>(&format!(
            "SELECT {GIFT_COLUMNS} FROM gifts ORDER BY date_added_ms DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GiftRow::into_gift).collect())
    }

    async fn find_by_public_id(&self, public_id: &str) -> GiftResult<Option<Gift>> {
        let row = sqlx::query_as::<_, GiftRow>(&format!(
            "SELECT {GIFT_COLUMNS} FROM gifts WHERE public_id = $1"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GiftRow::into_gift))
    }

    async fn create(&self, gift: &Gift) -> GiftResult<()> {
        sqlx::query(
            r#"
            INSERT INTO gifts (
                gift_id,
                public_id,
                name,
                category,
                condition,
                posted_by,
                zipcode,
                date_added_ms,
                age_days,
                age_years,
                description,
                image
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(gift.gift_id.as_uuid())
        .bind(&gift.public_id)
        .bind(&gift.name)
        .bind(&gift.category)
        .bind(&gift.condition)
        .bind(&gift.posted_by)
        .bind(&gift.zipcode)
        .bind(gift.date_added_ms)
        .bind(gift.age_days)
        .bind(gift.age_years)
        .bind(&gift.description)
        .bind(&gift.image)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db_err) = &err {
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                    return GiftError::DuplicateId;
                }
            }
            GiftError::Database(err)
        })?;

        Ok(())
    }

    async fn search(&self, filter: &GiftFilter) -> GiftResult<Vec<Gift>> {
        // One static statement; absent filters collapse to TRUE and the
        // query planner does the rest
        let rows = sqlx::query_as::<_, GiftRow>(&format!(
            r#"
            SELECT {GIFT_COLUMNS} FROM gifts
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL OR condition = $3)
              AND ($4::int4 IS NULL OR age_years <= $4)
            ORDER BY date_added_ms DESC
            "#
        ))
        .bind(&filter.name_contains)
        .bind(&filter.category)
        .bind(&filter.condition)
        .bind(filter.max_age_years)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GiftRow::into_gift).collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct GiftRow {
    gift_id: Uuid,
    public_id: String,
    name: String,
    category: String,
    condition: String,
    posted_by: String,
    zipcode: String,
    date_added_ms: i64,
    age_days: i32,
    age_years: i32,
    description: String,
    image: Option<String>,
}

impl GiftRow {
    fn into_gift(self) -> Gift {
        Gift {
            gift_id: GiftId::from_uuid(self.gift_id),
            public_id: self.public_id,
            name: self.name,
            category: self.category,
            condition: self.condition,
            posted_by: self.posted_by,
            zipcode: self.zipcode,
            date_added_ms: self.date_added_ms,
            age_days: self.age_days,
            age_years: self.age_years,
            description: self.description,
            image: self.image,
        }
    }
}

//! Repository Traits

use crate::domain::entity::Gift;
use crate::domain::value_object::GiftFilter;
use crate::error::GiftResult;

/// Gift repository trait
#[trait_variant::make(GiftRepository: Send)]
pub trait LocalGiftRepository {
    /// List all gifts, newest first
    async fn list(&self) -> GiftResult<Vec<Gift>>;

    /// Find a gift by its external id
    async fn find_by_public_id(&self, public_id: &str) -> GiftResult<Option<Gift>>;

    /// Create a gift
    async fn create(&self, gift: &Gift) -> GiftResult<()>;

    /// Search with optional filters, newest first
    ///
    /// No matches is an empty list, never an error.
    async fn search(&self, filter: &GiftFilter) -> GiftResult<Vec<Gift>>;
}

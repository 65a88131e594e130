//! Gifts Backend Module
//!
//! Gift catalog: list, fetch, create, and filtered search. Kept
//! deliberately plain - handlers drive the repository directly, and
//! the store's own query engine does the filtering work.

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{GiftError, GiftResult};
pub use infra::postgres::PgGiftRepository;
pub use presentation::router::{gift_router, search_router};

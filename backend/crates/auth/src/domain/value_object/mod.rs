//! Value Object Module

pub mod email;
pub mod password_digest;
pub mod token_version;
pub mod user_id;
pub mod user_name;

//! Application Layer
//!
//! Use cases, token issuing and configuration.

pub mod config;
pub mod login;
pub mod register;
pub mod token;
pub mod update_profile;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::{TokenClaims, TokenError, TokenIssuer};
pub use update_profile::{UpdateProfileInput, UpdateProfileOutput, UpdateProfileUseCase};

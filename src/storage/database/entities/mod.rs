//! Database entities
//!
//! SeaORM entity definitions for the service tables.

pub mod chirp;
pub mod refresh_token;
pub mod user;

pub use chirp::Entity as ChirpEntity;
pub use refresh_token::Entity as RefreshTokenEntity;
pub use user::Entity as UserEntity;

//! # chirpd
//!
//! A short-message ("chirp") publishing service. Clients register,
//! authenticate, and post short text entries; a billing provider's webhook
//! upgrades accounts to the paid tier.
//!
//! The security-bearing core is the [`auth`] module: Argon2 password
//! hashing, HS256 access tokens, an opaque refresh-token ledger, and the
//! ownership-based authorization gate. Everything else is conventional
//! service plumbing around it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use chirpd::config::Config;
//! use chirpd::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use utils::error::{ChirpError, Result};

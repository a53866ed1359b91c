//! Database storage layer
//!
//! SeaORM connection, entities, and migrations.

pub mod entities;
pub mod migration;
mod seaorm_db;

pub use seaorm_db::SeaOrmDatabase;

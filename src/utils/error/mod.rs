//! Error handling module
//!
//! This module defines the service error type and result alias used
//! throughout chirpd.

mod error;

pub use error::{ChirpError, ErrorDetail, ErrorResponse, Result};

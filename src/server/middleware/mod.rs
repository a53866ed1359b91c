//! HTTP middleware

pub mod metrics;

pub use metrics::HitCounterMiddleware;

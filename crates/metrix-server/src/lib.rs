//! metrix server library entry.
//!
//! Thin HTTP service around a `metrix_core::MetricsRegistry`: it defines the
//! service's metric families, instruments every request, and exposes the
//! registry on `/metrics` next to health, readiness, and load-test routes.
//! Consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;

//! Service instrumentation built on the metrix registry.
//!
//! `families` defines every metric family the service records, `middleware`
//! tracks HTTP traffic, and `process` renders process-level gauges that are
//! appended after the registry output on `/metrics`.

pub mod families;
pub mod middleware;
pub mod process;

//! metrix core: in-process metrics registry and text exposition renderer.
//!
//! This crate holds the data model (label sets, metric catalog, series
//! stores) and the renderer. It carries no transport or runtime
//! dependencies; HTTP exposure lives in `metrix-server`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `MetricsError`/`Result` so a bad write or a
//! failed render never takes the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod catalog;
pub mod error;
pub mod labels;
pub mod registry;
pub mod render;
pub mod store;

pub use catalog::{MetricDef, MetricKind};
pub use error::{Result, MetricsError};
pub use labels::{LabelSet, SeriesKey};
pub use registry::MetricsRegistry;
pub use render::CONTENT_TYPE;

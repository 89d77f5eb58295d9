//! Top-level facade crate for metrix.
//!
//! Re-exports the registry core and the HTTP server library so users can
//! depend on a single crate.

pub mod core {
    pub use metrix_core::*;
}

pub mod server {
    pub use metrix_server::*;
}

pub use metrix_core::{LabelSet, MetricKind, MetricsError, MetricsRegistry, CONTENT_TYPE};

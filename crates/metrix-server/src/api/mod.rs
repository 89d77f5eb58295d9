//! Application endpoints: service info, synthetic availability probe, and
//! CPU load generation.

pub mod info;
pub mod load;
pub mod synthetic;

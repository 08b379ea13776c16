//! Reusable utils shared by the xbridge crates and the operator binary.
//! Such as initializing the tracing framework and whatever else.

pub mod logging;

// Re-export tracing crate for convenience.
pub use tracing;

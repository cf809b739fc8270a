// mod.rs - Metric configuration and dispatch module

pub mod registry;
pub mod spec;

// Re-export main types for convenience
pub use registry::{compute_with_spec, MetricRegistry};
pub use spec::MetricSpec;

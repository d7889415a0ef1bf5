//! Color profiling and matching
//!
//! Reduces images to fixed-length color descriptors and ranks stored
//! descriptors by distance to a query.

pub mod descriptor;
pub mod matcher;

pub use descriptor::ColorDescriptor;
pub use matcher::{rank, wasserstein_distance, Ranked};

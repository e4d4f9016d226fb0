pub mod error;
pub mod math;
pub mod layers;
pub mod geometry;
pub mod network;
pub mod report;

// Convenience re-exports
pub use error::{GeometryError, Result};
pub use layers::{LayerDescriptor, LayerKind, PoolKind, Window};
pub use geometry::{propagate, Extent, OutputShape, ResultRow, SpatialState, Warning};
pub use network::{ArchitectureSpec, InputShape};
pub use network::presets::vgg_like;

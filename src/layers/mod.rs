pub mod descriptor;
pub mod window;

pub use descriptor::{LayerDescriptor, LayerKind, PoolKind};
pub use window::Window;

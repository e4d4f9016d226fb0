pub mod input;
pub mod presets;
pub mod spec;

pub use input::InputShape;
pub use spec::ArchitectureSpec;

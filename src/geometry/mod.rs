pub mod propagate;
pub mod row;
pub mod state;

pub use propagate::propagate;
pub use row::{Extent, OutputShape, ResultRow, Warning};
pub use state::SpatialState;

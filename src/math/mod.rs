pub mod arith;

pub use arith::{effective_kernel, floor_div};

pub mod architect;
pub mod transfer;

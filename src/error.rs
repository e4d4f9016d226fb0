use thiserror::Error;

use crate::layers::descriptor::LayerKind;

/// Errors raised while building layer descriptors, input shapes, or while
/// reading and writing architecture files.
///
/// Propagation itself never fails; a degenerate output size is reported as a
/// row warning instead (see `geometry::Warning`).
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("kernel must be at least 1, got {0}")]
    InvalidKernel(i64),

    #[error("stride must be at least 1, got {0}")]
    InvalidStride(i64),

    #[error("dilation must be at least 1, got {0}")]
    InvalidDilation(i64),

    #[error("padding must not be negative, got {0}")]
    NegativePadding(i64),

    #[error("unknown layer type: {0:?}")]
    UnknownLayerType(String),

    #[error("{kind} layer requires outC of at least 1, got {value:?}")]
    InvalidOutChannels { kind: LayerKind, value: Option<i64> },

    #[error("input {axis} must be at least 1, got {value}")]
    InvalidInputDimension { axis: &'static str, value: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeometryError>;

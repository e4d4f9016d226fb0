use std::fmt;

use serde::Serialize;

use crate::geometry::state::SpatialState;
use crate::layers::LayerDescriptor;

/// Output map size after a layer, `H×W×C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OutputShape {
    pub height: i64,
    pub width: i64,
    pub channels: u32,
}

impl fmt::Display for OutputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}×{}", self.height, self.width, self.channels)
    }
}

/// A per-axis pair, used for receptive field and jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Extent {
    pub height: i64,
    pub width: i64,
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.height, self.width)
    }
}

/// Row-local annotation. It never stops propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Warning {
    /// The window did not fit: output height or width is zero or negative.
    NonPositiveOutput { height: i64, width: i64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NonPositiveOutput { .. } => f.write_str("output <= 0 (check k/p/s/d)"),
        }
    }
}

impl From<Warning> for String {
    fn from(warning: Warning) -> String {
        warning.to_string()
    }
}

/// Result of one layer, as shown in the architecture table.
///
/// After a fully-connected layer the map is 1×1 and `jump` is only the value
/// inherited from the last spatial layer; it does not describe a stride.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResultRow {
    /// 1-based position in the layer list.
    pub index: usize,
    pub layer: LayerDescriptor,
    pub output: OutputShape,
    pub receptive_field: Extent,
    pub jump: Extent,
    pub warning: Option<Warning>,
}

impl ResultRow {
    pub fn new(index: usize, layer: LayerDescriptor, state: &SpatialState, warning: Option<Warning>) -> ResultRow {
        ResultRow {
            index,
            layer,
            output: state.output_shape(),
            receptive_field: state.receptive_field(),
            jump: state.jump(),
            warning,
        }
    }
}

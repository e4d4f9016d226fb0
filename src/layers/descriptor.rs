use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::layers::window::Window;

/// Wire name of a layer variant (`"type"` in architecture JSON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Conv,
    MaxPool,
    AvgPool,
    Fc,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Conv => "conv",
            LayerKind::MaxPool => "maxpool",
            LayerKind::AvgPool => "avgpool",
            LayerKind::Fc => "fc",
        }
    }
}

impl FromStr for LayerKind {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "conv" => Ok(LayerKind::Conv),
            "maxpool" => Ok(LayerKind::MaxPool),
            "avgpool" => Ok(LayerKind::AvgPool),
            "fc" => Ok(LayerKind::Fc),
            other => Err(GeometryError::UnknownLayerType(other.to_owned())),
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Max and average pooling share their geometry; the kind only changes how
/// the layer is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    Max,
    Avg,
}

/// One layer of the network being measured.
///
/// Each variant carries only the parameters that mean something for it:
/// pooling has no output-channel count and a fully-connected layer has no
/// window (it reports `Window::UNIT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLayer", into = "RawLayer")]
pub enum LayerDescriptor {
    Conv { window: Window, out_channels: u32 },
    Pool { kind: PoolKind, window: Window },
    FullyConnected { units: u32 },
}

impl LayerDescriptor {
    pub fn conv(kernel: u32, stride: u32, padding: u32, dilation: u32, out_channels: u32) -> Result<Self> {
        let window = Window::new(kernel, stride, padding, dilation)?;
        let out_channels = positive_channels(LayerKind::Conv, Some(out_channels.into()))?;
        Ok(LayerDescriptor::Conv { window, out_channels })
    }

    pub fn max_pool(kernel: u32, stride: u32, padding: u32, dilation: u32) -> Result<Self> {
        let window = Window::new(kernel, stride, padding, dilation)?;
        Ok(LayerDescriptor::Pool { kind: PoolKind::Max, window })
    }

    pub fn avg_pool(kernel: u32, stride: u32, padding: u32, dilation: u32) -> Result<Self> {
        let window = Window::new(kernel, stride, padding, dilation)?;
        Ok(LayerDescriptor::Pool { kind: PoolKind::Avg, window })
    }

    pub fn fully_connected(units: u32) -> Result<Self> {
        let units = positive_channels(LayerKind::Fc, Some(units.into()))?;
        Ok(LayerDescriptor::FullyConnected { units })
    }

    /// Builds a descriptor from the flat `type/k/s/p/d/outC` field set used by
    /// the JSON format and the studio form.
    ///
    /// `outC` is dropped for pooling layers, and `k/s/p/d` are dropped for
    /// `fc`, which always uses the unit window.
    pub fn from_fields(
        kind: LayerKind,
        kernel: i64,
        stride: i64,
        padding: i64,
        dilation: i64,
        out_channels: Option<i64>,
    ) -> Result<Self> {
        match kind {
            LayerKind::Conv => Ok(LayerDescriptor::Conv {
                window: Window::from_signed(kernel, stride, padding, dilation)?,
                out_channels: positive_channels(kind, out_channels)?,
            }),
            LayerKind::MaxPool | LayerKind::AvgPool => {
                let pool = if kind == LayerKind::MaxPool { PoolKind::Max } else { PoolKind::Avg };
                Ok(LayerDescriptor::Pool {
                    kind: pool,
                    window: Window::from_signed(kernel, stride, padding, dilation)?,
                })
            }
            LayerKind::Fc => Ok(LayerDescriptor::FullyConnected {
                units: positive_channels(kind, out_channels)?,
            }),
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            LayerDescriptor::Conv { .. } => LayerKind::Conv,
            LayerDescriptor::Pool { kind: PoolKind::Max, .. } => LayerKind::MaxPool,
            LayerDescriptor::Pool { kind: PoolKind::Avg, .. } => LayerKind::AvgPool,
            LayerDescriptor::FullyConnected { .. } => LayerKind::Fc,
        }
    }

    pub fn window(&self) -> Window {
        match self {
            LayerDescriptor::Conv { window, .. } | LayerDescriptor::Pool { window, .. } => *window,
            LayerDescriptor::FullyConnected { .. } => Window::UNIT,
        }
    }

    /// Declared output channels (units for `fc`); `None` for pooling.
    pub fn out_channels(&self) -> Option<u32> {
        match self {
            LayerDescriptor::Conv { out_channels, .. } => Some(*out_channels),
            LayerDescriptor::Pool { .. } => None,
            LayerDescriptor::FullyConnected { units } => Some(*units),
        }
    }
}

fn positive_channels(kind: LayerKind, value: Option<i64>) -> Result<u32> {
    value
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v >= 1)
        .ok_or(GeometryError::InvalidOutChannels { kind, value })
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Flat JSON shape of a layer: `{"type","k","s","p","d","outC"}`.
#[derive(Serialize, Deserialize)]
struct RawLayer {
    #[serde(rename = "type")]
    kind: LayerKind,
    #[serde(default = "one")]
    k: i64,
    #[serde(default = "one")]
    s: i64,
    #[serde(default)]
    p: i64,
    #[serde(default = "one")]
    d: i64,
    #[serde(rename = "outC", default)]
    out_c: Option<i64>,
}

fn one() -> i64 {
    1
}

impl TryFrom<RawLayer> for LayerDescriptor {
    type Error = GeometryError;

    fn try_from(raw: RawLayer) -> Result<Self> {
        LayerDescriptor::from_fields(raw.kind, raw.k, raw.s, raw.p, raw.d, raw.out_c)
    }
}

impl From<LayerDescriptor> for RawLayer {
    fn from(layer: LayerDescriptor) -> Self {
        let w = layer.window();
        RawLayer {
            kind: layer.kind(),
            k: w.kernel().into(),
            s: w.stride().into(),
            p: w.padding().into(),
            d: w.dilation().into(),
            out_c: layer.out_channels().map(i64::from),
        }
    }
}

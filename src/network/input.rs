use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Input image dimensions, serialized as `{"H": .., "W": .., "C": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInput", into = "RawInput")]
pub struct InputShape {
    height: u32,
    width: u32,
    channels: u32,
}

impl InputShape {
    pub fn new(height: u32, width: u32, channels: u32) -> Result<InputShape> {
        InputShape::from_signed(height.into(), width.into(), channels.into())
    }

    pub fn from_signed(height: i64, width: i64, channels: i64) -> Result<InputShape> {
        Ok(InputShape {
            height: dimension("H", height)?,
            width: dimension("W", width)?,
            channels: dimension("C", channels)?,
        })
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }
}

impl Default for InputShape {
    /// 32×32 RGB, the size the example network is meant for.
    fn default() -> Self {
        InputShape { height: 32, width: 32, channels: 3 }
    }
}

fn dimension(axis: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or(GeometryError::InvalidInputDimension { axis, value })
}

#[derive(Serialize, Deserialize)]
struct RawInput {
    #[serde(rename = "H")]
    h: i64,
    #[serde(rename = "W")]
    w: i64,
    #[serde(rename = "C")]
    c: i64,
}

impl TryFrom<RawInput> for InputShape {
    type Error = GeometryError;

    fn try_from(raw: RawInput) -> Result<Self> {
        InputShape::from_signed(raw.h, raw.w, raw.c)
    }
}

impl From<InputShape> for RawInput {
    fn from(input: InputShape) -> Self {
        RawInput { h: input.height.into(), w: input.width.into(), c: input.channels.into() }
    }
}

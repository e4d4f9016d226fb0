use crate::geometry::row::{Extent, OutputShape, Warning};
use crate::layers::{LayerDescriptor, Window};
use crate::math::floor_div;
use crate::network::input::InputShape;

/// Running geometry threaded through the layer list.
///
/// Height and width are signed: a layer whose window does not fit yields a
/// zero or negative size, and that value is carried into the next layer
/// exactly as computed. Receptive field and jump are in input-pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpatialState {
    pub height: i64,
    pub width: i64,
    pub channels: u32,
    pub rf_height: i64,
    pub rf_width: i64,
    pub jump_height: i64,
    pub jump_width: i64,
}

impl SpatialState {
    /// Input image state: one pixel of receptive field, unit jump.
    pub fn from_input(input: InputShape) -> SpatialState {
        SpatialState {
            height: input.height().into(),
            width: input.width().into(),
            channels: input.channels(),
            rf_height: 1,
            rf_width: 1,
            jump_height: 1,
            jump_width: 1,
        }
    }

    /// Applies one layer and returns the next state, plus a warning when the
    /// layer produced a non-positive spatial size.
    pub fn apply(&self, layer: &LayerDescriptor) -> (SpatialState, Option<Warning>) {
        match *layer {
            LayerDescriptor::Conv { window, out_channels } => {
                let (next, warning) = self.slide(window);
                (SpatialState { channels: out_channels, ..next }, warning)
            }
            LayerDescriptor::Pool { window, .. } => self.slide(window),
            LayerDescriptor::FullyConnected { units } => (self.flatten(units), None),
        }
    }

    pub fn output_shape(&self) -> OutputShape {
        OutputShape { height: self.height, width: self.width, channels: self.channels }
    }

    pub fn receptive_field(&self) -> Extent {
        Extent { height: self.rf_height, width: self.rf_width }
    }

    pub fn jump(&self) -> Extent {
        Extent { height: self.jump_height, width: self.jump_width }
    }

    /// Sliding-window step shared by convolution and pooling. Channels are
    /// carried over; convolution overwrites them afterwards.
    fn slide(&self, window: Window) -> (SpatialState, Option<Warning>) {
        let k_eff = window.effective_kernel();
        let stride = i64::from(window.stride());
        let padded = 2 * i64::from(window.padding());
        let out = |extent: i64| {
            floor_div(extent.saturating_add(padded).saturating_sub(k_eff), stride).saturating_add(1)
        };

        let height = out(self.height);
        let width = out(self.width);
        let warning = (height <= 0 || width <= 0).then_some(Warning::NonPositiveOutput { height, width });

        let next = SpatialState {
            height,
            width,
            channels: self.channels,
            rf_height: grow(self.rf_height, k_eff - 1, self.jump_height),
            rf_width: grow(self.rf_width, k_eff - 1, self.jump_width),
            jump_height: self.jump_height.saturating_mul(stride),
            jump_width: self.jump_width.saturating_mul(stride),
        };
        (next, warning)
    }

    /// Dense layer over the whole map: the kernel spans the current height and
    /// width, the map collapses to 1×1. Jump is left as it was even though it
    /// no longer describes a spatial step.
    fn flatten(&self, units: u32) -> SpatialState {
        SpatialState {
            height: 1,
            width: 1,
            channels: units,
            rf_height: grow(self.rf_height, self.height.saturating_sub(1), self.jump_height),
            rf_width: grow(self.rf_width, self.width.saturating_sub(1), self.jump_width),
            jump_height: self.jump_height,
            jump_width: self.jump_width,
        }
    }
}

impl From<InputShape> for SpatialState {
    fn from(input: InputShape) -> Self {
        SpatialState::from_input(input)
    }
}

fn grow(rf: i64, span: i64, jump: i64) -> i64 {
    rf.saturating_add(span.saturating_mul(jump))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: i64, channels: u32) -> SpatialState {
        SpatialState {
            height: side,
            width: side,
            channels,
            rf_height: 1,
            rf_width: 1,
            jump_height: 1,
            jump_width: 1,
        }
    }

    #[test]
    fn dilated_conv_uses_effective_kernel() {
        let conv = LayerDescriptor::conv(3, 1, 0, 2, 16).unwrap();
        let (next, warning) = square(10, 3).apply(&conv);
        assert_eq!(next.height, 6);
        assert_eq!(next.rf_height, 5);
        assert_eq!(next.channels, 16);
        assert!(warning.is_none());
    }

    #[test]
    fn rectangular_input_tracks_axes_independently() {
        let state = SpatialState { width: 20, ..square(8, 1) };
        let pool = LayerDescriptor::max_pool(3, 2, 1, 1).unwrap();
        let (next, _) = state.apply(&pool);
        assert_eq!((next.height, next.width), (4, 10));
    }

    #[test]
    fn warns_when_only_one_axis_collapses() {
        let state = SpatialState { width: 1, ..square(16, 1) };
        let conv = LayerDescriptor::conv(3, 1, 0, 1, 4).unwrap();
        let (next, warning) = state.apply(&conv);
        assert_eq!(next.width, -1);
        assert_eq!(warning, Some(Warning::NonPositiveOutput { height: 14, width: -1 }));
    }

    #[test]
    fn negative_numerator_floors_toward_negative_infinity() {
        // (3 + 0 - 6) / 2 = -1.5 -> -2, plus one -> -1
        let conv = LayerDescriptor::conv(6, 2, 0, 1, 4).unwrap();
        let (next, warning) = square(3, 1).apply(&conv);
        assert_eq!(next.height, -1);
        assert!(warning.is_some());
    }

    #[test]
    fn huge_jumps_saturate_instead_of_overflowing() {
        let state = SpatialState { jump_height: i64::MAX / 2, jump_width: i64::MAX / 2, ..square(64, 1) };
        let conv = LayerDescriptor::conv(3, 4, 1, 1, 4).unwrap();
        let (next, _) = state.apply(&conv);
        assert_eq!(next.jump_height, i64::MAX);
    }
}

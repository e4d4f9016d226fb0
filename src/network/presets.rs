use crate::layers::{LayerDescriptor, PoolKind, Window};

const SAME_3X3: Window = window(3, 1, 1, 1);
const HALVE_2X2: Window = window(2, 2, 0, 1);

/// Small VGG-style stack: two 3×3 conv blocks (64, 128 channels), each
/// followed by a 2×2/2 max-pool, then FC 256 and FC 10.
pub fn vgg_like() -> Vec<LayerDescriptor> {
    vec![
        conv(64),
        conv(64),
        max_pool(),
        conv(128),
        conv(128),
        max_pool(),
        LayerDescriptor::FullyConnected { units: 256 },
        LayerDescriptor::FullyConnected { units: 10 },
    ]
}

fn conv(out_channels: u32) -> LayerDescriptor {
    LayerDescriptor::Conv { window: SAME_3X3, out_channels }
}

fn max_pool() -> LayerDescriptor {
    LayerDescriptor::Pool { kind: PoolKind::Max, window: HALVE_2X2 }
}

const fn window(kernel: u32, stride: u32, padding: u32, dilation: u32) -> Window {
    match Window::checked(kernel, stride, padding, dilation) {
        Some(w) => w,
        None => panic!("preset window parameters must be valid"),
    }
}

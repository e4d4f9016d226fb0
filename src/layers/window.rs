use crate::error::{GeometryError, Result};
use crate::math::effective_kernel;

/// Square sliding-window parameters shared by convolution and pooling layers.
///
/// Fields are private so that every `Window` in circulation has passed
/// validation: kernel, stride and dilation are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    kernel: u32,
    stride: u32,
    padding: u32,
    dilation: u32,
}

impl Window {
    /// The window a fully-connected layer reports: `k=1, s=1, p=0, d=1`.
    pub const UNIT: Window = Window { kernel: 1, stride: 1, padding: 0, dilation: 1 };

    pub fn new(kernel: u32, stride: u32, padding: u32, dilation: u32) -> Result<Window> {
        Window::from_signed(kernel.into(), stride.into(), padding.into(), dilation.into())
    }

    /// Validating constructor for values read from loosely typed sources
    /// (JSON, HTML forms) where negatives can show up.
    pub fn from_signed(kernel: i64, stride: i64, padding: i64, dilation: i64) -> Result<Window> {
        Ok(Window {
            kernel: at_least_one(kernel).ok_or(GeometryError::InvalidKernel(kernel))?,
            stride: at_least_one(stride).ok_or(GeometryError::InvalidStride(stride))?,
            padding: u32::try_from(padding).map_err(|_| GeometryError::NegativePadding(padding))?,
            dilation: at_least_one(dilation).ok_or(GeometryError::InvalidDilation(dilation))?,
        })
    }

    /// `const` counterpart of `new` for windows known at compile time.
    pub const fn checked(kernel: u32, stride: u32, padding: u32, dilation: u32) -> Option<Window> {
        if kernel == 0 || stride == 0 || dilation == 0 {
            return None;
        }
        Some(Window { kernel, stride, padding, dilation })
    }

    pub fn kernel(&self) -> u32 {
        self.kernel
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn dilation(&self) -> u32 {
        self.dilation
    }

    pub fn effective_kernel(&self) -> i64 {
        effective_kernel(self.kernel, self.dilation)
    }
}

fn at_least_one(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v >= 1)
}

use image::{GrayImage, ImageBuffer};
use ndarray::{Array2, ArrayView2, Zip};
use thiserror::Error;

pub const GRAYSCALE_MAX: f64 = 255.0;
pub const DEFAULT_LEVEL: f64 = 1000.0;
pub const DEFAULT_WIDTH: f64 = 2000.0;

#[derive(Debug, Error, PartialEq)]
pub enum WindowError {
    #[error("Window width must be positive, got {0}")]
    NonPositiveWidth(f64),

    #[error("Window level must be finite, got {0}")]
    NonFiniteLevel(f64),
}

/// Window level (center) and width. `width` is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSettings {
    level: f64,
    width: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            width: DEFAULT_WIDTH,
        }
    }
}

impl WindowSettings {
    pub fn new(level: f64, width: f64) -> Result<Self, WindowError> {
        if !level.is_finite() {
            return Err(WindowError::NonFiniteLevel(level));
        }
        // NaN fails this comparison as well
        if !(width > 0.0 && width.is_finite()) {
            return Err(WindowError::NonPositiveWidth(width));
        }
        Ok(Self { level, width })
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Lower and upper bound of the displayed intensity range.
    pub fn bounds(&self) -> (f64, f64) {
        let half = self.width / 2.0;
        (self.level - half, self.level + half)
    }

    /// Map a single raw intensity to its display value.
    #[inline]
    pub fn map_value(&self, value: i32) -> u8 {
        let (lo, hi) = self.bounds();
        let span = hi - lo;
        let value = value as f64;
        // a width below the float resolution at `level` collapses to a step
        if span <= 0.0 {
            return if value >= hi { u8::MAX } else { 0 };
        }
        let clamped = value.clamp(lo, hi);
        ((clamped - lo) / span * GRAYSCALE_MAX).clamp(0.0, GRAYSCALE_MAX) as u8
    }
}

/// Apply a window to a 2D slice, producing an 8-bit slice of the same shape.
pub fn apply(slice: &ArrayView2<'_, i32>, window: &WindowSettings) -> Array2<u8> {
    let mut windowed = Array2::<u8>::zeros(slice.raw_dim());
    Zip::from(&mut windowed)
        .and(slice)
        .par_for_each(|out, &value| *out = window.map_value(value));
    windowed
}

/// Convert a windowed slice into a grayscale image, rows becoming image rows.
pub fn to_image(windowed: &Array2<u8>) -> Option<GrayImage> {
    let (height, width) = windowed.dim();
    let pixel_data: Vec<u8> = windowed.iter().copied().collect();
    ImageBuffer::from_raw(width as u32, height as u32, pixel_data)
}

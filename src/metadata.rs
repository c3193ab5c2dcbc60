//! Typed access to per-slice attributes that may be absent or multi-valued.
//!
//! Every accessor here resolves to a concrete value: missing or malformed
//! attributes fall back to a documented default instead of failing the load.

use std::fmt;

use crate::windowing::{DEFAULT_LEVEL, DEFAULT_WIDTH, WindowSettings};

/// A raw attribute as read from a slice header.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeValue {
    #[default]
    Absent,
    Number(f64),
    Numbers(Vec<f64>),
    Text(String),
}

impl AttributeValue {
    /// The scalar value, or the first element of a sequence.
    ///
    /// Text is split on the DICOM value separator (`\`) and the first token
    /// parsed.
    pub fn first_f64(&self) -> Option<f64> {
        let value: f64 = match self {
            AttributeValue::Absent => None,
            AttributeValue::Number(value) => Some(*value),
            AttributeValue::Numbers(values) => values.first().copied(),
            AttributeValue::Text(text) => text.split('\\').next()?.trim().parse().ok(),
        }?;
        value.is_finite().then_some(value)
    }

    pub fn first_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Text(text) => {
                let token = text.split('\\').next()?.trim();
                token
                    .parse::<i64>()
                    .ok()
                    .or_else(|| Self::integral(token.parse().ok()?))
            }
            other => Self::integral(other.first_f64()?),
        }
    }

    fn integral(value: f64) -> Option<i64> {
        (value.fract() == 0.0 && value.abs() < i64::MAX as f64).then_some(value as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(values: Vec<f64>) -> Self {
        AttributeValue::Numbers(values)
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        AttributeValue::Text(text.to_string())
    }
}

/// Linear calibration from stored values to real intensity units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescale {
    pub slope: f64,
    pub intercept: f64,
}

impl Default for Rescale {
    fn default() -> Self {
        Self {
            slope: 1.0,
            intercept: 0.0,
        }
    }
}

impl Rescale {
    pub fn is_identity(&self) -> bool {
        self.slope == 1.0 && self.intercept == 0.0
    }

    #[inline]
    pub fn apply(&self, value: i32) -> i32 {
        // `as` saturates on overflow
        (value as f64 * self.slope + self.intercept).round() as i32
    }
}

/// Header attributes of a single slice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SliceMetadata {
    pub instance_number: AttributeValue,
    pub rescale_slope: AttributeValue,
    pub rescale_intercept: AttributeValue,
    pub window_center: AttributeValue,
    pub window_width: AttributeValue,
    pub slice_thickness: AttributeValue,
    pub rows: Option<u32>,
    pub columns: Option<u32>,
}

impl SliceMetadata {
    pub fn ordering_key(&self) -> Option<i64> {
        self.instance_number.first_i64()
    }

    pub fn rescale(&self) -> Rescale {
        let default = Rescale::default();
        Rescale {
            slope: self.rescale_slope.first_f64().unwrap_or(default.slope),
            intercept: self
                .rescale_intercept
                .first_f64()
                .unwrap_or(default.intercept),
        }
    }

    /// Initial window from the header, or the fixed defaults.
    pub fn window_settings(&self) -> WindowSettings {
        let level = self.window_center.first_f64().unwrap_or_else(|| {
            log::debug!("Window center unavailable, using {DEFAULT_LEVEL}");
            DEFAULT_LEVEL
        });
        let width = self.window_width.first_f64().unwrap_or_else(|| {
            log::debug!("Window width unavailable, using {DEFAULT_WIDTH}");
            DEFAULT_WIDTH
        });
        WindowSettings::new(level, width)
            .or_else(|_| WindowSettings::new(level, DEFAULT_WIDTH))
            .unwrap_or_default()
    }

    pub fn slice_thickness(&self) -> Option<f64> {
        self.slice_thickness.first_f64()
    }
}

/// Series summary shown alongside the views.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesHeader {
    pub rows: u32,
    pub columns: u32,
    pub slice_thickness: Option<f64>,
    pub slice_count: usize,
}

impl SeriesHeader {
    /// Build from the first slice's metadata, inferring rows/columns from the
    /// volume dimensions when the header lacks them.
    pub fn new(descriptor: &SliceMetadata, dim: (usize, usize, usize)) -> Self {
        let (depth, height, width) = dim;
        Self {
            rows: descriptor.rows.unwrap_or(height as u32),
            columns: descriptor.columns.unwrap_or(width as u32),
            slice_thickness: descriptor.slice_thickness(),
            slice_count: depth,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let thickness = self
            .slice_thickness
            .map_or_else(|| "N/A".to_string(), |t| t.to_string());
        vec![
            format!("Image size: {}x{}", self.rows, self.columns),
            format!("Slice thickness: {thickness} mm"),
            format!("Number of slices: {}", self.slice_count),
        ]
    }
}

impl fmt::Display for SeriesHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

use std::ops::RangeInclusive;

use crate::windowing::WindowSettings;

/// Viewer-wide settings passed explicitly to a [`Session`](crate::session::Session).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Window used when the series header carries none.
    pub default_window: WindowSettings,
    pub level_range: RangeInclusive<f64>,
    /// Lower bound must be positive.
    pub width_range: RangeInclusive<f64>,
    /// Requested level and width are rounded to multiples of this step.
    pub window_step: Option<f64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_window: WindowSettings::default(),
            level_range: -2000.0..=4096.0,
            width_range: 1.0..=8192.0,
            window_step: Some(10.0),
        }
    }
}

impl ViewerConfig {
    /// Snap a requested window to the step and clamp it into the configured
    /// ranges.
    pub fn clamp_window(&self, level: f64, width: f64) -> WindowSettings {
        let level = if level.is_nan() {
            self.default_window.level()
        } else {
            self.snap(level)
                .clamp(*self.level_range.start(), *self.level_range.end())
        };
        let width = if width.is_nan() {
            self.default_window.width()
        } else {
            self.snap(width)
                .clamp(*self.width_range.start(), *self.width_range.end())
        };
        WindowSettings::new(level, width).unwrap_or(self.default_window)
    }

    fn snap(&self, value: f64) -> f64 {
        match self.window_step {
            Some(step) if step > 0.0 && value.is_finite() => (value / step).round() * step,
            _ => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_clamped_into_ranges() {
        let config = ViewerConfig::default();
        let window = config.clamp_window(-10_000.0, 0.0);
        assert_eq!(window.level(), -2000.0);
        assert_eq!(window.width(), 1.0);

        let window = config.clamp_window(40.0, 1e9);
        assert_eq!(window.level(), 40.0);
        assert_eq!(window.width(), 8192.0);
    }

    #[test]
    fn window_snaps_to_step() {
        let config = ViewerConfig::default();
        let window = config.clamp_window(43.0, 396.0);
        assert_eq!(window.level(), 40.0);
        assert_eq!(window.width(), 400.0);

        let config = ViewerConfig {
            window_step: None,
            ..Default::default()
        };
        let window = config.clamp_window(43.0, 396.0);
        assert_eq!(window.level(), 43.0);
        assert_eq!(window.width(), 396.0);
    }

    #[test]
    fn nan_falls_back_to_default_window() {
        let config = ViewerConfig::default();
        assert_eq!(config.clamp_window(f64::NAN, f64::NAN), config.default_window);
    }
}

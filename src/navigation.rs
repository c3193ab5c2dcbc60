use crate::{
    config::ViewerConfig,
    enums::{Axis, PlaneMode},
    windowing::WindowSettings,
};

/// Current slice per axis, each within `[0, dim - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationIndex {
    pub z: usize,
    pub y: usize,
    pub x: usize,
}

impl NavigationIndex {
    pub fn get(&self, axis: Axis) -> usize {
        match axis {
            Axis::Z => self.z,
            Axis::Y => self.y,
            Axis::X => self.x,
        }
    }
}

/// The mutable part of a viewing session.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    index: NavigationIndex,
    window: WindowSettings,
    mode: PlaneMode,
    dim: (usize, usize, usize),
}

impl NavigationState {
    /// Centered on the volume, showing the coronal plane.
    pub fn new(dim: (usize, usize, usize), window: WindowSettings) -> Self {
        let (depth, height, width) = dim;
        Self {
            index: NavigationIndex {
                z: depth / 2,
                y: height / 2,
                x: width / 2,
            },
            window,
            mode: PlaneMode::Coronal,
            dim,
        }
    }

    pub fn index(&self) -> NavigationIndex {
        self.index
    }

    pub fn window(&self) -> WindowSettings {
        self.window
    }

    pub fn mode(&self) -> PlaneMode {
        self.mode
    }

    pub fn dim(&self) -> (usize, usize, usize) {
        self.dim
    }

    pub fn len_along(&self, axis: Axis) -> usize {
        match axis {
            Axis::Z => self.dim.0,
            Axis::Y => self.dim.1,
            Axis::X => self.dim.2,
        }
    }

    /// The secondary axis that currently accepts input.
    pub fn active_secondary_axis(&self) -> Axis {
        self.mode.axis()
    }

    pub fn is_axis_enabled(&self, axis: Axis) -> bool {
        axis == Axis::Z || axis == self.active_secondary_axis()
    }

    /// Move along `axis`, clamping `value` into the axis range.
    ///
    /// Writes to the inactive secondary axis are accepted; disabling that
    /// control is up to the view layer.
    pub fn set_axis(&mut self, axis: Axis, value: i64) {
        let max = self.len_along(axis).saturating_sub(1);
        let clamped = value.clamp(0, max as i64) as usize;
        match axis {
            Axis::Z => self.index.z = clamped,
            Axis::Y => self.index.y = clamped,
            Axis::X => self.index.x = clamped,
        }
    }

    /// Switch between coronal and sagittal. Indices are left untouched.
    pub fn toggle_plane(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn set_window(&mut self, level: f64, width: f64, config: &ViewerConfig) {
        self.window = config.clamp_window(level, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> NavigationState {
        NavigationState::new((10, 7, 5), WindowSettings::default())
    }

    #[test]
    fn starts_centered_in_coronal_mode() {
        let state = state();
        assert_eq!(state.index(), NavigationIndex { z: 5, y: 3, x: 2 });
        assert_eq!(state.mode(), PlaneMode::Coronal);
        assert_eq!(state.active_secondary_axis(), Axis::Y);
    }

    #[test]
    fn axis_values_are_clamped() {
        let mut state = state();
        state.set_axis(Axis::Z, -5);
        assert_eq!(state.index().z, 0);
        state.set_axis(Axis::Z, 999);
        assert_eq!(state.index().z, 9);
        state.set_axis(Axis::Y, 6);
        assert_eq!(state.index().y, 6);
        state.set_axis(Axis::X, i64::MAX);
        assert_eq!(state.index().x, 4);
    }

    #[test]
    fn toggle_twice_restores_mode_and_indices() {
        let mut state = state();
        state.set_axis(Axis::Y, 1);
        state.set_axis(Axis::X, 4);
        let before = state.clone();

        state.toggle_plane();
        assert_eq!(state.mode(), PlaneMode::Sagittal);
        assert_eq!(state.active_secondary_axis(), Axis::X);
        assert_eq!(state.index(), before.index());

        state.toggle_plane();
        assert_eq!(state, before);
    }

    #[test]
    fn enablement_follows_mode() {
        let mut state = state();
        assert!(state.is_axis_enabled(Axis::Z));
        assert!(state.is_axis_enabled(Axis::Y));
        assert!(!state.is_axis_enabled(Axis::X));
        state.toggle_plane();
        assert!(state.is_axis_enabled(Axis::Z));
        assert!(!state.is_axis_enabled(Axis::Y));
        assert!(state.is_axis_enabled(Axis::X));
    }

    #[test]
    fn window_changes_respect_config() {
        let mut state = state();
        state.set_window(40.0, -3.0, &ViewerConfig::default());
        assert_eq!(state.window().level(), 40.0);
        assert_eq!(state.window().width(), 1.0);
    }
}

//! A viewing session: the loaded volume, its navigation state and the last
//! render output, mutated only through [`Session::dispatch`].

use std::path::Path;

use thiserror::Error;

use crate::{
    config::ViewerConfig,
    enums::{Axis, SortBy},
    metadata::SeriesHeader,
    navigation::NavigationState,
    view_controller::{RenderOutput, ViewController},
    volume::{SliceError, Volume},
    volume_builder::LoadedSeries,
    volume_loader::{VolumeLoader, VolumeLoaderError},
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] VolumeLoaderError),

    #[error(transparent)]
    Slice(#[from] SliceError),
}

/// User input forwarded by the view layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    AxisChanged { axis: Axis, value: i64 },
    PlaneToggled,
    WindowChanged { level: f64, width: f64 },
}

#[derive(Debug)]
struct Loaded {
    volume: Volume,
    header: SeriesHeader,
    state: NavigationState,
    output: RenderOutput,
}

impl Loaded {
    fn new(series: LoadedSeries, config: &ViewerConfig) -> Result<Self, SliceError> {
        let LoadedSeries { volume, descriptor } = series;
        let window = if descriptor.window_center.first_f64().is_some()
            || descriptor.window_width.first_f64().is_some()
        {
            descriptor.window_settings()
        } else {
            config.default_window
        };
        let state = NavigationState::new(volume.dim(), window);
        let output = ViewController::recompute(&volume, &state)?;
        Ok(Self {
            header: SeriesHeader::new(&descriptor, volume.dim()),
            volume,
            state,
            output,
        })
    }
}

#[derive(Debug, Default)]
pub struct Session {
    config: ViewerConfig,
    loaded: Option<Loaded>,
}

impl Session {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            loaded: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Load a DICOM directory and make it the current series.
    ///
    /// # Errors
    ///
    /// Returns error if the directory holds no usable series; the current
    /// series, if any, stays in place
    pub fn load_directory(
        &mut self,
        path: impl AsRef<Path>,
        sort_by: SortBy,
    ) -> Result<&RenderOutput, SessionError> {
        let series = VolumeLoader::load_from_directory(path, sort_by)?;
        self.install(series)
    }

    /// Replace the current series with a fully built one.
    pub fn install(&mut self, series: LoadedSeries) -> Result<&RenderOutput, SessionError> {
        let loaded = Loaded::new(series, &self.config)?;
        Ok(&self.loaded.insert(loaded).output)
    }

    /// Apply an input event and recompute the views.
    ///
    /// Returns `Ok(None)` while nothing is loaded.
    pub fn dispatch(&mut self, event: Event) -> Result<Option<&RenderOutput>, SessionError> {
        let Some(loaded) = self.loaded.as_mut() else {
            log::debug!("Ignoring {event:?} without a loaded series");
            return Ok(None);
        };

        match event {
            Event::AxisChanged { axis, value } => loaded.state.set_axis(axis, value),
            Event::PlaneToggled => loaded.state.toggle_plane(),
            Event::WindowChanged { level, width } => {
                loaded.state.set_window(level, width, &self.config)
            }
        }

        loaded.output = ViewController::recompute(&loaded.volume, &loaded.state)?;
        Ok(Some(&loaded.output))
    }

    pub fn output(&self) -> Option<&RenderOutput> {
        self.loaded.as_ref().map(|loaded| &loaded.output)
    }

    pub fn state(&self) -> Option<&NavigationState> {
        self.loaded.as_ref().map(|loaded| &loaded.state)
    }

    pub fn volume(&self) -> Option<&Volume> {
        self.loaded.as_ref().map(|loaded| &loaded.volume)
    }

    pub fn header(&self) -> Option<&SeriesHeader> {
        self.loaded.as_ref().map(|loaded| &loaded.header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        enums::PlaneMode,
        metadata::SliceMetadata,
        volume_builder::{Slice, SliceStack, VolumeBuilder},
        windowing::WindowSettings,
    };
    use ndarray::Array2;

    fn series(depth: usize, metadata: SliceMetadata) -> LoadedSeries {
        let slices = (0..depth)
            .map(|z| Slice::new(Array2::from_elem((3, 5), z as i32), metadata.clone()))
            .collect();
        VolumeBuilder::build(SliceStack::new(slices).with_sort_by(SortBy::None)).unwrap()
    }

    #[test]
    fn events_before_load_are_ignored() {
        let mut session = Session::default();
        assert!(session.dispatch(Event::PlaneToggled).unwrap().is_none());
        assert!(!session.is_loaded());
    }

    #[test]
    fn install_uses_header_window() {
        let mut session = Session::default();
        let metadata = SliceMetadata {
            window_center: vec![40.0, 80.0].into(),
            ..Default::default()
        };
        let output = session.install(series(4, metadata)).unwrap();
        assert_eq!(output.window_label, "WL: 40, WW: 2000");
        assert_eq!(output.axial.title, "Axial (Z: 3/4)");
    }

    #[test]
    fn install_without_window_uses_config_default() {
        let config = ViewerConfig {
            default_window: WindowSettings::new(50.0, 350.0).unwrap(),
            ..Default::default()
        };
        let mut session = Session::new(config);
        let output = session.install(series(2, SliceMetadata::default())).unwrap();
        assert_eq!(output.window_label, "WL: 50, WW: 350");
    }

    #[test]
    fn dispatch_updates_state_and_output() {
        let mut session = Session::default();
        session.install(series(10, SliceMetadata::default())).unwrap();

        let output = session
            .dispatch(Event::AxisChanged {
                axis: Axis::Z,
                value: 999,
            })
            .unwrap()
            .unwrap();
        assert_eq!(output.axial.title, "Axial (Z: 10/10)");
        assert_eq!(output.reference_lines.secondary_axial.position, 9);

        let output = session.dispatch(Event::PlaneToggled).unwrap().unwrap();
        assert_eq!(output.mode, PlaneMode::Sagittal);
        assert!(output.axis_enablement.x);

        let output = session
            .dispatch(Event::WindowChanged {
                level: 9.4,
                width: 0.0,
            })
            .unwrap()
            .unwrap();
        assert_eq!(output.window_label, "WL: 10, WW: 1");
        assert_eq!(session.state().unwrap().window().width(), 1.0);
    }

    #[test]
    fn failed_load_keeps_previous_series() {
        let mut session = Session::default();
        session.install(series(3, SliceMetadata::default())).unwrap();
        session.dispatch(Event::PlaneToggled).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let result = session.load_directory(dir.path(), SortBy::InstanceNumber);
        assert!(matches!(
            result,
            Err(SessionError::Load(VolumeLoaderError::NoValidImages))
        ));
        assert_eq!(session.state().unwrap().mode(), PlaneMode::Sagittal);
        assert_eq!(session.volume().unwrap().dim(), (3, 3, 5));
        assert_eq!(session.header().unwrap().slice_count, 3);
    }

    #[test]
    fn new_series_replaces_navigation() {
        let mut session = Session::default();
        session.install(series(3, SliceMetadata::default())).unwrap();
        session.dispatch(Event::PlaneToggled).unwrap();
        session.install(series(6, SliceMetadata::default())).unwrap();

        let state = session.state().unwrap();
        assert_eq!(state.mode(), PlaneMode::Coronal);
        assert_eq!(state.index().z, 3);
    }
}

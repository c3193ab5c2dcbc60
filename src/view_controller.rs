use crate::{
    enums::{Axis, Orientation, PlaneMode},
    navigation::NavigationState,
    volume::{SliceError, Volume},
    windowing::{self, WindowSettings},
};

use image::GrayImage;
use ndarray::Array2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDirection {
    Horizontal,
    Vertical,
}

/// An overlay line at `position` pixels along the axis it crosses.
///
/// Horizontal lines are positioned on the row axis, vertical lines on the
/// column axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceLine {
    pub direction: LineDirection,
    pub position: usize,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceLines {
    /// On the axial view, at the coronal row.
    pub coronal: ReferenceLine,
    /// On the axial view, at the sagittal column.
    pub sagittal: ReferenceLine,
    /// On the secondary view, at the axial depth.
    pub secondary_axial: ReferenceLine,
}

/// Which navigation controls should accept input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisEnablement {
    pub z: bool,
    pub y: bool,
    pub x: bool,
}

impl AxisEnablement {
    pub fn is_enabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::Z => self.z,
            Axis::Y => self.y,
            Axis::X => self.x,
        }
    }
}

/// A windowed 8-bit view with its title.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewImage {
    pub orientation: Orientation,
    pub pixels: Array2<u8>,
    pub title: String,
}

impl ViewImage {
    pub fn to_image(&self) -> Option<GrayImage> {
        windowing::to_image(&self.pixels)
    }
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub mode: PlaneMode,
    pub axial: ViewImage,
    pub secondary: ViewImage,
    pub window_label: String,
    pub reference_lines: ReferenceLines,
    pub axis_enablement: AxisEnablement,
}

pub struct ViewController;

impl ViewController {
    /// Derive the render output from the volume and navigation state.
    ///
    /// # Errors
    ///
    /// Returns error if the state's indices do not fit the volume, which only
    /// happens when the state was created for a different volume
    pub fn recompute(
        volume: &Volume,
        state: &NavigationState,
    ) -> Result<RenderOutput, SliceError> {
        let index = state.index();
        let window = state.window();
        let mode = state.mode();

        let axial = Self::view(volume, Orientation::Axial, index.z, &window)?;
        let secondary_axis = mode.axis();
        let secondary = Self::view(
            volume,
            mode.orientation(),
            index.get(secondary_axis),
            &window,
        )?;

        Ok(RenderOutput {
            mode,
            axial,
            secondary,
            window_label: Self::window_label(&window),
            reference_lines: ReferenceLines {
                coronal: ReferenceLine {
                    direction: LineDirection::Horizontal,
                    position: index.y,
                    visible: mode == PlaneMode::Coronal,
                },
                sagittal: ReferenceLine {
                    direction: LineDirection::Vertical,
                    position: index.x,
                    visible: mode == PlaneMode::Sagittal,
                },
                secondary_axial: ReferenceLine {
                    direction: LineDirection::Horizontal,
                    position: index.z,
                    visible: true,
                },
            },
            axis_enablement: AxisEnablement {
                z: state.is_axis_enabled(Axis::Z),
                y: state.is_axis_enabled(Axis::Y),
                x: state.is_axis_enabled(Axis::X),
            },
        })
    }

    fn view(
        volume: &Volume,
        orientation: Orientation,
        index: usize,
        window: &WindowSettings,
    ) -> Result<ViewImage, SliceError> {
        let slice = volume.get_slice_from_axis(index, orientation)?;
        let axis = match orientation {
            Orientation::Axial => "Z",
            Orientation::Coronal => "Y",
            Orientation::Sagittal => "X",
        };
        Ok(ViewImage {
            orientation,
            pixels: windowing::apply(&slice, window),
            title: format!(
                "{orientation} ({axis}: {}/{})",
                index + 1,
                volume.len_along(orientation)
            ),
        })
    }

    fn window_label(window: &WindowSettings) -> String {
        format!(
            "WL: {}, WW: {}",
            window.level().round() as i64,
            window.width().round() as i64
        )
    }
}

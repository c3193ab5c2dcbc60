//! # DICOM-MPR library
//!
//! This crate serves the core of a two-view multi-planar DICOM viewer: a
//! volume built from a series of slices, a window level / width transform to
//! 8-bit, and a navigation state machine that keeps an axial view and one
//! secondary view (coronal or sagittal) in sync through reference lines.
//!
//! Slices are read from a folder of ".dcm" files with the dicom-rs
//! ecosystem, sorted by InstanceNumber and stacked into a volume. Rescale
//! slope and intercept of the first slice are applied once at build time.
//! The volume can be cut along the three medical axes:
//!  - Axial
//!  - Coronal
//!  - Sagittal
//!
//! Rendering is left to the caller. Every input event goes through
//! [`Session::dispatch`], which returns a [`RenderOutput`] holding the two
//! windowed images, their titles, the window label, the reference lines and
//! which navigation controls should accept input.
//!
//! DICOM files are assumed to have the following attributes:
//!  - Axial data set
//!  - No multiframe (always the first frame is used)
//!  - Images from the same series
//!
//! # Examples
//!
//! ## Browsing a series
//!
//! Load all DICOM files from the dicom/ directory, move to the first axial
//! slice and switch the secondary view to sagittal.
//!
//! ```no_run
//! # use dicom_mpr::{Axis, Event, Session, SortBy, ViewerConfig};
//! let mut session = Session::new(ViewerConfig::default());
//! session
//!     .load_directory("dicom", SortBy::InstanceNumber)
//!     .expect("should have loaded files from directory");
//! session
//!     .dispatch(Event::AxisChanged { axis: Axis::Z, value: 0 })
//!     .expect("indices are clamped to the volume");
//! let output = session
//!     .dispatch(Event::PlaneToggled)
//!     .expect("indices are clamped to the volume")
//!     .expect("a series is loaded");
//! println!("{} / {}", output.axial.title, output.secondary.title);
//! output.secondary.to_image().unwrap().save("sagittal.png").unwrap();
//! ```

pub mod config;
pub mod enums;
pub mod metadata;
pub mod navigation;
pub mod session;
pub mod view_controller;
pub mod volume;
pub mod volume_builder;
pub mod volume_loader;
pub mod windowing;

pub use config::ViewerConfig;
pub use enums::{Axis, Orientation, PlaneMode, SortBy};
pub use metadata::{AttributeValue, Rescale, SeriesHeader, SliceMetadata};
pub use navigation::{NavigationIndex, NavigationState};
pub use session::{Event, Session, SessionError};
pub use view_controller::{
    AxisEnablement, LineDirection, ReferenceLine, ReferenceLines, RenderOutput, ViewController,
    ViewImage,
};
pub use volume::{SliceError, Volume};
pub use volume_builder::{LoadedSeries, Slice, SliceStack, VolumeBuilder, VolumeBuilderError};
pub use volume_loader::{VolumeLoader, VolumeLoaderError};
pub use windowing::{WindowError, WindowSettings};

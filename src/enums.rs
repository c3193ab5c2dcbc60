use std::fmt;

/// The three orthogonal cutting planes of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Axial,
    Coronal,
    Sagittal,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Axial => write!(f, "Axial"),
            Orientation::Coronal => write!(f, "Coronal"),
            Orientation::Sagittal => write!(f, "Sagittal"),
        }
    }
}

/// Which derived plane is shown next to the axial view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaneMode {
    #[default]
    Coronal,
    Sagittal,
}

impl PlaneMode {
    pub fn toggled(self) -> Self {
        match self {
            PlaneMode::Coronal => PlaneMode::Sagittal,
            PlaneMode::Sagittal => PlaneMode::Coronal,
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            PlaneMode::Coronal => Orientation::Coronal,
            PlaneMode::Sagittal => Orientation::Sagittal,
        }
    }

    /// The navigation axis that selects the secondary slice.
    pub fn axis(self) -> Axis {
        match self {
            PlaneMode::Coronal => Axis::Y,
            PlaneMode::Sagittal => Axis::X,
        }
    }
}

/// Navigation axes in volume order (depth, height, width).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Z,
    Y,
    X,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    InstanceNumber,
    None,
}

use crate::enums::Orientation;

use ndarray::Array3;
use ndarray::ArrayView2;
use ndarray::s;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SliceError {
    #[error("{orientation} index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        orientation: Orientation,
        index: usize,
        len: usize,
    },
}

/// Stack of rescaled slices, indexed `(z, y, x)`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Volume {
    data: Array3<i32>,
}

impl Volume {
    pub fn new(data: Array3<i32>) -> Self {
        Self { data }
    }

    /// Get the dimensions of the volume (depth, height, width)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array3<i32> {
        &self.data
    }

    /// Number of slices available along the axis that `orientation` fixes.
    pub fn len_along(&self, orientation: Orientation) -> usize {
        let dim = self.data.dim();
        match orientation {
            Orientation::Axial => dim.0,
            Orientation::Coronal => dim.1,
            Orientation::Sagittal => dim.2,
        }
    }

    pub fn get_slice_from_axis(
        &self,
        index: usize,
        orientation: Orientation,
    ) -> Result<ArrayView2<'_, i32>, SliceError> {
        if !self.is_valid_index(index, orientation) {
            return Err(SliceError::IndexOutOfBounds {
                orientation,
                index,
                len: self.len_along(orientation),
            });
        }
        let slice = match orientation {
            Orientation::Axial => self.data.slice(s![index, .., ..]),
            Orientation::Coronal => self.data.slice(s![.., index, ..]),
            Orientation::Sagittal => self.data.slice(s![.., .., index]),
        };
        Ok(slice)
    }

    /// `(Y, X)` slice at depth `z`.
    pub fn axial(&self, z: usize) -> Result<ArrayView2<'_, i32>, SliceError> {
        self.get_slice_from_axis(z, Orientation::Axial)
    }

    /// `(Z, X)` slice at row `y`.
    pub fn coronal(&self, y: usize) -> Result<ArrayView2<'_, i32>, SliceError> {
        self.get_slice_from_axis(y, Orientation::Coronal)
    }

    /// `(Z, Y)` slice at column `x`.
    pub fn sagittal(&self, x: usize) -> Result<ArrayView2<'_, i32>, SliceError> {
        self.get_slice_from_axis(x, Orientation::Sagittal)
    }

    fn is_valid_index(&self, index: usize, orientation: Orientation) -> bool {
        index < self.len_along(orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn volume() -> Volume {
        // value encodes its own position as zyx digits
        Volume::new(Array3::from_shape_fn((2, 3, 4), |(z, y, x)| {
            (z * 100 + y * 10 + x) as i32
        }))
    }

    #[test]
    fn slices_have_expected_shapes() {
        let volume = volume();
        assert_eq!(volume.axial(1).unwrap().dim(), (3, 4));
        assert_eq!(volume.coronal(2).unwrap().dim(), (2, 4));
        assert_eq!(volume.sagittal(3).unwrap().dim(), (2, 3));
    }

    #[test]
    fn slices_read_the_right_voxels() {
        let volume = volume();
        assert_eq!(volume.axial(1).unwrap()[[2, 3]], 123);
        assert_eq!(
            volume.coronal(1).unwrap(),
            array![[10, 11, 12, 13], [110, 111, 112, 113]]
        );
        assert_eq!(
            volume.sagittal(2).unwrap(),
            array![[2, 12, 22], [102, 112, 122]]
        );
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let volume = volume();
        assert_eq!(
            volume.axial(2),
            Err(SliceError::IndexOutOfBounds {
                orientation: Orientation::Axial,
                index: 2,
                len: 2,
            })
        );
        assert!(volume.coronal(3).is_err());
        assert!(volume.sagittal(4).is_err());
    }
}

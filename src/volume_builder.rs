use crate::{enums::SortBy, metadata::SliceMetadata, volume::Volume};

use ndarray::{Array2, Array3, s};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VolumeBuilderError {
    #[error("No slices to build a volume from")]
    EmptyStack,

    #[error("Slice {index} has shape {found:?}, expected {expected:?}")]
    InconsistentShape {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// A single decoded 2D image with its header attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub pixels: Array2<i32>,
    pub metadata: SliceMetadata,
}

impl Slice {
    pub fn new(pixels: Array2<i32>, metadata: SliceMetadata) -> Self {
        Self { pixels, metadata }
    }
}

/// Slices in enumeration order plus how they should be ordered.
#[derive(Debug, Clone, Default)]
pub struct SliceStack {
    pub slices: Vec<Slice>,
    pub sort_by: SortBy,
}

impl SliceStack {
    pub fn new(slices: Vec<Slice>) -> Self {
        Self {
            slices,
            sort_by: SortBy::default(),
        }
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// A built volume together with the header of its first slice.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub volume: Volume,
    pub descriptor: SliceMetadata,
}

pub struct VolumeBuilder;

impl VolumeBuilder {
    /// Build a volume from a stack of slices
    ///
    /// Slices are ordered according to the stack's [`SortBy`], stacked along
    /// the first axis and rescaled with the first slice's slope and intercept.
    ///
    /// # Errors
    ///
    /// Returns error if the stack is empty or the slices differ in shape. The
    /// reported index is the slice's position in the input stack.
    pub fn build(stack: SliceStack) -> Result<LoadedSeries, VolumeBuilderError> {
        let SliceStack {
            mut slices,
            sort_by,
        } = stack;

        if slices.is_empty() {
            return Err(VolumeBuilderError::EmptyStack);
        }

        Self::validate_dimensions(&slices)?;
        Self::sort_slices(&mut slices, sort_by);

        let mut data = Self::build_volume_array(&slices);
        let descriptor = slices.swap_remove(0).metadata;

        let rescale = descriptor.rescale();
        if !rescale.is_identity() {
            data.par_mapv_inplace(|value| rescale.apply(value));
        }

        Ok(LoadedSeries {
            volume: Volume::new(data),
            descriptor,
        })
    }

    /// Stable ascending sort by instance number.
    ///
    /// If any slice lacks a usable key the enumeration order is kept as is.
    fn sort_slices(slices: &mut Vec<Slice>, sort_by: SortBy) {
        if matches!(sort_by, SortBy::None) {
            return;
        }

        let keys: Option<Vec<i64>> = slices
            .iter()
            .map(|slice| slice.metadata.ordering_key())
            .collect();

        match keys {
            Some(keys) => {
                let mut keyed: Vec<_> = keys.into_iter().zip(slices.drain(..)).collect();
                keyed.sort_by_key(|(key, _)| *key);
                slices.extend(keyed.into_iter().map(|(_, slice)| slice));
            }
            None => log::warn!("Missing instance number, keeping enumeration order"),
        }
    }

    fn validate_dimensions(slices: &[Slice]) -> Result<(), VolumeBuilderError> {
        let expected = slices[0].pixels.dim();
        match slices
            .iter()
            .enumerate()
            .find(|(_, slice)| slice.pixels.dim() != expected)
        {
            Some((index, slice)) => Err(VolumeBuilderError::InconsistentShape {
                index,
                expected,
                found: slice.pixels.dim(),
            }),
            None => Ok(()),
        }
    }

    fn build_volume_array(slices: &[Slice]) -> Array3<i32> {
        let (height, width) = slices[0].pixels.dim();
        let depth = slices.len();
        let mut volume = Array3::<i32>::zeros((depth, height, width));

        for (i, slice) in slices.iter().enumerate() {
            volume.slice_mut(s![i, .., ..]).assign(&slice.pixels);
        }

        volume
    }
}

use crate::{
    enums::SortBy,
    metadata::{AttributeValue, SliceMetadata},
    volume_builder::{LoadedSeries, Slice, SliceStack, VolumeBuilder, VolumeBuilderError},
};

use dicom::{
    core::Tag,
    object::{FileDicomObject, InMemDicomObject, open_file},
    pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder, VoiLutOption},
};
use dicom_dictionary_std::tags;
use ndarray::{Array2, s};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use web_time::Instant;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("No valid DICOM images found")]
    NoValidImages,

    #[error(transparent)]
    Build(#[from] VolumeBuilderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct VolumeLoader;

impl VolumeLoader {
    /// Load a volume from DICOM objects
    ///
    /// # Arguments
    ///
    /// * `dicom_objects` - Slice of DICOM file objects
    /// * `sort_by` - Method to sort the slices
    ///
    /// # Errors
    ///
    /// Returns error if no valid images found or dimensions are inconsistent
    pub fn load_from_dicom_objects(
        dicom_objects: &[FileDicomObject<InMemDicomObject>],
        sort_by: SortBy,
    ) -> Result<LoadedSeries, VolumeLoaderError> {
        let stack = Self::stack_from_dicom_objects(dicom_objects).with_sort_by(sort_by);
        if stack.is_empty() {
            return Err(VolumeLoaderError::NoValidImages);
        }
        Ok(VolumeBuilder::build(stack)?)
    }

    /// Decode every object that carries pixel data, skipping the rest.
    ///
    /// Decoding runs in parallel; the input order is preserved.
    pub fn stack_from_dicom_objects(
        dicom_objects: &[FileDicomObject<InMemDicomObject>],
    ) -> SliceStack {
        let slices = dicom_objects
            .par_iter()
            .filter_map(|dicom_object| {
                let Some(pixels) = Self::decode_image(dicom_object) else {
                    log::debug!("Skipping object without decodable pixel data");
                    return None;
                };
                Some(Slice::new(pixels, Self::extract_metadata(dicom_object)))
            })
            .collect();
        SliceStack::new(slices)
    }

    /// Load a volume from file paths. Unreadable files are skipped.
    pub fn load_from_file_paths(
        paths: &[impl AsRef<Path>],
        sort_by: SortBy,
    ) -> Result<LoadedSeries, VolumeLoaderError> {
        let objects: Vec<_> = paths
            .iter()
            .filter_map(|path| match open_file(path.as_ref()) {
                Ok(object) => Some(object),
                Err(e) => {
                    log::debug!("Skipping {}: {e}", path.as_ref().display());
                    None
                }
            })
            .collect();

        Self::load_from_dicom_objects(&objects, sort_by)
    }

    /// Load a volume from a directory containing .dcm files
    pub fn load_from_directory(
        path: impl AsRef<Path>,
        sort_by: SortBy,
    ) -> Result<LoadedSeries, VolumeLoaderError> {
        let start = Instant::now();
        let paths = Self::series_paths(path.as_ref())?;

        if paths.is_empty() {
            return Err(VolumeLoaderError::NoValidImages);
        }

        let series = Self::load_from_file_paths(&paths, sort_by)?;
        log::info!(
            "Loaded {} slices of {:?} from {} in {:?}",
            series.volume.dim().0,
            series.volume.dim(),
            path.as_ref().display(),
            start.elapsed()
        );
        Ok(series)
    }

    /// Candidate files in the directory, ordered by file name.
    fn series_paths(path: &Path) -> Result<Vec<PathBuf>, VolumeLoaderError> {
        let mut paths: Vec<_> = fs::read_dir(path)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && Self::is_series_file(path))
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn is_series_file(path: &Path) -> bool {
        let has_dcm_extension = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("dcm"));
        let has_trailing_dot = path
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|name| name.ends_with('.'));
        has_dcm_extension || has_trailing_dot
    }

    fn extract_metadata(dicom_object: &InMemDicomObject) -> SliceMetadata {
        SliceMetadata {
            instance_number: Self::attribute(dicom_object, tags::INSTANCE_NUMBER),
            rescale_slope: Self::attribute(dicom_object, tags::RESCALE_SLOPE),
            rescale_intercept: Self::attribute(dicom_object, tags::RESCALE_INTERCEPT),
            window_center: Self::attribute(dicom_object, tags::WINDOW_CENTER),
            window_width: Self::attribute(dicom_object, tags::WINDOW_WIDTH),
            slice_thickness: Self::attribute(dicom_object, tags::SLICE_THICKNESS),
            rows: Self::dimension(dicom_object, tags::ROWS),
            columns: Self::dimension(dicom_object, tags::COLUMNS),
        }
    }

    /// Numeric values when the element converts, otherwise its text.
    fn attribute(dicom_object: &InMemDicomObject, tag: Tag) -> AttributeValue {
        let Ok(element) = dicom_object.element(tag) else {
            return AttributeValue::Absent;
        };
        match element.to_multi_float64() {
            Ok(values) if values.len() == 1 => AttributeValue::Number(values[0]),
            Ok(values) if !values.is_empty() => AttributeValue::Numbers(values),
            _ => element
                .to_str()
                .map(|text| AttributeValue::Text(text.into_owned()))
                .unwrap_or_default(),
        }
    }

    fn dimension(dicom_object: &InMemDicomObject, tag: Tag) -> Option<u32> {
        dicom_object.element(tag).ok()?.to_int::<u32>().ok()
    }

    /// First frame, first sample, without modality or VOI transforms.
    fn decode_image(dicom_object: &FileDicomObject<InMemDicomObject>) -> Option<Array2<i32>> {
        let pixel_data = dicom_object.decode_pixel_data().ok()?;
        let options = ConvertOptions::new()
            .with_modality_lut(ModalityLutOption::None)
            .with_voi_lut(VoiLutOption::Identity);
        pixel_data
            .to_ndarray_with_options::<i32>(&options)
            .ok()
            .map(|arr| arr.slice_move(s![0, .., .., 0]))
    }
}

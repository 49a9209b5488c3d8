//! Plain data types shared by the engine wrappers.
//!
//! This module contains geometry, match results, image descriptions and the
//! enumerations the engine reports as integers. Nothing here owns native
//! memory.

use crate::error::{
    FacerecError, Result, IMAGE_SIZE_MISMATCH_ERROR_CODE, NULL_IMAGE_DATA_ERROR_CODE,
};
use crate::ffi::{RawDepthMapArgs, RawImageArgs, RawMatchResult};
use serde::{Deserialize, Serialize};
use std::ffi::c_void;

/// Library version these bindings were written against.
pub const LIBFACEREC_VERSION: &str = "3.28.00";

/// `person_id` / `element_id` reported when no database element matched.
pub const MATCH_NOT_FOUND_ID: u64 = u64::MAX;

/// A point in image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Relative depth for landmarks, 0 elsewhere
    #[serde(default)]
    pub z: f32,
}

/// Axis-aligned rectangle in image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Head orientation in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// Result of comparing two templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Distance between the templates; lower is more similar
    pub distance: f64,
    /// False acceptance rate at this distance
    pub fa_r: f64,
    /// False rejection rate at this distance
    pub fr_r: f64,
    /// Similarity score in `[0, 1]`
    pub score: f64,
}

impl From<RawMatchResult> for MatchResult {
    fn from(raw: RawMatchResult) -> Self {
        Self {
            distance: raw.distance,
            fa_r: raw.fa_r,
            fr_r: raw.fr_r,
            score: raw.score,
        }
    }
}

/// One neighbour returned by `Recognizer::search`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecognizerSearchResult {
    /// Position of the template in the searched index
    pub index: i64,
    pub match_result: MatchResult,
}

/// Orientation class of a captured face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleType {
    Frontal = 0,
    LeftProfile = 1,
    RightProfile = 2,
}

impl SampleType {
    pub(crate) fn from_raw(value: i32) -> Result<Self> {
        match value {
            0 => Ok(SampleType::Frontal),
            1 => Ok(SampleType::LeftProfile),
            2 => Ok(SampleType::RightProfile),
            other => Err(FacerecError::InvalidOperation(format!(
                "unknown sample type {other}"
            ))),
        }
    }
}

/// Which faces a capturer looks for. Shares numbering with [`SampleType`].
pub type CapturerType = SampleType;

/// Encoding used by `RawSample::save`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpg = 0,
    Png = 1,
    Tif = 2,
    Bmp = 3,
}

/// Pixel layout of a [`RawImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawImageFormat {
    Gray = 0,
    Rgb = 1,
    Bgr = 2,
    YuvNv21 = 3,
    YuvNv12 = 4,
}

impl RawImageFormat {
    /// Bytes needed for a `width` x `height` image in this layout.
    pub fn buffer_size(&self, width: i32, height: i32) -> usize {
        let pixels = width.max(0) as usize * height.max(0) as usize;
        match self {
            RawImageFormat::Gray => pixels,
            RawImageFormat::Rgb | RawImageFormat::Bgr => pixels * 3,
            RawImageFormat::YuvNv21 | RawImageFormat::YuvNv12 => pixels * 3 / 2,
        }
    }
}

/// Placement of a [`RawImage`] inside a larger buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropInfo {
    pub offset_x: i32,
    pub offset_y: i32,
    /// Width of the whole buffer
    pub data_image_width: i32,
    /// Height of the whole buffer
    pub data_image_height: i32,
}

/// Borrowed, uncompressed image handed to the engine.
///
/// Without `crop`, `data` holds exactly `width` x `height` pixels. With
/// `crop`, `data` holds the whole `data_image_width` x `data_image_height`
/// buffer and the image is the `width` x `height` region at the offset.
#[derive(Debug, Clone, Copy)]
pub struct RawImage<'a> {
    pub data: &'a [u8],
    pub width: i32,
    pub height: i32,
    pub format: RawImageFormat,
    pub crop: Option<CropInfo>,
}

impl<'a> RawImage<'a> {
    pub fn new(data: &'a [u8], width: i32, height: i32, format: RawImageFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
            crop: None,
        }
    }

    /// Region of a larger buffer.
    pub fn with_crop(
        data: &'a [u8],
        width: i32,
        height: i32,
        format: RawImageFormat,
        crop: CropInfo,
    ) -> Self {
        Self {
            data,
            width,
            height,
            format,
            crop: Some(crop),
        }
    }

    /// Checks the buffer against the declared geometry.
    pub fn validate(&self) -> Result<()> {
        if self.data.is_empty() {
            return Err(FacerecError::assertion(
                NULL_IMAGE_DATA_ERROR_CODE,
                "image has no data",
            ));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(FacerecError::assertion(
                IMAGE_SIZE_MISMATCH_ERROR_CODE,
                format!("invalid image size {}x{}", self.width, self.height),
            ));
        }

        let (buffer_width, buffer_height) = match self.crop {
            None => (self.width, self.height),
            Some(crop) => {
                let fits = crop.offset_x >= 0
                    && crop.offset_y >= 0
                    && crop.offset_x + self.width <= crop.data_image_width
                    && crop.offset_y + self.height <= crop.data_image_height;
                if !fits {
                    return Err(FacerecError::assertion(
                        IMAGE_SIZE_MISMATCH_ERROR_CODE,
                        format!(
                            "crop {}x{} at ({}, {}) exceeds buffer {}x{}",
                            self.width,
                            self.height,
                            crop.offset_x,
                            crop.offset_y,
                            crop.data_image_width,
                            crop.data_image_height
                        ),
                    ));
                }
                (crop.data_image_width, crop.data_image_height)
            }
        };

        let expected = self.format.buffer_size(buffer_width, buffer_height);
        if self.data.len() != expected {
            return Err(FacerecError::assertion(
                IMAGE_SIZE_MISMATCH_ERROR_CODE,
                format!(
                    "image buffer has {} bytes, {:?} {}x{} needs {}",
                    self.data.len(),
                    self.format,
                    buffer_width,
                    buffer_height,
                    expected
                ),
            ));
        }
        Ok(())
    }

    /// Validated arguments for the engine's `*_with_crop` functions.
    pub(crate) fn to_args(&self) -> Result<RawImageArgs> {
        self.validate()?;
        let crop = self.crop.unwrap_or(CropInfo {
            offset_x: -1,
            offset_y: -1,
            data_image_width: -1,
            data_image_height: -1,
        });
        Ok(RawImageArgs {
            data: self.data.as_ptr() as *const c_void,
            width: self.width,
            height: self.height,
            format: self.format as i32,
            with_crop: self.crop.is_some() as i32,
            crop_offset_x: crop.offset_x,
            crop_offset_y: crop.offset_y,
            crop_data_width: crop.data_image_width,
            crop_data_height: crop.data_image_height,
        })
    }
}

/// Depth frame passed to `VideoWorker::add_depth_frame`.
#[derive(Debug, Clone, Copy)]
pub struct DepthMap<'a> {
    pub rows: i32,
    pub cols: i32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub horizontal_fov: f32,
    pub vertical_fov: f32,
    pub depth_unit_in_millimeters: f32,
    pub data: &'a [u16],
    pub stride_in_bytes: i32,
}

impl DepthMap<'_> {
    pub(crate) fn to_args(&self) -> Result<RawDepthMapArgs> {
        if self.data.is_empty() {
            return Err(FacerecError::assertion(
                NULL_IMAGE_DATA_ERROR_CODE,
                "depth map has no data",
            ));
        }
        let needed = self.rows.max(0) as usize * self.stride_in_bytes.max(0) as usize;
        if self.data.len() * 2 < needed || self.stride_in_bytes < self.cols * 2 {
            return Err(FacerecError::assertion(
                IMAGE_SIZE_MISMATCH_ERROR_CODE,
                format!(
                    "depth map buffer too small for {} rows of {} bytes",
                    self.rows, self.stride_in_bytes
                ),
            ));
        }
        Ok(RawDepthMapArgs {
            rows: self.rows,
            cols: self.cols,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            horizontal_fov: self.horizontal_fov,
            vertical_fov: self.vertical_fov,
            depth_unit_in_millimeters: self.depth_unit_in_millimeters,
            data: self.data.as_ptr(),
            stride_in_bytes: self.stride_in_bytes,
        })
    }
}

/// Outcome of one per-sample check reported by the video worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Passed,
    Failed,
    NotComputed,
}

impl Verdict {
    pub(crate) fn from_raw(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Verdict::Passed),
            1 => Ok(Verdict::Failed),
            2 => Ok(Verdict::NotComputed),
            other => Err(FacerecError::InvalidOperation(format!("unknown verdict {other}"))),
        }
    }
}

/// Depth liveness state of a tracked face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Liveness {
    NotEnoughData,
    Real,
    Fake,
    NotComputed,
}

impl Liveness {
    pub(crate) fn from_raw(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Liveness::NotEnoughData),
            1 => Ok(Liveness::Real),
            2 => Ok(Liveness::Fake),
            3 => Ok(Liveness::NotComputed),
            other => Err(FacerecError::InvalidOperation(format!("unknown liveness {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

/// Age group: kid `[0, 18)`, young `[18, 37)`, adult `[37, 55)`, senior `55+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Age {
    Kid,
    Young,
    Adult,
    Senior,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeGender {
    pub gender: Gender,
    pub age: Age,
    pub age_years: f32,
}

impl AgeGender {
    pub(crate) fn from_raw(gender: i64, age: i64, age_years: f32) -> Result<Self> {
        let gender = match gender {
            0 => Gender::Female,
            1 => Gender::Male,
            other => {
                return Err(FacerecError::InvalidOperation(format!("unknown gender {other}")))
            }
        };
        let age = match age {
            0 => Age::Kid,
            1 => Age::Young,
            2 => Age::Adult,
            3 => Age::Senior,
            other => return Err(FacerecError::InvalidOperation(format!("unknown age {other}"))),
        };
        Ok(Self {
            gender,
            age,
            age_years,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emotion {
    Neutral,
    Happy,
    Angry,
    Surprise,
    Disgusted,
    Scared,
    Sad,
}

impl Emotion {
    pub(crate) fn from_raw(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Emotion::Neutral),
            1 => Ok(Emotion::Happy),
            2 => Ok(Emotion::Angry),
            3 => Ok(Emotion::Surprise),
            4 => Ok(Emotion::Disgusted),
            5 => Ok(Emotion::Scared),
            6 => Ok(Emotion::Sad),
            other => Err(FacerecError::InvalidOperation(format!("unknown emotion {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionConfidence {
    pub emotion: Emotion,
    pub confidence: f32,
}

/// Index acceleration for `Recognizer::search` and `VideoWorker::set_database`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchAccelerationType {
    #[default]
    NoSearchAcceleration = 0,
    SearchAcceleration1 = 1,
}

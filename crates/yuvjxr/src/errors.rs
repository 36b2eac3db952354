/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::uninlined_format_args)]

use std::fmt::{Debug, Display, Formatter};

use crate::quality::MAX_QUALITY;

/// Dimensions of an encoded image must be a multiple of this
pub const DIMENSION_ALIGNMENT: usize = 16;

/// The codec call that was running when a backend failed
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EncodeStage {
    CreateFactory,
    CreateStream,
    CreateCodecFactory,
    CreateCodec,
    Initialize,
    SetPixelFormat,
    SetSize,
    WritePixels
}

impl Display for EncodeStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EncodeStage::CreateFactory => "create factory",
            EncodeStage::CreateStream => "open output stream",
            EncodeStage::CreateCodecFactory => "create codec factory",
            EncodeStage::CreateCodec => "create encoder",
            EncodeStage::Initialize => "initialize encoder",
            EncodeStage::SetPixelFormat => "set pixel format",
            EncodeStage::SetSize => "set image size",
            EncodeStage::WritePixels => "write pixels"
        };
        write!(f, "{name}")
    }
}

/// Errors that may arise while preparing or encoding an image
pub enum JxrEncodeErrors {
    /// Quality is above 100
    InvalidQuality(u8),
    /// A dimension is zero
    ///
    /// The argument names the dimension, `width` or `height`
    ZeroDimension(&'static str),
    /// A dimension is odd, 4:2:0 chroma needs even dimensions
    ///
    /// # Arguments
    /// - 1st argument names the dimension
    /// - 2nd argument is the offending value
    OddDimension(&'static str, usize),
    /// Width or height is not a multiple of [`DIMENSION_ALIGNMENT`]
    UnalignedDimensions(usize, usize),
    /// `width * height * 3 / 2` does not fit in a `usize`
    TooLargeDimensions(usize),
    /// The planar buffer does not have exactly the number of bytes
    /// the dimensions call for
    ///
    /// # Arguments
    /// - 1st argument is the expected length
    /// - 2nd argument is the length found
    LengthMismatch(usize, usize),
    /// No codec backend was compiled in
    BackendUnavailable,
    /// A codec call failed
    Codec { stage: EncodeStage, code: i64 },
    /// Generic message
    Generic(String)
}

impl JxrEncodeErrors {
    /// Whether the error comes from bad caller input rather
    /// than from the codec
    ///
    /// These are all detected before any buffer is allocated
    /// or any codec resource is acquired.
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            JxrEncodeErrors::InvalidQuality(_)
                | JxrEncodeErrors::ZeroDimension(_)
                | JxrEncodeErrors::OddDimension(_, _)
                | JxrEncodeErrors::UnalignedDimensions(_, _)
                | JxrEncodeErrors::TooLargeDimensions(_)
                | JxrEncodeErrors::LengthMismatch(_, _)
        )
    }
}

impl Debug for JxrEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JxrEncodeErrors::InvalidQuality(quality) => {
                writeln!(
                    f,
                    "Invalid quality {quality}, expected a value between 0 and {MAX_QUALITY}"
                )
            }
            JxrEncodeErrors::ZeroDimension(param) => writeln!(f, "The {param} is zero"),
            JxrEncodeErrors::OddDimension(param, value) => {
                writeln!(f, "The {param} {value} is odd, 4:2:0 images need even dimensions")
            }
            JxrEncodeErrors::UnalignedDimensions(width, height) => {
                writeln!(
                    f,
                    "Image dimensions {width}x{height} must be multiples of {}",
                    DIMENSION_ALIGNMENT
                )
            }
            JxrEncodeErrors::TooLargeDimensions(value) => {
                writeln!(f, "Too large dimensions, {value} overflows the image size")
            }
            JxrEncodeErrors::LengthMismatch(expected, found) => {
                writeln!(f, "Expected buffer of length {expected} but found {found}")
            }
            JxrEncodeErrors::BackendUnavailable => {
                writeln!(
                    f,
                    "No JPEG-XR backend available, rebuild with the `jxrlib` feature"
                )
            }
            JxrEncodeErrors::Codec { stage, code } => {
                writeln!(f, "Codec failed to {stage}, error code {code}")
            }
            JxrEncodeErrors::Generic(val) => writeln!(f, "{val}")
        }
    }
}

impl Display for JxrEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for JxrEncodeErrors {}

impl From<String> for JxrEncodeErrors {
    fn from(value: String) -> Self {
        JxrEncodeErrors::Generic(value)
    }
}

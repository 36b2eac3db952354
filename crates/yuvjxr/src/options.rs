/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::errors::{JxrEncodeErrors, DIMENSION_ALIGNMENT};
use crate::quality::MAX_QUALITY;

/// Options for encoding a single image
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct JxrEncoderOptions {
    width:   usize,
    height:  usize,
    quality: u8
}

impl Default for JxrEncoderOptions {
    fn default() -> Self {
        Self {
            width:   0,
            height:  0,
            quality: 80
        }
    }
}

impl JxrEncoderOptions {
    /// Create options for a `width` x `height` image encoded at `quality`
    pub const fn new(width: usize, height: usize, quality: u8) -> JxrEncoderOptions {
        JxrEncoderOptions {
            width,
            height,
            quality
        }
    }

    /// Get the width for which the image will be encoded in
    pub const fn get_width(&self) -> usize {
        self.width
    }

    /// Get the height for which the image will be encoded in
    pub const fn get_height(&self) -> usize {
        self.height
    }

    /// Get the quality for which the image will be encoded with
    ///
    /// 100 means lossless, lower values trade quality for size
    pub const fn get_quality(&self) -> u8 {
        self.quality
    }

    /// Set width for the image to be encoded
    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set height for the image to be encoded
    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Set quality of the image to be encoded
    ///
    /// Values above 100 are kept as is and rejected by [`validate`](Self::validate)
    pub fn set_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Check the options describe something the encoder accepts
    ///
    /// # Errors
    /// - Zero width or height
    /// - Width or height not a multiple of 16
    /// - Quality above 100
    pub fn validate(&self) -> Result<(), JxrEncodeErrors> {
        if self.width == 0 {
            return Err(JxrEncodeErrors::ZeroDimension("width"));
        }
        if self.height == 0 {
            return Err(JxrEncodeErrors::ZeroDimension("height"));
        }
        if self.width % DIMENSION_ALIGNMENT != 0 || self.height % DIMENSION_ALIGNMENT != 0 {
            return Err(JxrEncodeErrors::UnalignedDimensions(self.width, self.height));
        }
        if self.quality > MAX_QUALITY {
            return Err(JxrEncodeErrors::InvalidQuality(self.quality));
        }
        Ok(())
    }
}

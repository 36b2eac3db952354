/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Codec configuration handed to the backend

use crate::errors::JxrEncodeErrors;
use crate::quality::{map_quality, QpIndices};

/// Internal colour format of the coded image
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorFormat {
    /// Luma at full resolution, chroma halved in both directions
    Yuv420
}

/// Width of the samples handed to the codec
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SampleDepth {
    /// 16 bit samples
    Short,
    /// 32 bit samples, what [`pack`](crate::pack) produces
    Long
}

/// Layout of the pixels passed to the codec's pixel writer
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelFormat {
    /// 12 bits per pixel YCC 4:2:0, interleaved as produced by
    /// [`pack`](crate::pack)
    Ycc420Packed12bpp
}

/// Parameters the codec is initialized with
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CodecParams {
    /// Input is already YUV, the codec must not convert it
    pub yuv_data:     bool,
    pub color_format: ColorFormat,
    pub bit_depth:    SampleDepth,
    pub qp:           QpIndices
}

impl CodecParams {
    /// Parameters for a 4:2:0 image encoded with the given indices
    pub const fn new(qp: QpIndices) -> CodecParams {
        CodecParams {
            yuv_data: true,
            color_format: ColorFormat::Yuv420,
            bit_depth: SampleDepth::Long,
            qp
        }
    }

    /// Parameters for a 4:2:0 image encoded at `quality`
    ///
    /// # Errors
    /// [`JxrEncodeErrors::InvalidQuality`] if `quality` is above 100
    pub fn from_quality(quality: u8) -> Result<CodecParams, JxrEncodeErrors> {
        Ok(CodecParams::new(map_quality(quality)?))
    }

    pub const fn is_lossless(&self) -> bool {
        self.qp.is_lossless()
    }
}

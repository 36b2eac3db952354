/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Quality to quantization parameter mapping
//!
//! JPEG-XR does not have a quality knob, it takes quantization parameter
//! indices for the luma and chroma channels, each split into a
//! lowpass/DC value and a highpass value.
//!
//! We map a 0-100 quality onto those indices by linearly interpolating
//! between rows of a table tuned for PSNR on 8 bit 4:2:0 content.
//! A quality of 100 is special, it yields all-zero indices which the
//! codec treats as lossless.

use crate::errors::JxrEncodeErrors;
use crate::log::trace;

/// Number of rows in [`QP_TABLE_420`]
pub const QP_TABLE_SIZE: usize = 11;

/// Highest accepted quality, also the lossless sentinel
pub const MAX_QUALITY: u8 = 100;

/// Quantization parameter indices for 8 bit 4:2:0 images
///
/// Each row is `[Y, U, V, Y highpass, U highpass, V highpass]`.
/// Row 0 compresses the most and row 10 is near lossless, every column
/// is non-increasing going down.
#[rustfmt::skip]
pub const QP_TABLE_420: [[u8; 6]; QP_TABLE_SIZE] = [
    [66, 65, 70, 72, 72, 77],
    [59, 58, 63, 64, 63, 68],
    [52, 51, 57, 56, 56, 61],
    [48, 48, 54, 51, 50, 55],
    [43, 44, 48, 46, 46, 49],
    [37, 37, 42, 38, 38, 43],
    [26, 28, 31, 27, 28, 31],
    [16, 17, 22, 16, 17, 21],
    [10, 11, 13, 10, 10, 13],
    [ 5,  5,  6,  5,  5,  6],
    [ 2,  2,  3,  2,  2,  2],
];

/// The six quantization parameter indices handed to the codec
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct QpIndices {
    pub y:    u8,
    pub u:    u8,
    pub v:    u8,
    pub y_hp: u8,
    pub u_hp: u8,
    pub v_hp: u8
}

impl QpIndices {
    /// All indices zero, the codec encodes losslessly
    pub const LOSSLESS: QpIndices = QpIndices::from_row([0; 6]);

    /// Build indices from a `[Y, U, V, Y highpass, U highpass, V highpass]` row
    pub const fn from_row(row: [u8; 6]) -> QpIndices {
        QpIndices {
            y:    row[0],
            u:    row[1],
            v:    row[2],
            y_hp: row[3],
            u_hp: row[4],
            v_hp: row[5]
        }
    }

    /// Return indices in table order,
    /// `[Y, U, V, Y highpass, U highpass, V highpass]`
    pub const fn to_array(&self) -> [u8; 6] {
        [self.y, self.u, self.v, self.y_hp, self.u_hp, self.v_hp]
    }

    /// Whether these indices select lossless coding
    pub const fn is_lossless(&self) -> bool {
        self.y == 0
            && self.u == 0
            && self.v == 0
            && self.y_hp == 0
            && self.u_hp == 0
            && self.v_hp == 0
    }
}

/// Map a quality value in `0..=100` to codec quantization indices
///
/// Quality 100 returns [`QpIndices::LOSSLESS`]. Anything lower picks
/// a position between two rows of [`QP_TABLE_420`] and blends them,
/// rounding half up.
///
/// The arithmetic is done in `f32` so the results match what the
/// reference JPEG-XR tooling produces for the same quality.
///
/// # Errors
/// [`JxrEncodeErrors::InvalidQuality`] if `quality` is above 100
pub fn map_quality(quality: u8) -> Result<QpIndices, JxrEncodeErrors> {
    if quality > MAX_QUALITY {
        return Err(JxrEncodeErrors::InvalidQuality(quality));
    }
    if quality == MAX_QUALITY {
        return Ok(QpIndices::LOSSLESS);
    }

    let q = f32::from(quality) / 100.0;
    let pos = (QP_TABLE_SIZE - 1) as f32 * q;

    let mut index = pos as usize;
    let mut frac = pos - index as f32;

    if index >= QP_TABLE_SIZE - 1 {
        // only reachable if rounding carried pos up to the last row
        index = QP_TABLE_SIZE - 2;
        frac = 1.0;
    }

    let lower = &QP_TABLE_420[index];
    let upper = &QP_TABLE_420[index + 1];

    let mut row = [0_u8; 6];

    for ((out, &lo), &hi) in row.iter_mut().zip(lower).zip(upper) {
        *out = (0.5 + f32::from(lo) * (1.0 - frac) + f32::from(hi) * frac) as u8;
    }

    trace!("Quality {quality}: table row {index}, fraction {frac}, indices {row:?}");

    Ok(QpIndices::from_row(row))
}

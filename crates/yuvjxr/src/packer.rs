/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Planar 4:2:0 to interleaved sample packing
//!
//! The JPEG-XR encoder takes 4:2:0 input as one stream of `i32`s,
//! six per 2x2 luma block, in the order
//!
//! ```text
//! Y(x,y) Y(x+1,y) Y(x,y+1) Y(x+1,y+1) U V
//! ```
//!
//! Blocks run left to right along a two row band and bands run top to
//! bottom. Every sample is centered around zero and widened by three bits,
//! `(byte - 128) << 3`.
//!
//! Getting any of this wrong does not make the encoder fail, it silently
//! produces garbage, so the layout here must not change.

use crate::errors::JxrEncodeErrors;
use crate::log::debug;

/// Bits a source byte is widened by
const SAMPLE_SHIFT: u32 = 3;
/// Center of the 8 bit sample range
const SAMPLE_BIAS: i32 = 128;
/// Output samples written per 2x2 luma block
const SAMPLES_PER_BLOCK: usize = 6;

/// Convert one source byte to the encoder's signed representation
#[inline(always)]
pub const fn pack_sample(value: u8) -> i32 {
    (value as i32 - SAMPLE_BIAS) << SAMPLE_SHIFT
}

/// Recover the source byte from a packed sample
#[inline(always)]
pub const fn unpack_sample(value: i32) -> u8 {
    ((value >> SAMPLE_SHIFT) + SAMPLE_BIAS) as u8
}

/// Number of bytes in a planar 4:2:0 image of the given dimensions
///
/// Returns `None` if the size overflows a `usize`.
pub fn planar_420_size(width: usize, height: usize) -> Option<usize> {
    let luma = width.checked_mul(height)?;
    let chroma = (width / 2).checked_mul(height / 2)?;

    luma.checked_add(chroma.checked_mul(2)?)
}

fn check_dimension(name: &'static str, value: usize) -> Result<(), JxrEncodeErrors> {
    if value == 0 {
        return Err(JxrEncodeErrors::ZeroDimension(name));
    }
    if value % 2 != 0 {
        return Err(JxrEncodeErrors::OddDimension(name, value));
    }
    Ok(())
}

/// A borrowed planar YUV 4:2:0 image
///
/// Holds a full resolution luma plane followed by the U and V planes,
/// each at half width and half height.
#[derive(Copy, Clone, Debug)]
pub struct PlanarImage<'a> {
    data:   &'a [u8],
    width:  usize,
    height: usize
}

impl<'a> PlanarImage<'a> {
    /// Wrap `data` as a `width` x `height` planar 4:2:0 image
    ///
    /// # Errors
    /// - Zero or odd dimensions
    /// - `data.len()` is not exactly `width * height * 3 / 2`
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<PlanarImage<'a>, JxrEncodeErrors> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;

        let expected =
            planar_420_size(width, height).ok_or(JxrEncodeErrors::TooLargeDimensions(width))?;

        if data.len() != expected {
            return Err(JxrEncodeErrors::LengthMismatch(expected, data.len()));
        }

        Ok(PlanarImage {
            data,
            width,
            height
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    fn chroma_len(&self) -> usize {
        (self.width / 2) * (self.height / 2)
    }

    /// The full resolution luma plane
    pub fn luma(&self) -> &'a [u8] {
        &self.data[..self.width * self.height]
    }

    /// The U plane, `width/2` x `height/2`
    pub fn chroma_u(&self) -> &'a [u8] {
        let start = self.width * self.height;
        &self.data[start..start + self.chroma_len()]
    }

    /// The V plane, `width/2` x `height/2`
    pub fn chroma_v(&self) -> &'a [u8] {
        let start = self.width * self.height + self.chroma_len();
        &self.data[start..start + self.chroma_len()]
    }
}

/// Interleaved signed samples ready for the encoder
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackedImage {
    samples: Vec<i32>,
    width:   usize,
    height:  usize
}

impl PackedImage {
    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [i32] {
        &mut self.samples
    }

    /// Number of lines handed to the encoder's pixel writer
    pub const fn lines(&self) -> usize {
        self.height
    }

    /// Stride in bytes the encoder expects for this layout,
    /// three `i32` samples per luma column
    pub const fn stride(&self) -> usize {
        self.width * 3 * core::mem::size_of::<i32>()
    }

    pub fn into_inner(self) -> Vec<i32> {
        self.samples
    }
}

/// Pack a validated planar image
///
/// The output has one `i32` per input byte.
pub fn pack_yuv(image: &PlanarImage) -> PackedImage {
    let (width, height) = (image.width(), image.height());
    let chroma_width = width / 2;

    let luma = image.luma();
    let chroma_u = image.chroma_u();
    let chroma_v = image.chroma_v();

    let mut samples = Vec::with_capacity(luma.len() + chroma_u.len() + chroma_v.len());

    for y in (0..height).step_by(2) {
        let top = &luma[y * width..(y + 1) * width];
        let bottom = &luma[(y + 1) * width..(y + 2) * width];
        let chroma_row = (y / 2) * chroma_width;

        for x in (0..width).step_by(2) {
            let c = chroma_row + x / 2;

            samples.extend_from_slice(&[
                pack_sample(top[x]),
                pack_sample(top[x + 1]),
                pack_sample(bottom[x]),
                pack_sample(bottom[x + 1]),
                pack_sample(chroma_u[c]),
                pack_sample(chroma_v[c])
            ]);
        }
    }
    debug_assert_eq!(
        samples.len(),
        (width / 2) * (height / 2) * SAMPLES_PER_BLOCK
    );

    PackedImage {
        samples,
        width,
        height
    }
}

/// Pack a planar YUV 4:2:0 buffer into the encoder's interleaved layout
///
/// # Errors
/// Fails before allocating anything if the dimensions are zero or odd,
/// or if `source` is not exactly `width * height * 3 / 2` bytes long.
pub fn pack(source: &[u8], width: usize, height: usize) -> Result<PackedImage, JxrEncodeErrors> {
    let image = PlanarImage::new(source, width, height)?;

    debug!("Packing {width}x{height} 4:2:0 image, {} bytes", source.len());

    Ok(pack_yuv(&image))
}

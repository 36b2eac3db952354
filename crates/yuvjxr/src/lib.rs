/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Planar YUV 4:2:0 to JPEG-XR encoding
//!
//! This crate prepares raw 8 bit YUV 4:2:0 images for a JPEG-XR codec
//! and drives that codec.
//!
//! It contains
//!
//! - A quality mapper, which turns a 0-100 quality value into the six
//!   quantization parameter indices the codec understands
//! - A sample packer, which converts planar 4:2:0 bytes into the
//!   interleaved, signed, 32 bit layout the codec consumes
//! - An encode driver that owns the codec lifecycle for a single image
//!
//! The codec itself sits behind the [`JxrBackend`] trait. A binding to the
//! reference jxrlib library is available with the `jxrlib` feature.
//!
//! # Example
//! ```
//! use yuvjxr::{map_quality, pack};
//!
//! let qp = map_quality(50).unwrap();
//! assert_eq!(qp.to_array(), [37, 37, 42, 38, 38, 43]);
//!
//! let packed = pack(&[10, 20, 30, 40, 50, 60], 2, 2).unwrap();
//! assert_eq!(packed.samples(), &[-944, -864, -784, -704, -624, -544]);
//! ```
//!
//! # Features
//!  - `log`: Route internal diagnostics through the `log` crate (default)
//!  - `serde`: Implement `Serialize` for the codec parameter types
//!  - `jxrlib`: Link the jxrlib backend, requires `libjxrglue` and `libjpegxr`

pub use encoder::*;
pub use errors::*;
pub use options::JxrEncoderOptions;
pub use packer::*;
pub use params::*;
pub use quality::*;

mod encoder;
mod errors;
#[cfg(feature = "jxrlib")]
pub mod jxrlib;
mod log;
mod options;
mod packer;
mod params;
mod quality;
mod serde;

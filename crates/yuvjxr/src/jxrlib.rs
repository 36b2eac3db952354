/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Backend for the jxrlib reference codec
//!
//! Links against `libjxrglue` and `libjpegxr`. Every jxrlib object is held
//! by a guard whose `Drop` hands it back to the library, and
//! [`JxrLibEncoder`] declares its guards newest first, so the codec is
//! released before the codec factory, which goes before the stream and
//! the factory.
//!
//! # Safety
//! Only the leading function pointer slots of jxrlib's object structs are
//! declared, matching `JXRGlue.h` from jxrlib 1.1. The parameter block is
//! the full `CWMIStrCodecParam`; the library checks its size on
//! `Initialize` and refuses a mismatched one.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::ffi::CString;
use std::path::Path;
use std::ptr;

use crate::encoder::{JxrBackend, JxrImageEncode};
use crate::errors::{EncodeStage, JxrEncodeErrors};
use crate::log::{trace, warn};
use crate::packer::PackedImage;
use crate::params::{CodecParams, ColorFormat, PixelFormat, SampleDepth};

mod sys {
    use std::os::raw::{c_char, c_int, c_long, c_void};

    pub type ERR = c_long;
    pub type Bool = c_int;
    pub type PKIID = u32;

    pub const PK_SDK_VERSION: u32 = 0x0101;
    pub const WMP_SDK_VERSION: u32 = 0x0101;

    /// `COLORFORMAT::YUV_420`
    pub const YUV_420: c_int = 1;
    /// `BITDEPTH::BD_SHORT`
    pub const BD_SHORT: c_int = 0;
    /// `BITDEPTH::BD_LONG`
    pub const BD_LONG: c_int = 1;

    pub const MAX_TILES: usize = 4096;

    #[repr(C)]
    #[derive(Copy, Clone)]
    pub struct PKPixelFormatGUID {
        pub Data1: u32,
        pub Data2: u16,
        pub Data3: u16,
        pub Data4: [u8; 8]
    }

    /// Opaque `struct WMPStream`
    #[repr(C)]
    pub struct WMPStream {
        _private: [u8; 0]
    }

    /// Slot we never call, only there to keep offsets right
    pub type Unused = Option<unsafe extern "C" fn()>;

    #[repr(C)]
    pub struct PKFactory {
        pub CreateStream:             Unused,
        pub ReleaseStream:            Unused,
        pub CreateStreamFromFilename:
            unsafe extern "C" fn(*mut *mut WMPStream, *const c_char, *const c_char) -> ERR,
        pub CreateStreamFromMemory:   Unused,
        pub Release:                  unsafe extern "C" fn(*mut *mut PKFactory) -> ERR
    }

    #[repr(C)]
    pub struct PKCodecFactory {
        pub CreateCodec:           unsafe extern "C" fn(*const PKIID, *mut *mut c_void) -> ERR,
        pub CreateDecoderFromFile: Unused,
        pub CreateFormatConverter: Unused,
        pub Release:               unsafe extern "C" fn(*mut *mut PKCodecFactory) -> ERR
    }

    #[repr(C)]
    pub struct PKImageEncode {
        pub Initialize:
            unsafe extern "C" fn(*mut PKImageEncode, *mut WMPStream, *mut c_void, usize) -> ERR,
        pub Terminate:              Unused,
        pub SetPixelFormat:         unsafe extern "C" fn(*mut PKImageEncode, PKPixelFormatGUID) -> ERR,
        pub SetSize:                unsafe extern "C" fn(*mut PKImageEncode, i32, i32) -> ERR,
        pub SetResolution:          Unused,
        pub SetColorContext:        Unused,
        pub SetDescriptiveMetadata: Unused,
        pub WritePixels:            unsafe extern "C" fn(*mut PKImageEncode, u32, *mut u8, u32) -> ERR,
        pub WriteSource:            Unused,
        pub WritePixelsBandedBegin: Unused,
        pub WritePixelsBanded:      Unused,
        pub WritePixelsBandedEnd:   Unused,
        pub Transcode:              Unused,
        pub CreateNewFrame:         Unused,
        pub Release:                unsafe extern "C" fn(*mut *mut PKImageEncode) -> ERR
    }

    #[repr(C)]
    pub struct CWMIStrCodecParam {
        pub bVerbose:               Bool,
        pub uiDefaultQPIndex:       u8,
        pub uiDefaultQPIndexYLP:    u8,
        pub uiDefaultQPIndexYHP:    u8,
        pub uiDefaultQPIndexU:      u8,
        pub uiDefaultQPIndexULP:    u8,
        pub uiDefaultQPIndexUHP:    u8,
        pub uiDefaultQPIndexV:      u8,
        pub uiDefaultQPIndexVLP:    u8,
        pub uiDefaultQPIndexVHP:    u8,
        pub uiDefaultQPIndexAlpha:  u8,
        pub cfColorFormat:          c_int,
        pub bdBitDepth:             c_int,
        pub olOverlap:              c_int,
        pub bfBitstreamFormat:      c_int,
        pub cChannel:               usize,
        pub uAlphaMode:             u8,
        pub sbSubband:              c_int,
        pub uiTrimFlexBits:         u8,
        pub pWStream:               *mut WMPStream,
        pub cbStream:               usize,
        pub cNumOfSliceMinus1V:     u32,
        pub uiTileX:                [u32; MAX_TILES],
        pub cNumOfSliceMinus1H:     u32,
        pub uiTileY:                [u32; MAX_TILES],
        pub nLenMantissaOrShift:    u8,
        pub nExpBias:               i8,
        pub bBlackWhite:            Bool,
        pub bUseHardTileBoundaries: Bool,
        pub bProgressiveMode:       Bool,
        pub bYUVData:               Bool,
        pub bUnscaledArith:         Bool,
        pub fMeasurePerf:           Bool
    }

    #[link(name = "jxrglue")]
    #[link(name = "jpegxr")]
    extern "C" {
        pub static IID_PKImageWmpEncode: PKIID;
        pub static GUID_PKPixelFormat12bppYCC420: PKPixelFormatGUID;

        pub fn PKCreateFactory(ppFactory: *mut *mut PKFactory, uVersion: u32) -> ERR;
        pub fn PKCreateCodecFactory(ppCFactory: *mut *mut PKCodecFactory, uVersion: u32) -> ERR;
        pub fn PKFree(ppv: *mut *mut c_void) -> ERR;
        pub fn CloseWS_File(ppWS: *mut *mut WMPStream) -> ERR;
    }
}

fn check(stage: EncodeStage, err: sys::ERR) -> Result<(), JxrEncodeErrors> {
    if err < 0 {
        return Err(JxrEncodeErrors::Codec {
            stage,
            code: i64::from(err)
        });
    }
    trace!("jxrlib: {stage} ok");
    Ok(())
}

fn to_c_int(stage: EncodeStage, value: usize) -> Result<u32, JxrEncodeErrors> {
    u32::try_from(value)
        .ok()
        .filter(|v| i32::try_from(*v).is_ok())
        .ok_or_else(|| JxrEncodeErrors::Generic(format!("{value} is too large to {stage}")))
}

fn build_params(params: &CodecParams) -> Box<sys::CWMIStrCodecParam> {
    let color_format = match params.color_format {
        ColorFormat::Yuv420 => sys::YUV_420
    };
    let bit_depth = match params.bit_depth {
        SampleDepth::Short => sys::BD_SHORT,
        SampleDepth::Long => sys::BD_LONG
    };
    let qp = &params.qp;

    // 32k of tile tables, keep it off the stack
    Box::new(sys::CWMIStrCodecParam {
        bVerbose:               0,
        uiDefaultQPIndex:       qp.y,
        uiDefaultQPIndexYLP:    0,
        uiDefaultQPIndexYHP:    qp.y_hp,
        uiDefaultQPIndexU:      qp.u,
        uiDefaultQPIndexULP:    0,
        uiDefaultQPIndexUHP:    qp.u_hp,
        uiDefaultQPIndexV:      qp.v,
        uiDefaultQPIndexVLP:    0,
        uiDefaultQPIndexVHP:    qp.v_hp,
        uiDefaultQPIndexAlpha:  0,
        cfColorFormat:          color_format,
        bdBitDepth:             bit_depth,
        olOverlap:              0,
        bfBitstreamFormat:      0,
        cChannel:               0,
        uAlphaMode:             0,
        sbSubband:              0,
        uiTrimFlexBits:         0,
        pWStream:               ptr::null_mut(),
        cbStream:               0,
        cNumOfSliceMinus1V:     0,
        uiTileX:                [0; sys::MAX_TILES],
        cNumOfSliceMinus1H:     0,
        uiTileY:                [0; sys::MAX_TILES],
        nLenMantissaOrShift:    0,
        nExpBias:               0,
        bBlackWhite:            0,
        bUseHardTileBoundaries: 0,
        bProgressiveMode:       0,
        bYUVData:               sys::Bool::from(params.yuv_data),
        bUnscaledArith:         0,
        fMeasurePerf:           0
    })
}

struct Factory(*mut sys::PKFactory);

impl Drop for Factory {
    fn drop(&mut self) {
        // SAFETY: non-null pointer obtained from PKCreateFactory, released once
        let err = unsafe { ((*self.0).Release)(&mut self.0) };
        if err < 0 {
            warn!("jxrlib: releasing factory failed with {err}");
        }
    }
}

/// Output stream, owned by us until it is attached to an encoder
struct Stream(*mut sys::WMPStream);

impl Drop for Stream {
    fn drop(&mut self) {
        if self.0.is_null() {
            return;
        }
        // SAFETY: stream was opened by CreateStreamFromFilename and not attached
        let err = unsafe { sys::CloseWS_File(&mut self.0) };
        if err < 0 {
            warn!("jxrlib: closing stream failed with {err}");
        }
    }
}

struct CodecFactory(*mut sys::PKCodecFactory);

impl Drop for CodecFactory {
    fn drop(&mut self) {
        // SAFETY: non-null pointer obtained from PKCreateCodecFactory
        let err = unsafe { ((*self.0).Release)(&mut self.0) };
        if err < 0 {
            warn!("jxrlib: releasing codec factory failed with {err}");
        }
    }
}

struct Codec {
    raw:      *mut sys::PKImageEncode,
    /// Set once `Initialize` has taken the stream, from then on the
    /// encoder's `Release` closes it
    attached: bool
}

impl Drop for Codec {
    fn drop(&mut self) {
        // SAFETY: pointer obtained from CreateCodec. Release dereferences the
        // stream, so an encoder that never got one is only freed.
        let err = unsafe {
            if self.attached {
                ((*self.raw).Release)(&mut self.raw)
            } else {
                let mut raw = self.raw.cast();
                sys::PKFree(&mut raw)
            }
        };
        if err < 0 {
            warn!("jxrlib: releasing encoder failed with {err}");
        }
    }
}

/// The jxrlib codec
#[derive(Copy, Clone, Debug, Default)]
pub struct JxrLib;

/// A jxrlib encoder writing to one file
pub struct JxrLibEncoder {
    // drop order is declaration order
    codec:          Codec,
    _codec_factory: CodecFactory,
    stream:         Stream,
    _factory:       Factory
}

impl JxrBackend for JxrLib {
    type Encoder = JxrLibEncoder;

    fn create_encoder(&self, output: &Path) -> Result<JxrLibEncoder, JxrEncodeErrors> {
        let path = output
            .to_str()
            .and_then(|p| CString::new(p).ok())
            .ok_or_else(|| {
                JxrEncodeErrors::Generic(format!("Cannot pass output path {output:?} to jxrlib"))
            })?;

        // SAFETY: every out pointer is a valid local, each object is wrapped
        // in its guard as soon as the call that created it succeeds.
        unsafe {
            let mut raw_factory = ptr::null_mut();
            check(
                EncodeStage::CreateFactory,
                sys::PKCreateFactory(&mut raw_factory, sys::PK_SDK_VERSION)
            )?;
            let factory = Factory(raw_factory);

            let mut raw_stream = ptr::null_mut();
            check(
                EncodeStage::CreateStream,
                ((*factory.0).CreateStreamFromFilename)(
                    &mut raw_stream,
                    path.as_ptr(),
                    c"wb".as_ptr()
                )
            )?;
            let stream = Stream(raw_stream);

            let mut raw_codec_factory = ptr::null_mut();
            check(
                EncodeStage::CreateCodecFactory,
                sys::PKCreateCodecFactory(&mut raw_codec_factory, sys::WMP_SDK_VERSION)
            )?;
            let codec_factory = CodecFactory(raw_codec_factory);

            let mut raw_codec = ptr::null_mut();
            check(
                EncodeStage::CreateCodec,
                ((*codec_factory.0).CreateCodec)(&sys::IID_PKImageWmpEncode, &mut raw_codec)
            )?;
            let codec = Codec {
                raw:      raw_codec.cast(),
                attached: false
            };

            Ok(JxrLibEncoder {
                codec,
                _codec_factory: codec_factory,
                stream,
                _factory: factory
            })
        }
    }
}

impl JxrImageEncode for JxrLibEncoder {
    fn initialize(&mut self, params: &CodecParams) -> Result<(), JxrEncodeErrors> {
        let mut raw_params = build_params(params);

        // the encoder keeps the stream from here on, even if it fails
        let stream = std::mem::replace(&mut self.stream.0, ptr::null_mut());
        self.codec.attached = true;

        // SAFETY: codec and stream are live, params outlives the call
        let err = unsafe {
            ((*self.codec.raw).Initialize)(
                self.codec.raw,
                stream,
                (&mut *raw_params as *mut sys::CWMIStrCodecParam).cast(),
                std::mem::size_of::<sys::CWMIStrCodecParam>()
            )
        };
        check(EncodeStage::Initialize, err)
    }

    fn set_pixel_format(&mut self, format: PixelFormat) -> Result<(), JxrEncodeErrors> {
        // SAFETY: the GUID is a plain constant exported by jxrlib
        let guid = match format {
            PixelFormat::Ycc420Packed12bpp => unsafe { sys::GUID_PKPixelFormat12bppYCC420 }
        };
        // SAFETY: codec is live
        let err = unsafe { ((*self.codec.raw).SetPixelFormat)(self.codec.raw, guid) };
        check(EncodeStage::SetPixelFormat, err)
    }

    fn set_size(&mut self, width: usize, height: usize) -> Result<(), JxrEncodeErrors> {
        let width = to_c_int(EncodeStage::SetSize, width)?;
        let height = to_c_int(EncodeStage::SetSize, height)?;

        // SAFETY: codec is live
        let err =
            unsafe { ((*self.codec.raw).SetSize)(self.codec.raw, width as i32, height as i32) };
        check(EncodeStage::SetSize, err)
    }

    fn write_pixels(
        &mut self, lines: usize, pixels: &mut PackedImage, stride: usize
    ) -> Result<(), JxrEncodeErrors> {
        let lines = to_c_int(EncodeStage::WritePixels, lines)?;
        let stride = to_c_int(EncodeStage::WritePixels, stride)?;
        let samples = pixels.samples_mut();

        // SAFETY: codec is live, samples stays borrowed for the whole call
        let err = unsafe {
            ((*self.codec.raw).WritePixels)(
                self.codec.raw,
                lines,
                samples.as_mut_ptr().cast(),
                stride
            )
        };
        check(EncodeStage::WritePixels, err)
    }
}

/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Driving a JPEG-XR codec
//!
//! The codec is reached through two traits. A [`JxrBackend`] hands out a
//! [`JxrImageEncode`] bound to an output path, which is then configured and
//! fed the packed samples.
//!
//! Creating an encoder acquires a chain of codec resources (factory, output
//! stream, codec factory, encoder). Implementations release them by
//! dropping, most recently acquired first, so a failure anywhere in the
//! chain, or later while encoding, never leaks what was already acquired.

use std::path::Path;

use crate::errors::JxrEncodeErrors;
use crate::log::{debug, trace};
use crate::options::JxrEncoderOptions;
use crate::packer::{pack_yuv, PackedImage, PlanarImage};
use crate::params::{CodecParams, PixelFormat};

/// A codec able to write JPEG-XR files
pub trait JxrBackend {
    type Encoder: JxrImageEncode;

    /// Acquire everything needed to write one image to `output`
    ///
    /// Dropping the returned encoder releases all of it.
    fn create_encoder(&self, output: &Path) -> Result<Self::Encoder, JxrEncodeErrors>;
}

/// One image worth of encoder, called in declaration order
pub trait JxrImageEncode {
    fn initialize(&mut self, params: &CodecParams) -> Result<(), JxrEncodeErrors>;

    fn set_pixel_format(&mut self, format: PixelFormat) -> Result<(), JxrEncodeErrors>;

    fn set_size(&mut self, width: usize, height: usize) -> Result<(), JxrEncodeErrors>;

    /// Write `lines` lines of `pixels`, `stride` bytes apart
    fn write_pixels(
        &mut self, lines: usize, pixels: &mut PackedImage, stride: usize
    ) -> Result<(), JxrEncodeErrors>;
}

/// A backend that cannot encode anything
///
/// Stands in when no real codec is linked so everything up to the
/// codec hand-off still works.
#[derive(Copy, Clone, Debug, Default)]
pub struct MissingBackend;

impl JxrBackend for MissingBackend {
    type Encoder = MissingEncoder;

    fn create_encoder(&self, _: &Path) -> Result<Self::Encoder, JxrEncodeErrors> {
        Err(JxrEncodeErrors::BackendUnavailable)
    }
}

/// Encoder of [`MissingBackend`], never constructed
#[derive(Debug)]
pub enum MissingEncoder {}

impl JxrImageEncode for MissingEncoder {
    fn initialize(&mut self, _: &CodecParams) -> Result<(), JxrEncodeErrors> {
        match *self {}
    }

    fn set_pixel_format(&mut self, _: PixelFormat) -> Result<(), JxrEncodeErrors> {
        match *self {}
    }

    fn set_size(&mut self, _: usize, _: usize) -> Result<(), JxrEncodeErrors> {
        match *self {}
    }

    fn write_pixels(
        &mut self, _: usize, _: &mut PackedImage, _: usize
    ) -> Result<(), JxrEncodeErrors> {
        match *self {}
    }
}

/// Encodes planar YUV 4:2:0 images through a backend
pub struct JxrEncoder<'a, B: JxrBackend> {
    backend: &'a B,
    options: JxrEncoderOptions
}

impl<'a, B: JxrBackend> JxrEncoder<'a, B> {
    pub fn new(backend: &'a B, options: JxrEncoderOptions) -> JxrEncoder<'a, B> {
        JxrEncoder { backend, options }
    }

    pub const fn options(&self) -> &JxrEncoderOptions {
        &self.options
    }

    /// Validate, map and pack `source`, without touching the backend
    ///
    /// Returns the parameters and samples [`encode`](Self::encode) would
    /// hand to the codec.
    pub fn prepare(&self, source: &[u8]) -> Result<(CodecParams, PackedImage), JxrEncodeErrors> {
        self.options.validate()?;

        let params = CodecParams::from_quality(self.options.get_quality())?;

        let image = PlanarImage::new(
            source,
            self.options.get_width(),
            self.options.get_height()
        )?;
        trace!("Codec parameters {params:?}");

        Ok((params, pack_yuv(&image)))
    }

    /// Encode `source` into a JPEG-XR file at `output`
    ///
    /// `source` must be a planar 4:2:0 image matching the configured
    /// dimensions. Input problems are reported before the backend is
    /// touched.
    pub fn encode(&self, source: &[u8], output: &Path) -> Result<(), JxrEncodeErrors> {
        let (params, mut packed) = self.prepare(source)?;

        debug!(
            "Encoding {}x{} image to {:?}, lossless: {}",
            packed.width(),
            packed.height(),
            output,
            params.is_lossless()
        );

        // dropped before `packed`, on every path out of here
        let mut encoder = self.backend.create_encoder(output)?;

        encoder.initialize(&params)?;
        encoder.set_pixel_format(PixelFormat::Ycc420Packed12bpp)?;
        encoder.set_size(packed.width(), packed.height())?;

        let (lines, stride) = (packed.lines(), packed.stride());
        encoder.write_pixels(lines, &mut packed, stride)?;

        debug!("Finished writing {lines} lines");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use crate::encoder::{JxrBackend, JxrEncoder, JxrImageEncode, MissingBackend};
    use crate::errors::{EncodeStage, JxrEncodeErrors};
    use crate::options::JxrEncoderOptions;
    use crate::packer::{planar_420_size, PackedImage};
    use crate::params::{CodecParams, PixelFormat};

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records every call, optionally failing at one stage
    struct RecordingBackend {
        log:     Log,
        fail_at: Option<EncodeStage>
    }

    impl RecordingBackend {
        fn new(fail_at: Option<EncodeStage>) -> RecordingBackend {
            RecordingBackend {
                log: Rc::new(RefCell::new(Vec::new())),
                fail_at
            }
        }

        fn calls(&self) -> Vec<String> {
            self.log.borrow().clone()
        }
    }

    struct Guard {
        name: &'static str,
        log:  Log
    }

    impl Drop for Guard {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("release {}", self.name));
        }
    }

    struct RecordingEncoder {
        // field order is release order
        _codec:         Guard,
        _codec_factory: Guard,
        _stream:        Guard,
        _factory:       Guard,
        log:            Log,
        fail_at:        Option<EncodeStage>
    }

    fn step(
        log: &Log, fail_at: Option<EncodeStage>, stage: EncodeStage, name: &'static str
    ) -> Result<Guard, JxrEncodeErrors> {
        if fail_at == Some(stage) {
            log.borrow_mut().push(format!("fail {stage}"));
            return Err(JxrEncodeErrors::Codec { stage, code: -1 });
        }
        log.borrow_mut().push(format!("acquire {name}"));
        Ok(Guard {
            name,
            log: log.clone()
        })
    }

    impl JxrBackend for RecordingBackend {
        type Encoder = RecordingEncoder;

        fn create_encoder(&self, output: &Path) -> Result<RecordingEncoder, JxrEncodeErrors> {
            let log = &self.log;
            log.borrow_mut().push(format!("open {}", output.display()));

            let factory = step(log, self.fail_at, EncodeStage::CreateFactory, "factory")?;
            let stream = step(log, self.fail_at, EncodeStage::CreateStream, "stream")?;
            let codec_factory =
                step(log, self.fail_at, EncodeStage::CreateCodecFactory, "codec factory")?;
            let codec = step(log, self.fail_at, EncodeStage::CreateCodec, "codec")?;

            Ok(RecordingEncoder {
                _codec: codec,
                _codec_factory: codec_factory,
                _stream: stream,
                _factory: factory,
                log: log.clone(),
                fail_at: self.fail_at
            })
        }
    }

    impl RecordingEncoder {
        fn call(&self, stage: EncodeStage, detail: String) -> Result<(), JxrEncodeErrors> {
            if self.fail_at == Some(stage) {
                self.log.borrow_mut().push(format!("fail {stage}"));
                return Err(JxrEncodeErrors::Codec { stage, code: -1 });
            }
            self.log.borrow_mut().push(detail);
            Ok(())
        }
    }

    impl JxrImageEncode for RecordingEncoder {
        fn initialize(&mut self, params: &CodecParams) -> Result<(), JxrEncodeErrors> {
            self.call(
                EncodeStage::Initialize,
                format!("initialize {:?}", params.qp.to_array())
            )
        }

        fn set_pixel_format(&mut self, format: PixelFormat) -> Result<(), JxrEncodeErrors> {
            self.call(EncodeStage::SetPixelFormat, format!("pixel format {format:?}"))
        }

        fn set_size(&mut self, width: usize, height: usize) -> Result<(), JxrEncodeErrors> {
            self.call(EncodeStage::SetSize, format!("size {width}x{height}"))
        }

        fn write_pixels(
            &mut self, lines: usize, pixels: &mut PackedImage, stride: usize
        ) -> Result<(), JxrEncodeErrors> {
            self.call(
                EncodeStage::WritePixels,
                format!(
                    "write {lines} lines, stride {stride}, {} samples",
                    pixels.samples().len()
                )
            )
        }
    }

    fn gray_image(width: usize, height: usize) -> Vec<u8> {
        vec![128; planar_420_size(width, height).unwrap()]
    }

    fn output() -> PathBuf {
        PathBuf::from("out.jxr")
    }

    #[test]
    fn full_lifecycle_in_order() {
        let backend = RecordingBackend::new(None);
        let encoder = JxrEncoder::new(&backend, JxrEncoderOptions::new(32, 16, 0));

        encoder.encode(&gray_image(32, 16), &output()).unwrap();

        assert_eq!(
            backend.calls(),
            [
                "open out.jxr",
                "acquire factory",
                "acquire stream",
                "acquire codec factory",
                "acquire codec",
                "initialize [66, 65, 70, 72, 72, 77]",
                "pixel format Ycc420Packed12bpp",
                "size 32x16",
                "write 16 lines, stride 384, 768 samples",
                "release codec",
                "release codec factory",
                "release stream",
                "release factory"
            ]
        );
    }

    #[test]
    fn lossless_passes_zero_indices() {
        let backend = RecordingBackend::new(None);
        let encoder = JxrEncoder::new(&backend, JxrEncoderOptions::new(16, 16, 100));

        encoder.encode(&gray_image(16, 16), &output()).unwrap();

        assert!(backend
            .calls()
            .contains(&"initialize [0, 0, 0, 0, 0, 0]".to_string()));
    }

    #[test]
    fn partial_acquisition_is_unwound() {
        let backend = RecordingBackend::new(Some(EncodeStage::CreateCodecFactory));
        let encoder = JxrEncoder::new(&backend, JxrEncoderOptions::new(16, 16, 50));

        let err = encoder.encode(&gray_image(16, 16), &output()).unwrap_err();

        assert!(matches!(
            err,
            JxrEncodeErrors::Codec {
                stage: EncodeStage::CreateCodecFactory,
                ..
            }
        ));
        assert_eq!(
            backend.calls(),
            [
                "open out.jxr",
                "acquire factory",
                "acquire stream",
                "fail create codec factory",
                "release stream",
                "release factory"
            ]
        );
    }

    #[test]
    fn failure_while_encoding_releases_everything() {
        for stage in [
            EncodeStage::Initialize,
            EncodeStage::SetPixelFormat,
            EncodeStage::SetSize,
            EncodeStage::WritePixels
        ] {
            let backend = RecordingBackend::new(Some(stage));
            let encoder = JxrEncoder::new(&backend, JxrEncoderOptions::new(16, 16, 75));

            let err = encoder.encode(&gray_image(16, 16), &output()).unwrap_err();
            assert!(!err.is_invalid_argument());

            let calls = backend.calls();
            assert_eq!(
                &calls[calls.len() - 5..],
                [
                    format!("fail {stage}"),
                    "release codec".to_string(),
                    "release codec factory".to_string(),
                    "release stream".to_string(),
                    "release factory".to_string()
                ]
            );
        }
    }

    #[test]
    fn invalid_input_never_reaches_backend() {
        let backend = RecordingBackend::new(None);

        let cases = [
            (JxrEncoderOptions::new(24, 16, 50), gray_image(24, 16)),
            (JxrEncoderOptions::new(16, 16, 101), gray_image(16, 16)),
            (JxrEncoderOptions::new(16, 16, 50), gray_image(16, 16)[1..].to_vec()),
            (JxrEncoderOptions::new(0, 16, 50), Vec::new())
        ];

        for (options, source) in cases {
            let err = JxrEncoder::new(&backend, options)
                .encode(&source, &output())
                .unwrap_err();
            assert!(err.is_invalid_argument(), "{err:?}");
        }
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn prepare_matches_encoded_input() {
        let backend = RecordingBackend::new(None);
        let encoder = JxrEncoder::new(&backend, JxrEncoderOptions::new(16, 32, 50));

        let (params, packed) = encoder.prepare(&gray_image(16, 32)).unwrap();

        assert_eq!(params.qp.to_array(), [37, 37, 42, 38, 38, 43]);
        assert_eq!(packed.samples().len(), 16 * 32 * 3 / 2);
        assert!(packed.samples().iter().all(|&s| s == 0));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn missing_backend_reports_unavailable() {
        let encoder = JxrEncoder::new(&MissingBackend, JxrEncoderOptions::new(16, 16, 50));

        assert!(matches!(
            encoder.encode(&gray_image(16, 16), &output()),
            Err(JxrEncodeErrors::BackendUnavailable)
        ));
        // input errors still win over the missing backend
        assert!(matches!(
            encoder.encode(&[], &output()),
            Err(JxrEncodeErrors::LengthMismatch(384, 0))
        ));
    }
}

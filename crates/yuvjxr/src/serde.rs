#![cfg(feature = "serde")]

use serde::ser::*;

use crate::params::{CodecParams, ColorFormat, PixelFormat, SampleDepth};
use crate::quality::QpIndices;

impl Serialize for ColorFormat {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // serialization is simply the debug value
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for SampleDepth {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for PixelFormat {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for QpIndices {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("QpIndices", 6)?;

        state.serialize_field("y", &self.y)?;
        state.serialize_field("u", &self.u)?;
        state.serialize_field("v", &self.v)?;
        state.serialize_field("y_highpass", &self.y_hp)?;
        state.serialize_field("u_highpass", &self.u_hp)?;
        state.serialize_field("v_highpass", &self.v_hp)?;

        state.end()
    }
}

impl Serialize for CodecParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("CodecParams", 5)?;

        state.serialize_field("yuv_data", &self.yuv_data)?;
        state.serialize_field("color_format", &self.color_format)?;
        state.serialize_field("bit_depth", &self.bit_depth)?;
        state.serialize_field("lossless", &self.is_lossless())?;
        state.serialize_field("qp", &self.qp)?;

        state.end()
    }
}

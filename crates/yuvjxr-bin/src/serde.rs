use std::path::Path;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use yuvjxr::{CodecParams, PackedImage, PixelFormat};

/// What is about to be handed to the codec, printed by `--print-params`
pub struct EncodeReport<'a> {
    input:  &'a Path,
    output: &'a Path,
    params: &'a CodecParams,
    packed: &'a PackedImage
}

impl<'a> EncodeReport<'a> {
    pub fn new(
        input: &'a Path, output: &'a Path, params: &'a CodecParams, packed: &'a PackedImage
    ) -> EncodeReport<'a> {
        EncodeReport {
            input,
            output,
            params,
            packed
        }
    }
}

impl<'a> Serialize for EncodeReport<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("EncodeReport", 8)?;

        state.serialize_field("input", &self.input.to_string_lossy())?;
        state.serialize_field("output", &self.output.to_string_lossy())?;
        state.serialize_field("width", &self.packed.width())?;
        state.serialize_field("height", &self.packed.height())?;
        state.serialize_field("pixel_format", &PixelFormat::Ycc420Packed12bpp)?;
        state.serialize_field("lines", &self.packed.lines())?;
        state.serialize_field("stride", &self.packed.stride())?;
        state.serialize_field("params", self.params)?;

        state.end()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use yuvjxr::{pack, CodecParams};

    use crate::serde::EncodeReport;

    #[test]
    fn report_as_json() {
        let params = CodecParams::from_quality(50).unwrap();
        let packed = pack(&[128; 384], 16, 16).unwrap();
        let report = EncodeReport::new(Path::new("in.yuv"), Path::new("out.jxr"), &params, &packed);

        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["width"], 16);
        assert_eq!(value["height"], 16);
        assert_eq!(value["stride"], 192);
        assert_eq!(value["lines"], 16);
        assert_eq!(value["pixel_format"], "Ycc420Packed12bpp");
        assert_eq!(value["params"]["color_format"], "Yuv420");
        assert_eq!(value["params"]["bit_depth"], "Long");
        assert_eq!(value["params"]["yuv_data"], true);
        assert_eq!(value["params"]["lossless"], false);
        assert_eq!(value["params"]["qp"]["y"], 37);
        assert_eq!(value["params"]["qp"]["v_highpass"], 43);
    }
}

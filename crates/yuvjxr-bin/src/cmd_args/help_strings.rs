pub static ABOUT: &str = "Encode raw planar YUV 4:2:0 images as JPEG-XR";

pub static REQUIRED_ARGS_HELP: &str = "Required arguments:
1. JPEG quality value, 0-100
2. Image size (e.g. '512x512')
3. Path to YUV input file
4. Path to JXR output file";

pub static QUALITY_HELP: &str = "JPEG quality value, 0-100

Lower values give smaller files, 100 encodes losslessly.";

pub static SIZE_HELP: &str = "Image size (e.g. '512x512')

Width and height must both be multiples of 16.";

pub static INPUT_HELP: &str = "Path to YUV input file

Raw planar 8 bit YUV 4:2:0 with no header. The file must hold
exactly width*height*3/2 bytes: the luma plane followed by the
U and V planes at half width and half height.";

/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;
use std::path::Path;

use log::info;
use yuvjxr::JxrEncodeErrors;

/// Read a raw planar YUV file into memory
///
/// The file carries no header, its size is checked against the
/// image dimensions when it is packed.
pub fn read_yuv_file(path: &Path) -> Result<Vec<u8>, JxrEncodeErrors> {
    let data = read(path)
        .map_err(|e| JxrEncodeErrors::Generic(format!("Invalid path to YUV file {path:?}: {e}")))?;

    info!("Read {} bytes from {:?}", data.len(), path);

    Ok(data)
}

pub fn verify_file_paths(input: &Path, output: &Path) -> Result<(), JxrEncodeErrors> {
    if input == output {
        return Err(JxrEncodeErrors::Generic(format!(
            "Cannot use {input:?} as both input and output"
        )));
    }
    Ok(())
}

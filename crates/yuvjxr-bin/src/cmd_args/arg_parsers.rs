/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use yuvjxr::MAX_QUALITY;

/// Width and height given on the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ImageSize {
    pub width:  usize,
    pub height: usize
}

/// Parse a quality value, accepting integers in `0..=100`
pub fn parse_quality(value: &str) -> Result<u8, String> {
    let quality = value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("Invalid JPEG quality value {value:?}, expected a number"))?;

    if !(0..=i64::from(MAX_QUALITY)).contains(&quality) {
        return Err(format!(
            "Invalid JPEG quality value {quality}, expected 0-{MAX_QUALITY}"
        ));
    }
    Ok(quality as u8)
}

fn parse_dimension(part: &str, name: &str, value: &str) -> Result<usize, String> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!(
            "Invalid image size input {value:?}, {name} must be a decimal number"
        ));
    }
    part.parse::<usize>()
        .map_err(|e| format!("Invalid image size input {value:?}, {name}: {e}"))
}

/// Parse a `WIDTHxHEIGHT` string such as `512x512`
///
/// There must be exactly one `x` with a non-empty number on each side.
/// Alignment is checked later, together with the other encoder options.
pub fn parse_size(value: &str) -> Result<ImageSize, String> {
    let mut parts = value.split('x');

    let (width, height) = match (parts.next(), parts.next(), parts.next()) {
        (Some(width), Some(height), None) => (width, height),
        _ => {
            return Err(format!(
                "Invalid image size input {value:?}, expected WIDTHxHEIGHT e.g. 512x512"
            ))
        }
    };

    Ok(ImageSize {
        width:  parse_dimension(width, "width", value)?,
        height: parse_dimension(height, "height", value)?
    })
}

/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use std::fs::read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

mod packer;
mod quality;

/// Expected codec indices for one quality value
#[derive(Clone, Deserialize, Debug)]
pub struct QualityEntry {
    pub quality: u8,
    pub qp:      [u8; 6]
}

/// A synthetic planar image and facts about its packed form
///
/// Source byte `i` is `(i * multiplier + offset) % 256`.
#[derive(Clone, Deserialize, Debug)]
pub struct PackerEntry {
    pub name:         String,
    pub width:        usize,
    pub height:       usize,
    pub multiplier:   usize,
    pub offset:       usize,
    pub first_block:  [i32; 6],
    pub last_block:   [i32; 6],
    pub sum:          i64,
    pub weighted_sum: i64
}

impl PackerEntry {
    pub fn source(&self) -> Vec<u8> {
        let size = self.width * self.height * 3 / 2;

        (0..size)
            .map(|i| ((i * self.multiplier + self.offset) % 256) as u8)
            .collect()
    }
}

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join(name)
}

fn load_fixture<T: DeserializeOwned>(name: &str) -> Vec<T> {
    let json_file = read(fixture_path(name)).unwrap();

    serde_json::from_slice(&json_file).unwrap()
}

/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use yuvjxr::{map_quality, CodecParams};

use crate::{load_fixture, QualityEntry};

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_quality_table() {
    let entries: Vec<QualityEntry> = load_fixture("quality.json");

    assert_eq!(entries.len(), 101, "fixture should cover every quality");

    let mut error = false;
    let mut failures = Vec::new();

    for entry in &entries {
        let found = map_quality(entry.quality).unwrap().to_array();

        if found != entry.qp {
            error = true;
            failures.push(entry.quality);
            let err = format!(
                "Index mismatch for quality {}\nExpected {:?} but found {:?}",
                entry.quality, entry.qp, found
            );
            eprintln!("{}\n", err)
        }
    }
    if error {
        panic!("Errors found while mapping qualities\n {:#?}", failures);
    }
}

#[test]
fn params_follow_fixture() {
    let entries: Vec<QualityEntry> = load_fixture("quality.json");

    for entry in &entries {
        let params = CodecParams::from_quality(entry.quality).unwrap();

        assert_eq!(params.qp.to_array(), entry.qp);
        assert_eq!(params.is_lossless(), entry.quality == 100);
    }
}

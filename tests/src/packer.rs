/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use yuvjxr::{pack, unpack_sample};

use crate::{load_fixture, PackerEntry};

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_packer() {
    let entries: Vec<PackerEntry> = load_fixture("packer.json");

    let mut error = false;
    let mut files = Vec::new();

    for entry in &entries {
        let source = entry.source();
        let packed = pack(&source, entry.width, entry.height).unwrap();
        let samples = packed.samples();

        let sum: i64 = samples.iter().map(|&v| i64::from(v)).sum();
        let weighted_sum: i64 = samples
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as i64 + 1) * i64::from(v))
            .sum();

        let matches = samples.len() == source.len()
            && samples[..6] == entry.first_block
            && samples[samples.len() - 6..] == entry.last_block
            && sum == entry.sum
            && weighted_sum == entry.weighted_sum;

        if !matches {
            error = true;
            files.push(entry.name.clone());
            let err = format!(
                "Packed output mismatch for {}\nExpected sums {}/{} but found {}/{}\nConfig:{:#?}",
                entry.name, entry.sum, entry.weighted_sum, sum, weighted_sum, entry
            );
            eprintln!("{}\n", err)
        }
    }
    if error {
        panic!("Errors found while packing\n {:#?}", files);
    }
}

#[test]
fn packed_samples_unpack_to_source_multiset() {
    for entry in load_fixture::<PackerEntry>("packer.json") {
        let source = entry.source();
        let packed = pack(&source, entry.width, entry.height).unwrap();

        let mut histogram_in = [0_usize; 256];
        let mut histogram_out = [0_usize; 256];

        source.iter().for_each(|&b| histogram_in[usize::from(b)] += 1);
        packed
            .samples()
            .iter()
            .for_each(|&v| histogram_out[usize::from(unpack_sample(v))] += 1);

        assert_eq!(histogram_in, histogram_out, "{}", entry.name);
    }
}

/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{debug, info};
use yuvjxr::{JxrEncodeErrors, JxrEncoder, JxrEncoderOptions};

use crate::cmd_parsers::global_options::CmdOptions;
use crate::file_io::{read_yuv_file, verify_file_paths};
use crate::serde::EncodeReport;

#[cfg(feature = "jxrlib")]
fn backend() -> yuvjxr::jxrlib::JxrLib {
    yuvjxr::jxrlib::JxrLib
}

#[cfg(not(feature = "jxrlib"))]
fn backend() -> yuvjxr::MissingBackend {
    log::warn!("Built without the `jxrlib` feature, only --dry-run can succeed");
    yuvjxr::MissingBackend
}

pub(crate) fn encode_from_cmd(cmd_opts: &CmdOptions) -> Result<(), JxrEncodeErrors> {
    info!("Creating encode workflow from input");

    let options = JxrEncoderOptions::new(
        cmd_opts.size.width,
        cmd_opts.size.height,
        cmd_opts.quality
    );
    // dimension and quality problems are reported before the input is opened
    options.validate()?;

    verify_file_paths(&cmd_opts.input, &cmd_opts.output)?;

    let source = read_yuv_file(&cmd_opts.input)?;

    let backend = backend();
    let encoder = JxrEncoder::new(&backend, options);

    if cmd_opts.print_params || cmd_opts.dry_run {
        let (params, packed) = encoder.prepare(&source)?;

        if cmd_opts.print_params {
            let report = EncodeReport::new(&cmd_opts.input, &cmd_opts.output, &params, &packed);
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| JxrEncodeErrors::Generic(e.to_string()))?;
            println!("{json}");
        }
        if cmd_opts.dry_run {
            info!("Dry run finished, {} samples packed", packed.samples().len());
            return Ok(());
        }
    }

    encoder.encode(&source, &cmd_opts.output)?;

    debug!("Wrote {:?}", cmd_opts.output);

    Ok(())
}

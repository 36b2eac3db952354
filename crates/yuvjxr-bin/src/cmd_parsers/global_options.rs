/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::ArgMatches;
use log::{info, Level};

use crate::cmd_args::arg_parsers::ImageSize;

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub quality:      u8,
    pub size:         ImageSize,
    pub input:        PathBuf,
    pub output:       PathBuf,
    pub print_params: bool,
    pub dry_run:      bool
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    // all four are required and carry value parsers, clap has already
    // rejected the command line if any of them is missing or malformed
    let quality = options.get_one::<u8>("quality").copied().unwrap_or_default();
    let size = options
        .get_one::<ImageSize>("size")
        .copied()
        .unwrap_or(ImageSize {
            width:  0,
            height: 0
        });
    let input = options.get_one::<PathBuf>("in").cloned().unwrap_or_default();
    let output = options.get_one::<PathBuf>("out").cloned().unwrap_or_default();

    let print_params = options.get_flag("print-params");
    let dry_run = options.get_flag("dry-run");

    info!("Quality: {quality}");
    info!("Image size: {}x{}", size.width, size.height);

    if dry_run {
        info!("Dry run, no output will be written");
    }

    CmdOptions {
        quality,
        size,
        input,
        output,
        print_params,
        dry_run
    }
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

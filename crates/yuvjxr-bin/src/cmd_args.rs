/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

use crate::cmd_args::arg_parsers::{parse_quality, parse_size};
use crate::cmd_args::help_strings::{
    ABOUT, INPUT_HELP, QUALITY_HELP, REQUIRED_ARGS_HELP, SIZE_HELP
};

pub mod arg_parsers;
pub mod help_strings;

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("yuvjxr")
        .version(env!("CARGO_PKG_VERSION"))
        .about(ABOUT)
        .after_help(REQUIRED_ARGS_HELP)
        .arg(Arg::new("quality")
            .help("JPEG quality value, 0-100")
            .long_help(QUALITY_HELP)
            .value_name("QUALITY")
            .allow_negative_numbers(true)
            .value_parser(parse_quality)
            .required(true))
        .arg(Arg::new("size")
            .help("Image size (e.g. '512x512')")
            .long_help(SIZE_HELP)
            .value_name("WIDTHxHEIGHT")
            .value_parser(parse_size)
            .required(true))
        .arg(Arg::new("in")
            .help("Path to YUV input file")
            .long_help(INPUT_HELP)
            .value_name("YUV_INPUT")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("out")
            .help("Path to JXR output file")
            .value_name("JXR_OUTPUT")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("print-params")
            .long("print-params")
            .action(ArgAction::SetTrue)
            .help("Print the codec parameters as JSON before encoding"))
        .arg(Arg::new("dry-run")
            .long("dry-run")
            .action(ArgAction::SetTrue)
            .help("Check and pack the input without writing any output"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the encoding options"))
}

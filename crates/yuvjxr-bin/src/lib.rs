/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use clap::error::ErrorKind;
use log::error;

use crate::cmd_args::help_strings::REQUIRED_ARGS_HELP;
use crate::workflow::encode_from_cmd;

mod cmd_args;
mod cmd_parsers;
mod file_io;
mod serde;
mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();

    let options = match cmd.try_get_matches() {
        Ok(options) => options,
        Err(err) => {
            // --help and --version end up here too, they are not failures
            let _ = err.print();

            if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
            ) {
                eprintln!("\n{REQUIRED_ARGS_HELP}");
            }
            exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    cmd_parsers::global_options::setup_logger(&options);

    let parsed_opts = cmd_parsers::global_options::parse_options(&options);

    if let Err(reason) = encode_from_cmd(&parsed_opts) {
        error!("Could not encode {:?}, reason {:?}", parsed_opts.input, reason);
        exit(1);
    }
}

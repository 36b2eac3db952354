/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Logging shim
//!
//! With the `log` feature the macros below are the ones from the `log` crate,
//! without it they type-check their arguments and expand to nothing.

#[cfg(feature = "log")]
#[allow(unused_imports)]
pub(crate) use ::log::{debug, trace, warn};

#[cfg(not(feature = "log"))]
macro_rules! __warn {
    ($($arg:tt)+) => {{
        let _ = format_args!($($arg)+);
    }};
}

#[cfg(not(feature = "log"))]
macro_rules! __debug {
    ($($arg:tt)+) => {{
        let _ = format_args!($($arg)+);
    }};
}

#[cfg(not(feature = "log"))]
macro_rules! __trace {
    ($($arg:tt)+) => {{
        let _ = format_args!($($arg)+);
    }};
}

#[cfg(not(feature = "log"))]
#[allow(unused_imports)]
pub(crate) use __debug as debug;
#[cfg(not(feature = "log"))]
#[allow(unused_imports)]
pub(crate) use __trace as trace;
#[cfg(not(feature = "log"))]
#[allow(unused_imports)]
pub(crate) use __warn as warn;

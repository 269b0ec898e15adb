#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which repeatedly squaring z and adding c, starting from z = 0, never
//! sends z off to infinity.  Points outside the set do escape, and how
//! quickly they escape is the number used to color them.
//!
//! A render expands one of the built-in palettes into a dense color
//! ramp, walks every pixel of the raster, runs an escape-time kernel on
//! the point under it, and blends the two ramp entries nearest to the
//! kernel's answer.  Rows are independent, so they can be spread over a
//! pool of threads, and in the distributed mode each pixel's iteration
//! count can be fetched from a remote worker over HTTP instead.

#[macro_use]
extern crate log;
extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;

pub mod colormap;
pub mod config;
pub mod errors;
pub mod kernel;
pub mod output;
pub mod palette;
pub mod planes;
pub mod progress;
pub mod ramp;
pub mod remote;
pub mod render;
pub mod server;

pub use config::{Mode, RenderConfig};
pub use errors::{RenderError, Result};
pub use kernel::{IterationSource, LocalKernel};
pub use output::write_image;
pub use palette::{Palette, Rgba};
pub use ramp::ColorRamp;
pub use remote::RemoteWorker;
pub use render::{ramp_for, render, Raster, Renderer};
pub use server::Worker;

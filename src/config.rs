// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The render configuration: an immutable value built once, by the
//! command line or by a caller, and handed to the renderer by reference.

use num::Complex;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{RenderError, Result};
use crate::planes::PlaneMapper;
use crate::ramp::MAX_RAMP_LENGTH;

/// Largest raster, in pixels after supersampling, a render will allocate.
pub const MAX_RASTER_PIXELS: usize = 1 << 28;

/// Which kernel to run and how to spread the rows over threads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Bailout kernel, rows spread over a thread pool.
    Parallel,
    /// Smooth kernel, rows spread over a thread pool.
    ParallelSmooth,
    /// Bailout kernel on the calling thread.
    Single,
    /// Smooth kernel on the calling thread.
    SingleSmooth,
    /// Iteration counts fetched per pixel from a remote worker, rows
    /// spread over a thread pool.
    Distributed,
}

impl Mode {
    /// Every mode, in the order the help text lists them.
    pub const ALL: [Mode; 5] = [
        Mode::Parallel,
        Mode::ParallelSmooth,
        Mode::Single,
        Mode::SingleSmooth,
        Mode::Distributed,
    ];

    /// The mode's command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Parallel => "parallel",
            Mode::ParallelSmooth => "parallel-smooth",
            Mode::Single => "single",
            Mode::SingleSmooth => "single-smooth",
            Mode::Distributed => "distributed",
        }
    }

    /// True for the modes that color with the smooth kernel.
    pub fn is_smooth(self) -> bool {
        self == Mode::ParallelSmooth || self == Mode::SingleSmooth
    }

    /// True for the modes that render on the calling thread only.
    pub fn is_sequential(self) -> bool {
        self == Mode::Single || self == Mode::SingleSmooth
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = RenderError;

    /// Accepts the kebab-case names as well as the older
    /// `verticalOpti | vertical | simpleOpti | simple | horizontal` set.
    fn from_str(s: &str) -> Result<Mode> {
        match s {
            "parallel" | "verticalOpti" => Ok(Mode::Parallel),
            "parallel-smooth" | "vertical" => Ok(Mode::ParallelSmooth),
            "single" | "simpleOpti" => Ok(Mode::Single),
            "single-smooth" | "simple" => Ok(Mode::SingleSmooth),
            "distributed" | "horizontal" => Ok(Mode::Distributed),
            other => Err(RenderError::InvalidConfig(format!(
                "unknown mode {:?}",
                other
            ))),
        }
    }
}

/// Everything a render needs to know.  Read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Left edge of the region on the real axis.
    pub xmin: f64,
    /// Bottom edge of the region on the imaginary axis.
    pub ymin: f64,
    /// Right edge of the region.
    pub xmax: f64,
    /// Top edge of the region.
    pub ymax: f64,
    /// Image width before supersampling.
    pub width: usize,
    /// Image height before supersampling.
    pub height: usize,
    /// Supersampling factor applied to both dimensions.
    pub smoothness: usize,
    /// Iteration limit for the kernels.
    pub max_iteration: u32,
    /// Name of the built-in palette.
    pub palette: String,
    /// Requested ramp length; never less than `max_iteration`.
    pub color_steps: usize,
    /// Kernel and concurrency selection.
    pub mode: Mode,
    /// Worker threads for the row-parallel modes.
    pub threads: usize,
    /// Where the image is written.
    pub output: PathBuf,
    /// Base URL of the remote worker, e.g. `http://localhost:3030`.
    pub worker_url: String,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            xmin: -2.1,
            ymin: -1.2,
            xmax: 2.1,
            ymax: 1.2,
            width: 1280,
            height: 720,
            smoothness: 8,
            max_iteration: 800,
            palette: "Hippi".to_string(),
            color_steps: 6000,
            mode: Mode::Parallel,
            threads: num_cpus::get(),
            output: PathBuf::from("mandelbrot.png"),
            worker_url: "http://localhost:3030".to_string(),
        }
    }
}

impl RenderConfig {
    /// A default configuration whose region is symmetric about the
    /// origin: `[xmin, |xmin|] x [ymin, |ymin|]`.
    pub fn around_origin(xmin: f64, ymin: f64) -> RenderConfig {
        RenderConfig {
            xmin,
            ymin,
            xmax: xmin.abs(),
            ymax: ymin.abs(),
            ..RenderConfig::default()
        }
    }

    /// Rejects configurations that cannot produce an image.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Err(RenderError::InvalidConfig(reason.to_string()));
        if self.width == 0 || self.height == 0 {
            return invalid("width and height must be at least 1");
        }
        if self.smoothness == 0 {
            return invalid("smoothness must be at least 1");
        }
        if self.max_iteration == 0 {
            return invalid("the iteration limit must be at least 1");
        }
        if self.threads == 0 {
            return invalid("at least one thread is required");
        }
        if self.ramp_length() > MAX_RAMP_LENGTH {
            return invalid("too many color steps");
        }
        match self.raster_width().checked_mul(self.raster_height()) {
            Some(pixels) if pixels <= MAX_RASTER_PIXELS => {}
            _ => return invalid("the supersampled image is too large"),
        }
        self.plane().map(|_| ())
    }

    /// Length of the color ramp: the requested steps, but never fewer
    /// than the iteration limit.
    pub fn ramp_length(&self) -> usize {
        self.color_steps.max(self.max_iteration as usize)
    }

    /// Raster width after supersampling.
    pub fn raster_width(&self) -> usize {
        self.width.saturating_mul(self.smoothness)
    }

    /// Raster height after supersampling.
    pub fn raster_height(&self) -> usize {
        self.height.saturating_mul(self.smoothness)
    }

    /// The mapping from raster pixels to the configured region.
    pub fn plane(&self) -> Result<PlaneMapper> {
        PlaneMapper::new(
            self.raster_width(),
            self.raster_height(),
            Complex::new(self.xmin, self.ymin),
            Complex::new(self.xmax, self.ymax),
        )
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The render orchestrator.  A render walks every row of the raster,
//! maps each pixel onto the complex plane, asks a kernel (or a remote
//! worker) about the point, colors the answer from the ramp, and writes
//! the pixel.  Rows never share pixels, so the row-parallel variant
//! hands each worker thread whole rows and needs no locking on the
//! raster itself.

use num::Complex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::colormap::{direct_color, escape_color, smooth_color};
use crate::config::{Mode, RenderConfig};
use crate::errors::{RenderError, Result};
use crate::kernel::{escape_time, smooth_escape, IterationSource};
use crate::palette::Rgba;
use crate::planes::{Pixel, PlaneMapper};
use crate::ramp::ColorRamp;
use crate::remote::RemoteWorker;

/// Per-request timeout for the distributed mode.  Expiry fails the
/// whole render.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const CHANNELS: usize = 4;

/// A row-major RGBA8 pixel grid.  Pixels nobody colored stay all-zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// A blank raster.
    pub fn new(width: usize, height: usize) -> Raster {
        Raster {
            width,
            height,
            pixels: vec![0; width * height * CHANNELS],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The color at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let at = (y * self.width + x) * CHANNELS;
        Rgba {
            r: self.pixels[at],
            g: self.pixels[at + 1],
            b: self.pixels[at + 2],
            a: self.pixels[at + 3],
        }
    }

    /// The raw RGBA bytes, row by row.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    fn rows_mut(&mut self) -> std::slice::ChunksMut<u8> {
        self.pixels.chunks_mut((self.width * CHANNELS).max(1))
    }
}

/// How a pixel's point becomes a color.
#[derive(Copy, Clone)]
pub enum Shading<'a> {
    /// Bailout kernel, blended by [`escape_color`].
    Escape,
    /// Smooth kernel, blended by [`smooth_color`].
    Smooth,
    /// Raw iteration counts from a source, used directly as ramp
    /// indices.
    Direct(&'a dyn IterationSource),
}

/// How rows are scheduled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Concurrency {
    /// Every row on the calling thread, top to bottom.
    Sequential,
    /// Rows handed out to a fixed number of worker threads.
    RowParallel(usize),
}

/// One render: a plane mapping, a ramp, and a shading strategy.  The
/// renderer is shared read-only by every worker thread.
pub struct Renderer<'a> {
    plane: PlaneMapper,
    ramp: &'a ColorRamp,
    max_iteration: u32,
    shading: Shading<'a>,
}

impl<'a> Renderer<'a> {
    /// Puts a render together.
    pub fn new(
        plane: PlaneMapper,
        ramp: &'a ColorRamp,
        max_iteration: u32,
        shading: Shading<'a>,
    ) -> Renderer<'a> {
        Renderer {
            plane,
            ramp,
            max_iteration,
            shading,
        }
    }

    /// The color of a single point, or `None` to leave it as
    /// background.
    pub fn shade(&self, point: Complex<f64>) -> Result<Option<Rgba>> {
        Ok(match self.shading {
            Shading::Escape => {
                escape_color(escape_time(point, self.max_iteration), self.max_iteration, self.ramp)
            }
            Shading::Smooth => smooth_color(
                smooth_escape(point, self.max_iteration),
                self.max_iteration,
                self.ramp,
            ),
            Shading::Direct(source) => direct_color(source.iterations_at(point)?, self.ramp),
        })
    }

    fn render_row(&self, row: usize, pixels: &mut [u8]) -> Result<()> {
        for (column, pixel) in pixels.chunks_exact_mut(CHANNELS).enumerate() {
            let point = self.plane.pixel_to_point(&Pixel(column, row));
            if let Some(color) = self.shade(point)? {
                pixel.copy_from_slice(&color.channels());
            }
        }
        Ok(())
    }

    /// Renders every row and returns the finished raster.  Nothing is
    /// returned until every row is done.
    pub fn render(&self, concurrency: Concurrency) -> Result<Raster> {
        let mut raster = Raster::new(self.plane.width(), self.plane.height());
        if !self.plane.is_empty() {
            match concurrency {
                Concurrency::Sequential => self.render_sequential(&mut raster)?,
                Concurrency::RowParallel(threads) => self.render_parallel(&mut raster, threads)?,
            }
        }
        Ok(raster)
    }

    fn render_sequential(&self, raster: &mut Raster) -> Result<()> {
        for (row, pixels) in raster.rows_mut().enumerate() {
            self.render_row(row, pixels)?;
        }
        Ok(())
    }

    /// Each worker pulls the next unclaimed row until none are left.
    /// The first failure stops the others from claiming more rows, and
    /// is the error reported once every worker has been joined.
    fn render_parallel(&self, raster: &mut Raster, threads: usize) -> Result<()> {
        let rows = Mutex::new(raster.rows_mut().enumerate());
        let failed = AtomicBool::new(false);
        let threads = threads.max(1).min(self.plane.height());

        let outcome = crossbeam::scope(|spawner| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    let (rows, failed) = (&rows, &failed);
                    spawner.spawn(move |_| -> Result<()> {
                        loop {
                            if failed.load(Ordering::SeqCst) {
                                return Ok(());
                            }
                            let next = match rows.lock() {
                                Ok(mut rows) => rows.next(),
                                Err(_) => return Err(RenderError::WorkerPanicked),
                            };
                            match next {
                                Some((row, pixels)) => {
                                    if let Err(e) = self.render_row(row, pixels) {
                                        failed.store(true, Ordering::SeqCst);
                                        return Err(e);
                                    }
                                }
                                None => return Ok(()),
                            }
                        }
                    })
                })
                .collect();

            handles.into_iter().fold(Ok(()), |first, handle| {
                let outcome = handle.join().unwrap_or(Err(RenderError::WorkerPanicked));
                first.and(outcome)
            })
        })
        .map_err(|_| RenderError::WorkerPanicked)?;

        outcome
    }
}

/// Builds the ramp for `config`.  An unknown palette is not an error:
/// it is logged and reported as `None`, meaning there is nothing to
/// render.
pub fn ramp_for(config: &RenderConfig) -> Result<Option<ColorRamp>> {
    match ColorRamp::interpolate(&config.palette, config.ramp_length()) {
        Ok(ref ramp) if ramp.is_empty() => Ok(None),
        Ok(ramp) => Ok(Some(ramp)),
        Err(RenderError::PaletteNotFound(name)) => {
            warn!("no palette named {:?}; nothing to render", name);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Renders `config` with `ramp`, picking kernel and scheduling from the
/// configured mode.  The distributed mode talks to the worker at
/// `config.worker_url`.
pub fn render(config: &RenderConfig, ramp: &ColorRamp) -> Result<Raster> {
    config.validate()?;
    let plane = config.plane()?;

    let worker;
    let shading = match config.mode {
        Mode::Distributed => {
            worker = RemoteWorker::new(&config.worker_url, REQUEST_TIMEOUT)?;
            Shading::Direct(&worker)
        }
        mode if mode.is_smooth() => Shading::Smooth,
        _ => Shading::Escape,
    };
    let concurrency = if config.mode.is_sequential() {
        Concurrency::Sequential
    } else {
        Concurrency::RowParallel(config.threads)
    };

    debug!(
        "rendering {}x{} in {} mode with {:?}, {} colors",
        plane.width(),
        plane.height(),
        config.mode,
        concurrency,
        ramp.len()
    );
    let start = Instant::now();
    let raster = Renderer::new(plane, ramp, config.max_iteration, shading).render(concurrency)?;
    info!("Process mandelbrot took {:?}", start.elapsed());
    Ok(raster)
}

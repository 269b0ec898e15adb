// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernels.  Both iterate z <- z^2 + c from z = 0,
//! carrying x^2, y^2 and 2xy separately so each pass costs three
//! multiplications instead of four.

use num::Complex;

use crate::errors::Result;

/// |z|^2 beyond which the bailout kernel considers a point escaped
/// (an escape radius of 2).
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// |z|^2 beyond which the smooth kernel stops.  The much larger radius
/// keeps the continuous potential from banding.
pub const SMOOTH_BAILOUT: f64 = (1 << 16) as f64;

/// What a kernel learned about a single point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IterationResult {
    /// Either |z|^2 at escape (bailout kernel) or the potential
    /// |z|^2 / 2 (smooth kernel, and non-escaping bailout points).
    pub measure: f64,
    /// The iteration count; equal to the limit means "did not escape".
    pub iterations: u32,
}

/// The bailout kernel.  Returns `(|z|^2, i)` at the first iteration `i`
/// where |z| exceeds 2, or `(|z|^2 / 2, max_iteration)` when the point
/// never escapes.
pub fn escape_time(c: Complex<f64>, max_iteration: u32) -> IterationResult {
    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    for i in 0..max_iteration {
        let xy2 = (x + x) * y;
        let x2 = x * x;
        let y2 = y * y;
        if x2 + y2 > ESCAPE_RADIUS_SQUARED {
            return IterationResult {
                measure: x2 + y2,
                iterations: i,
            };
        }
        x = x2 - y2 + c.re;
        y = xy2 + c.im;
    }
    IterationResult {
        measure: (x * x + y * y) / 2.0,
        iterations: max_iteration,
    }
}

/// The smooth kernel.  Iterates until |z|^2 reaches [`SMOOTH_BAILOUT`]
/// or the limit runs out, and always reports `|z|^2 / 2` together with
/// the index of the last pass it executed.
///
/// Note the asymmetry with [`escape_time`]: the reported count is the
/// last *completed* pass, so it never reaches `max_iteration`, even for
/// points inside the set.
pub fn smooth_escape(c: Complex<f64>, max_iteration: u32) -> IterationResult {
    let (mut x, mut y, mut x2, mut y2) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
    let mut last = 0;
    let mut i = 0;
    while i < max_iteration && x2 + y2 < SMOOTH_BAILOUT {
        let xy2 = (x + x) * y;
        x2 = x * x;
        y2 = y * y;
        x = x2 - y2 + c.re;
        y = xy2 + c.im;
        last = i;
        i += 1;
    }
    IterationResult {
        measure: (x * x + y * y) / 2.0,
        iterations: last,
    }
}

/// Anything that can answer "how many iterations before this point
/// escapes?"  The local kernel and the remote worker client are the two
/// implementations, and the renderer treats them interchangeably.
pub trait IterationSource: Sync {
    /// The bailout iteration count for `point`.
    fn iterations_at(&self, point: Complex<f64>) -> Result<u32>;
}

/// Runs [`escape_time`] in-process.
#[derive(Copy, Clone, Debug)]
pub struct LocalKernel {
    /// Iteration limit handed to the kernel.
    pub max_iteration: u32,
}

impl IterationSource for LocalKernel {
    fn iterations_at(&self, point: Complex<f64>) -> Result<u32> {
        Ok(escape_time(point, self.max_iteration).iterations)
    }
}

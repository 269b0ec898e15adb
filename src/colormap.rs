// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns kernel output into a pixel color by reading two neighbouring
//! ramp entries and blending them.  Every mapping returns `None` for a
//! pixel it cannot place on the ramp, and the renderer leaves such
//! pixels as background.

use std::f64::consts::LN_2;

use crate::kernel::IterationResult;
use crate::palette::Rgba;
use crate::ramp::ColorRamp;

/// Colors a bailout-kernel result.  The continuous index is
/// `|max_iteration - iterations + ln(measure)|`.
pub fn escape_color(result: IterationResult, max_iteration: u32, ramp: &ColorRamp) -> Option<Rgba> {
    let index =
        (f64::from(max_iteration) - f64::from(result.iterations) + result.measure.ln()).abs();
    blend_at(ramp, index)
}

/// Colors a smooth-kernel result using the normalized iteration count
/// `|iterations + 1 - log2(log2(measure))|`.  Only points that stopped
/// short of the limit are colored.
pub fn smooth_color(result: IterationResult, max_iteration: u32, ramp: &ColorRamp) -> Option<Rgba> {
    if result.iterations >= max_iteration {
        return None;
    }
    // log2 rather than log of the bailout, so the whole ramp spans the
    // distance from the centre to radius 2.
    let nu = (result.measure.ln() / LN_2).ln() / LN_2;
    let index = (f64::from(result.iterations) + 1.0 - nu).abs();
    blend_at(ramp, index)
}

/// Uses a raw iteration count as a ramp index with no blending.
pub fn direct_color(iterations: u32, ramp: &ColorRamp) -> Option<Rgba> {
    ramp.get(iterations as usize)
}

/// Blends `ramp[floor(index)]` and `ramp[floor(index) + 1]` by the
/// fractional part of `index`.  Indices that would read past the end,
/// and indices that are not finite, yield `None`.
pub fn blend_at(ramp: &ColorRamp, index: f64) -> Option<Rgba> {
    if !index.is_finite() || index < 0.0 {
        return None;
    }
    let base = index.floor();
    if base >= ramp.len() as f64 - 1.0 {
        return None;
    }
    let i = base as usize;
    Some(ramp[i].lerp(ramp[i + 1], index - base))
}

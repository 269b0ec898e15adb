// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Expands a palette's handful of key colors into a dense color ramp.

use itertools::Itertools;
use std::f64::consts::PI;
use std::ops::Index;

use crate::errors::{RenderError, Result};
use crate::palette::{KeyColor, Palette, Rgba};

/// Longest ramp [`ColorRamp::interpolate`] will build.
pub const MAX_RAMP_LENGTH: usize = 1 << 24;

/// Blends two colors along a half cosine, so the ramp has zero slope
/// at every key color and no visible seam where two segments meet.
pub fn cosine_blend(from: Rgba, to: Rgba, mu: f64) -> Rgba {
    let mu2 = (1.0 - (mu * PI).cos()) / 2.0;
    from.lerp(to, mu2)
}

/// A fixed-length sequence of colors, built once per render and only
/// read afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    colors: Vec<Rgba>,
}

impl ColorRamp {
    /// Builds a ramp of exactly `steps` colors from the named palette.
    pub fn interpolate(name: &str, steps: usize) -> Result<ColorRamp> {
        let palette =
            Palette::find(name).ok_or_else(|| RenderError::PaletteNotFound(name.to_string()))?;
        if steps > MAX_RAMP_LENGTH {
            return Err(RenderError::InvalidConfig(format!(
                "a ramp of {} colors is longer than the {} allowed",
                steps, MAX_RAMP_LENGTH
            )));
        }
        Ok(ColorRamp::from_palette(palette, steps))
    }

    /// Builds a ramp of exactly `steps` colors.  Color `k` is the palette
    /// sampled at `k / steps`.
    pub fn from_palette(palette: &Palette, steps: usize) -> ColorRamp {
        let positions = palette.positions();
        let colors = (0..steps)
            .map(|k| sample(&positions, palette.keys, k as f64 / steps as f64))
            .collect();
        ColorRamp { colors }
    }

    /// Number of colors in the ramp.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True for a ramp with nothing in it.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<Rgba> {
        self.colors.get(index).copied()
    }

    /// All colors, in order.
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }
}

impl Index<usize> for ColorRamp {
    type Output = Rgba;

    fn index(&self, index: usize) -> &Rgba {
        &self.colors[index]
    }
}

// Past the last key the ramp holds the last key's color.
fn sample(positions: &[f64], keys: &[KeyColor], t: f64) -> Rgba {
    let bracket = positions
        .iter()
        .zip(keys)
        .tuple_windows()
        .find(|((low, _), (high, _))| **low <= t && t < **high);

    match bracket {
        Some(((low, from), (high, to))) => {
            cosine_blend(from.color, to.color, (t - low) / (high - low))
        }
        None => keys.last().map(|key| key.color).unwrap_or_default(),
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between the raster, an integral plane with its origin at 0,0, and a
//! rectangle on the complex plane given by its lower-left and
//! upper-right corners.
use num::Complex;

use crate::errors::{RenderError, Result};

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the lower-left corner and upper-right corner of the
/// complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// The column and row of a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of the integral plane onto the complex plane.  The first
/// pixel of a row or column lands on the lower corner and the last one
/// on the upper corner.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// Raster width and height.
    pub integral_plane: IntegralPlane,
    /// The two corners of the region being rendered.
    pub complex_plane: ComplexPlane,
    // Width and height of the complex region.
    spans: (f64, f64),
    // Number of pixel steps across and down; a one-pixel dimension has
    // no steps and maps to the lower corner.
    divisors: (f64, f64),
}

impl PlaneMapper {
    /// Takes the raster size and the two corners of the complex region.
    /// Fails when the region is inverted or not finite.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper> {
        let corners = [leftlower.re, leftlower.im, rightupper.re, rightupper.im];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(RenderError::InvalidConfig(
                "The plane corners must be finite numbers.".to_string(),
            ));
        }

        if rightupper.re < leftlower.re {
            return Err(RenderError::InvalidConfig(
                "The left lower corner is not to the left of the right upper corner.".to_string(),
            ));
        }

        if rightupper.im < leftlower.im {
            return Err(RenderError::InvalidConfig(
                "The left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        let divisor = |n: usize| if n > 1 { (n - 1) as f64 } else { 1.0 };

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
            spans: (rightupper.re - leftlower.re, rightupper.im - leftlower.im),
            divisors: (divisor(width), divisor(height)),
        })
    }

    /// The raster width.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// The raster height.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane has no area.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral plane, return the point it samples
    /// on the complex plane: `min + (max - min) * i / (dimension - 1)` on
    /// each axis.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let origin = self.complex_plane.0;
        Complex::new(
            origin.re + self.spans.0 * (pixel.0 as f64) / self.divisors.0,
            origin.im + self.spans.1 * (pixel.1 as f64) / self.divisors.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_nan_corners() {
        let pm = PlaneMapper::new(4, 4, Complex::new(std::f64::NAN, 0.0), Complex::new(1.0, 1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(pm.is_ok());
    }

    #[test]
    fn corners_map_to_the_region_corners() {
        let pm = PlaneMapper::new(5, 3, Complex::new(-2.0, -1.0), Complex::new(2.0, 1.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -1.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 2)), Complex::new(2.0, 1.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 1)), Complex::new(0.0, 0.0));
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, Complex::new(0.0, 0.0), Complex::new(4.0, 4.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 3)), Complex::new(4.0, 3.0));
    }

    #[test]
    fn single_pixel_dimensions_map_to_the_lower_corner() {
        let pm = PlaneMapper::new(1, 1, Complex::new(-0.5, 0.25), Complex::new(0.5, 1.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-0.5, 0.25));
    }

    #[test]
    fn len_and_emptiness() {
        let pm = PlaneMapper::new(6, 4, Complex::new(0.0, 0.0), Complex::new(1.0, 1.0)).unwrap();
        assert_eq!(pm.len(), 24);
        assert!(!pm.is_empty());
        let empty = PlaneMapper::new(0, 4, Complex::new(0.0, 0.0), Complex::new(1.0, 1.0)).unwrap();
        assert!(empty.is_empty());
    }
}

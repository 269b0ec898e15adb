// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes a finished raster to disk.  `.pnm` and `.ppm` files become
//! binary pixmaps; everything else is written as PNG.

use image::png::PNGEncoder;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::errors::{RenderError, Result};
use crate::render::Raster;

fn encoding_error(path: &Path, e: std::io::Error) -> RenderError {
    RenderError::Encoding {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn is_pixmap(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("pnm") || ext.eq_ignore_ascii_case("ppm"),
        None => false,
    }
}

/// Encodes exactly the pixels of `raster` into the file at `path`.
pub fn write_image(path: &Path, raster: &Raster) -> Result<()> {
    let output = File::create(path).map_err(|e| encoding_error(path, e))?;
    let output = BufWriter::new(output);
    let (width, height) = (raster.width() as u32, raster.height() as u32);

    let written = if is_pixmap(path) {
        // Pixmaps have no alpha channel.
        let rgb: Vec<u8> = raster
            .as_bytes()
            .chunks_exact(4)
            .flat_map(|pixel| pixel[..3].iter().cloned())
            .collect();
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
        encoder.encode(&rgb[..], width, height, ColorType::RGB(8))
    } else {
        PNGEncoder::new(output).encode(raster.as_bytes(), width, height, ColorType::RGBA(8))
    };
    written.map_err(|e| encoding_error(path, e))?;

    debug!("wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}

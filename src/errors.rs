// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by the renderer, the worker client, the
//! worker server and the image writer.

use failure::Fail;

/// Everything that can go wrong between reading a configuration and
/// writing the last byte of the image.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The requested palette is not one of the built-in tables.  The
    /// binary treats this as "nothing to render" rather than a failure.
    #[fail(display = "no palette named {:?}", _0)]
    PaletteNotFound(String),

    /// The configuration describes an image or a plane that cannot be
    /// rendered.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// The remote worker could not be reached, timed out, or answered
    /// with something other than a 200.
    #[fail(display = "transport error talking to {}: {}", url, reason)]
    Transport {
        /// The request that failed.
        url: String,
        /// What the HTTP client reported.
        reason: String,
    },

    /// The remote worker answered, but not with an iteration count.
    #[fail(display = "malformed response from {}: {:?}", url, body)]
    MalformedResponse {
        /// The request that produced the body.
        url: String,
        /// The body as received.
        body: String,
    },

    /// The worker server could not be started or could not answer.
    #[fail(display = "worker server error: {}", _0)]
    Serve(String),

    /// The raster could not be written to its destination.
    #[fail(display = "could not write {}: {}", path, reason)]
    Encoding {
        /// The output file.
        path: String,
        /// What the encoder or filesystem reported.
        reason: String,
    },

    /// A row worker died before finishing its rows.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;

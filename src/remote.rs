// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The distributed-mode client: one blocking `GET /?x=..&y=..` per
//! pixel against a worker (see [`server`](crate::server)).  There is no
//! retry; any failure is handed back to the renderer, which abandons
//! the render.

use num::Complex;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

use crate::errors::{RenderError, Result};
use crate::kernel::IterationSource;

/// Joins a base URL and a port the way the command line takes them
/// (`http://localhost` and `3030`).
pub fn worker_endpoint(url: &str, port: &str) -> String {
    format!("{}:{}", url.trim_end_matches('/'), port)
}

/// A connection to one remote worker.  Shared by every row thread; the
/// underlying client pools connections.
#[derive(Debug)]
pub struct RemoteWorker {
    client: Client,
    endpoint: String,
}

impl RemoteWorker {
    /// A client for the worker at `endpoint`, with a fixed timeout on
    /// every request.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<RemoteWorker> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RenderError::Transport {
                url: endpoint.to_string(),
                reason: e.to_string(),
            })?;
        Ok(RemoteWorker {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// The worker's base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The request URL for a point.  Coordinates carry six decimals.
    pub fn query_url(&self, point: Complex<f64>) -> String {
        format!("{}/?x={:.6}&y={:.6}", self.endpoint, point.re, point.im)
    }
}

impl IterationSource for RemoteWorker {
    fn iterations_at(&self, point: Complex<f64>) -> Result<u32> {
        let url = self.query_url(point);
        let transport = |reason: String| RenderError::Transport {
            url: url.clone(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| transport(e.to_string()))?;
        if response.status() != StatusCode::OK {
            return Err(transport(format!("worker answered {}", response.status())));
        }
        let body = response.text().map_err(|e| transport(e.to_string()))?;

        body.trim()
            .parse::<u32>()
            .map_err(|_| RenderError::MalformedResponse {
                url: url.clone(),
                body,
            })
    }
}

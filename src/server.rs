// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The distributed-mode worker: a stateless HTTP service that answers
//! `GET /?x=<float>&y=<float>` with the bailout iteration count of that
//! point as a JSON integer, and with a 404 when either coordinate is
//! missing or unparseable.

use num::Complex;
use serde_json::json;
use std::net::SocketAddr;
use tiny_http::{Header, Request, Response, Server};

use crate::errors::{RenderError, Result};
use crate::kernel::escape_time;

/// An HTTP answer, independent of the server that sends it.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    /// HTTP status code.
    pub status: u16,
    /// Value of the Content-Type header.
    pub content_type: &'static str,
    /// Response body.
    pub body: String,
}

impl Reply {
    fn not_found() -> Reply {
        Reply {
            status: 404,
            content_type: "text/plain; charset=utf-8",
            body: "404 page not found\n".to_string(),
        }
    }
}

// Out-of-range literals such as `1e400` are rejected rather than
// rounded to infinity; only an explicit inf/nan spelling yields one.
fn parse_float(text: &str) -> Option<f64> {
    let value: f64 = text.parse().ok()?;
    if value.is_finite() {
        return Some(value);
    }
    let spelled = text
        .trim_start_matches(|c| c == '+' || c == '-')
        .to_ascii_lowercase();
    match spelled.as_str() {
        "inf" | "infinity" | "nan" => Some(value),
        _ => None,
    }
}

fn coordinate(query: &str, name: &str) -> Option<f64> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| parse_float(&value))
}

/// Answers one query string (the part after `?`).
pub fn answer(query: &str, max_iteration: u32) -> Reply {
    match (coordinate(query, "x"), coordinate(query, "y")) {
        (Some(x), Some(y)) => {
            let iterations = escape_time(Complex::new(x, y), max_iteration).iterations;
            Reply {
                status: 200,
                content_type: "application/json",
                body: json!(iterations).to_string(),
            }
        }
        _ => Reply::not_found(),
    }
}

/// A bound, not yet running, worker.
pub struct Worker {
    server: Server,
    max_iteration: u32,
}

impl Worker {
    /// Binds to `addr` (`host:port`; port 0 picks a free one).
    pub fn bind(addr: &str, max_iteration: u32) -> Result<Worker> {
        let server = Server::http(addr)
            .map_err(|e| RenderError::Serve(format!("could not bind {}: {}", addr, e)))?;
        Ok(Worker {
            server,
            max_iteration,
        })
    }

    /// The address actually bound.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Answers requests until the listener shuts down.
    pub fn run(self) -> Result<()> {
        info!(
            "worker listening on {:?} with an iteration limit of {}",
            self.local_addr(),
            self.max_iteration
        );
        for request in self.server.incoming_requests() {
            if let Err(e) = respond(request, self.max_iteration) {
                warn!("{}", e);
            }
        }
        Ok(())
    }
}

fn respond(request: Request, max_iteration: u32) -> Result<()> {
    let query = request
        .url()
        .splitn(2, '?')
        .nth(1)
        .unwrap_or("")
        .to_string();
    let reply = answer(&query, max_iteration);
    if reply.status != 200 {
        debug!("rejected query {:?}", query);
    }

    let content_type = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .map_err(|_| RenderError::Serve("bad content type header".to_string()))?;
    let response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(content_type);
    request
        .respond(response)
        .map_err(|e| RenderError::Serve(format!("could not answer {:?}: {}", query, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_reports_the_limit() {
        let reply = answer("x=0&y=0", 30);
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, "application/json");
        assert_eq!(reply.body, "30");
    }

    #[test]
    fn far_points_escape_quickly() {
        let reply = answer("x=2&y=2", 30);
        assert_eq!(reply.status, 200);
        let iterations: u32 = reply.body.parse().unwrap();
        assert!(iterations < 5);
    }

    #[test]
    fn client_formatted_queries_are_understood() {
        assert_eq!(answer("x=-2.100000&y=-1.200000", 30).body, "1");
    }

    #[test]
    fn missing_or_broken_coordinates_are_not_found() {
        for query in &["", "x=1", "y=1", "x=abc&y=0", "x=0&y=", "z=0&w=0"] {
            assert_eq!(answer(query, 30).status, 404, "{:?}", query);
        }
    }

    #[test]
    fn out_of_range_coordinates_are_not_found() {
        for query in &["x=1e400&y=0", "x=0&y=-1e400", "x=1e309&y=1e309"] {
            assert_eq!(answer(query, 30).status, 404, "{:?}", query);
        }
    }

    #[test]
    fn spelled_out_infinities_are_still_numbers() {
        for query in &["x=inf&y=0", "x=-inf&y=0", "x=NaN&y=0"] {
            assert_eq!(answer(query, 30).status, 200, "{:?}", query);
        }
    }

    #[test]
    fn first_value_wins() {
        assert_eq!(answer("x=0&x=5&y=0", 30).body, "30");
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate mandelbrot;
extern crate num;
extern crate reqwest;
extern crate tiny_http;

use mandelbrot::render::REQUEST_TIMEOUT;
use mandelbrot::{
    ramp_for, render, IterationSource, Mode, RemoteWorker, RenderConfig, RenderError, Worker,
};
use num::Complex;
use std::net::{SocketAddr, TcpListener};
use std::thread;
use std::time::Duration;

const WORKER_LIMIT: u32 = 30;

fn start_worker() -> SocketAddr {
    let worker = Worker::bind("127.0.0.1:0", WORKER_LIMIT).unwrap();
    let addr = worker.local_addr().unwrap();
    thread::spawn(move || worker.run());
    addr
}

// A worker that gives the same canned answer to every request.
fn start_stub(status: u16, body: &'static str) -> SocketAddr {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });
    addr
}

#[test]
fn worker_answers_iteration_counts() {
    let addr = start_worker();
    let client = RemoteWorker::new(&format!("http://{}", addr), REQUEST_TIMEOUT).unwrap();
    assert_eq!(client.iterations_at(Complex::new(0.0, 0.0)).unwrap(), WORKER_LIMIT);
    assert!(client.iterations_at(Complex::new(2.0, 2.0)).unwrap() < 5);
}

#[test]
fn worker_speaks_json_and_404s_bad_queries() {
    let addr = start_worker();
    let http = reqwest::blocking::Client::new();

    let ok = http.get(&format!("http://{}/?x=0&y=0", addr)).send().unwrap();
    assert_eq!(ok.status().as_u16(), 200);
    assert_eq!(
        ok.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(ok.text().unwrap(), "30");

    for query in &["/", "/?x=1", "/?x=abc&y=0"] {
        let missing = http.get(&format!("http://{}{}", addr, query)).send().unwrap();
        assert_eq!(missing.status().as_u16(), 404, "{}", query);
    }
}

#[test]
fn distributed_render_colors_every_pixel_from_the_worker() {
    let addr = start_worker();
    let config = RenderConfig {
        width: 12,
        height: 8,
        smoothness: 1,
        max_iteration: 50,
        color_steps: 100,
        threads: 3,
        mode: Mode::Distributed,
        worker_url: format!("http://{}", addr),
        ..RenderConfig::around_origin(-2.1, -1.2)
    };
    let ramp = ramp_for(&config).unwrap().unwrap();
    let raster = render(&config, &ramp).unwrap();

    assert_eq!((raster.width(), raster.height()), (12, 8));
    let mut colors = vec![];
    for y in 0..8 {
        for x in 0..12 {
            let color = raster.pixel(x, y);
            // Every count the worker can send is inside a 100-color ramp.
            assert_eq!(color.a, 0xff);
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
    }
    assert!(colors.len() > 1);
}

#[test]
fn closed_port_is_a_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client =
        RemoteWorker::new(&format!("http://127.0.0.1:{}", port), Duration::from_secs(2)).unwrap();
    match client.iterations_at(Complex::new(0.0, 0.0)) {
        Err(RenderError::Transport { url, .. }) => assert!(url.contains("x=0.000000&y=0.000000")),
        other => panic!("expected a transport error, got {:?}", other),
    }
}

#[test]
fn non_integer_bodies_are_malformed() {
    let addr = start_stub(200, "abc");
    let client = RemoteWorker::new(&format!("http://{}", addr), REQUEST_TIMEOUT).unwrap();
    match client.iterations_at(Complex::new(0.5, -0.5)) {
        Err(RenderError::MalformedResponse { url, body }) => {
            assert!(url.ends_with("/?x=0.500000&y=-0.500000"));
            assert_eq!(body, "abc");
        }
        other => panic!("expected a malformed response, got {:?}", other),
    }
}

#[test]
fn non_200_answers_are_transport_errors() {
    let addr = start_stub(404, "404 page not found\n");
    let client = RemoteWorker::new(&format!("http://{}", addr), REQUEST_TIMEOUT).unwrap();
    match client.iterations_at(Complex::new(0.0, 0.0)) {
        Err(RenderError::Transport { reason, .. }) => assert!(reason.contains("404"), "{}", reason),
        other => panic!("expected a transport error, got {:?}", other),
    }
}

#[test]
fn one_bad_answer_fails_the_whole_render() {
    let addr = start_stub(200, "abc");
    let config = RenderConfig {
        width: 4,
        height: 4,
        smoothness: 1,
        max_iteration: 50,
        threads: 2,
        mode: Mode::Distributed,
        worker_url: format!("http://{}", addr),
        ..RenderConfig::around_origin(-2.1, -1.2)
    };
    let ramp = ramp_for(&config).unwrap().unwrap();
    match render(&config, &ramp) {
        Err(RenderError::MalformedResponse { .. }) => {}
        other => panic!("expected the render to fail, got {:?}", other.map(|_| ())),
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate clap;
extern crate env_logger;
extern crate mandelbrot;

use clap::{App, Arg, ArgMatches};
use mandelbrot::Worker;
use std::str::FromStr;

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const PORT: &str = "port";
const HOST: &str = "host";
const ITERATIONS: &str = "maxIter";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel-worker")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Answers Mandelbrot iteration counts over HTTP")
        .arg(
            Arg::with_name(PORT)
                .required(true)
                .index(1)
                .validator(|s| {
                    validate_range::<u32>(
                        &s,
                        0,
                        65_535,
                        "Could not parse port",
                        "Port must be between 0 and 65535",
                    )
                })
                .help("Port to listen on"),
        )
        .arg(
            Arg::with_name(HOST)
                .long(HOST)
                .takes_value(true)
                .default_value("0.0.0.0")
                .help("Address to listen on"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .takes_value(true)
                .default_value("30")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration limit for every answer"),
        )
        .get_matches()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    let max_iteration = value_t!(matches, ITERATIONS, u32).unwrap_or_else(|e| e.exit());
    let addr = format!(
        "{}:{}",
        matches.value_of(HOST).unwrap_or_default(),
        matches.value_of(PORT).unwrap_or_default()
    );

    let served = Worker::bind(&addr, max_iteration).and_then(Worker::run);
    if let Err(e) = served {
        eprintln!("Worker failure: {}", e);
        std::process::exit(1);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;
extern crate env_logger;
extern crate mandelbrot;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelbrot::progress::{Progress, TICK};
use mandelbrot::ramp::MAX_RAMP_LENGTH;
use mandelbrot::remote::worker_endpoint;
use mandelbrot::{ramp_for, render, write_image, Mode, Palette, RenderConfig};
use std::path::PathBuf;
use std::str::FromStr;

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

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

const STEP: &str = "step";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const XMIN: &str = "xmin";
const YMIN: &str = "ymin";
const XMAX: &str = "xmax";
const YMAX: &str = "ymax";
const ITERATIONS: &str = "maxIter";
const SMOOTHNESS: &str = "smoothness";
const PALETTE: &str = "palette";
const OUTPUT: &str = "file";
const WORKER_URL: &str = "lbURL";
const WORKER_PORT: &str = "lbPort";
const MODE: &str = "mode";
const THREADS: &str = "threads";

fn coordinate<'a, 'b>(name: &'a str, default: Option<&'a str>, help: &'a str) -> Arg<'a, 'b> {
    let arg = Arg::with_name(name)
        .long(name)
        .takes_value(true)
        .allow_hyphen_values(true)
        .validator(|s| validate_number::<f64>(&s, "Could not parse coordinate"))
        .help(help);
    match default {
        Some(value) => arg.default_value(value),
        None => arg,
    }
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer")
        .arg(
            Arg::with_name(STEP)
                .long(STEP)
                .takes_value(true)
                .default_value("6000")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        MAX_RAMP_LENGTH,
                        "Could not parse color step count",
                        "Color step count must be at most 16777216",
                    )
                })
                .help("Color smooth step. Raised to the iteration count when smaller"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .takes_value(true)
                .default_value("1280")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        65_535,
                        "Could not parse width",
                        "Width must be between 1 and 65535",
                    )
                })
                .help("Rendered image width"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .takes_value(true)
                .default_value("720")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        65_535,
                        "Could not parse height",
                        "Height must be between 1 and 65535",
                    )
                })
                .help("Rendered image height"),
        )
        .arg(coordinate(XMIN, Some("-2.1"), "Left edge of the region on the real axis"))
        .arg(coordinate(YMIN, Some("-1.2"), "Bottom edge of the region on the imaginary axis"))
        .arg(coordinate(XMAX, None, "Right edge of the region [default: |xmin|]"))
        .arg(coordinate(YMAX, None, "Top edge of the region [default: |ymin|]"))
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .takes_value(true)
                .default_value("800")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration count"),
        )
        .arg(
            Arg::with_name(SMOOTHNESS)
                .long(SMOOTHNESS)
                .takes_value(true)
                .default_value("8")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        64,
                        "Could not parse smoothness",
                        "Smoothness must be between 1 and 64",
                    )
                })
                .help("Supersampling factor; use 4 for 4xAA"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .takes_value(true)
                .default_value("Hippi")
                .help("Hippi | Plan9 | AfternoonBlue | SummerBeach | Biochimist | Fiesta"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("mandelbrot.png")
                .help("Output file; .ppm and .pnm write a pixmap, anything else a PNG"),
        )
        .arg(
            Arg::with_name(WORKER_URL)
                .long(WORKER_URL)
                .takes_value(true)
                .default_value("http://localhost")
                .help("The worker URL for distributed mode"),
        )
        .arg(
            Arg::with_name(WORKER_PORT)
                .long(WORKER_PORT)
                .takes_value(true)
                .default_value("3030")
                .validator(|s| validate_number::<u16>(&s, "Could not parse worker port"))
                .help("The worker port for distributed mode"),
        )
        .arg(
            Arg::with_name(MODE)
                .long(MODE)
                .takes_value(true)
                .default_value("parallel")
                .validator(|s| Mode::from_str(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("parallel | parallel-smooth | single | single-smooth | distributed"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1024,
                        "Could not parse thread count",
                        "Thread count must be between 1 and 1024",
                    )
                })
                .help("Number of row workers [default: number of CPUs]"),
        )
        .get_matches()
}

fn config_from(matches: &ArgMatches) -> Result<RenderConfig, clap::Error> {
    let xmin = value_t!(matches, XMIN, f64)?;
    let ymin = value_t!(matches, YMIN, f64)?;
    let or_abs = |name: &str, min: f64| -> Result<f64, clap::Error> {
        if matches.is_present(name) {
            value_t!(matches, name, f64)
        } else {
            Ok(min.abs())
        }
    };
    let threads = if matches.is_present(THREADS) {
        value_t!(matches, THREADS, usize)?
    } else {
        num_cpus::get()
    };
    let worker_url = worker_endpoint(
        matches.value_of(WORKER_URL).unwrap_or_default(),
        matches.value_of(WORKER_PORT).unwrap_or_default(),
    );

    Ok(RenderConfig {
        xmin,
        ymin,
        xmax: or_abs(XMAX, xmin)?,
        ymax: or_abs(YMAX, ymin)?,
        width: value_t!(matches, WIDTH, usize)?,
        height: value_t!(matches, HEIGHT, usize)?,
        smoothness: value_t!(matches, SMOOTHNESS, usize)?,
        max_iteration: value_t!(matches, ITERATIONS, u32)?,
        palette: matches.value_of(PALETTE).unwrap_or_default().to_string(),
        color_steps: value_t!(matches, STEP, usize)?,
        mode: value_t!(matches, MODE, Mode)?,
        threads,
        output: PathBuf::from(matches.value_of(OUTPUT).unwrap_or_default()),
        worker_url,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    let config = config_from(&matches).unwrap_or_else(|e| e.exit());
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    debug!("{:?}", config);

    let ramp = match ramp_for(&config) {
        Ok(Some(ramp)) => ramp,
        Ok(None) => {
            debug!(
                "known palettes: {}",
                Palette::names().collect::<Vec<_>>().join(", ")
            );
            return;
        }
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    };

    print!("Rendering image...");
    let progress = Progress::start(TICK);
    let written = render(&config, &ramp).and_then(|raster| write_image(&config.output, &raster));
    match written {
        Ok(()) => {
            progress.finish(&format!(
                "Mandelbrot set rendered into `{}`",
                config.output.display()
            ));
        }
        Err(e) => {
            progress.abort();
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    }
}

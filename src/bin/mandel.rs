// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate image;
extern crate num;
extern crate num_cpus;
extern crate tilebrot;

use clap::{App, Arg, ArgMatches};
use image::png::PNGEncoder;
use image::ColorType;
use num::clamp;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tilebrot::renderer::Grid;
use tilebrot::{render, RenderConfig, RenderError};

/// Given a string and a separator, returns the two values separated
/// by the separator.
fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
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

fn validate_positive_real(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) => {
            if f > 0.0 {
                Ok(())
            } else {
                Err(err.to_string())
            }
        }
        Err(_) => Err(err.to_string()),
    }
}

fn validate_real(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const SCALE: &str = "scale";
const POSITION: &str = "position";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("mrmackan")
        .about("Tiled multithreaded Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1024x1024")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse image size"))
                .help("Size of output image, WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration cap per pixel"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .default_value("2")
                .validator(|s| validate_positive_real(&s, "Escape radius must be a positive number"))
                .help("Escape radius"),
        )
        .arg(
            Arg::with_name(SCALE)
                .required(false)
                .long(SCALE)
                .short("z")
                .takes_value(true)
                .default_value("2")
                .validator(|s| validate_real(&s, "Could not parse scale"))
                .help("Scale multiplier applied to mapped coordinates"),
        )
        .arg(
            Arg::with_name(POSITION)
                .required(false)
                .long(POSITION)
                .short("p")
                .takes_value(true)
                .default_value("0,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse position"))
                .help("Offset added to mapped coordinates, X,Y"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of worker threads; defaults to the processor count"),
        )
        .get_matches()
}

/// Maps iteration counts to 8-bit gray: interior points are black,
/// exterior points brighten with their escape count.
fn shade(grid: &Grid, limit: u32) -> Vec<u8> {
    grid.cells()
        .iter()
        .map(|&count| {
            if count >= limit {
                0
            } else {
                clamp((count * 255) / limit, 0, 255) as u8
            }
        })
        .collect()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    let output = File::create(Path::new(outfile))?;
    let encoder = PNGEncoder::new(output);
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::Gray(8))?;
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();

    let (width, height) = parse_pair(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing image dimensions");
    let offset = parse_pair(matches.value_of(POSITION).unwrap(), ',')
        .expect("Error parsing position");
    let config = RenderConfig {
        width,
        height,
        max_iterations: u32::from_str(matches.value_of(ITERATIONS).unwrap())
            .expect("Could not parse iteration count."),
        escape_radius: f64::from_str(matches.value_of(RADIUS).unwrap())
            .expect("Could not parse escape radius."),
        scale: f64::from_str(matches.value_of(SCALE).unwrap()).expect("Could not parse scale."),
        offset,
    };
    let threads = match matches.value_of(THREADS) {
        Some(s) => usize::from_str(s).expect("Could not parse thread count."),
        None => num_cpus::get(),
    };

    match render(config, threads) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(rendering) => {
            println!(
                "computed {}x{} on {} threads in {:.3}s",
                width,
                height,
                threads,
                rendering.elapsed.as_secs_f64()
            );
            let pixels = shade(&rendering.grid, config.max_iterations);
            if let Err(e) = write_image(matches.value_of(OUTPUT).unwrap(), &pixels, (width, height))
                .map_err(RenderError::Encoding)
            {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

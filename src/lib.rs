#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tiled Mandelbrot renderer
//!
//! The Mandelbrot set is drawn by taking every pixel of the output
//! image, mapping it to a point on the complex plane, and repeatedly
//! squaring-and-adding that point until the orbit flies off past an
//! escape radius.  The number of steps that takes is the "velocity"
//! of the pixel, and the velocity is what gets shaded.
//!
//! The interesting part of this crate is not the arithmetic, which is
//! twenty lines, but the way the work is spread out.  The image is
//! cut into vertical bands, one per worker thread; every band owns a
//! private buffer and computes its pixels against the *full* image's
//! coordinate system, so neighbouring bands continue each other
//! seamlessly.  When every worker has finished, the bands are
//! stitched back into a single grid, single-threaded, and only then
//! does anyone look at the result.  No two threads ever share a
//! buffer, so there is nothing to prove about data races; the
//! ownership rules do it for us.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod config;
pub mod errors;
pub mod kernel;
pub mod planes;
pub mod renderer;
pub mod tiles;

pub use config::RenderConfig;
pub use errors::RenderError;
pub use renderer::{render, Grid, Rendering, TileRenderer};

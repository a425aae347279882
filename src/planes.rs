//! Maps pixel indices on the integral image plane to points on the
//! complex plane.  Every mapping here is against the *full* image's
//! dimensions; a tile asking for its own pixels must pass absolute
//! row and column indices, never locally re-normalised ones, or
//! adjacent tiles would render discontinuous pictures.

use config::RenderConfig;
use num::Complex;

/// Linearly interpolates `value` from the range `[in_min, in_max]`
/// onto the range `[out_min, out_max]`.  So `map(0, 0, w, -1, 1)` is
/// exactly `-1` and `map(w, 0, w, -1, 1)` is exactly `1`.
///
/// Callers must never pass an empty input range (`in_min == in_max`);
/// that is a precondition, not a runtime check.
pub fn map(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}

/// Turns absolute pixel coordinates into the complex constant `c`
/// that the kernel iterates.  Rows and columns are first mapped onto
/// `[-1, 1]` against the full image dimensions, then translated by
/// the configured offset, then multiplied by the scale.
#[derive(Debug, Clone, Copy)]
pub struct PointMapper {
    width: f64,
    height: f64,
    scale: f64,
    offset: (f64, f64),
}

impl PointMapper {
    /// Builds a mapper for the whole image described by `config`.
    pub fn new(config: &RenderConfig) -> PointMapper {
        PointMapper {
            width: config.width as f64,
            height: config.height as f64,
            scale: config.scale,
            offset: config.offset,
        }
    }

    /// Real component of `c` for an absolute column index.
    pub fn re(&self, col: usize) -> f64 {
        (map(col as f64, 0.0, self.width, -1.0, 1.0) + self.offset.0) * self.scale
    }

    /// Imaginary component of `c` for an absolute row index.
    pub fn im(&self, row: usize) -> f64 {
        (map(row as f64, 0.0, self.height, -1.0, 1.0) + self.offset.1) * self.scale
    }

    /// The complex constant for the pixel at (`col`, `row`).
    pub fn point(&self, col: usize, row: usize) -> Complex<f64> {
        Complex::new(self.re(col), self.im(row))
    }
}

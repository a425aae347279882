//! The escape-time kernel: the one piece of arithmetic everything
//! else exists to parallelise.

use num::Complex;

/// Iterates `z = z² + c` from `z = 0` and reports how many steps the
/// orbit survives before its magnitude leaves `radius`.
///
/// The test happens after each update, so a point that is past the
/// radius on the very first step returns `0`.  Orbits still inside
/// after `limit` steps return `limit`; the caller treats those as
/// members of the set.
///
/// The comparison is done on the squared magnitude against `radius²`,
/// which never takes a square root and picks exactly the same side of
/// the strict `>` as comparing magnitudes would, for any positive
/// radius.
pub fn escape_count(c: Complex<f64>, limit: u32, radius: f64) -> u32 {
    let rr = radius * radius;
    let mut z = Complex { re: 0.0_f64, im: 0.0_f64 };
    for i in 0..limit {
        z = z * z + c;
        if z.norm_sqr() > rr {
            return i;
        }
    }
    limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_count(Complex::new(0.0, 0.0), 100, 2.0), 100);
    }

    #[test]
    fn far_point_escapes_on_the_first_step() {
        assert_eq!(escape_count(Complex::new(1000.0, 0.0), 100, 2.0), 0);
    }

    #[test]
    fn boundary_point_escapes_on_the_second_step() {
        // c = 2: the first step lands exactly on the radius, which is
        // not an escape under the strict comparison; the second step
        // lands on 6 and is.
        assert_eq!(escape_count(Complex::new(2.0, 0.0), 100, 2.0), 1);
    }

    #[test]
    fn interior_cycle_reaches_the_cap() {
        // c = -1 settles into the 0, -1, 0, -1 cycle
        assert_eq!(escape_count(Complex::new(-1.0, 0.0), 5000, 2.0), 5000);
    }

    #[test]
    fn cap_of_one_still_tests_the_first_step() {
        assert_eq!(escape_count(Complex::new(1000.0, 0.0), 1, 2.0), 0);
        assert_eq!(escape_count(Complex::new(0.0, 0.0), 1, 2.0), 1);
    }
}

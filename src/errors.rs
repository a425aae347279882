//! The ways a render can go wrong.  There are deliberately few: bad
//! configuration caught before any thread is spawned, a worker dying
//! mid-compute, and the image writer failing after the fact.

use std::io;

/// Everything the render pipeline can report to a caller.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The configuration cannot describe a renderable image.  Raised
    /// before any tile is built or any thread spawned; there is never
    /// partial output behind this error.
    #[fail(display = "invalid render configuration: {}", _0)]
    Configuration(String),

    /// A compute worker terminated abnormally.  The whole render is
    /// abandoned rather than merging a half-written tile.
    #[fail(display = "worker for tile {} terminated before finishing", _0)]
    Worker(usize),

    /// The image writer could not persist the finished raster.  Kept
    /// distinct from compute failures; by the time this is raised the
    /// grid itself was computed fine.
    #[fail(display = "could not encode image: {}", _0)]
    Encoding(#[fail(cause)] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_render_distinct_messages() {
        let config = RenderError::Configuration("width must be positive".to_string());
        assert!(format!("{}", config).contains("configuration"));

        let worker = RenderError::Worker(3);
        assert!(format!("{}", worker).contains("tile 3"));

        let encoding = RenderError::Encoding(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(format!("{}", encoding).contains("disk full"));
    }
}

//! Tiles: the unit of parallel work.  A tile owns a rectangle of the
//! output image and a private buffer exactly that big; the set of
//! tiles produced by [`partition`] covers the image with no gaps and
//! no overlap, which is what lets the workers run without a single
//! lock between them.

use errors::RenderError;
use kernel::escape_count;
use num::Complex;
use planes::PointMapper;

/// One independently computed band of the image.  The rectangle is
/// expressed in absolute grid coordinates, `[row_start, row_end)` by
/// `[col_start, col_end)`; the buffer is local and row-major.
#[derive(Debug)]
pub struct Tile {
    /// First absolute row covered.
    pub row_start: usize,
    /// One past the last absolute row covered.
    pub row_end: usize,
    /// First absolute column covered.
    pub col_start: usize,
    /// One past the last absolute column covered.
    pub col_end: usize,
    data: Vec<u32>,
}

impl Tile {
    fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Tile {
        let data = vec![0; (row_end - row_start) * (col_end - col_start)];
        Tile {
            row_start,
            row_end,
            col_start,
            col_end,
            data,
        }
    }

    /// Number of rows this tile covers.
    pub fn rows(&self) -> usize {
        self.row_end - self.row_start
    }

    /// Number of columns this tile covers.
    pub fn cols(&self) -> usize {
        self.col_end - self.col_start
    }

    /// Total number of cells in the tile's buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the tile covers no cells at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The finished iteration counts, row-major, local coordinates.
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Runs the kernel over every cell of the tile.  Coordinates
    /// handed to the mapper are absolute (tile origin plus local
    /// index); the mapper normalises against the full image, so the
    /// picture inside this tile lines up exactly with its neighbours.
    pub fn compute(&mut self, mapper: &PointMapper, limit: u32, radius: f64) {
        let cols = self.cols();
        for ly in 0..self.rows() {
            let im = mapper.im(self.row_start + ly);
            for lx in 0..cols {
                let c = Complex::new(mapper.re(self.col_start + lx), im);
                self.data[ly * cols + lx] = escape_count(c, limit, radius);
            }
        }
    }
}

/// Splits a `width` × `height` image into `tile_count` contiguous
/// full-height column bands.  Each band is `width / tile_count`
/// columns wide, except the last, which absorbs whatever the integer
/// division left over; the union is exactly the image.
///
/// Asking for zero bands, or for at least as many bands as there are
/// columns, is a configuration error: every worker must receive a
/// non-empty tile.
pub fn partition(
    width: usize,
    height: usize,
    tile_count: usize,
) -> Result<Vec<Tile>, RenderError> {
    if tile_count == 0 {
        return Err(RenderError::Configuration(
            "tile count must be positive".to_string(),
        ));
    }
    if tile_count >= width {
        return Err(RenderError::Configuration(format!(
            "cannot split {} columns into {} bands",
            width, tile_count
        )));
    }
    let band = width / tile_count;
    let mut tiles = Vec::with_capacity(tile_count);
    for i in 0..tile_count {
        let col_start = i * band;
        let col_end = if i + 1 == tile_count {
            width
        } else {
            col_start + band
        };
        tiles.push(Tile::new(0, height, col_start, col_end));
    }
    Ok(tiles)
}

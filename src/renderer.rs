// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The orchestrator: partitions the image into tiles, fans the tiles
//! out across scoped worker threads, waits for every one of them at
//! the join barrier, and merges the finished buffers into one grid.
//! The merge runs single-threaded, after the barrier, so the only
//! code that ever touches shared data is code running alone.

extern crate crossbeam;

use std::time::{Duration, Instant};

use crossbeam::thread::ScopedJoinHandle;
use itertools::iproduct;

use config::RenderConfig;
use errors::RenderError;
use planes::PointMapper;
use tiles::{partition, Tile};

/// The merged width × height buffer of iteration counts.  Every cell
/// holds a value in `[0, max_iterations]` and was written by exactly
/// one tile.
#[derive(Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Grid {
    fn new(width: usize, height: usize) -> Grid {
        Grid {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The iteration counts, row-major.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// The count at column `col`, row `row`.
    pub fn get(&self, col: usize, row: usize) -> u32 {
        self.cells[row * self.width + col]
    }
}

/// A finished render: the merged grid, plus how long the parallel
/// compute phase took from fork to join.
#[derive(Debug)]
pub struct Rendering {
    /// The merged iteration counts.
    pub grid: Grid,
    /// Wall-clock duration of the compute phase.  The merge is not
    /// included; it is a memcpy-shaped afterthought.
    pub elapsed: Duration,
}

/// Drives one render from a validated configuration.
#[derive(Debug)]
pub struct TileRenderer {
    config: RenderConfig,
    mapper: PointMapper,
}

impl TileRenderer {
    /// Validates `config` and builds a renderer around it.  All
    /// configuration errors surface here, before any work starts.
    pub fn new(config: RenderConfig) -> Result<TileRenderer, RenderError> {
        config.validate()?;
        Ok(TileRenderer {
            mapper: PointMapper::new(&config),
            config,
        })
    }

    /// Renders the configured image across `tile_count` worker
    /// threads and returns the merged grid.
    ///
    /// Each tile goes to its own scoped thread; the call returns only
    /// after every thread has been joined.  A worker that dies takes
    /// the whole render with it.  A partially computed image is worse
    /// than no image, because nothing about it looks wrong.
    pub fn render(&self, tile_count: usize) -> Result<Rendering, RenderError> {
        let mut tiles = partition(self.config.width, self.config.height, tile_count)?;
        let limit = self.config.max_iterations;
        let radius = self.config.escape_radius;
        let mapper = self.mapper;

        let started = Instant::now();
        let failed: Option<usize> = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<()>> = tiles
                .iter_mut()
                .enumerate()
                .map(|(id, tile)| {
                    spawner.spawn(move |_| {
                        tile.compute(&mapper, limit, radius);
                        debug!("tile {} finished ({} cells)", id, tile.len());
                    })
                })
                .collect();
            // Join every handle, remembering the first casualty; the
            // loop must not short-circuit, or the scope would be left
            // holding unjoined panics.
            let mut failed = None;
            for (id, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() && failed.is_none() {
                    failed = Some(id);
                }
            }
            failed
        })
        .unwrap();
        if let Some(id) = failed {
            return Err(RenderError::Worker(id));
        }
        let elapsed = started.elapsed();
        info!(
            "computed {} tiles in {:.3}s",
            tiles.len(),
            elapsed.as_secs_f64()
        );

        let mut grid = Grid::new(self.config.width, self.config.height);
        merge(&mut grid, &tiles);
        Ok(Rendering { grid, elapsed })
    }
}

/// One-shot entry point: validate `config`, render it across
/// `tile_count` workers, hand back the merged grid and the timing.
pub fn render(config: RenderConfig, tile_count: usize) -> Result<Rendering, RenderError> {
    TileRenderer::new(config)?.render(tile_count)
}

/// Copies every tile's local buffer into the grid at the tile's
/// absolute offset.  Tiles cover the grid exactly, so after this loop
/// every cell has been written exactly once.
fn merge(grid: &mut Grid, tiles: &[Tile]) {
    for tile in tiles {
        let cols = tile.cols();
        for (ly, lx) in iproduct!(0..tile.rows(), 0..cols) {
            grid.cells[(tile.row_start + ly) * grid.width + (tile.col_start + lx)] =
                tile.data()[ly * cols + lx];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> RenderConfig {
        RenderConfig {
            width: 4,
            height: 4,
            max_iterations: 50,
            escape_radius: 2.0,
            scale: 2.0,
            offset: (0.0, 0.0),
        }
    }

    #[test]
    fn two_tile_render_matches_the_single_tile_reference() {
        let reference = render(small_config(), 1).unwrap();
        let split = render(small_config(), 2).unwrap();
        assert_eq!(reference.grid.cells(), split.grid.cells());
    }

    #[test]
    fn merge_places_cells_at_their_absolute_offsets() {
        let rendering = render(small_config(), 2).unwrap();
        let grid = &rendering.grid;
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 4);
        // (0, 0) maps to c = (-2, -2), which is past the radius on
        // the first step.
        assert_eq!(grid.get(0, 0), 0);
        // (2, 2) maps to c = (0, 0), the origin, which never escapes.
        assert_eq!(grid.get(2, 2), 50);
    }

    #[test]
    fn parallel_decomposition_is_invisible_in_the_output() {
        let config = RenderConfig {
            width: 64,
            height: 33,
            max_iterations: 64,
            escape_radius: 2.0,
            scale: 2.0,
            offset: (-0.5, 0.0),
        };
        let reference = render(config, 1).unwrap();
        for &workers in &[2, 3, 5, 8] {
            let split = render(config, workers).unwrap();
            assert_eq!(
                reference.grid.cells(),
                split.grid.cells(),
                "{} workers changed the output",
                workers
            );
        }
    }

    #[test]
    fn every_cell_stays_within_the_cap() {
        let rendering = render(small_config(), 3).unwrap();
        assert!(rendering.grid.cells().iter().all(|&count| count <= 50));
    }

    #[test]
    fn invalid_config_fails_before_any_computation() {
        let config = RenderConfig {
            width: 0,
            ..small_config()
        };
        match render(config, 1) {
            Err(RenderError::Configuration(_)) => {}
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn oversubscribed_tiling_fails_the_render() {
        assert!(render(small_config(), 4).is_err());
        assert!(render(small_config(), 0).is_err());
    }
}

//! # Tile Layout
//!
//! DS character data stores pixels as 8×8 tiles, each tile's 64 indices
//! contiguous, tiles ordered row-major across a grid `tile_width` pixels wide.
//! Both directions use the same coordinate mapping; only the read and write
//! sides swap.

use crate::error::{NdsImageError, Result};

pub const TILE_DIM: usize = 8;
pub const PIXELS_PER_TILE: usize = TILE_DIM * TILE_DIM;

/// Widest grid an `RgbaImage` can hold, rounded down to whole tiles
pub const MAX_GRID_WIDTH: usize = (u32::MAX as usize) & !(TILE_DIM - 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Row-major to tile-major
    ToTiled,
    /// Tile-major to row-major
    ToLinear,
}

/// Checks a grid width and returns the number of indices in one row of tiles.
pub fn check_width(width: usize) -> Result<usize> {
    if width == 0 || width % TILE_DIM != 0 || width > MAX_GRID_WIDTH {
        return Err(NdsImageError::UnalignedTileWidth(width));
    }
    width
        .checked_mul(TILE_DIM)
        .ok_or(NdsImageError::UnalignedTileWidth(width))
}

/// Checks that `len` indices fill a whole number of tile rows `width` pixels wide.
pub fn check_grid(len: usize, width: usize) -> Result<()> {
    let row_len = check_width(width)?;
    if len % row_len != 0 {
        return Err(NdsImageError::BufferLength { len, width });
    }
    Ok(())
}

/// Reorders `indices` between linear and tiled layout for a grid `width` pixels wide.
pub fn transpose(indices: &[u8], width: usize, direction: Direction) -> Result<Vec<u8>> {
    check_grid(indices.len(), width)?;

    let tiles_across = width / TILE_DIM;
    let mut out = vec![0u8; indices.len()];

    for (linear, tiled) in tile_mapping(indices.len(), tiles_across) {
        let (dst, src) = match direction {
            Direction::ToTiled => (tiled, linear),
            Direction::ToLinear => (linear, tiled),
        };
        out[dst] = indices[src];
    }

    Ok(out)
}

pub fn to_tiled(indices: &[u8], width: usize) -> Result<Vec<u8>> {
    transpose(indices, width, Direction::ToTiled)
}

pub fn to_linear(indices: &[u8], width: usize) -> Result<Vec<u8>> {
    transpose(indices, width, Direction::ToLinear)
}

/// Yields `(linear, tiled)` position pairs for every pixel.
///
/// `d` walks the tile-major order; its tile number and offset inside the tile
/// give the absolute pixel coordinates, which map back to a row-major offset.
fn tile_mapping(len: usize, tiles_across: usize) -> impl Iterator<Item = (usize, usize)> {
    let width = tiles_across * TILE_DIM;
    (0..len).map(move |d| {
        let tile_id = d / PIXELS_PER_TILE;
        let idx_in_tile = d % PIXELS_PER_TILE;

        let tile_x = (tile_id % tiles_across) * TILE_DIM;
        let tile_y = (tile_id / tiles_across) * TILE_DIM;

        let in_tile_x = idx_in_tile % TILE_DIM;
        let in_tile_y = idx_in_tile / TILE_DIM;

        let x = tile_x + in_tile_x;
        let y = tile_y + in_tile_y;

        (x + y * width, d)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn single_tile_is_identity() {
        let buf = ramp(64);
        assert_eq!(to_tiled(&buf, 8).unwrap(), buf);
        assert_eq!(to_linear(&buf, 8).unwrap(), buf);
    }

    #[test]
    fn two_tiles_across_split_into_halves() {
        // 16x8 image: left half is 1, right half is 2
        let linear: Vec<u8> = (0..128).map(|i| if i % 16 < 8 { 1 } else { 2 }).collect();
        let tiled = to_tiled(&linear, 16).unwrap();

        assert!(tiled[..64].iter().all(|&v| v == 1));
        assert!(tiled[64..].iter().all(|&v| v == 2));
    }

    #[test]
    fn first_row_of_second_tile() {
        let linear = ramp(128);
        let tiled = to_tiled(&linear, 16).unwrap();
        assert_eq!(&tiled[64..72], &linear[8..16]);
        // Second row of the first tile comes from the second image row
        assert_eq!(&tiled[8..16], &linear[16..24]);
    }

    #[test]
    fn inverse_restores_buffer() {
        for &(width, rows) in &[(8, 8), (16, 8), (16, 32), (32, 16), (64, 24)] {
            let buf = ramp(width * rows);
            let tiled = to_tiled(&buf, width).unwrap();
            assert_eq!(to_linear(&tiled, width).unwrap(), buf, "width {}", width);
        }
    }

    #[test]
    fn tiling_is_a_permutation() {
        let buf: Vec<u8> = (0..=255).collect();
        let mut tiled = to_tiled(&buf, 16).unwrap();
        tiled.sort_unstable();
        assert_eq!(tiled, buf);
    }

    #[test]
    fn rejects_unaligned_width() {
        assert!(matches!(
            to_tiled(&ramp(120), 12),
            Err(NdsImageError::UnalignedTileWidth(12))
        ));
        assert!(matches!(
            to_tiled(&ramp(64), 0),
            Err(NdsImageError::UnalignedTileWidth(0))
        ));
    }

    #[test]
    fn rejects_widths_beyond_image_limits() {
        let huge = usize::MAX - 7;
        assert!(matches!(
            to_linear(&ramp(64), huge),
            Err(NdsImageError::UnalignedTileWidth(w)) if w == huge
        ));
        assert!(check_width(MAX_GRID_WIDTH + TILE_DIM).is_err());
        assert!(check_width(MAX_GRID_WIDTH).is_ok());
    }

    #[test]
    fn rejects_partial_tile_rows() {
        // 64 entries cannot fill a 16px wide row of tiles
        assert!(matches!(
            to_linear(&ramp(64), 16),
            Err(NdsImageError::BufferLength { len: 64, width: 16 })
        ));
        assert!(to_tiled(&ramp(100), 8).is_err());
    }
}

//! Error type shared by the codec and the file helpers.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NdsImageError {
    /// Width or height is not a whole number of tiles
    #[error("image dimensions {width}x{height} are not multiples of 8")]
    UnalignedDimensions { width: u32, height: u32 },

    #[error("tile grid width {0}px is not a non-zero multiple of 8 that fits an image")]
    UnalignedTileWidth(usize),

    /// Index buffer does not fill the declared grid
    #[error("index buffer of {len} entries does not fit a {width}px wide tile grid")]
    BufferLength { len: usize, width: usize },

    #[error("4bpp packing needs an even number of indices, got {0}")]
    OddIndexCount(usize),

    #[error("requested {requested} colours but only {available} distinct colours exist")]
    NotEnoughColors { requested: usize, available: usize },

    #[error("colour count must be at least 1")]
    InvalidColorCount,

    #[error("palette is empty")]
    EmptyPalette,

    #[error("palette has {0} entries, at most 256 can be indexed")]
    PaletteTooLarge(usize),

    #[error("palette data has odd length {0}, expected 2 bytes per entry")]
    PaletteLength(usize),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NdsImageError>;

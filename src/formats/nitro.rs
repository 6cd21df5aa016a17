//! # Raw Nitro Graphics
//!
//! The two halves of a DS texture as stored on disk: packed character data
//! (palette indices, 4bpp or 8bpp) and the palette, one little-endian RGB555
//! word per entry. Neither file carries a header.

use std::{fs, io::Cursor, path::Path};

use log::info;

use crate::binary_utils::{read_u16_le, write_u16_le};
use crate::error::{NdsImageError, Result};
use crate::graphics::{color::Rgb15, packing::BitDepth};

const BYTES_PER_COLOUR: usize = 2;
const RGB15_MASK: u16 = 0x7FFF;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NitroGraphics {
    pub chars: Vec<u8>,
    pub palette: Vec<Rgb15>,
    pub depth: BitDepth,
}

impl NitroGraphics {
    pub fn palette_bytes(&self) -> Vec<u8> {
        palette_to_bytes(&self.palette)
    }

    pub fn read(chars_path: &Path, palette_path: &Path, depth: BitDepth) -> Result<Self> {
        info!("Reading {}", chars_path.display());
        let chars = fs::read(chars_path)?;

        info!("Reading {}", palette_path.display());
        let palette = palette_from_bytes(&fs::read(palette_path)?)?;

        Ok(NitroGraphics {
            chars,
            palette,
            depth,
        })
    }

    pub fn write(&self, chars_path: &Path, palette_path: &Path) -> Result<()> {
        info!(
            "Writing {} ({} bytes, {}bpp)",
            chars_path.display(),
            self.chars.len(),
            self.depth.bits()
        );
        fs::write(chars_path, &self.chars)?;

        info!(
            "Writing {} ({} colours)",
            palette_path.display(),
            self.palette.len()
        );
        fs::write(palette_path, self.palette_bytes())?;

        Ok(())
    }
}

pub fn palette_to_bytes(palette: &[Rgb15]) -> Vec<u8> {
    let mut data = Vec::with_capacity(palette.len() * BYTES_PER_COLOUR);
    for colour in palette {
        write_u16_le(&mut data, colour.0);
    }
    data
}

/// Parses a raw palette. The unused top bit of each entry is cleared.
pub fn palette_from_bytes(data: &[u8]) -> Result<Vec<Rgb15>> {
    if data.len() % BYTES_PER_COLOUR != 0 {
        return Err(NdsImageError::PaletteLength(data.len()));
    }

    let mut cursor = Cursor::new(data);
    let mut palette = Vec::with_capacity(data.len() / BYTES_PER_COLOUR);
    for _ in 0..data.len() / BYTES_PER_COLOUR {
        palette.push(Rgb15(read_u16_le(&mut cursor)? & RGB15_MASK));
    }

    Ok(palette)
}

//! # DS Image
//!
//! Converts between true-colour images and tiled, palette-indexed character
//! data. An [`NdsImage`] holds the tiled index buffer together with the
//! palette it refers to; every conversion builds a new one.

use image::{Rgba, RgbaImage};
use log::warn;

use crate::error::{NdsImageError, Result};
use crate::formats::nitro::NitroGraphics;
use crate::graphics::{
    color::Rgb15,
    packing::BitDepth,
    quantize::{collect_colours, create_palette},
    tiles::{self, TILE_DIM},
};

/// Side length of the palette preview grid
pub const PREVIEW_DIM: u32 = 16;

/// Entries a byte index can address
pub const MAX_PALETTE_LEN: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NdsImage {
    texture: Vec<u8>, // Tiled palette indices
    palette: Vec<Rgb15>,
    col0_transparent: bool,
}

impl NdsImage {
    /// Matches every pixel of `image` to its nearest entry in `palette`.
    ///
    /// The tile grid is as wide as the image. Distance is the sum of absolute
    /// channel differences, alpha included, against the opaque palette
    /// colours; the lowest index wins a tie.
    pub fn from_rgba_with_palette(
        image: &RgbaImage,
        palette: &[Rgb15],
        col0_transparent: bool,
    ) -> Result<Self> {
        check_dimensions(image)?;
        if palette.is_empty() {
            return Err(NdsImageError::EmptyPalette);
        }
        if palette.len() > MAX_PALETTE_LEN {
            return Err(NdsImageError::PaletteTooLarge(palette.len()));
        }

        let clut: Vec<Rgba<u8>> = palette.iter().map(|c| c.to_rgba()).collect();
        let linear: Vec<u8> = image
            .pixels()
            .map(|pixel| closest_match(*pixel, &clut))
            .collect();

        let texture = tiles::to_tiled(&linear, image.width() as usize)?;

        Ok(NdsImage {
            texture,
            palette: palette.to_vec(),
            col0_transparent,
        })
    }

    /// Builds a `colour_count` entry palette from the colours of `image`, then
    /// matches against it.
    ///
    /// Pixels with alpha below `alpha_threshold` are collected as transparent
    /// black. Index 0 renders transparent only when `alpha_threshold` is 0.
    pub fn from_rgba_quantised(
        image: &RgbaImage,
        colour_count: usize,
        alpha_threshold: u8,
    ) -> Result<Self> {
        check_dimensions(image)?;

        let colours = collect_colours(image, alpha_threshold);
        let palette = create_palette(&colours, colour_count)?;

        Self::from_rgba_with_palette(image, &palette, alpha_threshold == 0)
    }

    /// Wraps packed character data and its palette. Indices are not checked
    /// against the palette.
    pub fn from_nitro(
        chars: &[u8],
        palette: &[Rgb15],
        depth: BitDepth,
        col0_transparent: bool,
    ) -> Self {
        NdsImage {
            texture: depth.unpack(chars),
            palette: palette.to_vec(),
            col0_transparent,
        }
    }

    pub fn from_graphics(graphics: &NitroGraphics, col0_transparent: bool) -> Self {
        Self::from_nitro(
            &graphics.chars,
            &graphics.palette,
            graphics.depth,
            col0_transparent,
        )
    }

    /// Packs the tiled indices at `depth`. Indices that do not fit are masked.
    pub fn to_nitro(&self, depth: BitDepth) -> Result<NitroGraphics> {
        if self.palette.len() > depth.max_colours() {
            warn!(
                "Palette has {} colours but {}bpp can only address {}; indices will be truncated",
                self.palette.len(),
                depth.bits(),
                depth.max_colours()
            );
        }

        Ok(NitroGraphics {
            chars: depth.pack(&self.texture)?,
            palette: self.palette.clone(),
            depth,
        })
    }

    /// Renders the image, laying tiles out on a grid `tile_width` pixels wide.
    ///
    /// Index 0 is fully transparent when colour 0 is transparent. Indices past
    /// the end of the palette are left transparent.
    pub fn to_rgba(&self, tile_width: usize) -> Result<RgbaImage> {
        let linear = self.linear_indices(tile_width)?;
        let height = linear.len() / tile_width;

        let clut: Vec<Rgba<u8>> = self.palette.iter().map(|c| c.to_rgba()).collect();
        let mut image = RgbaImage::new(tile_width as u32, height as u32);

        for (pixel, &colour_idx) in image.pixels_mut().zip(linear.iter()) {
            if colour_idx == 0 && self.col0_transparent {
                continue;
            }
            if let Some(colour) = clut.get(colour_idx as usize) {
                *pixel = *colour;
            }
        }

        Ok(image)
    }

    /// Row-major indices for a grid `tile_width` pixels wide
    pub fn linear_indices(&self, tile_width: usize) -> Result<Vec<u8>> {
        tiles::to_linear(&self.texture, tile_width)
    }

    pub fn palette_preview(&self) -> RgbaImage {
        palette_preview(&self.palette)
    }

    /// Tiled palette indices
    pub fn texture(&self) -> &[u8] {
        &self.texture
    }

    pub fn palette(&self) -> &[Rgb15] {
        &self.palette
    }

    pub fn col0_transparent(&self) -> bool {
        self.col0_transparent
    }

    /// Pixel count
    pub fn len(&self) -> usize {
        self.texture.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texture.is_empty()
    }
}

/// One pixel per palette entry on a 16×16 grid, row-major. Unused cells
/// are transparent and entries past 256 are ignored.
pub fn palette_preview(palette: &[Rgb15]) -> RgbaImage {
    let mut image = RgbaImage::new(PREVIEW_DIM, PREVIEW_DIM);
    for (i, colour) in palette.iter().take(MAX_PALETTE_LEN).enumerate() {
        let x = i as u32 % PREVIEW_DIM;
        let y = i as u32 / PREVIEW_DIM;
        image.put_pixel(x, y, colour.to_rgba());
    }
    image
}

fn check_dimensions(image: &RgbaImage) -> Result<()> {
    let (width, height) = image.dimensions();
    let tile = TILE_DIM as u32;
    if width == 0 || height == 0 || width % tile != 0 || height % tile != 0 {
        return Err(NdsImageError::UnalignedDimensions { width, height });
    }
    Ok(())
}

fn pixel_distance(p1: Rgba<u8>, p2: Rgba<u8>) -> u32 {
    p1.0.iter()
        .zip(p2.0.iter())
        .map(|(&a, &b)| a.abs_diff(b) as u32)
        .sum()
}

/// Index of the nearest colour in `clut`; the first of equal candidates wins.
fn closest_match(pixel: Rgba<u8>, clut: &[Rgba<u8>]) -> u8 {
    let mut idx = 0;
    let mut current_distance = u32::MAX;
    for (i, &colour) in clut.iter().enumerate() {
        let dist = pixel_distance(pixel, colour);
        if dist < current_distance {
            current_distance = dist;
            idx = i;
        }
    }
    idx as u8
}

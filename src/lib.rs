//! Conversion between true-colour images and Nintendo DS tiled, palette
//! indexed graphics.
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use nds_image::{BitDepth, NdsImage, Rgb15};
//!
//! let image = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
//! let palette = [Rgb15(0), Rgb15::new(31, 0, 0)];
//!
//! let nds = NdsImage::from_rgba_with_palette(&image, &palette, true).unwrap();
//! let graphics = nds.to_nitro(BitDepth::Four).unwrap();
//! assert_eq!(graphics.chars, vec![0x11; 32]);
//! ```

pub mod binary_utils;
pub mod error;
pub mod formats;
pub mod graphics;

pub use error::{NdsImageError, Result};
pub use formats::{ConversionConfig, NitroGraphics};
pub use graphics::{BitDepth, Direction, NdsImage, Rgb15};

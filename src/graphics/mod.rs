//! Pixel-level conversion between true-colour images and DS character data.

pub mod color;
pub mod nds_image;
pub mod packing;
pub mod quantize;
pub mod tiles;

pub use color::Rgb15;
pub use nds_image::NdsImage;
pub use packing::BitDepth;
pub use tiles::Direction;

pub mod config;
pub mod nitro;

pub use config::ConversionConfig;
pub use nitro::{palette_from_bytes, palette_to_bytes, NitroGraphics};

//! Conversion options, loadable from a JSON file.

use std::{fs, path::Path};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{NdsImageError, Result};
use crate::graphics::{nds_image::MAX_PALETTE_LEN, packing::BitDepth, tiles};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionConfig {
    /// Pixel width of the tile grid. `None` uses the image width.
    pub tile_width: Option<usize>,
    pub is_4bpp: bool,
    /// Index 0 renders transparent
    pub col0_transparent: bool,
    /// Palette size for automatic quantisation. `None` means an explicit
    /// palette is supplied.
    pub color_count: Option<usize>,
    /// Pixels with a lower alpha are collected as transparent
    pub alpha_threshold: u8,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            tile_width: None,
            is_4bpp: true,
            col0_transparent: true,
            color_count: Some(16),
            alpha_threshold: 128,
        }
    }
}

impl ConversionConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: ConversionConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn bit_depth(&self) -> BitDepth {
        BitDepth::from_is_4bpp(self.is_4bpp)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(width) = self.tile_width {
            tiles::check_width(width)?;
        }

        if let Some(count) = self.color_count {
            if count == 0 {
                return Err(NdsImageError::InvalidColorCount);
            }
            if count > MAX_PALETTE_LEN {
                return Err(NdsImageError::PaletteTooLarge(count));
            }
            let depth = self.bit_depth();
            if count > depth.max_colours() {
                warn!(
                    "{} colours requested at {}bpp; indices above {} will be truncated",
                    count,
                    depth.bits(),
                    depth.max_colours() - 1
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_fields() {
        let json = r#"{
            "tileWidth": 32,
            "is4bpp": false,
            "col0Transparent": false,
            "colorCount": 200,
            "alphaThreshold": 0
        }"#;
        let config: ConversionConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            config,
            ConversionConfig {
                tile_width: Some(32),
                is_4bpp: false,
                col0_transparent: false,
                color_count: Some(200),
                alpha_threshold: 0,
            }
        );
        assert_eq!(config.bit_depth(), BitDepth::Eight);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: ConversionConfig = serde_json::from_str(r#"{"tileWidth": 16}"#).unwrap();
        assert_eq!(config.tile_width, Some(16));
        assert!(config.is_4bpp);
        assert_eq!(config.color_count, Some(16));
        assert_eq!(config.alpha_threshold, 128);
    }

    #[test]
    fn validation() {
        let mut config = ConversionConfig {
            tile_width: Some(12),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NdsImageError::UnalignedTileWidth(12))
        ));

        config.tile_width = Some(16);
        config.color_count = Some(0);
        assert!(matches!(
            config.validate(),
            Err(NdsImageError::InvalidColorCount)
        ));

        // Too many colours for 4bpp only warns
        config.color_count = Some(64);
        assert!(config.validate().is_ok());

        config.color_count = Some(257);
        assert!(matches!(
            config.validate(),
            Err(NdsImageError::PaletteTooLarge(257))
        ));
        config.color_count = Some(256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn oversized_tile_width_is_rejected() {
        let config = ConversionConfig {
            tile_width: Some(usize::MAX - 7),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NdsImageError::UnalignedTileWidth(_))
        ));
    }
}

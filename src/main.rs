use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use image::RgbaImage;
use log::{info, warn};

use nds_image::formats::palette_from_bytes;
use nds_image::graphics::nds_image::palette_preview;
use nds_image::{BitDepth, ConversionConfig, NdsImage, NitroGraphics};

#[derive(Parser, Debug)]
#[command(about = "Convert between PNG images and raw DS tiled graphics")]
struct Args {
    /// JSON file with conversion options; flags override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Bits per pixel of the character data
    #[arg(long, global = true, value_enum)]
    bpp: Option<Bpp>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Bpp {
    #[value(name = "4")]
    Four,
    #[value(name = "8")]
    Eight,
}

impl From<Bpp> for BitDepth {
    fn from(bpp: Bpp) -> Self {
        match bpp {
            Bpp::Four => BitDepth::Four,
            Bpp::Eight => BitDepth::Eight,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a PNG into character data and a palette
    Encode {
        input: PathBuf,
        /// Output character data
        #[arg(long)]
        ncg: PathBuf,
        /// Output palette
        #[arg(long)]
        ncl: PathBuf,
        /// Match against an existing raw palette instead of building one
        #[arg(long, conflicts_with_all = ["colors", "alpha_threshold"])]
        palette: Option<PathBuf>,
        #[arg(long)]
        colors: Option<usize>,
        #[arg(long)]
        alpha_threshold: Option<u8>,
        /// Whether index 0 is transparent (explicit palettes only)
        #[arg(long)]
        col0_transparent: Option<bool>,
    },
    /// Render character data and a palette to a PNG
    Decode {
        ncg: PathBuf,
        ncl: PathBuf,
        output: PathBuf,
        /// Pixel width of the tile grid
        #[arg(long)]
        tile_width: Option<usize>,
        #[arg(long)]
        col0_transparent: Option<bool>,
        /// Recompress the PNG with oxipng
        #[arg(long)]
        optimise: bool,
    },
    /// Render a raw palette as a 16x16 swatch
    Palette { ncl: PathBuf, output: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConversionConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConversionConfig::default(),
    };
    if let Some(bpp) = args.bpp {
        config.is_4bpp = BitDepth::from(bpp) == BitDepth::Four;
    }

    match args.command {
        Command::Encode {
            input,
            ncg,
            ncl,
            palette,
            colors,
            alpha_threshold,
            col0_transparent,
        } => {
            if let Some(count) = colors {
                config.color_count = Some(count);
            }
            if let Some(threshold) = alpha_threshold {
                config.alpha_threshold = threshold;
            }
            if let Some(transparent) = col0_transparent {
                config.col0_transparent = transparent;
            }
            config.validate()?;
            encode(&input, &ncg, &ncl, palette.as_deref(), &config)
        }
        Command::Decode {
            ncg,
            ncl,
            output,
            tile_width,
            col0_transparent,
            optimise,
        } => {
            if tile_width.is_some() {
                config.tile_width = tile_width;
            }
            if let Some(transparent) = col0_transparent {
                config.col0_transparent = transparent;
            }
            config.validate()?;
            decode(&ncg, &ncl, &output, &config, optimise)
        }
        Command::Palette { ncl, output } => {
            let palette = palette_from_bytes(&fs::read(&ncl)?)
                .with_context(|| format!("Failed to parse palette {}", ncl.display()))?;
            save_png(&palette_preview(&palette), &output, false)
        }
    }
}

fn encode(
    input: &Path,
    ncg: &Path,
    ncl: &Path,
    palette: Option<&Path>,
    config: &ConversionConfig,
) -> Result<()> {
    info!("Loading {}", input.display());
    let image = image::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?
        .to_rgba8();

    if let Some(width) = config.tile_width {
        if width != image.width() as usize {
            warn!(
                "Ignoring tile width {}: encoding uses the image width {}",
                width,
                image.width()
            );
        }
    }

    let nds = match (palette, config.color_count) {
        (Some(path), _) => {
            let palette = palette_from_bytes(&fs::read(path)?)
                .with_context(|| format!("Failed to parse palette {}", path.display()))?;
            NdsImage::from_rgba_with_palette(&image, &palette, config.col0_transparent)?
        }
        (None, Some(count)) => {
            NdsImage::from_rgba_quantised(&image, count, config.alpha_threshold)?
        }
        (None, None) => bail!("Either a palette or a colour count is required"),
    };

    nds.to_nitro(config.bit_depth())?.write(ncg, ncl)?;
    Ok(())
}

fn decode(
    ncg: &Path,
    ncl: &Path,
    output: &Path,
    config: &ConversionConfig,
    optimise: bool,
) -> Result<()> {
    let Some(tile_width) = config.tile_width else {
        bail!("Decoding needs a tile width");
    };

    let graphics = NitroGraphics::read(ncg, ncl, config.bit_depth())?;
    let nds = NdsImage::from_graphics(&graphics, config.col0_transparent);
    let image = nds.to_rgba(tile_width)?;

    save_png(&image, output, optimise)
}

fn save_png(image: &RgbaImage, path: &Path, optimise: bool) -> Result<()> {
    if !optimise {
        info!("Writing {}", path.display());
        image.save(path)?;
        return Ok(());
    }

    let temp_path = path.with_extension("temp.png");
    image.save(&temp_path)?;

    let mut options = oxipng::Options::from_preset(2);
    options.bit_depth_reduction = true;

    info!("Writing {} (optimised)", path.display());
    oxipng::optimize(
        &oxipng::InFile::Path(temp_path.clone()),
        &oxipng::OutFile::Path(Some(path.to_path_buf())),
        &options,
    )
    .map_err(|e| anyhow::anyhow!("PNG optimisation failed: {}", e))?;

    if let Err(e) = fs::remove_file(&temp_path) {
        warn!("Failed to remove temporary file: {}", e);
    }

    Ok(())
}

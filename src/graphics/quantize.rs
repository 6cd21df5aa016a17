//! # Palette Reduction
//!
//! Reduces a set of distinct colours to a fixed palette size. The colours are
//! sorted along the channel with the widest range, cut into equal buckets,
//! and the middle colour of each bucket becomes a palette entry.
//!
//! When the colour count does not divide evenly, the `len % count` colours at
//! the end of the sorted order belong to no bucket and cannot be picked. This
//! loss is part of the format conversion and is not reported as an error.

use std::collections::HashSet;
use std::hash::BuildHasherDefault;

use image::{Rgba, RgbaImage};
use log::debug;
use twox_hash::XxHash64;

use crate::error::{NdsImageError, Result};
use crate::graphics::color::Rgb15;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Colour channel used as the sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Picks the channel with the widest min..max spread. Ties go to red, then green.
pub fn widest_channel(colours: &[Rgba<u8>]) -> Channel {
    let mut lower = [u8::MAX; 3];
    let mut upper = [u8::MIN; 3];

    for colour in colours {
        for ch in 0..3 {
            lower[ch] = lower[ch].min(colour.0[ch]);
            upper[ch] = upper[ch].max(colour.0[ch]);
        }
    }

    let range = |ch: usize| upper[ch].saturating_sub(lower[ch]);
    let (red, green, blue) = (range(0), range(1), range(2));
    let max = red.max(green).max(blue);

    if max == red {
        Channel::Red
    } else if max == green {
        Channel::Green
    } else {
        Channel::Blue
    }
}

/// Builds a `count` entry palette from `colours`.
///
/// `colours` should already be deduplicated. Fails if there are fewer
/// colours than requested entries.
pub fn create_palette(colours: &[Rgba<u8>], count: usize) -> Result<Vec<Rgb15>> {
    if count == 0 {
        return Err(NdsImageError::InvalidColorCount);
    }
    if colours.len() < count {
        return Err(NdsImageError::NotEnoughColors {
            requested: count,
            available: colours.len(),
        });
    }

    let channel = widest_channel(colours);
    let key = channel.index();

    let mut sorted = colours.to_vec();
    sorted.sort_by_key(|c| c.0[key]);

    let bucket_size = sorted.len() / count;
    let dropped = sorted.len() % count;
    debug!(
        "Quantising {} colours to {}: sorting by {:?}, bucket size {}, {} dropped",
        sorted.len(),
        count,
        channel,
        bucket_size,
        dropped
    );

    let palette = sorted
        .chunks_exact(bucket_size)
        .take(count)
        .map(|bucket| Rgb15::from_rgba(bucket[bucket.len() / 2]))
        .collect();

    Ok(palette)
}

/// Collects the distinct colours of `image` in first-seen order.
///
/// Pixels with alpha below `alpha_threshold` count as fully transparent black.
/// Transparent black is always the first candidate, whether or not the image
/// contains any.
pub fn collect_colours(image: &RgbaImage, alpha_threshold: u8) -> Vec<Rgba<u8>> {
    let mut seen: HashSet<Rgba<u8>, BuildHasherDefault<XxHash64>> = HashSet::default();
    let mut colours = vec![TRANSPARENT];
    seen.insert(TRANSPARENT);

    for pixel in image.pixels() {
        let colour = if pixel.0[3] < alpha_threshold {
            TRANSPARENT
        } else {
            *pixel
        };
        if seen.insert(colour) {
            colours.push(colour);
        }
    }

    colours
}

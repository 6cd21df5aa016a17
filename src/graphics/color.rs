//! # RGB555 Colours
//!
//! The DS stores palette entries as 15-bit BGR: bits 0-4 red, 5-9 green,
//! 10-14 blue, bit 15 unused. Converting down truncates each channel to its
//! top 5 bits and drops alpha.

use image::Rgba;

const CHANNEL_MASK: u16 = 0x1F;

/// A packed 15-bit palette colour
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb15(pub u16);

impl Rgb15 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        let r = r as u16 & CHANNEL_MASK;
        let g = g as u16 & CHANNEL_MASK;
        let b = b as u16 & CHANNEL_MASK;
        Rgb15((b << 10) | (g << 5) | r)
    }

    pub fn r(self) -> u8 {
        (self.0 & CHANNEL_MASK) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 5) & CHANNEL_MASK) as u8
    }

    pub fn b(self) -> u8 {
        ((self.0 >> 10) & CHANNEL_MASK) as u8
    }

    /// Truncate an 8-bit colour to 5 bits per channel. Alpha is discarded.
    pub fn from_rgba(colour: Rgba<u8>) -> Self {
        let [r, g, b, _] = colour.0;
        Rgb15::new(r >> 3, g >> 3, b >> 3)
    }

    /// Expand to 8 bits per channel by replicating the top bits, so 0 and 31
    /// land exactly on 0 and 255. Always opaque.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([expand(self.r()), expand(self.g()), expand(self.b()), 255])
    }
}

fn expand(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_channels_in_bgr_order() {
        let c = Rgb15::from_rgba(Rgba([255, 0, 0, 255]));
        assert_eq!(c.0, 0x001F);
        let c = Rgb15::from_rgba(Rgba([0, 255, 0, 255]));
        assert_eq!(c.0, 0x03E0);
        let c = Rgb15::from_rgba(Rgba([0, 0, 255, 255]));
        assert_eq!(c.0, 0x7C00);
    }

    #[test]
    fn truncates_instead_of_rounding() {
        // 7 and 15 would round up to 1 and 2
        let c = Rgb15::from_rgba(Rgba([7, 15, 16, 0]));
        assert_eq!((c.r(), c.g(), c.b()), (0, 1, 2));
    }

    #[test]
    fn alpha_is_dropped_and_restored_opaque() {
        let c = Rgb15::from_rgba(Rgba([8, 16, 24, 0]));
        assert_eq!(c.to_rgba().0[3], 255);
    }

    #[test]
    fn extremes_expand_exactly() {
        assert_eq!(Rgb15(0).to_rgba(), Rgba([0, 0, 0, 255]));
        assert_eq!(Rgb15(0x7FFF).to_rgba(), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn expansion_replicates_top_bits() {
        // 0b10000 -> 0b10000_100
        assert_eq!(Rgb15::new(16, 0, 0).to_rgba().0[0], 0x84);
    }

    #[test]
    fn round_trip_error_is_bounded() {
        for v in 0..=255u8 {
            let back = Rgb15::from_rgba(Rgba([v, v, v, 255])).to_rgba();
            for ch in 0..3 {
                assert!(back.0[ch].abs_diff(v) <= 7, "{} -> {}", v, back.0[ch]);
            }
        }
    }

    #[test]
    fn multiples_of_eight_survive_truncation() {
        for v in (0..=255u8).step_by(8) {
            let c = Rgb15::from_rgba(Rgba([v, v, v, 255]));
            assert_eq!(c.r() << 3, v);
        }
    }

    #[test]
    fn unused_bit_is_ignored_on_decode() {
        assert_eq!(Rgb15(0x801F).to_rgba(), Rgb15(0x001F).to_rgba());
    }
}

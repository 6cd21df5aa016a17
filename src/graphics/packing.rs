//! Index packing for 4bpp and 8bpp character data.
//!
//! 4bpp stores two indices per byte, low nibble first. Values that do not
//! fit the bit depth are masked, never rejected.

use crate::error::{NdsImageError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    Four,
    Eight,
}

impl BitDepth {
    pub fn from_is_4bpp(is_4bpp: bool) -> Self {
        if is_4bpp {
            BitDepth::Four
        } else {
            BitDepth::Eight
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            BitDepth::Four => 4,
            BitDepth::Eight => 8,
        }
    }

    /// Number of palette entries addressable at this depth
    pub fn max_colours(self) -> usize {
        1 << self.bits()
    }

    pub fn pack(self, indices: &[u8]) -> Result<Vec<u8>> {
        match self {
            BitDepth::Four => pack_4bpp(indices),
            BitDepth::Eight => Ok(pack_8bpp(indices)),
        }
    }

    pub fn unpack(self, data: &[u8]) -> Vec<u8> {
        match self {
            BitDepth::Four => unpack_4bpp(data),
            BitDepth::Eight => unpack_8bpp(data),
        }
    }
}

pub fn pack_4bpp(indices: &[u8]) -> Result<Vec<u8>> {
    if indices.len() % 2 != 0 {
        return Err(NdsImageError::OddIndexCount(indices.len()));
    }

    Ok(indices
        .chunks_exact(2)
        .map(|pair| (pair[0] & 0xF) | ((pair[1] & 0xF) << 4))
        .collect())
}

pub fn unpack_4bpp(data: &[u8]) -> Vec<u8> {
    let mut indices = Vec::with_capacity(data.len() * 2);
    for &byte in data {
        indices.push(byte & 0x0F); // Low nibble
        indices.push((byte >> 4) & 0x0F); // High nibble
    }
    indices
}

pub fn pack_8bpp(indices: &[u8]) -> Vec<u8> {
    indices.to_vec()
}

pub fn unpack_8bpp(data: &[u8]) -> Vec<u8> {
    data.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_nibble_comes_first() {
        assert_eq!(pack_4bpp(&[0x1, 0x2, 0xF, 0x0]).unwrap(), vec![0x21, 0x0F]);
        assert_eq!(unpack_4bpp(&[0x21, 0x0F]), vec![0x1, 0x2, 0xF, 0x0]);
    }

    #[test]
    fn over_range_values_are_masked() {
        assert_eq!(pack_4bpp(&[0x13, 0xF2]).unwrap(), vec![0x23]);
    }

    #[test]
    fn odd_count_is_rejected() {
        assert!(matches!(
            pack_4bpp(&[1, 2, 3]),
            Err(NdsImageError::OddIndexCount(3))
        ));
    }

    #[test]
    fn every_nibble_pair_survives() {
        let indices: Vec<u8> = (0..16u8)
            .flat_map(|hi| (0..16u8).flat_map(move |lo| [lo, hi]))
            .collect();
        let packed = pack_4bpp(&indices).unwrap();
        assert_eq!(packed, (0..=255u8).collect::<Vec<_>>());
        assert_eq!(unpack_4bpp(&packed), indices);
    }

    #[test]
    fn eight_bit_is_a_copy() {
        let indices: Vec<u8> = (0..=255).collect();
        assert_eq!(BitDepth::Eight.pack(&indices).unwrap(), indices);
        assert_eq!(BitDepth::Eight.unpack(&indices), indices);
    }

    #[test]
    fn depth_from_flag() {
        assert_eq!(BitDepth::from_is_4bpp(true), BitDepth::Four);
        assert_eq!(BitDepth::from_is_4bpp(false).max_colours(), 256);
    }
}

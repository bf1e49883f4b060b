//! MSB-first 1-bit packing.
//!
//! Wire contract with the embedded renderer: rows top to bottom, each row
//! `width / 8` bytes left to right, bit 7 of a byte is its leftmost pixel,
//! a set bit is ink. Getting this wrong renders garbage rather than failing.

use crate::bitmap::BinaryImage;

/// Pack a binarized image whose width is a multiple of 8.
///
/// Returns `None` if the width is not byte-aligned.
pub fn pack(image: &BinaryImage) -> Option<Vec<u8>> {
    if image.width() % 8 != 0 {
        return None;
    }

    let bytes_per_row = image.width() / 8;
    let mut bytes = Vec::with_capacity((bytes_per_row * image.height()) as usize);

    for y in 0..image.height() {
        for byte_index in 0..bytes_per_row {
            let mut byte = 0u8;
            for bit in 0..8 {
                if image.get(byte_index * 8 + bit, y) {
                    byte |= 0x80 >> bit;
                }
            }
            bytes.push(byte);
        }
    }

    Some(bytes)
}

/// Decode packed rows back into an image.
///
/// Missing trailing bytes read as background.
pub fn unpack(bytes: &[u8], width: u32, height: u32) -> BinaryImage {
    let bytes_per_row = width.div_ceil(8) as usize;
    BinaryImage::from_fn(width, height, |x, y| {
        let index = y as usize * bytes_per_row + (x / 8) as usize;
        bytes
            .get(index)
            .is_some_and(|byte| byte & (0x80 >> (x % 8)) != 0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_msb_first() {
        let image = BinaryImage::from_rows(&["#.......", ".......#", "##.##..#"]);
        assert_eq!(pack(&image), Some(vec![0x80, 0x01, 0xD9]));
    }

    #[test]
    fn test_pack_multi_byte_rows() {
        let image = BinaryImage::from_rows(&["########........", "........#......."]);
        assert_eq!(pack(&image), Some(vec![0xFF, 0x00, 0x00, 0x80]));
    }

    #[test]
    fn test_pack_rejects_unaligned_width() {
        let image = BinaryImage::blank(7, 2);
        assert_eq!(pack(&image), None);
    }

    #[test]
    fn test_unpack_reproduces_image() {
        let image = BinaryImage::from_rows(&[
            ".#..#...##......",
            "#......#.......#",
            "................",
        ]);
        let bytes = pack(&image).unwrap();
        assert_eq!(bytes.len(), 6);
        assert_eq!(unpack(&bytes, 16, 3), image);
    }

    #[test]
    fn test_blank_packs_to_zero() {
        let bytes = pack(&BinaryImage::blank(8, 16)).unwrap();
        assert_eq!(bytes, vec![0u8; 16]);
    }
}

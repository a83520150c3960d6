//! Perceptual fingerprints for images.
//!
//! A [`Fingerprint`] is a 64-bit difference hash ("dHash") of an image's
//! luminance. It survives re-encoding, recompression and resizing because it
//! only records the sign of the gradient between neighbouring cells of a coarse
//! grid, not the absolute pixel values.
//!
//! # Algorithm
//!
//! 1. Decode the image and convert it to single-channel luminance.
//! 2. Resize to a 9×8 grid (9 columns, 8 rows).
//! 3. For every row, compare each of the first 8 cells with its right-hand
//!    neighbour and emit `1` when the left cell is brighter.
//! 4. Concatenate the 64 bits row-major, top row first, most significant bit
//!    first.
//!
//! # Usage
//!
//! ```no_run
//! use mintguard_core::fingerprint::PerceptualHasher;
//!
//! let original = std::fs::read("artwork.png").unwrap();
//! let reupload = std::fs::read("artwork-recompressed.jpg").unwrap();
//!
//! let hasher = PerceptualHasher::default();
//! let a = hasher.hash_bytes(&original).unwrap();
//! let b = hasher.hash_bytes(&reupload).unwrap();
//! println!("{} vs {}: {} bits apart", a, b, a.distance(b));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{GateError, Result};

/// Number of bits in a fingerprint.
pub const FINGERPRINT_BITS: u32 = 64;

/// Length of the canonical hex rendering.
pub const FINGERPRINT_HEX_LEN: usize = 16;

/// 64-bit perceptual fingerprint.
///
/// Serializes as its canonical 16-character lowercase hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Wrap raw fingerprint bits.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw fingerprint bits, first comparison in the most significant bit.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Canonical lowercase, zero-padded hex form.
    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }

    /// Parse a fingerprint from exactly 16 lowercase hex digits.
    ///
    /// Anything else, including surrounding whitespace and uppercase digits, is
    /// malformed.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        if hex_str.len() != FINGERPRINT_HEX_LEN
            || !hex_str
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(GateError::MalformedFingerprint(format!(
                "expected {} lowercase hex digits, got {:?}",
                FINGERPRINT_HEX_LEN, hex_str
            )));
        }

        u64::from_str_radix(hex_str, 16)
            .map(Self)
            .map_err(|e| GateError::MalformedFingerprint(e.to_string()))
    }

    /// Hamming distance to another fingerprint (0..=64).
    pub fn distance(self, other: Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Similarity score in `[0.0, 1.0]`, `1.0` meaning identical.
    pub fn similarity(self, other: Self) -> f64 {
        crate::distance::score_from_distance(self.distance(other))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(de::Error::custom)
    }
}

#[cfg(feature = "perceptual-hash")]
pub use encoder::{encode, PerceptualHasher};

#[cfg(feature = "perceptual-hash")]
mod encoder {
    use image::imageops::{self, FilterType};
    use image::DynamicImage;

    use super::Fingerprint;
    use crate::error::{GateError, Result};

    /// Grid columns; one more than the comparisons per row.
    const GRID_WIDTH: u32 = 9;
    const GRID_HEIGHT: u32 = 8;

    /// Difference-hash encoder.
    #[derive(Debug, Clone, Copy)]
    pub struct PerceptualHasher {
        filter: FilterType,
    }

    impl Default for PerceptualHasher {
        fn default() -> Self {
            Self::new(FilterType::Triangle)
        }
    }

    impl PerceptualHasher {
        /// Create a hasher using the given resampling filter for the 9×8 grid.
        pub fn new(filter: FilterType) -> Self {
            Self { filter }
        }

        /// Compute a fingerprint from raw image bytes.
        ///
        /// Supports JPEG, PNG, GIF, and WebP formats.
        pub fn hash_bytes(&self, image_data: &[u8]) -> Result<Fingerprint> {
            let image = image::load_from_memory(image_data)
                .map_err(|e| GateError::Decode(format!("Failed to decode image: {}", e)))?;

            Ok(self.hash_image(&image))
        }

        /// Compute a fingerprint from an already decoded image.
        pub fn hash_image(&self, image: &DynamicImage) -> Fingerprint {
            let luma = image.to_luma8();
            let grid = imageops::resize(&luma, GRID_WIDTH, GRID_HEIGHT, self.filter);

            let mut bits = 0u64;
            for y in 0..GRID_HEIGHT {
                for x in 0..GRID_WIDTH - 1 {
                    let left = grid.get_pixel(x, y)[0];
                    let right = grid.get_pixel(x + 1, y)[0];
                    bits = (bits << 1) | u64::from(left > right);
                }
            }

            Fingerprint::from_bits(bits)
        }

        /// Check if the provided bytes appear to be a supported image format.
        pub fn is_supported_format(data: &[u8]) -> bool {
            image::guess_format(data).is_ok()
        }
    }

    /// Fingerprint raw image bytes with the default hasher.
    pub fn encode(image_data: &[u8]) -> Result<Fingerprint> {
        PerceptualHasher::default().hash_bytes(image_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_is_zero_padded_lowercase() {
        assert_eq!(Fingerprint::from_bits(0xAB).to_hex(), "00000000000000ab");
        assert_eq!(
            Fingerprint::from_bits(u64::MAX).to_string(),
            "ffffffffffffffff"
        );
    }

    #[test]
    fn test_from_hex_accepts_canonical() {
        let fp = Fingerprint::from_hex("deadbeefcafebabe").unwrap();
        assert_eq!(fp.bits(), 0xdead_beef_cafe_babe);
        assert_eq!(Fingerprint::from_hex(&fp.to_hex()).unwrap(), fp);
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        for bad in [
            "",
            "deadbeef",
            "deadbeefcafebabe00",
            "zzzzzzzzzzzzzzzz",
            "+eadbeefcafebabe",
            "0xdeadbeefcafeba",
            "DEADBEEFCAFEBABE",
            "deadbeefCAFEBABE",
            " deadbeefcafebabe\n",
            " deadbeefcafebab",
        ] {
            assert!(
                matches!(
                    Fingerprint::from_hex(bad),
                    Err(GateError::MalformedFingerprint(_))
                ),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_distance_and_similarity() {
        let a = Fingerprint::from_bits(0);
        let b = Fingerprint::from_bits(0b1011);
        assert_eq!(a.distance(b), 3);
        assert_eq!(b.distance(a), 3);
        assert_eq!(a.similarity(a), 1.0);
        assert_eq!(a.similarity(Fingerprint::from_bits(u64::MAX)), 0.0);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let fp = Fingerprint::from_bits(0x0123_4567_89ab_cdef);
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, "\"0123456789abcdef\"");

        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fp);
        assert!(serde_json::from_str::<Fingerprint>("\"nothex\"").is_err());
    }

    #[cfg(feature = "perceptual-hash")]
    mod encoder_tests {
        use super::super::*;
        use image::{DynamicImage, GrayImage, Luma};

        /// 9×8 image: row 0 falls left to right, every other row rises.
        fn staircase() -> DynamicImage {
            let img = GrayImage::from_fn(9, 8, |x, y| {
                let step = (x * 25) as u8;
                if y == 0 {
                    Luma([225 - step])
                } else {
                    Luma([step])
                }
            });
            DynamicImage::ImageLuma8(img)
        }

        #[test]
        fn test_bit_order_is_row_major_msb_first() {
            let fp = PerceptualHasher::default().hash_image(&staircase());
            assert_eq!(fp.bits(), 0xff00_0000_0000_0000);
            assert_eq!(fp.to_hex(), "ff00000000000000");
        }

        #[test]
        fn test_flat_image_hashes_to_zero() {
            let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, Luma([128])));
            assert_eq!(PerceptualHasher::default().hash_image(&img).bits(), 0);
        }

        #[test]
        fn test_encode_rejects_non_image() {
            assert!(matches!(
                encode(b"definitely not an image"),
                Err(GateError::Decode(_))
            ));
            assert!(matches!(encode(&[]), Err(GateError::Decode(_))));
        }

        #[test]
        fn test_is_supported_format() {
            // PNG magic bytes
            assert!(PerceptualHasher::is_supported_format(&[
                0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A
            ]));

            // JPEG magic bytes
            assert!(PerceptualHasher::is_supported_format(&[0xFF, 0xD8, 0xFF]));

            assert!(!PerceptualHasher::is_supported_format(&[0x00, 0x00, 0x00]));
        }
    }
}

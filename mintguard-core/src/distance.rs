//! Distance evaluation between stored fingerprints.
//!
//! These functions work on the hex strings as they come out of the catalog,
//! which may hold anything. An operand that is not a 16-digit hex value counts
//! as maximally distant, so one dirty row never aborts a scan.

use crate::fingerprint::{Fingerprint, FINGERPRINT_BITS};

/// Distance assigned when either operand is malformed.
pub const MAX_DISTANCE: u32 = FINGERPRINT_BITS;

/// Hamming distance between two hex fingerprints (0..=64).
pub fn hamming_distance(a: &str, b: &str) -> u32 {
    match (Fingerprint::from_hex(a), Fingerprint::from_hex(b)) {
        (Ok(a), Ok(b)) => a.distance(b),
        _ => MAX_DISTANCE,
    }
}

/// Similarity score between two hex fingerprints, in `[0.0, 1.0]`.
///
/// Malformed input on either side scores exactly `0.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    score_from_distance(hamming_distance(a, b))
}

/// `1 - distance / 64`, saturating at 0.
pub fn score_from_distance(distance: u32) -> f64 {
    1.0 - f64::from(distance.min(MAX_DISTANCE)) / f64::from(FINGERPRINT_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "0000000000000000";
    const B: &str = "000000000000000f";
    const ALL: &str = "ffffffffffffffff";

    #[test]
    fn test_identity() {
        for fp in [A, B, ALL, "deadbeefcafebabe"] {
            assert_eq!(hamming_distance(fp, fp), 0);
            assert_eq!(similarity(fp, fp), 1.0);
        }
    }

    #[test]
    fn test_distance_values() {
        assert_eq!(hamming_distance(A, B), 4);
        assert_eq!(hamming_distance(A, ALL), 64);
        assert_eq!(similarity(A, B), 0.9375);
        assert_eq!(similarity(A, ALL), 0.0);
    }

    #[test]
    fn test_symmetry_including_malformed() {
        let inputs = [A, B, ALL, "", "xyz", "0123456789abcdeg", "0123456789ABCDEF"];
        for a in inputs {
            for b in inputs {
                assert_eq!(similarity(a, b), similarity(b, a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_malformed_scores_zero() {
        assert_eq!(hamming_distance(A, "not-a-hash"), MAX_DISTANCE);
        assert_eq!(similarity("", A), 0.0);
        assert_eq!(similarity("abc", "abc"), 0.0);
        assert_eq!(similarity(A, "00000000000000000"), 0.0);
        // Only the canonical lowercase form is well-formed
        assert_eq!(similarity("0123456789ABCDEF", "0123456789ABCDEF"), 0.0);
        assert_eq!(similarity(" 0123456789abcde", "0123456789abcdef"), 0.0);
    }

    #[test]
    fn test_range() {
        for d in 0..=80 {
            let s = score_from_distance(d);
            assert!((0.0..=1.0).contains(&s));
        }
    }
}

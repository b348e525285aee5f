//! Implements the arithmetic coder (AC): a streaming encoder/decoder pair
//! that shrinks an integer interval `[low, high]` as symbols are coded,
//! emitting bits once the interval's top bits stabilize.
//!
//! See [`AcEncoder`] and [`AcDecoder`].
pub use decoder::AcDecoder;
pub use encoder::AcEncoder;

mod decoder;
mod encoder;

/// Width, in bits, of the internal interval/code registers.
pub(crate) const WORD_BITS: u32 = 64;

/// Precision used by a canonical AC binding when the caller doesn't need to
/// tune it.
pub const DEFAULT_PRECISION: u32 = 32;

/// Constants derived once from `precision`, shared by the encoder and the
/// decoder constructors.
pub(crate) struct Constants {
    pub max_total: u64,
    pub full_range: u64,
    pub half_range: u64,
    pub quarter_range: u64,
    pub three_quarter_range: u64,
    pub min_range: u64,
    pub mask: u64,
}

/// Derives the interval constants for a given `precision`.
///
/// `max_total_bits = min(precision - 2, WORD_BITS - precision)` bounds the
/// admissible `cdf_bits` so `c_high * range` cannot overflow a 64-bit word
/// and the interval cannot collapse below `min_range`.
pub(crate) fn derive_constants(precision: u32) -> Constants {
    assert!(
        (2..=WORD_BITS).contains(&precision),
        "precision must be in 2..={}, got {}",
        WORD_BITS,
        precision
    );
    let frequency_bits = (WORD_BITS - precision).min(precision - 2);
    let full_range = 1u64 << precision;
    let half_range = full_range >> 1;
    let quarter_range = half_range >> 1;
    let three_quarter_range = 3 * quarter_range;
    let min_range = quarter_range + 2;
    let max_total = (1u64 << frequency_bits) - 1;
    let mask = full_range - 1;

    Constants {
        max_total,
        full_range,
        half_range,
        quarter_range,
        three_quarter_range,
        min_range,
        mask,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanorand::{Rng, WyRand};

    fn uniform_cdf(alphabet: u32, cdf_bits: u32) -> Vec<u32> {
        let total = 1u32 << cdf_bits;
        (0..=alphabet)
            .map(|i| ((i as u64 * total as u64) / alphabet as u64) as u32)
            .collect()
    }

    #[test]
    fn five_way_uniform_1024_symbols_round_trips_and_beats_entropy_bound() {
        let cdf = uniform_cdf(5, 16);
        let syms: Vec<u32> = (1..=1024u32).map(|i| i % 5).collect();

        let mut enc = AcEncoder::new(32);
        for &s in &syms {
            enc.encode(s, &cdf, 16);
        }
        enc.flush();

        let entropy_bits = 1024.0 * (5.0f64).log2();
        assert!(enc.bit_stream().size() as f64 > entropy_bits);
        assert!((enc.bit_stream().size() as f64) < entropy_bits * 2.0);

        let mut dec = AcDecoder::new(32, enc.into_bit_stream());
        for &expected in &syms {
            assert_eq!(dec.decode(5, &cdf, 16), expected);
        }
    }

    #[test]
    fn skewed_distribution_compresses_close_to_entropy() {
        let cdf = vec![0u32, (0.9 * 65536.0) as u32, 65536];
        let mut enc = AcEncoder::new(32);
        for _ in 0..10_000 {
            enc.encode(0, &cdf, 16);
        }
        enc.flush();

        assert!(enc.bit_stream().size() < 10_000 * 8);
        let entropy_bits = 10_000.0 * (1.0 / 0.9f64).log2();
        assert!((enc.bit_stream().size() as f64) < entropy_bits * 1.3 + 64.0);
    }

    #[test]
    #[should_panic(expected = "zero-probability")]
    fn rejects_zero_probability_symbol() {
        let cdf = vec![0u32, 0, 65536];
        let mut enc = AcEncoder::new(32);
        enc.encode(0, &cdf, 16);
    }

    #[test]
    #[should_panic(expected = "sum to 2^cdf_bits")]
    fn rejects_cdf_not_summing_to_power_of_two() {
        let cdf = vec![0u32, 32000, 65535];
        let mut enc = AcEncoder::new(32);
        enc.encode(1, &cdf, 16);
    }

    #[test]
    fn random_precisions_and_alphabets_round_trip() {
        let mut rng = WyRand::new_seed(7);
        for _ in 0..64 {
            let precision = rng.generate_range(8u32..40);
            let cdf_bits = 10u32;
            let alphabet = rng.generate_range(2u32..16);
            let cdf = uniform_cdf(alphabet, cdf_bits);
            // Re-roll any symbol whose interval collapsed to zero width.
            let mut syms = Vec::new();
            for _ in 0..200 {
                loop {
                    let s = rng.generate_range(0u32..alphabet);
                    if cdf[s as usize] != cdf[s as usize + 1] {
                        syms.push(s);
                        break;
                    }
                }
            }

            let mut enc = AcEncoder::new(precision);
            for &s in &syms {
                enc.encode(s, &cdf, cdf_bits);
            }
            enc.flush();

            let mut dec = AcDecoder::new(precision, enc.into_bit_stream());
            for &expected in &syms {
                assert_eq!(dec.decode(alphabet, &cdf, cdf_bits), expected);
            }
        }
    }

    #[test]
    fn decode_surplus_bits_pull_benign_zeros() {
        let cdf = vec![0u32, 32768, 65536];
        let mut enc = AcEncoder::new(32);
        for _ in 0..4 {
            enc.encode(1, &cdf, 16);
        }
        enc.flush();

        let mut dec = AcDecoder::new(32, enc.into_bit_stream());
        for _ in 0..4 {
            assert_eq!(dec.decode(2, &cdf, 16), 1);
        }
    }
}

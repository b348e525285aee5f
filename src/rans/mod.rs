//! Implements the asymmetric numeral systems (rANS) codec: a single stateful
//! object that both encodes (FIFO-append) and decodes (LIFO-consume)
//! symbols against caller-supplied CDFs.
//!
//! See [`RansCodec`].
pub use codec::RansCodec;

mod codec;

/// Canonical default head precision, in bits.
pub const DEFAULT_H_PRECISION: u32 = 64;
/// Canonical default tail precision, in bits.
pub const DEFAULT_T_PRECISION: u32 = 32;

/// Constants derived once from `(h_precision, t_precision)`.
pub(crate) struct Constants {
    pub h_min: u64,
}

/// Derives the rANS state-machine constants for a given `(h_precision,
/// t_precision)` pair.
pub(crate) fn derive_constants(h_precision: u32, t_precision: u32) -> Constants {
    assert_eq!(h_precision % 8, 0, "h_precision must be a multiple of 8");
    assert_eq!(t_precision % 8, 0, "t_precision must be a multiple of 8");
    assert!(t_precision < h_precision, "t_precision must be < h_precision");
    assert!(
        h_precision <= t_precision * 2,
        "h_precision must be <= 2 * t_precision"
    );

    let h_min = 1u64 << (h_precision - t_precision);
    Constants { h_min }
}

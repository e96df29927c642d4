//! Multi-witness Schnorr response aggregation.
//!
//! Generalizes the single-witness Schnorr signature shape (compare
//! `examples/giaki3003-serai/crypto/frost/src/schnorr.rs`'s
//! `sign`/`verify` pair, over one curve witness) to a fixed-size vector of
//! witnesses proved under one shared Fiat-Shamir challenge, as the
//! membership proof's four-witness `(value, comBlindingFactor, hash,
//! sigBlindingFactor)` aggregation requires.
//!
//! This module only supplies the *response* arithmetic
//! (`z_i = rho_i - c*w_i`). Recomputing a commitment from responses is left
//! to the caller, because the two commitments this crate needs to recompute
//! (a Pedersen-style `G1` double-base product and a pairing expression) have
//! different physical shapes — there is no single generic recomputation
//! formula to share between them.

#![forbid(unsafe_code)]

use crate::curve::Zr;

/// Compute Schnorr responses `z_i = rho_i - c * w_i` for each witness.
///
/// `witness` and `randomness` must have equal length — a mismatch is a
/// programming error internal to this crate (every call site constructs
/// both vectors locally with a fixed length), not an externally triggerable
/// condition, so it is a debug assertion rather than a `Result`.
pub fn prove(witness: &[Zr], randomness: &[Zr], challenge: &Zr) -> Vec<Zr> {
    debug_assert_eq!(
        witness.len(),
        randomness.len(),
        "witness and randomness vectors must have matching length"
    );
    witness
        .iter()
        .zip(randomness.iter())
        .map(|(w, rho)| *rho - *challenge * *w)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responses_have_one_entry_per_witness() {
        let witness = vec![Zr::from(1u64), Zr::from(2u64), Zr::from(3u64)];
        let randomness = vec![Zr::from(10u64), Zr::from(20u64), Zr::from(30u64)];
        let challenge = Zr::from(5u64);
        let z = prove(&witness, &randomness, &challenge);
        assert_eq!(z.len(), 3);
        assert_eq!(z[0], Zr::from(10u64) - Zr::from(5u64) * Zr::from(1u64));
    }

    #[test]
    fn different_challenges_yield_different_responses() {
        let witness = vec![Zr::from(7u64)];
        let randomness = vec![Zr::from(11u64)];
        let z1 = prove(&witness, &randomness, &Zr::from(1u64));
        let z2 = prove(&witness, &randomness, &Zr::from(2u64));
        assert_ne!(z1, z2);
    }
}

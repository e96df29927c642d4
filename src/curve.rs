//! Curve abstraction — scalar field, groups, pairing, hash-to-scalar
//!
//! This module centralizes every place the rest of the crate touches the
//! concrete pairing-friendly curve. Everything downstream (`pedersen`, `ps`,
//! `schnorr`, `transcript`, `membership`) goes through these aliases and
//! helper functions rather than naming `ark_bn254` directly, so swapping the
//! curve later is a one-file change.
//!
//! ## Curve choice
//! BN254 via `ark-bn254`. The crate's pairing contract
//! (`pairing2` + `final_exp`) maps directly onto arkworks'
//! `Pairing::multi_miller_loop` / `Pairing::final_exponentiation`, which is
//! exactly the "compute the product of two pairings, then finalize" shape
//! the membership protocol needs.

#![forbid(unsafe_code)]

use ark_ec::pairing::{MillerLoopOutput, Pairing, PairingOutput};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::CoreError;

/// Scalar field `Zr`.
pub type Zr = ark_bn254::Fr;
/// Source group `G1`.
pub type G1 = ark_bn254::G1Affine;
/// Source group `G2`.
pub type G2 = ark_bn254::G2Affine;
/// Pairing engine tying `G1`, `G2`, and `Gt` together.
pub type Bn254 = ark_bn254::Bn254;
/// Target group `Gt` of the pairing `e : G1 x G2 -> Gt`.
pub type Gt = PairingOutput<Bn254>;

/// Identifies the concrete pairing-friendly curve backing this crate.
///
/// A single variant today; kept as an enum (rather than erased entirely) so
/// a second curve can be added without breaking callers who match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Bn254,
}

impl Curve {
    /// Acquire a handle to the system RNG.
    ///
    /// `OsRng` is a zero-sized handle backed by the OS entropy source; it is
    /// infallible to *construct*, but draws from it can fail on a starved
    /// entropy pool. Callers that need to observe that failure should use
    /// [`Curve::try_random_zr`]; the common path (`random_zr`) is kept for
    /// call sites that already run under a `Result`-returning caller and
    /// would otherwise have to unwrap a practically-infallible draw.
    pub fn rng(&self) -> OsRng {
        OsRng
    }

    /// Sample a fresh, uniformly random scalar.
    pub fn random_zr(&self, rng: &mut impl RngCore) -> Zr {
        <Zr as ark_std::UniformRand>::rand(rng)
    }

    /// Sample a fresh scalar, surfacing RNG exhaustion as [`CoreError::RngFailure`].
    ///
    /// Unlike [`Curve::random_zr`] (which goes through
    /// `ark_std::UniformRand::rand`, itself built on `RngCore::fill_bytes` —
    /// infallible by trait signature, but `OsRng`'s implementation panics
    /// internally if the OS entropy source fails), this draws raw bytes via
    /// `RngCore::try_fill_bytes`, which actually reports that failure, and
    /// reduces them to a scalar the same way [`Curve::hash_to_zr`] does
    /// (`Zr::from_le_bytes_mod_order` over a double-width buffer, so the
    /// reduction bias is negligible). This is the draw every fallible
    /// call site in this crate (signature randomization, Schnorr blinders)
    /// should use, so an exhausted entropy source surfaces as a typed error
    /// instead of a panic.
    pub fn try_random_zr(&self, rng: &mut impl RngCore) -> Result<Zr, CoreError> {
        let mut buf = [0u8; 64];
        rng.try_fill_bytes(&mut buf).map_err(|_| CoreError::RngFailure)?;
        Ok(Zr::from_le_bytes_mod_order(&buf))
    }

    /// Canonical compressed byte encoding of a scalar.
    pub fn zr_bytes(&self, x: &Zr) -> Result<Vec<u8>, CoreError> {
        canonical_bytes(x)
    }

    /// Canonical compressed byte encoding of a `G1` element.
    pub fn g1_bytes(&self, p: &G1) -> Result<Vec<u8>, CoreError> {
        canonical_bytes(p)
    }

    /// Canonical compressed byte encoding of a `G2` element.
    pub fn g2_bytes(&self, p: &G2) -> Result<Vec<u8>, CoreError> {
        canonical_bytes(p)
    }

    /// Canonical compressed byte encoding of a `Gt` element.
    pub fn gt_bytes(&self, p: &Gt) -> Result<Vec<u8>, CoreError> {
        canonical_bytes(p)
    }

    /// `e(a, b) * e(c, d)`, prior to final exponentiation.
    ///
    /// Matches the spec's `Pairing2(A, B, C, D)` contract exactly: the two
    /// Miller loops are accumulated into one `MillerLoopOutput` and only
    /// exponentiated once by the caller via [`Curve::final_exp`].
    pub fn pairing2(&self, a: &G1, b: &G2, c: &G1, d: &G2) -> MillerLoopOutput<Bn254> {
        Bn254::multi_miller_loop([*a, *c], [*b, *d])
    }

    /// Final exponentiation, completing a value produced by [`Curve::pairing2`].
    pub fn final_exp(&self, x: MillerLoopOutput<Bn254>) -> Result<Gt, CoreError> {
        Bn254::final_exponentiation(x).ok_or(CoreError::Pairing)
    }

    /// Hash arbitrary bytes to a scalar field element.
    ///
    /// Uses a BLAKE3 XOF reduced modulo the scalar field order
    /// (`Zr::from_le_bytes_mod_order`), the same hash-to-field technique
    /// this crate's transcript uses for challenge derivation.
    pub fn hash_to_zr(&self, bytes: &[u8]) -> Zr {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"ps-membership.hash-to-zr.v1");
        hasher.update(bytes);
        let mut xof = hasher.finalize_xof();
        let mut buf = [0u8; 64];
        std::io::Read::read_exact(&mut xof, &mut buf).expect("XOF reader is infinite");
        Zr::from_le_bytes_mod_order(&buf)
    }
}

fn canonical_bytes<T: CanonicalSerialize>(x: &T) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    x.serialize_compressed(&mut buf)
        .map_err(|_| CoreError::TranscriptSerialization)?;
    Ok(buf)
}

/// Convenience: affine addition written the way the spec's `.Add` reads.
#[inline]
pub fn g1_add(a: &G1, b: &G1) -> G1 {
    (a.into_group() + b.into_group()).into_affine()
}

/// Convenience: affine addition for `G2`.
#[inline]
pub fn g2_add(a: &G2, b: &G2) -> G2 {
    (a.into_group() + b.into_group()).into_affine()
}

/// Convenience: scalar multiplication written the way the spec's `.Mul` reads.
#[inline]
pub fn g1_mul(p: &G1, k: &Zr) -> G1 {
    p.mul_bigint(k.into_bigint()).into_affine()
}

/// Convenience: scalar multiplication for `G2`.
#[inline]
pub fn g2_mul(p: &G2, k: &Zr) -> G2 {
    p.mul_bigint(k.into_bigint()).into_affine()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::UniformRand;
    use rand::SeedableRng;

    #[test]
    fn hash_to_zr_is_deterministic() {
        let c = Curve::Bn254;
        let a = c.hash_to_zr(b"hello");
        let b = c.hash_to_zr(b"hello");
        assert_eq!(a, b);
    }

    #[test]
    fn hash_to_zr_is_sensitive_to_input() {
        let c = Curve::Bn254;
        let a = c.hash_to_zr(b"hello");
        let b = c.hash_to_zr(b"hellp");
        assert_ne!(a, b);
    }

    #[test]
    fn g1_mul_distributes_over_add() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let g = G1::generator();
        let k1 = Zr::rand(&mut rng);
        let k2 = Zr::rand(&mut rng);
        let lhs = g1_mul(&g, &(k1 + k2));
        let rhs = g1_add(&g1_mul(&g, &k1), &g1_mul(&g, &k2));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn pairing2_matches_two_single_pairings() {
        let c = Curve::Bn254;
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let a = g1_mul(&G1::generator(), &Zr::rand(&mut rng));
        let b = g2_mul(&G2::generator(), &Zr::rand(&mut rng));
        let c1 = g1_mul(&G1::generator(), &Zr::rand(&mut rng));
        let d1 = g2_mul(&G2::generator(), &Zr::rand(&mut rng));

        let combined = c.final_exp(c.pairing2(&a, &b, &c1, &d1)).unwrap();
        let e1 = Bn254::pairing(a, b);
        let e2 = Bn254::pairing(c1, d1);
        assert_eq!(combined.0, (e1.0 * e2.0));
    }

    /// An RNG whose entropy source is always exhausted; lets us exercise the
    /// `try_random_zr` failure path without relying on the real `OsRng` ever
    /// actually failing.
    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy source exhausted",
            )))
        }
    }

    #[test]
    fn try_random_zr_surfaces_rng_failure_instead_of_panicking() {
        let c = Curve::Bn254;
        let mut rng = FailingRng;
        assert!(matches!(c.try_random_zr(&mut rng), Err(CoreError::RngFailure)));
    }
}

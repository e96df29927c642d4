//! Pointcheval-Sanders signature primitives, as consumed by this crate.
//!
//! This module does not implement PS key generation or a general-purpose
//! `Sign`/`Verify` pair — those belong to the issuer, outside this crate's
//! scope (the spec treats PS signing as an external collaborator). It
//! implements exactly the three operations the membership proof depends on:
//! re-randomization, cloning, and the verifier-side commitment
//! recomputation used inside the Fiat-Shamir challenge.

#![forbid(unsafe_code)]

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::RngCore;

use crate::curve::{g1_add, g1_mul, g2_add, g2_mul, Curve, Gt, Zr, G1, G2};
use crate::error::CoreError;

/// A Pointcheval-Sanders signature `(R, S)` on a hashed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Signature {
    /// `R` component.
    pub r: G1,
    /// `S` component.
    pub s: G1,
}

impl Signature {
    /// Re-randomize a signature: multiply both components by one fresh
    /// scalar so the pair remains a valid PS signature on the same message.
    ///
    /// This is a pure function rather than the in-place mutation the
    /// reference implementation uses — the spec's own design notes flag
    /// in-place mutation of signatures as a wart to avoid, and Rust's
    /// ownership model makes the pure form no more costly to call.
    ///
    /// This operation's only failure source is the fresh-scalar draw; a
    /// failure there is reported as [`CoreError::PsRandomizeFailure`] rather
    /// than the underlying [`CoreError::RngFailure`], since from a caller's
    /// perspective this is specifically "re-randomizing the PS signature
    /// failed" (spec §7's `PSRandomizeFailure`, "propagated from the PS
    /// module") — the RNG is this module's implementation detail, not
    /// something the membership prover should have to distinguish from any
    /// other cause of randomization failure.
    pub fn randomize(&self, rng: &mut impl RngCore, curve: &Curve) -> Result<(Self, Zr), CoreError> {
        let rho = curve
            .try_random_zr(rng)
            .map_err(|_| CoreError::PsRandomizeFailure)?;
        Ok((
            Signature {
                r: g1_mul(&self.r, &rho),
                s: g1_mul(&self.s, &rho),
            },
            rho,
        ))
    }

    /// Canonical bytes, used by the Fiat-Shamir transcript (§4.E item 4).
    pub fn bytes(&self, curve: &Curve) -> Result<Vec<u8>, CoreError> {
        let mut out = curve.g1_bytes(&self.r)?;
        out.extend(curve.g1_bytes(&self.s)?);
        Ok(out)
    }
}

/// Public key `PK = (X, Y_val, Y_hash)`: exactly three `G2` elements.
///
/// As with [`crate::pedersen::PedersenParams`], the three-element length is
/// load-bearing and checked at the one fallible constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    x: G2,
    y_val: G2,
    y_hash: G2,
}

impl PublicKey {
    /// Build a key from its three named elements.
    pub fn new(x: G2, y_val: G2, y_hash: G2) -> Self {
        Self { x, y_val, y_hash }
    }

    /// Build a key from a slice, enforcing `len == 3`.
    pub fn from_slice(elems: &[G2]) -> Result<Self, CoreError> {
        if elems.len() != 3 {
            return Err(CoreError::InvalidParameters(
                "PublicKey requires exactly 3 G2 elements (X, Y_val, Y_hash)",
            ));
        }
        Ok(Self::new(elems[0], elems[1], elems[2]))
    }

    /// `X`, unused by the membership proof itself but carried for parity
    /// with the full PS public key shape.
    pub fn x(&self) -> &G2 {
        &self.x
    }

    /// `Y_val`, the base raised to the committed value's exponent.
    pub fn y_val(&self) -> &G2 {
        &self.y_val
    }

    /// `Y_hash`, the base raised to the value's hash exponent.
    pub fn y_hash(&self) -> &G2 {
        &self.y_hash
    }

    /// The three elements, in order, as used by the Fiat-Shamir transcript.
    pub fn as_array(&self) -> [G2; 3] {
        [self.x, self.y_val, self.y_hash]
    }
}

/// Proof-of-knowledge transcript fragment consumed by [`PokVerifier::recompute_commitment`].
///
/// `messages` holds the Schnorr responses for each signed value; the
/// membership proof always supplies exactly one (the committed value), but
/// the type stays generic over a vector since `POK` is shared
/// infrastructure for sibling proof types outside this crate's scope.
#[derive(Debug, Clone)]
pub struct Pok {
    /// Fiat-Shamir challenge under which the responses below were computed.
    pub challenge: Zr,
    /// The (re-randomized, blinded) signature being proven.
    pub signature: Signature,
    /// Schnorr responses, one per signed message.
    pub messages: Vec<Zr>,
    /// Schnorr response for the message's hash component.
    pub hash: Zr,
    /// Schnorr response for the signature's blinding factor.
    pub blinding_factor: Zr,
}

/// Verifier-side context for PS proof-of-knowledge recomputation.
#[derive(Debug, Clone, Copy)]
pub struct PokVerifier {
    /// Fixed PS base in `G1`.
    pub p: G1,
    /// Fixed PS base in `G2`.
    pub q: G2,
    /// PS public key.
    pub pk: PublicKey,
}

impl PokVerifier {
    /// Recompute `e(prod Y_i^{m_i} . Y_hash^h, R) . e(P^b . S^c, Q)`.
    ///
    /// `pok.messages` is expected to have exactly one entry (the membership
    /// proof's single committed value), matching `PK`'s single `Y_val`
    /// slot; any other length is a caller error distinct from the
    /// parameter-length invariants on `PK`/`PedersenParams` and is rejected
    /// the same way.
    pub fn recompute_commitment(&self, pok: &Pok, curve: &Curve) -> Result<Gt, CoreError> {
        if pok.messages.len() != 1 {
            return Err(CoreError::InvalidParameters(
                "membership POK carries exactly one message (the committed value)",
            ));
        }

        // left = Y_val^{m_0} + Y_hash^h   (additive notation for exponentiation, in G2)
        let left = g2_add(
            &g2_mul(self.pk.y_val(), &pok.messages[0]),
            &g2_mul(self.pk.y_hash(), &pok.hash),
        );

        // right = P^b + S^c   (in G1)
        let right = g1_add(
            &g1_mul(&self.p, &pok.blinding_factor),
            &g1_mul(&pok.signature.s, &pok.challenge),
        );

        // e(R, left) . e(right, Q): the recompute identity cancels exactly
        // against the prover's T_sig = e(sig.R, T) . e(P, Q)^{r_b} when
        // neither term is inverted (the signature relation this proves
        // knowledge of is additive: S = (v.y + h.z).R + sigBlindingFactor.P).
        let ml = curve.pairing2(&pok.signature.r, &left, &right, &self.q);
        curve.final_exp(ml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::AffineRepr;
    use ark_ff::One;
    use rand::SeedableRng;

    #[test]
    fn randomize_produces_a_fresh_pair_each_time() {
        let curve = Curve::Bn254;
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let sig = Signature {
            r: G1::generator(),
            s: g1_mul(&G1::generator(), &Zr::from(9u64)),
        };
        let (sig1, rho1) = sig.randomize(&mut rng, &curve).unwrap();
        let (sig2, rho2) = sig.randomize(&mut rng, &curve).unwrap();
        assert_ne!(rho1, rho2);
        assert_ne!(sig1.r, sig2.r);
        assert_ne!(sig1.s, sig2.s);

        // randomization preserves the R/S ratio: S = R^9 held before scaling,
        // so e(S, g2) . e(R, g2^9)^-1 must still collapse to the identity.
        let neg_nine_r = g1_mul(&sig1.r, &(-Zr::from(9u64)));
        let check = curve
            .final_exp(curve.pairing2(&sig1.s, &G2::generator(), &neg_nine_r, &G2::generator()))
            .unwrap();
        assert!(check.0.is_one());
    }

    #[test]
    fn public_key_rejects_wrong_length() {
        let elems = vec![G2::generator(); 2];
        assert!(PublicKey::from_slice(&elems).is_err());
        let elems = vec![G2::generator(); 4];
        assert!(PublicKey::from_slice(&elems).is_err());
    }

    /// An RNG whose entropy source is always exhausted, used to exercise
    /// `randomize`'s failure path (see `crate::curve::tests::FailingRng` for
    /// the equivalent at the `try_random_zr` layer this wraps).
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
    fn randomize_reports_ps_randomize_failure_not_rng_failure() {
        let curve = Curve::Bn254;
        let mut rng = FailingRng;
        let sig = Signature {
            r: G1::generator(),
            s: g1_mul(&G1::generator(), &Zr::from(9u64)),
        };
        assert!(matches!(
            sig.randomize(&mut rng, &curve),
            Err(CoreError::PsRandomizeFailure)
        ));
    }
}

//! Fiat-Shamir transcript for the membership proof.
//!
//! Grounded on the teacher crate's BLAKE3-based transcript: domain-separated,
//! length-delimited absorbs, and an XOF-derived challenge that reads the
//! running hash state without mutating it. The absorb order here is fixed by
//! the protocol (every `G1` element of `PedersenParams`, then the
//! statement, then the prover's value commitment, then `P`; every `G2`
//! element of `PK`, then `Q`; then the pairing commitment `T_sig`; then the
//! randomized PS signature) — reordering or re-encoding any of it is a
//! soundness break, not a style choice.

#![forbid(unsafe_code)]

use ark_ff::PrimeField;
use blake3::Hasher;

use crate::curve::{Curve, Zr, G1, G2, Gt};
use crate::error::CoreError;
use crate::pedersen::PedersenParams;
use crate::ps::PublicKey;

/// Fiat-Shamir transcript, domain-separated per protocol instance.
pub struct Transcript {
    hasher: Hasher,
}

impl Transcript {
    /// Start a new transcript under a fixed protocol label.
    pub fn new(label: &'static str) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(b"ps-membership.transcript.v1");
        hasher.update(label.as_bytes());
        Self { hasher }
    }

    /// Absorb an arbitrary byte slice with a length-delimited, labeled item.
    fn absorb(&mut self, label: &'static str, bytes: &[u8]) {
        self.hasher.update(b"item:");
        self.hasher.update(label.as_bytes());
        self.hasher.update(b":len:");
        self.hasher.update(&(bytes.len() as u64).to_be_bytes());
        self.hasher.update(b":data:");
        self.hasher.update(bytes);
    }

    /// Absorb the statement's Pedersen parameters, commitment, and `P`
    /// (transcript item 1 — all `G1` elements, in order).
    pub fn absorb_g1_elements(
        &mut self,
        curve: &Curve,
        pedersen_params: &PedersenParams,
        commitment_to_value: &G1,
        c_val: &G1,
        p: &G1,
    ) -> Result<(), CoreError> {
        for g in pedersen_params.as_array() {
            self.absorb("pedersen_param", &curve.g1_bytes(&g)?);
        }
        self.absorb("statement", &curve.g1_bytes(commitment_to_value)?);
        self.absorb("value_commitment", &curve.g1_bytes(c_val)?);
        self.absorb("ps_base_p", &curve.g1_bytes(p)?);
        Ok(())
    }

    /// Absorb the public key and `Q` (transcript item 2 — all `G2`
    /// elements, in order).
    pub fn absorb_g2_elements(
        &mut self,
        curve: &Curve,
        pk: &PublicKey,
        q: &G2,
    ) -> Result<(), CoreError> {
        for g in pk.as_array() {
            self.absorb("public_key_elem", &curve.g2_bytes(&g)?);
        }
        self.absorb("ps_base_q", &curve.g2_bytes(q)?);
        Ok(())
    }

    /// Absorb the pairing commitment `T_sig` (transcript item 3).
    pub fn absorb_sig_commitment(&mut self, curve: &Curve, t_sig: &Gt) -> Result<(), CoreError> {
        self.absorb("sig_commitment", &curve.gt_bytes(t_sig)?);
        Ok(())
    }

    /// Absorb the randomized PS signature (transcript item 4).
    pub fn absorb_randomized_signature(&mut self, sig_bytes: &[u8]) {
        self.absorb("randomized_sig", sig_bytes);
    }

    /// Derive the Fiat-Shamir scalar challenge from everything absorbed so far.
    ///
    /// Clones the running hash state before applying the XOF, so this is a
    /// pure read of the absorb schedule: calling it does not consume or
    /// mutate the transcript.
    pub fn challenge_zr(&self) -> Zr {
        let mut h = self.hasher.clone();
        h.update(b"challenge:ps-membership.v1");
        let mut xof = h.finalize_xof();
        let mut buf = [0u8; 64];
        std::io::Read::read_exact(&mut xof, &mut buf).expect("XOF reader is infinite");
        Zr::from_le_bytes_mod_order(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{g1_mul, g2_mul};
    use ark_ec::AffineRepr;
    use ark_std::UniformRand;
    use rand::SeedableRng;

    fn sample_params(seed: u64) -> (Curve, PedersenParams, PublicKey) {
        let curve = Curve::Bn254;
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let pp = PedersenParams::new(
            g1_mul(&G1::generator(), &curve.random_zr(&mut rng)),
            g1_mul(&G1::generator(), &curve.random_zr(&mut rng)),
        );
        let pk = PublicKey::new(
            g2_mul(&G2::generator(), &curve.random_zr(&mut rng)),
            g2_mul(&G2::generator(), &curve.random_zr(&mut rng)),
            g2_mul(&G2::generator(), &curve.random_zr(&mut rng)),
        );
        (curve, pp, pk)
    }

    #[test]
    fn same_absorbs_yield_same_challenge() {
        let (curve, pp, pk) = sample_params(42);
        let p = G1::generator();
        let q = G2::generator();
        let com = G1::generator();
        let c_val = g1_mul(&G1::generator(), &Zr::from(3u64));

        let mut t1 = Transcript::new("test");
        t1.absorb_g1_elements(&curve, &pp, &com, &c_val, &p).unwrap();
        t1.absorb_g2_elements(&curve, &pk, &q).unwrap();
        let t_sig = Gt::rand(&mut rand::rngs::StdRng::seed_from_u64(1));
        t1.absorb_sig_commitment(&curve, &t_sig).unwrap();
        t1.absorb_randomized_signature(b"sig-bytes");

        let mut t2 = Transcript::new("test");
        t2.absorb_g1_elements(&curve, &pp, &com, &c_val, &p).unwrap();
        t2.absorb_g2_elements(&curve, &pk, &q).unwrap();
        t2.absorb_sig_commitment(&curve, &t_sig).unwrap();
        t2.absorb_randomized_signature(b"sig-bytes");

        assert_eq!(t1.challenge_zr(), t2.challenge_zr());
    }

    #[test]
    fn different_commitment_yields_different_challenge() {
        let (curve, pp, pk) = sample_params(42);
        let p = G1::generator();
        let q = G2::generator();
        let com = G1::generator();
        let c_val_a = g1_mul(&G1::generator(), &Zr::from(3u64));
        let c_val_b = g1_mul(&G1::generator(), &Zr::from(4u64));

        let mut t1 = Transcript::new("test");
        t1.absorb_g1_elements(&curve, &pp, &com, &c_val_a, &p).unwrap();
        t1.absorb_g2_elements(&curve, &pk, &q).unwrap();

        let mut t2 = Transcript::new("test");
        t2.absorb_g1_elements(&curve, &pp, &com, &c_val_b, &p).unwrap();
        t2.absorb_g2_elements(&curve, &pk, &q).unwrap();

        assert_ne!(t1.challenge_zr(), t2.challenge_zr());
    }

    #[test]
    fn challenge_derivation_does_not_mutate_state() {
        let (curve, pp, pk) = sample_params(99);
        let p = G1::generator();
        let q = G2::generator();
        let com = G1::generator();
        let c_val = g1_mul(&G1::generator(), &Zr::from(3u64));

        let mut t = Transcript::new("test");
        t.absorb_g1_elements(&curve, &pp, &com, &c_val, &p).unwrap();
        t.absorb_g2_elements(&curve, &pk, &q).unwrap();

        let a = t.challenge_zr();
        let b = t.challenge_zr();
        assert_eq!(a, b);
    }
}

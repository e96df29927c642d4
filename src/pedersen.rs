//! Pedersen commitment parameters and the commit operation.
//!
//! `Commit(v, r) = g0^v . g1^r` (additive notation on an elliptic curve
//! group, written multiplicatively in the spec's prose). This module never
//! instantiates the generators itself — they are supplied by the enclosing
//! system's key-generation process — it only consumes them and enforces the
//! `len == 2` invariant that gates soundness.

#![forbid(unsafe_code)]

use crate::curve::{g1_add, g1_mul, Zr, G1};
use crate::error::CoreError;

/// Fixed-length pair of `G1` generators `(g0, g1)` used for Pedersen commitments.
///
/// The two-element length is load-bearing: any other length must cause
/// proof generation and verification to fail deterministically, which is
/// why the only public constructor is fallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PedersenParams {
    g0: G1,
    g1: G1,
}

impl PedersenParams {
    /// Build params from exactly two generators.
    pub fn new(g0: G1, g1: G1) -> Self {
        Self { g0, g1 }
    }

    /// Build params from a slice, enforcing `len == 2`.
    ///
    /// This is the single checked entry point used both by callers that
    /// already hold a fixed-size pair and by deserialization paths that
    /// receive an arbitrary-length slice from an external, not-necessarily-
    /// Rust peer.
    pub fn from_slice(gens: &[G1]) -> Result<Self, CoreError> {
        if gens.len() != 2 {
            return Err(CoreError::InvalidParameters(
                "PedersenParams requires exactly 2 G1 generators",
            ));
        }
        Ok(Self::new(gens[0], gens[1]))
    }

    /// `g0`, the value generator.
    pub fn g0(&self) -> &G1 {
        &self.g0
    }

    /// `g1`, the blinding generator.
    pub fn g1(&self) -> &G1 {
        &self.g1
    }

    /// The two generators, in order, as used by the Fiat-Shamir transcript.
    pub fn as_array(&self) -> [G1; 2] {
        [self.g0, self.g1]
    }

    /// `Commit(v, r) = g0^v . g1^r`.
    pub fn commit(&self, v: &Zr, r: &Zr) -> G1 {
        g1_add(&g1_mul(&self.g0, v), &g1_mul(&self.g1, r))
    }
}

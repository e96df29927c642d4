//! Crate root: public surface and the protocol-wide invariants it carries.
//!
//! This is the canonical entry point for downstream users. It re-exports the
//! curve aliases, the error type, and the membership-proof prover/verifier
//! API; everything else is internal plumbing the submodules need to agree
//! on (Pedersen parameters, PS signature primitives, the Schnorr aggregator,
//! the Fiat-Shamir transcript).
//!
//! ## Invariants
//!
//! - **Curve.** BN254 via `ark-bn254` (`Zr = Fr`, `G1 = G1Affine`,
//!   `G2 = G2Affine`, `Gt = PairingOutput<Bn254>`). All arithmetic is
//!   constant-time as provided by arkworks; this crate forbids `unsafe`
//!   throughout.
//! - **Generator-array lengths.** `PedersenParams` always carries exactly 2
//!   `G1` generators; `PublicKey` always carries exactly 3 `G2` elements.
//!   Both invariants are enforced once, at construction, rather than
//!   re-checked on every prove/verify call (see `membership::MembershipParams`).
//! - **Fiat-Shamir.** BLAKE3 with explicit domain-separation tags,
//!   length-delimited absorbs, and an XOF to derive challenges. The prover
//!   and verifier replay the exact same absorb sequence (`transcript`).
//! - **Single-use proving.** A membership prover is a Rust typestate;
//!   `Prover::respond` consumes `self`, so a finished prover cannot be
//!   driven to emit a second proof from the same fresh signature blinder.
//!
//! If any invariant is violated at runtime, the failure mode is a typed
//! [`error::CoreError`], never UB or a panic on attacker-controlled input.

#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms)]

/// Curve abstraction: scalar field, groups, pairing, hash-to-scalar.
pub mod curve;
/// Typed error categories shared across every module.
pub mod error;
/// Membership proof: witness, proof record, prover/verifier state machines.
pub mod membership;
/// Pedersen commitment parameters and the commit operation.
pub mod pedersen;
/// Pointcheval-Sanders signature primitives consumed by the membership proof.
pub mod ps;
/// Multi-witness Schnorr response aggregation.
pub mod schnorr;
/// Fiat-Shamir transcript for the membership proof.
pub mod transcript;

/// Curve identifier and the scalar/group type aliases every module shares.
pub use crate::curve::{Curve, Gt, Zr, G1, G2};
/// The crate-wide typed error.
pub use crate::error::CoreError;
/// The membership proof's witness, statement, proof record, and
/// prover/verifier entry points, re-exported at the crate root for the
/// common case; see `membership` for the full typestate API.
pub use crate::membership::{
    prove, verify, MembershipParams, MembershipProof, Prover, Ready, Verifier, Witness,
};
/// Pedersen generator pair and commitment operation.
pub use crate::pedersen::PedersenParams;
/// PS public key and signature types consumed by the membership proof.
pub use crate::ps::{PublicKey, Signature};

//! Error kinds for the membership-proof core.
//!
//! Every fallible operation in this crate returns `Result<_, CoreError>`.
//! Variants are ordered most-local to least-local. `Display` messages never
//! embed witness-derived values — `InvalidProof` in particular is an
//! intentionally opaque failure.

#![forbid(unsafe_code)]

/// Errors produced by the membership-proof core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `len(PK) != 3` or `len(PedersenParams) != 2`. Raised before any
    /// cryptographic work; non-retryable.
    #[error("invalid public parameters: {0}")]
    InvalidParameters(&'static str),

    /// The RNG source failed to produce randomness.
    #[error("RNG failure")]
    RngFailure,

    /// PS signature randomization failed. Raised by [`crate::ps::Signature::randomize`]
    /// when its fresh-scalar draw fails; distinct from [`CoreError::RngFailure`]
    /// so a caller can tell "the membership prover's own blinder draw failed"
    /// apart from "re-randomizing the underlying PS signature failed".
    #[error("PS signature randomization failed")]
    PsRandomizeFailure,

    /// A group element could not be serialized for the Fiat-Shamir transcript.
    #[error("failed to serialize a transcript element")]
    TranscriptSerialization,

    /// A final-exponentiation / pairing computation failed.
    #[error("pairing computation failed")]
    Pairing,

    /// The incoming proof blob is syntactically invalid.
    #[error("proof is not well-formed")]
    DecodeFailure,

    /// The recomputed challenge does not equal the proof's challenge.
    ///
    /// Deliberately opaque: it carries no information about which part of
    /// the proof failed to verify.
    #[error("invalid membership proof")]
    InvalidProof,
}

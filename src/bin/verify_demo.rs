//! Minimal CLI verifier, pairing with `prove_demo`.
//!
//! Reads a strict, versioned proof file:
//!   magic: b"PSMEMv1\0" (8 bytes) + ark-compressed `MembershipProof`
//! plus the sibling `<file>.params` dump `prove_demo` writes, and reports
//! `Ok` / the typed [`ps_membership::CoreError`] on failure. Analogous in
//! shape to the teacher crate's `src/bin/verifier.rs` file-IO wrapper.

#![forbid(unsafe_code)]

use std::{env, fs, io::Read as _};

use ark_serialize::CanonicalDeserialize;
use ps_membership::{
    curve::{Curve, G1, G2},
    membership::{self, MembershipParams},
    pedersen::PedersenParams,
    ps::PublicKey,
};

const FILE_MAGIC: &[u8; 8] = b"PSMEMv1\0";

fn parse_flag(args: &[String], key: &str) -> Option<String> {
    let mut it = args.iter();
    while let Some(a) = it.next() {
        if a == key {
            return it.next().cloned();
        }
    }
    None
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().collect();
    let proof_path = parse_flag(&args, "--proof").unwrap_or_else(|| "proof.bin".to_string());
    let params_path = parse_flag(&args, "--params").unwrap_or_else(|| format!("{proof_path}.params"));

    let mut bytes = fs::read(&proof_path)?;
    if bytes.len() < FILE_MAGIC.len() || &bytes[..FILE_MAGIC.len()] != FILE_MAGIC {
        anyhow::bail!("{proof_path}: bad magic, not a PSMEMv1 proof file");
    }
    let raw = bytes.split_off(FILE_MAGIC.len());

    let mut pf = fs::File::open(&params_path)?;
    let mut pbuf = Vec::new();
    pf.read_to_end(&mut pbuf)?;
    let mut cursor: &[u8] = &pbuf;

    let commitment_to_value = G1::deserialize_compressed(&mut cursor)?;
    let p = G1::deserialize_compressed(&mut cursor)?;
    let q = G2::deserialize_compressed(&mut cursor)?;
    let pk_elems = [
        G2::deserialize_compressed(&mut cursor)?,
        G2::deserialize_compressed(&mut cursor)?,
        G2::deserialize_compressed(&mut cursor)?,
    ];
    let pk = PublicKey::from_slice(&pk_elems)?;
    let ped_elems = [
        G1::deserialize_compressed(&mut cursor)?,
        G1::deserialize_compressed(&mut cursor)?,
    ];
    let pedersen_params = PedersenParams::from_slice(&ped_elems)?;

    let params = MembershipParams {
        commitment_to_value,
        p,
        q,
        pk,
        pedersen_params,
        curve: Curve::Bn254,
    };

    match membership::verify(params, &raw) {
        Ok(()) => {
            eprintln!("OK: membership proof verified");
            Ok(())
        }
        Err(e) => {
            eprintln!("REJECTED: {e}");
            std::process::exit(1);
        }
    }
}

//! Minimal CLI prover.
//!
//! Builds a toy PS-signed statement, proves membership, and writes a
//! strict, versioned proof file:
//!   magic: b"PSMEMv1\0" (8 bytes) + ark-compressed `MembershipProof`.
//!
//! This binary is an example caller of the library, analogous in shape to
//! the teacher crate's `src/bin/prover.rs` file-IO wrapper; it carries no
//! network surface and performs no key generation policy of its own — it
//! fabricates a toy issuer key in-process purely to have something to prove
//! against, exactly as a wallet or test harness external to this crate
//! would.

#![forbid(unsafe_code)]

use std::{env, fs, io::Write};

use ark_ec::AffineRepr;
use ark_serialize::CanonicalSerialize;
use ps_membership::curve::{g1_mul, g2_mul};
use ps_membership::{
    curve::{Curve, G1, G2},
    membership::{self, MembershipParams, Witness},
    pedersen::PedersenParams,
    ps::{PublicKey, Signature},
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
    let value: u64 = parse_flag(&args, "--value")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let out_path = parse_flag(&args, "--out").unwrap_or_else(|| "proof.bin".to_string());

    let curve = Curve::Bn254;
    let mut rng = curve.rng();

    // Toy issuer keypair. A real deployment obtains `pk`/`pedersen_params`
    // from the enclosing system's key-generation process; this crate never
    // generates them itself (spec §1, "external collaborators").
    let p = G1::generator();
    let q = G2::generator();
    let y = curve.random_zr(&mut rng);
    let z = curve.random_zr(&mut rng);
    let pk = PublicKey::new(
        g2_mul(&q, &curve.random_zr(&mut rng)),
        g2_mul(&q, &y),
        g2_mul(&q, &z),
    );
    let pedersen_params = PedersenParams::new(
        g1_mul(&p, &curve.random_zr(&mut rng)),
        g1_mul(&p, &curve.random_zr(&mut rng)),
    );

    // Toy issuance: sign `value` under the toy issuer key.
    let value_zr = ps_membership::curve::Zr::from(value);
    let hash = curve.hash_to_zr(&curve.zr_bytes(&value_zr)?);
    let r = g1_mul(&G1::generator(), &curve.random_zr(&mut rng));
    let exponent = y * value_zr + z * hash;
    let signature = Signature {
        r,
        s: g1_mul(&r, &exponent),
    };

    let com_blinding_factor = curve.random_zr(&mut rng);
    let commitment_to_value = pedersen_params.commit(&value_zr, &com_blinding_factor);

    let witness = Witness::new(signature, value_zr, com_blinding_factor, &curve)?;
    let params = MembershipParams {
        commitment_to_value,
        p,
        q,
        pk,
        pedersen_params,
        curve,
    };

    eprintln!("proving membership of a committed value (not printed)...");
    let raw = membership::prove(witness, params, &mut rng)?;

    let mut f = fs::File::create(&out_path)?;
    f.write_all(FILE_MAGIC)?;
    f.write_all(&raw)?;
    f.flush().ok();

    // Public parameters a verifier would also need; written alongside the
    // proof for this demo only (a real system distributes these out of band).
    let params_path = format!("{out_path}.params");
    let mut pf = fs::File::create(&params_path)?;
    commitment_to_value.serialize_compressed(&mut pf)?;
    p.serialize_compressed(&mut pf)?;
    q.serialize_compressed(&mut pf)?;
    for g in pk.as_array() {
        g.serialize_compressed(&mut pf)?;
    }
    for g in pedersen_params.as_array() {
        g.serialize_compressed(&mut pf)?;
    }
    pf.flush().ok();

    eprintln!("wrote {out_path} ({} bytes) and {params_path}", raw.len());
    Ok(())
}

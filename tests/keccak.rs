// These tests take too long for miri
#![cfg(not(miri))]
use std::path::Path;

use sha3_sponge::{Algorithm, compute};

use crate::rsp::KatSet;

mod rsp;

fn keccak_vectors(bits: usize) {
    let kat_set = KatSet::load(Path::new(&format!(
        "tests/test-vectors/byte-oriented/Keccak_{bits}.rsp"
    )));
    assert_eq!(bits, kat_set.param_usize("L"));
    let algorithm = Algorithm::keccak(bits).expect("valid keccak length");
    for test in kat_set.tests {
        let hash = compute(&test.msg(), algorithm).expect("fixed-output algorithm");
        assert_eq!(test.get("MD"), hex::encode(hash), "length {} failed", test.len());
    }
}

#[test]
fn test_keccak_224() {
    keccak_vectors(224);
}

#[test]
fn test_keccak_256() {
    keccak_vectors(256);
}

#[test]
fn test_keccak_384() {
    keccak_vectors(384);
}

#[test]
fn test_keccak_512() {
    keccak_vectors(512);
}

// These tests take too long for miri
#![cfg(not(miri))]
use std::path::Path;

use sha3_sponge::{Algorithm, Domain, Sha3_256, Xof, compute_bits};

use crate::rsp::KatSet;

mod rsp;

fn algorithm(kat_set: &KatSet) -> Algorithm {
    let domain = match kat_set.param("Domain") {
        "SHA3" => Domain::Sha3,
        "SHAKE" => Domain::Shake,
        "RawSHAKE" => Domain::RawShake,
        "Keccak" => Domain::Keccak,
        other => panic!("unknown domain {other}"),
    };
    let capacity = kat_set.param_usize("Capacity");
    Algorithm::ALL
        .into_iter()
        .find(|a| a.domain() == domain && a.capacity() == capacity)
        .expect("no algorithm with these parameters")
}

fn bit_vectors(file: &str) {
    let kat_set = KatSet::load(Path::new(file));
    let algorithm = algorithm(&kat_set);
    let output_bits = kat_set.param_usize("Outputlen");
    for test in kat_set.tests {
        let output = compute_bits(&test.msg_bits(), algorithm, output_bits);
        assert_eq!(output_bits, output.len());
        assert_eq!(
            test.get("Output"),
            hex::encode(output.as_bytes()),
            "{algorithm} length {} failed",
            test.len()
        );
    }
}

#[test]
fn test_sha3_256_bit_messages() {
    bit_vectors("tests/test-vectors/bit-oriented/SHA3_256BitMsg.rsp");
}

#[test]
fn test_shake128_bit_messages() {
    bit_vectors("tests/test-vectors/bit-oriented/SHAKE128BitMsg.rsp");
}

#[test]
fn test_raw_shake256_bit_messages() {
    bit_vectors("tests/test-vectors/bit-oriented/RawSHAKE256BitMsg.rsp");
}

#[test]
fn test_keccak_512_bit_messages() {
    bit_vectors("tests/test-vectors/bit-oriented/Keccak_512BitMsg.rsp");
}

#[test]
fn test_hasher_bit_updates() {
    let kat_set = KatSet::load(Path::new(
        "tests/test-vectors/bit-oriented/SHA3_256BitMsg.rsp",
    ));
    for test in kat_set.tests {
        let msg = test.msg_bits();
        let split = msg.len() / 3;
        let mut hasher = Sha3_256::new();
        hasher.update_bits(&msg.truncate(split));
        hasher.update_bits(&msg.substring(split, msg.len() - split).expect("in range"));
        assert_eq!(
            test.get("Output"),
            hex::encode(hasher.finalize()),
            "length {} failed",
            test.len()
        );
    }
}

#[test]
fn test_xof_bit_output() {
    let kat_set = KatSet::load(Path::new(
        "tests/test-vectors/bit-oriented/SHAKE128BitMsg.rsp",
    ));
    let output_bits = kat_set.param_usize("Outputlen");
    for test in kat_set.tests {
        let mut xof = Xof::shake128();
        xof.update_bits(&test.msg_bits());
        let expected = test.bits("Output", output_bits);
        assert_eq!(expected.truncate(37), xof.finalize_bits(37), "length {} failed", test.len());
        assert_eq!(expected, xof.finalize_bits(output_bits), "length {} failed", test.len());
    }
}

// These tests take too long for miri
#![cfg(not(miri))]
use std::path::Path;

use crate::rsp::KatSet;

mod rsp;

#[test]
fn test_small_vectors() {
    let kat_set = KatSet::load(Path::new(
        "tests/test-vectors/byte-oriented/SHA3_512ShortMsg.rsp",
    ));
    assert_eq!(512, kat_set.param_usize("L"));
    for test in kat_set.tests {
        let hash = sha3_sponge::sha3_512(&test.msg());
        assert_eq!(test.get("MD"), hex::encode(hash), "length {} failed", test.len());
    }
}

#[test]
fn test_large_vectors() {
    let kat_set = KatSet::load(Path::new(
        "tests/test-vectors/byte-oriented/SHA3_512LongMsg.rsp",
    ));
    assert_eq!(512, kat_set.param_usize("L"));
    for test in kat_set.tests {
        let hash = sha3_sponge::sha3_512(&test.msg());
        assert_eq!(test.get("MD"), hex::encode(hash), "length {} failed", test.len());
    }
}

#[test]
fn test_compute_by_name() {
    let algorithm = "SHA3-512".parse().expect("known algorithm");
    let kat_set = KatSet::load(Path::new(
        "tests/test-vectors/byte-oriented/SHA3_512LongMsg.rsp",
    ));
    for test in kat_set.tests {
        let hash = sha3_sponge::compute(&test.msg(), algorithm).expect("fixed-output algorithm");
        assert_eq!(test.get("MD"), hex::encode(hash), "length {} failed", test.len());
    }
}

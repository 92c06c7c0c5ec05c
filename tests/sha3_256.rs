// These tests take too long for miri
#![cfg(not(miri))]
use std::path::Path;

use crate::rsp::KatSet;

mod rsp;

#[test]
fn test_small_vectors() {
    let kat_set = KatSet::load(Path::new(
        "tests/test-vectors/byte-oriented/SHA3_256ShortMsg.rsp",
    ));
    assert_eq!(256, kat_set.param_usize("L"));
    for test in kat_set.tests {
        let hash = sha3_sponge::sha3_256(&test.msg());
        assert_eq!(test.get("MD"), hex::encode(hash), "length {} failed", test.len());
    }
}

#[test]
fn test_large_vectors() {
    let kat_set = KatSet::load(Path::new(
        "tests/test-vectors/byte-oriented/SHA3_256LongMsg.rsp",
    ));
    assert_eq!(256, kat_set.param_usize("L"));
    for test in kat_set.tests {
        let hash = sha3_sponge::sha3_256(&test.msg());
        assert_eq!(test.get("MD"), hex::encode(hash), "length {} failed", test.len());
    }
}

#[test]
fn test_incremental_hasher() {
    let kat_set = KatSet::load(Path::new(
        "tests/test-vectors/byte-oriented/SHA3_256ShortMsg.rsp",
    ));
    for test in kat_set.tests {
        let msg = test.msg();
        let mut hasher = sha3_sponge::Sha3_256::new();
        for chunk in msg.chunks(13) {
            hasher.update(chunk);
        }
        assert_eq!(
            test.get("MD"),
            hex::encode(hasher.finalize()),
            "length {} failed",
            test.len()
        );
    }
}

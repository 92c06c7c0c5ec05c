//! SHA-3 Hash Functions
//!
//! This crate provides portable, pure Rust implementations of the SHA-3 hashing
//! functions standardized in [FIPS 202]: SHA3-224/256/384/512, the SHAKE128/256
//! and RawSHAKE128/256 extendable-output functions, and the original
//! Keccak-224/256/384/512.
//!
//! Underneath is a bit-level model of the sponge: a [`Bitstring`] type, a
//! [`SpongeState`] that exposes the 5×5×w lattice through lanes, rows,
//! columns, planes, sheets and slices, the KECCAK-p[b, nr] permutation for
//! every width b from 25 to 1600, and a generic [`Sponge`] that absorbs and
//! squeezes at any rate, optionally reporting every block to a
//! [`SpongeObserver`].
//!
//! # Limitations
//!
//! This software is intended as a learning exercise and not for production use.
//!
//! Performance has thus far not been a priority. Messages are padded as a
//! whole before absorbing, and the incremental [`Hasher`] and [`Xof`] buffer
//! their input until they are finalized.
//!
//! # Example Usage
//! ```
//! # use sha3_sponge::{sha3_256, shake128, Algorithm, compute};
//! #
//! let message = b"your input bytes";
//! let hash: [u8; 32] = sha3_256(message);
//! let expected = "414d4b6d11a92aaeeebe35f9374942f563848d345631bf5537407252dca6b378";
//! assert_eq!(expected, hex::encode(hash));
//!
//! let algorithm: Algorithm = "SHA3-256".parse().unwrap();
//! assert_eq!(hash.to_vec(), compute(message, algorithm).unwrap());
//!
//! let xof = shake128(message, 64);
//! assert_eq!(64, xof.len());
//! ```
//!
//! [FIPS 202]: https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.202.pdf

pub mod algorithm;
pub mod bitstring;
pub mod error;
pub mod hasher;
pub mod permute;
pub mod sponge;
pub mod state;

pub use crate::{
    algorithm::{Algorithm, Domain, Params},
    bitstring::Bitstring,
    error::{Error, Result},
    hasher::{Hasher, Sha3_224, Sha3_256, Sha3_384, Sha3_512, Xof},
    permute::KeccakP,
    sponge::{Phase, Snapshot, Sponge, SpongeConfig, SpongeObserver, StateRecorder},
    state::{SpongeSize, SpongeState},
};

/// Hash `message` with a fixed-output algorithm.
///
/// Fails with [`Error::Config`] for SHAKE and RawSHAKE, which have no
/// digest length; use [`compute_xof`] for those.
pub fn compute(message: &[u8], algorithm: Algorithm) -> Result<Vec<u8>> {
    let bits = algorithm.output_bits().ok_or_else(|| {
        Error::Config(format!("{algorithm} needs an explicit output length"))
    })?;
    Ok(compute_bits(&Bitstring::from_bytes(message), algorithm, bits).into_bytes())
}

/// `len` bytes of output of `algorithm` on `message`.
pub fn compute_xof(message: &[u8], algorithm: Algorithm, len: usize) -> Vec<u8> {
    compute_bits(&Bitstring::from_bytes(message), algorithm, 8 * len).into_bytes()
}

/// Bit-granular variant of [`compute_xof`]: the message and the output may
/// have any length in bits.
pub fn compute_bits(message: &Bitstring, algorithm: Algorithm, output_bits: usize) -> Bitstring {
    Sponge::new(&algorithm.config()).process(message, output_bits)
}

macro_rules! sha3_fn {
    ($name:ident, $algorithm:ident, $bits:literal, $bytes:literal) => {
        #[doc = concat!("SHA-3 Hash with ", $bits, " bits (", $bytes, " bytes) output.")]
        pub fn $name(message: &[u8]) -> [u8; $bytes] {
            let mut output = [0; $bytes];
            let digest = compute_bits(
                &Bitstring::from_bytes(message),
                Algorithm::$algorithm,
                $bits,
            );
            output.copy_from_slice(digest.as_bytes());
            output
        }
    };
}

sha3_fn!(sha3_224, Sha3_224, 224, 28);
sha3_fn!(sha3_256, Sha3_256, 256, 32);
sha3_fn!(sha3_384, Sha3_384, 384, 48);
sha3_fn!(sha3_512, Sha3_512, 512, 64);

/// SHAKE128 with `len` bytes of output.
pub fn shake128(message: &[u8], len: usize) -> Vec<u8> {
    compute_xof(message, Algorithm::Shake128, len)
}

/// SHAKE256 with `len` bytes of output.
pub fn shake256(message: &[u8], len: usize) -> Vec<u8> {
    compute_xof(message, Algorithm::Shake256, len)
}

#[cfg(test)]
mod tests {

    use crate::{
        Algorithm, Bitstring, Error, compute, compute_bits, compute_xof, sha3_224, sha3_256,
        sha3_384, sha3_512, shake128, shake256,
    };

    #[test]
    fn can_hash() {
        let input = b"some input string";
        sha3_256(&input[..]);
    }

    #[test]
    fn compute_matches_fixed_functions() {
        let input = b"abc";
        assert_eq!(sha3_224(input).to_vec(), compute(input, Algorithm::Sha3_224).unwrap());
        assert_eq!(sha3_384(input).to_vec(), compute(input, Algorithm::Sha3_384).unwrap());
        assert_eq!(
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532",
            hex::encode(compute(input, Algorithm::Sha3_256).unwrap())
        );
    }

    #[test]
    fn compute_rejects_xofs() {
        assert!(matches!(
            compute(b"", Algorithm::Shake256),
            Err(Error::Config(_))
        ));
        assert!(compute(b"", Algorithm::RawShake128).is_err());
    }

    #[test]
    fn keccak_256_of_empty_message() {
        assert_eq!(
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
            hex::encode(compute(b"", Algorithm::Keccak256).unwrap())
        );
    }

    #[test]
    fn shake_of_empty_message() {
        assert_eq!(
            "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f",
            hex::encode(shake256(b"", 32))
        );
        assert_eq!(shake128(b"", 300)[..32], shake128(b"", 32)[..]);
    }

    #[test]
    fn raw_shake_is_shake_without_the_extra_ones() {
        let message = Bitstring::from_bytes(b"raw");
        let mut with_ones = message.clone();
        with_ones.append(&"11".parse().unwrap());
        assert_eq!(
            compute_bits(&message, Algorithm::Shake128, 500),
            compute_bits(&with_ones, Algorithm::RawShake128, 500)
        );
    }

    #[test]
    fn fixed_algorithms_extend_like_xofs() {
        let digest = sha3_512(b"xof");
        let long = compute_xof(b"xof", Algorithm::Sha3_512, 200);
        assert_eq!(digest[..], long[..64]);
    }

    #[test]
    fn partial_output_byte() {
        let full = compute_bits(&Bitstring::new(), Algorithm::Sha3_256, 256);
        let short = compute_bits(&Bitstring::new(), Algorithm::Sha3_256, 12);
        // 0xa7 0xff: the low nibble of the second byte survives
        assert_eq!(vec![0xa7, 0x0f], short.as_bytes());
        assert_eq!(full.truncate(12), short);
    }

    #[cfg(not(miri))]
    #[test]
    fn compare_to_libcrux() {
        // Go beyond one block
        for i in 0..300 {
            let input = vec![0; i];
            assert_eq!(
                sha3_224(&input),
                libcrux_sha3::sha224(&input),
                "len {i} sha3-224 differs"
            );
            let my_hash = sha3_256(&input[..]);
            let other_hash = libcrux_sha3::sha256(&input);
            assert_eq!(my_hash, other_hash.as_slice(), "len {i} hash differs");
            assert_eq!(
                sha3_384(&input),
                libcrux_sha3::sha384(&input),
                "len {i} sha3-384 differs"
            );
            assert_eq!(
                sha3_512(&input),
                libcrux_sha3::sha512(&input),
                "len {i} sha3-512 differs"
            );
        }
    }

    #[cfg(not(miri))]
    #[test]
    fn compare_shake_to_libcrux() {
        for i in (0..400).step_by(7) {
            let input: Vec<u8> = (0..i).map(|b| b as u8).collect();
            let other: [u8; 200] = libcrux_sha3::shake128(&input);
            assert_eq!(shake128(&input, 200), other, "len {i} shake128 differs");
            let other: [u8; 137] = libcrux_sha3::shake256(&input);
            assert_eq!(shake256(&input, 137), other, "len {i} shake256 differs");
        }
    }
}

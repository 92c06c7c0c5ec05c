//! Named parameter sets of the SHA-3 family.
//!
//! Every algorithm is SPONGE[KECCAK-f[1600], pad10*1, 1600 - c] with a
//! domain separation suffix (Section 6). Adding a variant means adding a
//! `(capacity, domain, output length)` triple to [`Algorithm::params`].
use std::{fmt, str::FromStr};

use crate::{
    bitstring::Bitstring,
    error::{Error, Result},
    permute::KeccakP,
    sponge::SpongeConfig,
    state::SpongeSize,
};

/// Domain separation suffix appended to the message before padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    /// No suffix: the original KECCAK[c] submission.
    Keccak,
    /// `01`
    Sha3,
    /// `11`
    RawShake,
    /// `1111`, i.e. RawSHAKE of the message followed by `11`.
    Shake,
}

impl Domain {
    /// Suffix bits, first appended bit first.
    pub fn bits(self) -> &'static [bool] {
        match self {
            Domain::Keccak => &[],
            Domain::Sha3 => &[false, true],
            Domain::RawShake => &[true, true],
            Domain::Shake => &[true, true, true, true],
        }
    }

    pub fn suffix(self) -> Bitstring {
        self.bits().iter().copied().collect()
    }
}

/// Parameters defining an [`Algorithm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Params {
    pub capacity: usize,
    pub domain: Domain,
    /// `None` for extendable-output functions.
    pub output_bits: Option<usize>,
}

const fn params(capacity: usize, domain: Domain, output_bits: Option<usize>) -> Params {
    Params {
        capacity,
        domain,
        output_bits,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Shake128,
    Shake256,
    RawShake128,
    RawShake256,
    Keccak224,
    Keccak256,
    Keccak384,
    Keccak512,
}

impl Algorithm {
    pub const ALL: [Algorithm; 12] = [
        Algorithm::Sha3_224,
        Algorithm::Sha3_256,
        Algorithm::Sha3_384,
        Algorithm::Sha3_512,
        Algorithm::Shake128,
        Algorithm::Shake256,
        Algorithm::RawShake128,
        Algorithm::RawShake256,
        Algorithm::Keccak224,
        Algorithm::Keccak256,
        Algorithm::Keccak384,
        Algorithm::Keccak512,
    ];

    pub const fn params(self) -> Params {
        use Domain::*;
        match self {
            Algorithm::Sha3_224 => params(448, Sha3, Some(224)),
            Algorithm::Sha3_256 => params(512, Sha3, Some(256)),
            Algorithm::Sha3_384 => params(768, Sha3, Some(384)),
            Algorithm::Sha3_512 => params(1024, Sha3, Some(512)),
            Algorithm::Shake128 => params(256, Shake, None),
            Algorithm::Shake256 => params(512, Shake, None),
            Algorithm::RawShake128 => params(256, RawShake, None),
            Algorithm::RawShake256 => params(512, RawShake, None),
            Algorithm::Keccak224 => params(448, Keccak, Some(224)),
            Algorithm::Keccak256 => params(512, Keccak, Some(256)),
            Algorithm::Keccak384 => params(768, Keccak, Some(384)),
            Algorithm::Keccak512 => params(1024, Keccak, Some(512)),
        }
    }

    /// SHA3-`bits`. Only 224, 256, 384 and 512 exist.
    pub fn sha3(bits: usize) -> Result<Self> {
        match bits {
            224 => Ok(Algorithm::Sha3_224),
            256 => Ok(Algorithm::Sha3_256),
            384 => Ok(Algorithm::Sha3_384),
            512 => Ok(Algorithm::Sha3_512),
            _ => Err(Error::config(format!("no SHA3 variant with {bits} bits"))),
        }
    }

    /// KECCAK[c = 2 * `bits`] truncated to `bits`.
    pub fn keccak(bits: usize) -> Result<Self> {
        match bits {
            224 => Ok(Algorithm::Keccak224),
            256 => Ok(Algorithm::Keccak256),
            384 => Ok(Algorithm::Keccak384),
            512 => Ok(Algorithm::Keccak512),
            _ => Err(Error::config(format!("no Keccak variant with {bits} bits"))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sha3_224 => "SHA3-224",
            Algorithm::Sha3_256 => "SHA3-256",
            Algorithm::Sha3_384 => "SHA3-384",
            Algorithm::Sha3_512 => "SHA3-512",
            Algorithm::Shake128 => "SHAKE128",
            Algorithm::Shake256 => "SHAKE256",
            Algorithm::RawShake128 => "RawSHAKE128",
            Algorithm::RawShake256 => "RawSHAKE256",
            Algorithm::Keccak224 => "Keccak-224",
            Algorithm::Keccak256 => "Keccak-256",
            Algorithm::Keccak384 => "Keccak-384",
            Algorithm::Keccak512 => "Keccak-512",
        }
    }

    pub fn capacity(self) -> usize {
        self.params().capacity
    }

    pub fn rate(self) -> usize {
        SpongeSize::W64.b() - self.capacity()
    }

    pub fn domain(self) -> Domain {
        self.params().domain
    }

    /// Digest length of fixed-output algorithms.
    pub fn output_bits(self) -> Option<usize> {
        self.params().output_bits
    }

    pub fn is_extendable(self) -> bool {
        self.output_bits().is_none()
    }

    /// Sponge parameters for this algorithm.
    pub fn config(self) -> SpongeConfig {
        SpongeConfig {
            permutation: KeccakP::keccak_f(SpongeSize::W64),
            rate: self.rate(),
            suffix: self.domain().suffix(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the names printed by [`Algorithm::name`], ignoring ASCII case.
impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::config(format!("unknown algorithm {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{Algorithm, Domain};
    use crate::error::Error;

    #[test]
    fn sha3_capacity_is_twice_the_digest() {
        for bits in [224, 256, 384, 512] {
            let algorithm = Algorithm::sha3(bits).unwrap();
            assert_eq!(2 * bits, algorithm.capacity());
            assert_eq!(Some(bits), algorithm.output_bits());
            assert_eq!(Domain::Sha3, algorithm.domain());
        }
        assert!(matches!(Algorithm::sha3(128), Err(Error::Config(_))));
        assert!(Algorithm::keccak(100).is_err());
    }

    #[test]
    fn xofs_have_no_fixed_length() {
        assert!(Algorithm::Shake128.is_extendable());
        assert!(Algorithm::RawShake256.is_extendable());
        assert!(!Algorithm::Keccak256.is_extendable());
        assert_eq!(1344, Algorithm::Shake128.rate());
        assert_eq!(1088, Algorithm::RawShake256.rate());
    }

    #[test]
    fn suffixes() {
        assert_eq!("01", Domain::Sha3.suffix().to_bin_string(0));
        assert_eq!("11", Domain::RawShake.suffix().to_bin_string(0));
        assert_eq!("1111", Domain::Shake.suffix().to_bin_string(0));
        assert!(Domain::Keccak.suffix().is_empty());
        assert_eq!(Domain::Shake.suffix(), Algorithm::Shake256.config().suffix().clone());
    }

    #[test]
    fn names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm, algorithm.to_string().parse::<Algorithm>().unwrap());
        }
        assert_eq!(Algorithm::Shake128, "shake128".parse::<Algorithm>().unwrap());
        assert!(matches!(
            "SHA3-1024".parse::<Algorithm>(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn configs_use_keccak_f_1600() {
        for algorithm in Algorithm::ALL {
            let config = algorithm.config();
            assert_eq!(1600, config.size().b());
            assert_eq!(24, config.rounds());
            assert_eq!(algorithm.capacity(), config.capacity());
        }
    }
}

//! Incremental front ends for the one-shot sponge.
//!
//! Input is buffered until [`Hasher::finalize`] or [`Xof::finalize`], which
//! run the whole message through a fresh [`Sponge`].
use crate::{
    algorithm::Algorithm,
    bitstring::Bitstring,
    sponge::Sponge,
};

pub struct Hasher<S: HashSize> {
    message: Bitstring,
    _size: std::marker::PhantomData<S>,
}

/// Marker type for 224-bit output.
pub struct Out224;
/// Marker type for 256-bit output.
pub struct Out256;
/// Marker type for 384-bit output.
pub struct Out384;
/// Marker type for 512-bit output.
pub struct Out512;

/// SHA-3 [`Hasher`] with 224-bit output.
pub type Sha3_224 = Hasher<Out224>;
/// SHA-3 [`Hasher`] with 256-bit output.
pub type Sha3_256 = Hasher<Out256>;
/// SHA-3 [`Hasher`] with 384-bit output.
pub type Sha3_384 = Hasher<Out384>;
/// SHA-3 [`Hasher`] with 512-bit output.
pub type Sha3_512 = Hasher<Out512>;

impl<S: HashSize> Hasher<S> {
    pub fn new() -> Self {
        Hasher {
            message: Bitstring::new(),
            _size: std::marker::PhantomData,
        }
    }

    pub fn update(&mut self, msg: &[u8]) {
        self.message.append_bytes(msg);
    }

    /// Append a message whose length need not be a multiple of 8.
    pub fn update_bits(&mut self, bits: &Bitstring) {
        self.message.append(bits);
    }

    pub fn finalize(self) -> S::Output {
        let algorithm = S::ALGORITHM;
        let bits = algorithm
            .output_bits()
            .expect("hash sizes are fixed-output algorithms");
        let digest = Sponge::new(&algorithm.config()).process(&self.message, bits);
        let mut output = S::Output::default();
        output.as_mut().copy_from_slice(digest.as_bytes());
        output
    }
}

impl<S: HashSize> Default for Hasher<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Digest size of a [`Hasher`], selecting one of the fixed-output SHA3 algorithms.
#[allow(private_bounds)]
pub trait HashSize: Params {
    type Output: Output;
}

trait Params {
    const ALGORITHM: Algorithm;
}

impl HashSize for Out224 {
    type Output = [u8; 28];
}

impl Params for Out224 {
    const ALGORITHM: Algorithm = Algorithm::Sha3_224;
}

impl HashSize for Out256 {
    type Output = [u8; 32];
}

impl Params for Out256 {
    const ALGORITHM: Algorithm = Algorithm::Sha3_256;
}

impl HashSize for Out384 {
    type Output = [u8; 48];
}

impl Params for Out384 {
    const ALGORITHM: Algorithm = Algorithm::Sha3_384;
}

impl HashSize for Out512 {
    type Output = [u8; 64];
}

impl Params for Out512 {
    const ALGORITHM: Algorithm = Algorithm::Sha3_512;
}

// The normal Default trait is not implemented for arrays with len > 32, so we
// define this helper trait
pub trait Output: AsMut<[u8]> + private::Sealed {
    fn default() -> Self;
}

impl<const N: usize> Output for [u8; N] {
    fn default() -> Self {
        [0; N]
    }
}

mod private {
    impl<const N: usize> Sealed for [u8; N] {}

    pub trait Sealed {}
}

/// Extendable-output counterpart of [`Hasher`].
///
/// Any [`Algorithm`] works; fixed-output ones are squeezed past their digest
/// length like an XOF.
#[derive(Clone, Debug)]
pub struct Xof {
    algorithm: Algorithm,
    message: Bitstring,
}

impl Xof {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            message: Bitstring::new(),
        }
    }

    pub fn shake128() -> Self {
        Self::new(Algorithm::Shake128)
    }

    pub fn shake256() -> Self {
        Self::new(Algorithm::Shake256)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn update(&mut self, msg: &[u8]) {
        self.message.append_bytes(msg);
    }

    pub fn update_bits(&mut self, bits: &Bitstring) {
        self.message.append(bits);
    }

    /// `len` bytes of output.
    pub fn finalize(&self, len: usize) -> Vec<u8> {
        self.finalize_bits(8 * len).into_bytes()
    }

    pub fn finalize_bits(&self, bits: usize) -> Bitstring {
        Sponge::new(&self.algorithm.config()).process(&self.message, bits)
    }
}

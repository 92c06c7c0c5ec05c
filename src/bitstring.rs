//! Variable-length, bit-addressable byte buffer.
//!
//! Bit `i` of a [`Bitstring`] lives in byte `i / 8` at position `i % 8`,
//! counted from the least significant bit. This is the bit order FIPS 202
//! uses when it maps byte strings onto the state (see Appendix B.1), so a
//! byte message converts into a bitstring without any reordering.
use std::{
    fmt,
    iter::FusedIterator,
    ops::{BitAndAssign, BitOrAssign, BitXorAssign},
    str::FromStr,
};

use rand::RngCore;

use crate::error::{Error, Result};

const BLOCK_BITS: usize = 8;

/// A sequence of `len` bits stored in `ceil(len / 8)` bytes.
///
/// Bits of the trailing byte at positions `>= len` are always zero, which is
/// what makes the derived equality and hashing compare by value.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitstring {
    data: Vec<u8>,
    len: usize,
}

fn byte_count(len: usize) -> usize {
    len.div_ceil(BLOCK_BITS)
}

/// Mask selecting the low `count % 8` bits of a byte, or the whole byte if
/// `count` is a multiple of 8.
fn lower_mask(count: usize) -> u8 {
    match count % BLOCK_BITS {
        0 => 0xff,
        n => (1_u8 << n) - 1,
    }
}

fn byte_bits(byte: u8) -> impl Iterator<Item = bool> {
    (0..BLOCK_BITS).map(move |i| (byte >> i) & 1 == 1)
}

impl Bitstring {
    /// The empty bitstring.
    pub fn new() -> Self {
        Self::default()
    }

    /// `len` zero bits.
    pub fn zeroes(len: usize) -> Self {
        Self {
            data: vec![0; byte_count(len)],
            len,
        }
    }

    /// `len` one bits.
    pub fn ones(len: usize) -> Self {
        let mut ones = Self {
            data: vec![0xff; byte_count(len)],
            len,
        };
        ones.mask_tail();
        ones
    }

    /// All bits of `bytes`, `8 * bytes.len()` in total.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
            len: bytes.len() * BLOCK_BITS,
        }
    }

    /// The first `len` bits of `bytes`.
    ///
    /// Fails if `bytes` holds fewer than `len` bits.
    pub fn from_bytes_with_len(bytes: &[u8], len: usize) -> Result<Self> {
        let available = bytes.len() * BLOCK_BITS;
        if len > available {
            return Err(Error::Range {
                index: len,
                len: available,
            });
        }
        let mut bits = Self {
            data: bytes[..byte_count(len)].to_vec(),
            len,
        };
        bits.mask_tail();
        Ok(bits)
    }

    /// `len` uniformly random bits, used for fuzzing and statistical tests.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> Self {
        let mut data = vec![0; byte_count(len)];
        rng.fill_bytes(&mut data);
        let mut bits = Self { data, len };
        bits.mask_tail();
        bits
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of backing bytes, `ceil(len / 8)`.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Mutable access to the backing bytes for whole-byte writers.
    ///
    /// Callers must leave the bits past `len` untouched.
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn get(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.bit(index))
    }

    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        self.check_index(index)?;
        self.put(index, value);
        Ok(())
    }

    /// Exchange the bits at `a` and `b`.
    pub fn swap_bits(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        let (bit_a, bit_b) = (self.bit(a), self.bit(b));
        self.put(a, bit_b);
        self.put(b, bit_a);
        Ok(())
    }

    /// Unchecked read; `index < len` is the caller's invariant.
    #[inline]
    pub(crate) fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        (self.data[index / BLOCK_BITS] >> (index % BLOCK_BITS)) & 1 == 1
    }

    /// Unchecked write; `index < len` is the caller's invariant.
    #[inline]
    pub(crate) fn put(&mut self, index: usize, value: bool) {
        debug_assert!(index < self.len);
        let mask = 1_u8 << (index % BLOCK_BITS);
        if value {
            self.data[index / BLOCK_BITS] |= mask;
        } else {
            self.data[index / BLOCK_BITS] &= !mask;
        }
    }

    /// Iterate over the bits, starting at bit 0.
    pub fn bits(&self) -> Bits<'_> {
        Bits {
            bitstring: self,
            front: 0,
            back: self.len,
        }
    }

    /// Append a single bit.
    pub fn push(&mut self, bit: bool) {
        if self.len % BLOCK_BITS == 0 {
            self.data.push(0);
        }
        self.len += 1;
        if bit {
            self.put(self.len - 1, true);
        }
    }

    /// Append `other` after the last bit of `self`.
    pub fn append(&mut self, other: &Bitstring) {
        if self.len % BLOCK_BITS == 0 {
            // byte aligned: the tail of `other` is already zero-masked
            self.data.extend_from_slice(&other.data);
            self.len += other.len;
        } else {
            self.extend(other.bits());
        }
    }

    /// Append all bits of `bytes`.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        if self.len % BLOCK_BITS == 0 {
            self.data.extend_from_slice(bytes);
            self.len += bytes.len() * BLOCK_BITS;
        } else {
            self.extend(bytes.iter().copied().flat_map(byte_bits));
        }
    }

    /// Insert `other` in front of bit 0 of `self`.
    pub fn prepend(&mut self, other: &Bitstring) {
        let mut joined = other.clone();
        joined.append(self);
        *self = joined;
    }

    /// Insert all bits of `bytes` in front of bit 0 of `self`.
    pub fn prepend_bytes(&mut self, bytes: &[u8]) {
        self.data.splice(0..0, bytes.iter().copied());
        self.len += bytes.len() * BLOCK_BITS;
    }

    /// The first `len` bits. `len` is clamped to the current length.
    pub fn truncate(&self, len: usize) -> Bitstring {
        let len = len.min(self.len);
        let mut bits = Self {
            data: self.data[..byte_count(len)].to_vec(),
            len,
        };
        bits.mask_tail();
        bits
    }

    /// The `len` bits starting at `index`.
    pub fn substring(&self, index: usize, len: usize) -> Result<Bitstring> {
        let end = index.checked_add(len).ok_or(Error::Range {
            index: usize::MAX,
            len: self.len,
        })?;
        if end > self.len {
            return Err(Error::Range {
                index: end,
                len: self.len,
            });
        }
        if index % BLOCK_BITS == 0 && len % BLOCK_BITS == 0 {
            let start = index / BLOCK_BITS;
            return Ok(Self::from_bytes(&self.data[start..start + len / BLOCK_BITS]));
        }
        Ok((index..end).map(|i| self.bit(i)).collect())
    }

    /// Zero every bit, keeping the length.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn xor(&mut self, other: &Bitstring) -> Result<()> {
        self.combine(other, |a, b| *a ^= b)
    }

    pub fn and(&mut self, other: &Bitstring) -> Result<()> {
        self.combine(other, |a, b| *a &= b)
    }

    pub fn or(&mut self, other: &Bitstring) -> Result<()> {
        self.combine(other, |a, b| *a |= b)
    }

    fn combine(&mut self, other: &Bitstring, op: impl Fn(&mut u8, u8)) -> Result<()> {
        if self.len != other.len {
            return Err(Error::LengthMismatch {
                left: self.len,
                right: other.len,
            });
        }
        self.data
            .iter_mut()
            .zip(&other.data)
            .for_each(|(a, b)| op(a, *b));
        Ok(())
    }

    /// Hex rendering of the backing bytes in storage order.
    ///
    /// With `spacing`, bytes are separated by a single space.
    pub fn to_hex_string(&self, spacing: bool, uppercase: bool) -> String {
        let hex = if uppercase {
            hex::encode_upper(&self.data)
        } else {
            hex::encode(&self.data)
        };
        if spacing {
            group(&hex, 2)
        } else {
            hex
        }
    }

    /// Binary rendering, bit 0 first. A non-zero `spacing` inserts a space
    /// after every `spacing` bits.
    pub fn to_bin_string(&self, spacing: usize) -> String {
        let bin: String = self.bits().map(|b| if b { '1' } else { '0' }).collect();
        if spacing > 0 { group(&bin, spacing) } else { bin }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(Error::Range {
                index,
                len: self.len,
            })
        }
    }

    fn mask_tail(&mut self) {
        if let Some(last) = self.data.last_mut() {
            *last &= lower_mask(self.len);
        }
    }
}

fn group(s: &str, size: usize) -> String {
    let mut grouped = String::with_capacity(s.len() + s.len() / size);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && i % size == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $op:tt) => {
        /// Panics if the lengths differ.
        impl $trait<&Bitstring> for Bitstring {
            fn $method(&mut self, rhs: &Bitstring) {
                assert_eq!(self.len, rhs.len, "bitstring length mismatch");
                self.data
                    .iter_mut()
                    .zip(&rhs.data)
                    .for_each(|(a, b)| *a $op b);
            }
        }
    };
}

impl_assign_op!(BitXorAssign, bitxor_assign, ^=);
impl_assign_op!(BitAndAssign, bitand_assign, &=);
impl_assign_op!(BitOrAssign, bitor_assign, |=);

impl Extend<bool> for Bitstring {
    fn extend<T: IntoIterator<Item = bool>>(&mut self, iter: T) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl FromIterator<bool> for Bitstring {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut bits = Bitstring::new();
        bits.extend(iter);
        bits
    }
}

impl<'a> IntoIterator for &'a Bitstring {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits()
    }
}

/// Parses `0`/`1` characters, bit 0 first. Whitespace is ignored.
impl FromStr for Bitstring {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut bits = Bitstring::new();
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                c if c.is_whitespace() => {}
                found => return Err(Error::Format { position, found }),
            }
        }
        Ok(bits)
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.len, self.to_hex_string(true, true))
    }
}

impl fmt::Debug for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitstring")
            .field("len", &self.len)
            .field("bits", &self.to_bin_string(8))
            .finish()
    }
}

/// Iterator over the bits of a [`Bitstring`].
#[derive(Clone)]
pub struct Bits<'a> {
    bitstring: &'a Bitstring,
    front: usize,
    back: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        let bit = self.bitstring.bit(self.front);
        self.front += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Bits<'_> {
    fn next_back(&mut self) -> Option<bool> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.bitstring.bit(self.back))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl FusedIterator for Bits<'_> {}

//! The 5×5×w state lattice of KECCAK-p.
//!
//! The state is one [`Bitstring`] of `b = 25 * w` bits. Bit `(x, y, z)` sits
//! at index `w * (5 * y + x) + z` (FIPS 202, Section 3.1.2), so each lane is
//! a contiguous run of `w` bits.
//!
//! Named cross-sections (rows, columns, lanes, planes, sheets, slices) are
//! described by [`Structure`] and read through [`View`]s, which borrow the
//! state instead of copying its bits.
use std::fmt;

use crate::{
    bitstring::Bitstring,
    error::{Error, Result},
};

/// Width parameters of a KECCAK-p permutation: `b` state bits, lanes of
/// `w = b / 25` bits and `l = log2(w)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpongeSize {
    b: usize,
}

impl SpongeSize {
    pub const W1: SpongeSize = SpongeSize { b: 25 };
    pub const W2: SpongeSize = SpongeSize { b: 50 };
    pub const W4: SpongeSize = SpongeSize { b: 100 };
    pub const W8: SpongeSize = SpongeSize { b: 200 };
    pub const W16: SpongeSize = SpongeSize { b: 400 };
    pub const W32: SpongeSize = SpongeSize { b: 800 };
    pub const W64: SpongeSize = SpongeSize { b: 1600 };

    /// The seven widths of Table 1, smallest first.
    pub const ALL: [SpongeSize; 7] = [
        Self::W1,
        Self::W2,
        Self::W4,
        Self::W8,
        Self::W16,
        Self::W32,
        Self::W64,
    ];

    /// Look up the size with `b` state bits.
    pub fn from_width(b: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.b == b)
            .ok_or_else(|| Error::config(format!("unsupported state width {b}")))
    }

    pub const fn b(self) -> usize {
        self.b
    }

    pub const fn w(self) -> usize {
        self.b / 25
    }

    pub const fn l(self) -> usize {
        self.w().trailing_zeros() as usize
    }

    /// Mask selecting the `w` low bits of a lane word.
    pub(crate) const fn lane_mask(self) -> u64 {
        match self.w() {
            64 => u64::MAX,
            w => (1 << w) - 1,
        }
    }
}

impl fmt::Display for SpongeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b={}, w={}, l={}", self.b(), self.w(), self.l())
    }
}

/// Coordinates of a single bit in the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

/// A named cross-section of the lattice, identified by its fixed
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Structure {
    /// Fixed `(y, z)`, 5 bits along `x`.
    Row { y: usize, z: usize },
    /// Fixed `(x, z)`, 5 bits along `y`.
    Column { x: usize, z: usize },
    /// Fixed `(x, y)`, `w` bits along `z`.
    Lane { x: usize, y: usize },
    /// Fixed `y`, `5 * w` bits, `z` fastest then `x`.
    Plane { y: usize },
    /// Fixed `x`, `5 * w` bits, `z` fastest then `y`.
    Sheet { x: usize },
    /// Fixed `z`, 25 bits, `x` fastest then `y`.
    Slice { z: usize },
}

impl Structure {
    pub fn kind(self) -> Kind {
        match self {
            Structure::Row { .. } => Kind::Rows,
            Structure::Column { .. } => Kind::Columns,
            Structure::Lane { .. } => Kind::Lanes,
            Structure::Plane { .. } => Kind::Planes,
            Structure::Sheet { .. } => Kind::Sheets,
            Structure::Slice { .. } => Kind::Slices,
        }
    }

    /// Positions of the structure's bits in traversal order.
    ///
    /// Coordinates are not validated here; see [`SpongeState::view`].
    pub fn positions(self, size: SpongeSize) -> Positions {
        Positions::new(Walk::One(self), size, self.kind().bit_len(size))
    }

    /// The structures of `kind` that make up this one.
    ///
    /// Planes split into lanes along `x` or rows along `z`, sheets into
    /// columns along `z` or lanes along `y`, slices into columns along `x`
    /// or rows along `y`. Any other pairing is an [`Error::Config`].
    pub fn substructures(
        self,
        kind: Kind,
        size: SpongeSize,
    ) -> Result<impl Iterator<Item = Structure>> {
        let count = match (self, kind) {
            (Structure::Plane { .. } | Structure::Sheet { .. }, Kind::Lanes)
            | (Structure::Slice { .. }, Kind::Columns | Kind::Rows) => 5,
            (Structure::Plane { .. }, Kind::Rows) | (Structure::Sheet { .. }, Kind::Columns) => {
                size.w()
            }
            _ => {
                return Err(Error::config(format!(
                    "{:?} is not made of {kind:?}",
                    self.kind()
                )));
            }
        };
        Ok((0..count).map(move |i| match (self, kind) {
            (Structure::Plane { y }, Kind::Lanes) => Structure::Lane { x: i, y },
            (Structure::Plane { y }, _) => Structure::Row { y, z: i },
            (Structure::Sheet { x }, Kind::Columns) => Structure::Column { x, z: i },
            (Structure::Sheet { x }, _) => Structure::Lane { x, y: i },
            (Structure::Slice { z }, Kind::Columns) => Structure::Column { x: i, z },
            (Structure::Slice { z }, _) => Structure::Row { y: i, z },
            _ => unreachable!(),
        }))
    }

    fn check(self, size: SpongeSize) -> Result<()> {
        let (xy, z) = match self {
            Structure::Row { y, z } => (y, Some(z)),
            Structure::Column { x, z } => (x, Some(z)),
            Structure::Lane { x, y } => (x.max(y), None),
            Structure::Plane { y } => (y, None),
            Structure::Sheet { x } => (x, None),
            Structure::Slice { z } => (0, Some(z)),
        };
        check_coordinate(xy, 5)?;
        z.map_or(Ok(()), |z| check_coordinate(z, size.w()))
    }
}

/// One family of [`Structure`]s, covering the whole state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Rows,
    Columns,
    Lanes,
    Planes,
    Sheets,
    Slices,
}

impl Kind {
    /// Number of bits in one structure of this kind.
    pub fn bit_len(self, size: SpongeSize) -> usize {
        match self {
            Kind::Rows | Kind::Columns => 5,
            Kind::Lanes => size.w(),
            Kind::Planes | Kind::Sheets => 5 * size.w(),
            Kind::Slices => 25,
        }
    }

    /// Number of structures of this kind in the state.
    pub fn count(self, size: SpongeSize) -> usize {
        size.b() / self.bit_len(size)
    }

    /// All structures of this kind.
    ///
    /// Rows walk `z` within `y`, columns walk `z` within `x`, lanes walk `x`
    /// within `y`.
    pub fn structures(self, size: SpongeSize) -> impl Iterator<Item = Structure> {
        let w = size.w();
        (0..self.count(size)).map(move |i| match self {
            Kind::Rows => Structure::Row { y: i / w, z: i % w },
            Kind::Columns => Structure::Column { x: i / w, z: i % w },
            Kind::Lanes => Structure::Lane { x: i % 5, y: i / 5 },
            Kind::Planes => Structure::Plane { y: i },
            Kind::Sheets => Structure::Sheet { x: i },
            Kind::Slices => Structure::Slice { z: i },
        })
    }

    /// Positions of every state bit, structure after structure.
    ///
    /// The coordinate that varies inside one structure runs fastest, the
    /// coordinates that identify the structure run outermost.
    pub fn positions(self, size: SpongeSize) -> Positions {
        Positions::new(Walk::All(self), size, size.b())
    }
}

#[derive(Clone, Copy, Debug)]
enum Walk {
    One(Structure),
    All(Kind),
}

/// Iterator over lattice positions in a fixed traversal order.
#[derive(Clone, Debug)]
pub struct Positions {
    walk: Walk,
    w: usize,
    next: usize,
    len: usize,
}

impl Positions {
    fn new(walk: Walk, size: SpongeSize, len: usize) -> Self {
        Self {
            walk,
            w: size.w(),
            next: 0,
            len,
        }
    }

    fn at(&self, i: usize) -> Position {
        let w = self.w;
        let (x, y, z) = match self.walk {
            Walk::One(Structure::Row { y, z }) => (i, y, z),
            Walk::One(Structure::Column { x, z }) => (x, i, z),
            Walk::One(Structure::Lane { x, y }) => (x, y, i),
            Walk::One(Structure::Plane { y }) => (i / w, y, i % w),
            Walk::One(Structure::Sheet { x }) => (x, i / w, i % w),
            Walk::One(Structure::Slice { z }) => (i % 5, i / 5, z),
            Walk::All(Kind::Rows) => (i % 5, i / (5 * w), (i / 5) % w),
            Walk::All(Kind::Columns) => (i / (5 * w), i % 5, (i / 5) % w),
            Walk::All(Kind::Lanes | Kind::Planes) => ((i / w) % 5, i / (5 * w), i % w),
            Walk::All(Kind::Sheets) => (i / (5 * w), (i / w) % 5, i % w),
            Walk::All(Kind::Slices) => (i % 5, (i / 5) % 5, i / 25),
        };
        Position { x, y, z }
    }
}

impl Iterator for Positions {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.next == self.len {
            return None;
        }
        let position = self.at(self.next);
        self.next += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {}

fn check_coordinate(value: usize, bound: usize) -> Result<()> {
    if value < bound {
        Ok(())
    } else {
        Err(Error::Range {
            index: value,
            len: bound,
        })
    }
}

/// State of a sponge: `b` bits split into `rate` outer bits and
/// `b - rate` capacity bits.
#[derive(Clone, PartialEq, Eq)]
pub struct SpongeState {
    bits: Bitstring,
    size: SpongeSize,
    rate: usize,
}

impl SpongeState {
    /// An all-zero state. Fails unless `1 <= rate < b`.
    pub fn new(size: SpongeSize, rate: usize) -> Result<Self> {
        check_rate(size, rate)?;
        Ok(Self {
            bits: Bitstring::zeroes(size.b()),
            size,
            rate,
        })
    }

    /// An all-zero state for parameters validated elsewhere.
    pub(crate) fn zeroed(size: SpongeSize, rate: usize) -> Self {
        debug_assert!(check_rate(size, rate).is_ok());
        Self {
            bits: Bitstring::zeroes(size.b()),
            size,
            rate,
        }
    }

    /// Wrap existing state bits; the size follows from their length.
    pub fn from_bitstring(bits: Bitstring, rate: usize) -> Result<Self> {
        let size = SpongeSize::from_width(bits.len())?;
        check_rate(size, rate)?;
        Ok(Self { bits, size, rate })
    }

    pub fn size(&self) -> SpongeSize {
        self.size
    }

    pub fn rate(&self) -> usize {
        self.rate
    }

    pub fn capacity(&self) -> usize {
        self.size.b() - self.rate
    }

    pub fn bitstring(&self) -> &Bitstring {
        &self.bits
    }

    /// Replace all state bits. The length must stay `b`.
    pub fn set_bitstring(&mut self, bits: Bitstring) -> Result<()> {
        if bits.len() != self.size.b() {
            return Err(Error::LengthMismatch {
                left: self.size.b(),
                right: bits.len(),
            });
        }
        self.bits = bits;
        Ok(())
    }

    /// Zero every bit, keeping size and rate.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// XOR a full `b`-bit block into the state.
    ///
    /// Panics if `block` is not exactly `b` bits long.
    pub(crate) fn xor_block(&mut self, block: &Bitstring) {
        self.bits ^= block;
    }

    /// Flat bit index of `(x, y, z)`.
    pub fn index(&self, x: usize, y: usize, z: usize) -> Result<usize> {
        self.check_position(x, y, z)?;
        Ok(self.offset(x, y, z))
    }

    fn offset(&self, x: usize, y: usize, z: usize) -> usize {
        self.size.w() * (5 * y + x) + z
    }

    /// Inverse of [`SpongeState::index`].
    pub fn coordinates(&self, index: usize) -> Result<Position> {
        check_coordinate(index, self.size.b())?;
        let w = self.size.w();
        let lane = index / w;
        Ok(Position {
            x: lane % 5,
            y: lane / 5,
            z: index % w,
        })
    }

    pub fn get(&self, index: usize) -> Result<bool> {
        self.bits.get(index)
    }

    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        self.bits.set(index, value)
    }

    pub fn bit(&self, x: usize, y: usize, z: usize) -> Result<bool> {
        Ok(self.bits.bit(self.index(x, y, z)?))
    }

    pub fn set_bit(&mut self, x: usize, y: usize, z: usize, value: bool) -> Result<()> {
        let index = self.index(x, y, z)?;
        self.bits.put(index, value);
        Ok(())
    }

    /// Borrow a cross-section of the state.
    pub fn view(&self, structure: Structure) -> Result<View<'_>> {
        structure.check(self.size)?;
        Ok(View {
            state: self,
            structure,
        })
    }

    pub fn row(&self, y: usize, z: usize) -> Result<View<'_>> {
        self.view(Structure::Row { y, z })
    }

    pub fn column(&self, x: usize, z: usize) -> Result<View<'_>> {
        self.view(Structure::Column { x, z })
    }

    pub fn lane(&self, x: usize, y: usize) -> Result<View<'_>> {
        self.view(Structure::Lane { x, y })
    }

    pub fn plane(&self, y: usize) -> Result<View<'_>> {
        self.view(Structure::Plane { y })
    }

    pub fn sheet(&self, x: usize) -> Result<View<'_>> {
        self.view(Structure::Sheet { x })
    }

    pub fn slice(&self, z: usize) -> Result<View<'_>> {
        self.view(Structure::Slice { z })
    }

    /// Views of every structure of one kind, in [`Kind::structures`] order.
    pub fn views(&self, kind: Kind) -> impl Iterator<Item = View<'_>> {
        kind.structures(self.size).map(move |structure| View {
            state: self,
            structure,
        })
    }

    /// Overwrite the bits of `structure` with `bits`, in traversal order.
    ///
    /// A shorter sequence updates a prefix of the structure; a longer one is
    /// rejected before anything is written.
    pub fn set_structure(
        &mut self,
        structure: Structure,
        bits: impl IntoIterator<Item = bool>,
    ) -> Result<()> {
        structure.check(self.size)?;
        self.apply(structure.positions(self.size), bits, |_, bit| bit)
    }

    /// XOR `bits` into `structure`, in traversal order.
    pub fn xor_structure(
        &mut self,
        structure: Structure,
        bits: impl IntoIterator<Item = bool>,
    ) -> Result<()> {
        structure.check(self.size)?;
        self.apply(structure.positions(self.size), bits, |old, bit| old ^ bit)
    }

    /// Overwrite the whole state, walking it structure by structure.
    pub fn set_all(&mut self, kind: Kind, bits: impl IntoIterator<Item = bool>) -> Result<()> {
        self.apply(kind.positions(self.size), bits, |_, bit| bit)
    }

    /// XOR into the whole state, walking it structure by structure.
    pub fn xor_all(&mut self, kind: Kind, bits: impl IntoIterator<Item = bool>) -> Result<()> {
        self.apply(kind.positions(self.size), bits, |old, bit| old ^ bit)
    }

    fn apply(
        &mut self,
        positions: Positions,
        bits: impl IntoIterator<Item = bool>,
        op: impl Fn(bool, bool) -> bool,
    ) -> Result<()> {
        let bits: Vec<bool> = bits.into_iter().collect();
        if bits.len() > positions.len() {
            return Err(Error::Range {
                index: bits.len(),
                len: positions.len(),
            });
        }
        for (Position { x, y, z }, bit) in positions.zip(bits) {
            let index = self.offset(x, y, z);
            let old = self.bits.bit(index);
            self.bits.put(index, op(old, bit));
        }
        Ok(())
    }

    /// Lane `(x, y)` as an integer, bit `z` of the lane in bit `z` of the
    /// word.
    pub fn lane_word(&self, x: usize, y: usize) -> Result<u64> {
        check_coordinate(x, 5)?;
        check_coordinate(y, 5)?;
        Ok(self.read_lane(x, y))
    }

    /// Overwrite lane `(x, y)` with the `w` low bits of `word`.
    pub fn set_lane_word(&mut self, x: usize, y: usize, word: u64) -> Result<()> {
        check_coordinate(x, 5)?;
        check_coordinate(y, 5)?;
        self.write_lane(x, y, word);
        Ok(())
    }

    fn read_lane(&self, x: usize, y: usize) -> u64 {
        let w = self.size.w();
        let start = self.offset(x, y, 0);
        if w % 8 == 0 {
            let bytes = &self.bits.as_bytes()[start / 8..(start + w) / 8];
            bytes
                .iter()
                .rev()
                .fold(0, |word, &byte| (word << 8) | u64::from(byte))
        } else {
            (0..w).fold(0, |word, z| word | (u64::from(self.bits.bit(start + z)) << z))
        }
    }

    fn write_lane(&mut self, x: usize, y: usize, word: u64) {
        let w = self.size.w();
        let word = word & self.size.lane_mask();
        let start = self.offset(x, y, 0);
        if w % 8 == 0 {
            let bytes = &mut self.bits.bytes_mut()[start / 8..(start + w) / 8];
            for (i, byte) in bytes.iter_mut().enumerate() {
                *byte = (word >> (8 * i)) as u8;
            }
        } else {
            for z in 0..w {
                self.bits.put(start + z, (word >> z) & 1 == 1);
            }
        }
    }

    /// The 25 lane words, indexed by `5 * y + x`.
    pub fn lane_words(&self) -> [u64; 25] {
        std::array::from_fn(|i| self.read_lane(i % 5, i / 5))
    }

    /// Overwrite all lanes from words indexed by `5 * y + x`.
    pub fn set_lane_words(&mut self, words: &[u64; 25]) {
        for (i, word) in words.iter().enumerate() {
            self.write_lane(i % 5, i / 5, *word);
        }
    }

    pub fn to_hex_string(&self, spacing: bool, uppercase: bool) -> String {
        self.bits.to_hex_string(spacing, uppercase)
    }

    pub fn to_bin_string(&self, spacing: usize) -> String {
        self.bits.to_bin_string(spacing)
    }

    fn check_position(&self, x: usize, y: usize, z: usize) -> Result<()> {
        check_coordinate(x, 5)?;
        check_coordinate(y, 5)?;
        check_coordinate(z, self.size.w())
    }
}

pub(crate) fn check_rate(size: SpongeSize, rate: usize) -> Result<()> {
    if rate < 1 || rate >= size.b() {
        return Err(Error::config(format!(
            "rate {rate} for state width {}",
            size.b()
        )));
    }
    Ok(())
}

impl fmt::Display for SpongeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State ({}): {}", self.size, self.to_hex_string(true, true))
    }
}

impl fmt::Debug for SpongeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpongeState")
            .field("size", &self.size)
            .field("rate", &self.rate)
            .field("bits", &self.to_hex_string(false, false))
            .finish()
    }
}

/// A borrowed cross-section of a [`SpongeState`].
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    state: &'a SpongeState,
    structure: Structure,
}

impl<'a> View<'a> {
    pub fn structure(&self) -> Structure {
        self.structure
    }

    pub fn len(&self) -> usize {
        self.structure.kind().bit_len(self.state.size)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn positions(&self) -> Positions {
        self.structure.positions(self.state.size)
    }

    /// The bits of the structure. The iterator is `Clone`, so a walk can be
    /// restarted from any point.
    pub fn bits(&self) -> ViewBits<'a> {
        ViewBits {
            state: self.state,
            positions: self.positions(),
        }
    }

    /// Views of the lanes, rows or columns this structure is made of.
    ///
    /// See [`Structure::substructures`] for the orders.
    pub fn substructures(&self, kind: Kind) -> Result<impl Iterator<Item = View<'a>> + use<'a>> {
        let state = self.state;
        let parts = self.structure.substructures(kind, state.size)?;
        Ok(parts.map(move |structure| View { state, structure }))
    }

    /// XOR of all bits in the structure.
    pub fn parity(&self) -> bool {
        self.bits().fold(false, |acc, bit| acc ^ bit)
    }

    /// Copy the bits out into a new bitstring.
    pub fn to_bitstring(&self) -> Bitstring {
        self.bits().collect()
    }
}

/// Iterator over the bits of a [`View`].
#[derive(Clone, Debug)]
pub struct ViewBits<'a> {
    state: &'a SpongeState,
    positions: Positions,
}

impl Iterator for ViewBits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let Position { x, y, z } = self.positions.next()?;
        Some(self.state.bits.bit(self.state.offset(x, y, z)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl ExactSizeIterator for ViewBits<'_> {}

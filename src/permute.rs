//! KECCAK-p permutations for every state width of FIPS 202.
//!
//! The step mappings work on [`Lanes`], the state viewed as 25 lane words
//! of `w` bits each, the way the [ref-64-bits] implementation of the Keccak
//! Team does for `w = 64`. Rotations are taken modulo `w`, which makes the
//! same code cover KECCAK-p[25] up to KECCAK-p[1600].
//!
//! The rho offsets and round constants are computed at compile time from
//! their definitions in Section 3.2 instead of being copied from a table.
//!
//! [ref-64-bits]: https://github.com/XKCP/XKCP/tree/716f007dd73ef28d357b8162173646be574ad1b7/lib/low/KeccakP-1600/ref-64bits
#![allow(non_snake_case)]
use std::ops::{Index, IndexMut};

use crate::{
    error::{Error, Result},
    state::{SpongeSize, SpongeState},
};

// NOTE: References to Sections, Algorithms, Tables, etc. refer to the
// FIPS 202 standard (https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.202.pdf)
// if not otherwise specified.

/// Lane of the state array. Only the low `w` bits are used.
type Lane = u64;

/// State array A as 25 lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lanes {
    words: [Lane; 25],
    size: SpongeSize,
}

/// Compute a [`Lane`] index in [`Lanes`].
#[inline(always)]
fn idx(x: usize, y: usize) -> usize {
    (x % 5) + 5 * (y % 5)
}

impl Index<(usize, usize)> for Lanes {
    type Output = Lane;

    #[inline(always)]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.words[idx(x, y)]
    }
}

impl IndexMut<(usize, usize)> for Lanes {
    #[inline(always)]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        &mut self.words[idx(x, y)]
    }
}

impl Lanes {
    /// All-zero lanes for `size`.
    pub fn new(size: SpongeSize) -> Self {
        Self {
            words: [0; 25],
            size,
        }
    }

    /// Lanes indexed by `5 * y + x`; bits above `w` are dropped.
    pub fn from_words(size: SpongeSize, words: [Lane; 25]) -> Self {
        Self {
            words: words.map(|word| word & size.lane_mask()),
            size,
        }
    }

    pub fn from_state(state: &SpongeState) -> Self {
        Self {
            words: state.lane_words(),
            size: state.size(),
        }
    }

    /// Write the lanes back into `state`, which must have the same size.
    pub fn store(&self, state: &mut SpongeState) {
        assert_eq!(self.size, state.size(), "lane width mismatch");
        state.set_lane_words(&self.words);
    }

    pub fn words(&self) -> &[Lane; 25] {
        &self.words
    }

    pub fn size(&self) -> SpongeSize {
        self.size
    }

    /// Cyclic left rotation inside the `w` low bits.
    #[inline(always)]
    fn rotate(&self, lane: Lane, offset: u32) -> Lane {
        let w = self.size.w() as u32;
        match offset % w {
            0 => lane,
            n => ((lane << n) | (lane >> (w - n))) & self.size.lane_mask(),
        }
    }
}

/// 3.2.1 Algorithm 1: θ(A)
pub fn theta(A: &mut Lanes) {
    // We have 5 * w columns, whose parity bits we can store in 5 lanes
    let mut C: [Lane; 5] = Default::default();
    // Step 1
    for (x, Cx) in C.iter_mut().enumerate() {
        // One iteration computes the parity bits of one sheet
        *Cx = A[(x, 0)] ^ A[(x, 1)] ^ A[(x, 2)] ^ A[(x, 3)] ^ A[(x, 4)];
    }

    // Interleaved step 2 and 3
    for x in 0..5 {
        // Step 2
        // (x + 4) % 5 is (x - 1) mod 5; rotating by one moves z - 1 to z
        let D = C[(x + 4) % 5] ^ A.rotate(C[(x + 1) % 5], 1);
        for y in 0..5 {
            // Step 3
            A[(x, y)] ^= D;
        }
    }
}

/// Offsets of Table 2 before reduction modulo `w`, in row-major order
/// starting with x = 0, y = 0.
///
/// Lane (0, 0) is not rotated. Starting from (1, 0), the t-th lane on the
/// walk `(x, y) -> (y, 2x + 3y)` is rotated by `(t + 1)(t + 2) / 2`.
pub const RHO_OFFSETS: [u32; 25] = rho_offsets();

const fn rho_offsets() -> [u32; 25] {
    let mut offsets = [0; 25];
    let (mut x, mut y) = (1, 0);
    let mut t = 0;
    while t < 24 {
        offsets[x + 5 * y] = ((t + 1) * (t + 2) / 2) as u32;
        let old_x = x;
        x = y;
        y = (2 * old_x + 3 * y) % 5;
        t += 1;
    }
    offsets
}

/// 3.2.2 Algorithm 2: ρ(A)
///
/// Quote from 3.2.2 (description of ρ):
/// > The effect of ρ is to rotate the bits of each lane by a length, called the
/// > offset, which depends on the fixed x and y coordinates of the
/// > lane. Equivalently, for each bit in the lane, the z coordinate is
/// > modified by adding the offset, modulo the lane size.
pub fn rho(A: &mut Lanes) {
    for x in 0..5 {
        for y in 0..5 {
            A[(x, y)] = A.rotate(A[(x, y)], RHO_OFFSETS[x + 5 * y]);
        }
    }
}

/// 3.2.3 Algorithm 3: π(A)
///
/// Quote from 3.2.3 (description of π):
/// > The effect of π is to rearrange the positions of the lanes, as illustrated
/// > for any slice in Figure 5 below.
pub fn pi(A: &mut Lanes) {
    let temp_A = *A;
    for x in 0..5 {
        for y in 0..5 {
            // A'[x, y] = A[x + 3y, x] written from the source side: the lane
            // at (x, y) lands on (y, 2x + 3y)
            A[(y, 2 * x + 3 * y)] = temp_A[(x, y)];
        }
    }
}

/// 3.2.4 Algorithm 4: χ(A)
///
/// Quote from 3.2.4:
/// > The effect of χ is to XOR each bit with a non-linear function of two other
/// > bits in its row
pub fn chi(A: &mut Lanes) {
    let mask = A.size.lane_mask();
    let mut C: [Lane; 5] = Default::default();

    for y in 0..5 {
        for (x, Cx) in C.iter_mut().enumerate() {
            *Cx = A[(x, y)] ^ (!A[(x + 1, y)] & mask & A[(x + 2, y)]);
        }
        for (x, Cx) in C.into_iter().enumerate() {
            A[(x, y)] = Cx;
        }
    }
}

/// 3.2.5 Algorithm 5: rc(t) for t = 0..255.
///
/// An LFSR over R = R[0..8] seeded with 10000000. Each step shifts a zero in
/// at R[0], XORs the bit shifted out at R[8] into R[0], R[4], R[5] and R[6]
/// and keeps eight bits. rc(t) is R[0] after t steps.
const RC_BITS: [bool; 255] = rc_bits();

const fn rc_bits() -> [bool; 255] {
    let mut bits = [false; 255];
    // R[i] is bit i of the register
    let mut R: u16 = 1;
    let mut t = 0;
    while t < 255 {
        bits[t] = R & 1 == 1;
        R <<= 1;
        if R & 0x100 != 0 {
            // clears R[8] and flips R[0], R[4], R[5], R[6]
            R ^= 0x171;
        }
        t += 1;
    }
    bits
}

/// rc(t) of Algorithm 5. The sequence has period 255.
pub fn rc(t: usize) -> bool {
    RC_BITS[t % 255]
}

/// Round constants for `w = 64`, indexed by the round index modulo 255.
///
/// Bit `2^j - 1` of constant `ir` is `rc(j + 7 * ir)` for `j = 0..=6`.
/// Narrower lanes use the low `w` bits, which are exactly the bits for
/// `j <= l`.
pub const ROUND_CONSTANTS: [Lane; 255] = round_constants();

const fn round_constants() -> [Lane; 255] {
    let mut table = [0; 255];
    let mut ir = 0;
    while ir < 255 {
        let mut j = 0;
        while j <= 6 {
            if RC_BITS[(j + 7 * ir) % 255] {
                table[ir] |= 1 << ((1 << j) - 1);
            }
            j += 1;
        }
        ir += 1;
    }
    table
}

/// Round constant of round `ir` for lanes of `size`.
///
/// Negative round indices occur for KECCAK-p with more than `12 + 2l`
/// rounds and wrap around modulo 255.
pub fn round_constant(ir: i64, size: SpongeSize) -> Lane {
    ROUND_CONSTANTS[ir.rem_euclid(255) as usize] & size.lane_mask()
}

/// 3.2.5 Algorithm 6: ι(A, ir)
///
/// Quote from 3.2.5:
/// > The effect of ι is to modify some of the bits of Lane (0, 0) in a manner
/// > that depends on the round
/// > index ir. The other 24 lanes are not affected by ι.
pub fn iota(A: &mut Lanes, ir: i64) {
    A[(0, 0)] ^= round_constant(ir, A.size);
}

/// 3.3 Rnd(A, ir)
pub fn round(A: &mut Lanes, ir: i64) {
    theta(A);
    rho(A);
    pi(A);
    chi(A);
    iota(A, ir);
}

/// A KECCAK-p[b, nr] permutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeccakP {
    size: SpongeSize,
    rounds: usize,
}

impl KeccakP {
    /// KECCAK-f[b], i.e. KECCAK-p[b, 12 + 2l] (Section 3.4).
    pub fn keccak_f(size: SpongeSize) -> Self {
        Self {
            size,
            rounds: 12 + 2 * size.l(),
        }
    }

    /// KECCAK-p[b, nr] for any positive round count.
    pub fn new(size: SpongeSize, rounds: usize) -> Result<Self> {
        if rounds == 0 {
            return Err(Error::config("KECCAK-p needs at least one round"));
        }
        Ok(Self { size, rounds })
    }

    pub fn size(&self) -> SpongeSize {
        self.size
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The round indices `12 + 2l - nr` up to `12 + 2l - 1` (Algorithm 7).
    pub fn round_indices(&self) -> impl Iterator<Item = i64> + use<> {
        let end = (12 + 2 * self.size.l()) as i64;
        (end - self.rounds as i64)..end
    }

    /// 3.3 Algorithm 7: KECCAK-p[b, nr](S), in place.
    ///
    /// Panics if the state was built for a different width.
    pub fn permute(&self, state: &mut SpongeState) {
        assert_eq!(self.size, state.size(), "permutation width mismatch");
        let mut lanes = Lanes::from_state(state);
        self.permute_lanes(&mut lanes);
        lanes.store(state);
    }

    pub fn permute_lanes(&self, A: &mut Lanes) {
        assert_eq!(self.size, A.size, "permutation width mismatch");
        for ir in self.round_indices() {
            round(A, ir);
        }
    }
}

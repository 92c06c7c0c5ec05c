//! Sponge construction over KECCAK-p (FIPS 202, Sections 4 and 5).
//!
//! A [`Sponge`] runs one computation at a time through the phases
//! [`Phase::Idle`] → [`Phase::Absorbing`] → [`Phase::Squeezing`] →
//! [`Phase::Done`]. The whole message is known up front, so absorbing
//! appends the domain suffix and the `pad10*1` padding to it and XORs it
//! into the state block by block.
#![allow(non_snake_case)]
use log::{debug, trace};

use crate::{
    bitstring::Bitstring,
    error::Result,
    permute::KeccakP,
    state::{SpongeSize, SpongeState, check_rate},
};

/// 5.1 Algorithm 9: pad10*1(x, m)
///
/// Returns `1 0^j 1` with `j = (-m - 2) mod x`, so that `m` plus the padding
/// is a positive multiple of `x`. The padding is never shorter than two bits.
pub fn pad(x: usize, m: usize) -> Bitstring {
    assert!(x > 0, "pad10*1 needs a positive rate");
    let j = (x - (m + 2) % x) % x;
    let mut padding = Bitstring::zeroes(j + 2);
    padding.put(0, true);
    padding.put(j + 1, true);
    padding
}

/// Where a [`Sponge`] is in its computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Absorbing,
    Squeezing,
    Done,
}

/// Parameters of a sponge: the permutation, the rate and the domain
/// separation suffix appended to every message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpongeConfig {
    pub(crate) permutation: KeccakP,
    pub(crate) rate: usize,
    pub(crate) suffix: Bitstring,
}

impl SpongeConfig {
    /// SPONGE[KECCAK-f[b], pad10*1, rate] without a suffix.
    ///
    /// Fails unless `1 <= rate < b`.
    pub fn new(size: SpongeSize, rate: usize) -> Result<Self> {
        check_rate(size, rate)?;
        Ok(Self {
            permutation: KeccakP::keccak_f(size),
            rate,
            suffix: Bitstring::new(),
        })
    }

    /// Use KECCAK-p[b, rounds] instead of KECCAK-f[b].
    pub fn with_rounds(mut self, rounds: usize) -> Result<Self> {
        self.permutation = KeccakP::new(self.permutation.size(), rounds)?;
        Ok(self)
    }

    /// Bits appended to every message before padding.
    pub fn with_suffix(mut self, suffix: Bitstring) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn size(&self) -> SpongeSize {
        self.permutation.size()
    }

    pub fn rate(&self) -> usize {
        self.rate
    }

    pub fn capacity(&self) -> usize {
        self.size().b() - self.rate
    }

    pub fn rounds(&self) -> usize {
        self.permutation.rounds()
    }

    pub fn suffix(&self) -> &Bitstring {
        &self.suffix
    }

    pub fn permutation(&self) -> KeccakP {
        self.permutation
    }
}

/// Receives the state after every absorbed and every squeezed block.
///
/// Both methods default to doing nothing. `()` is the observer that ignores
/// everything.
pub trait SpongeObserver {
    /// Called after block `block` was XORed in and the state permuted.
    fn absorbed(&mut self, _block: usize, _state: &SpongeState) {}

    /// Called when the rate bits of `state` are about to be read out as
    /// output block `block`.
    fn squeezed(&mut self, _block: usize, _state: &SpongeState) {}
}

impl SpongeObserver for () {}

/// Lane words of the state at one point of a computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: Phase,
    pub block: usize,
    /// Lanes indexed by `5 * y + x`.
    pub lanes: [u64; 25],
}

/// Observer that records a [`Snapshot`] at every block.
#[derive(Clone, Debug, Default)]
pub struct StateRecorder {
    pub snapshots: Vec<Snapshot>,
}

impl StateRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, phase: Phase, block: usize, state: &SpongeState) {
        self.snapshots.push(Snapshot {
            phase,
            block,
            lanes: state.lane_words(),
        });
    }
}

impl SpongeObserver for StateRecorder {
    fn absorbed(&mut self, block: usize, state: &SpongeState) {
        self.record(Phase::Absorbing, block, state);
    }

    fn squeezed(&mut self, block: usize, state: &SpongeState) {
        self.record(Phase::Squeezing, block, state);
    }
}

/// 4. Algorithm 8: SPONGE[f, pad, r](N, d)
#[derive(Clone, Debug)]
pub struct Sponge {
    state: SpongeState,
    permutation: KeccakP,
    suffix: Bitstring,
    phase: Phase,
}

impl Sponge {
    pub fn new(config: &SpongeConfig) -> Self {
        Self {
            state: SpongeState::zeroed(config.size(), config.rate),
            permutation: config.permutation,
            suffix: config.suffix.clone(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The state as left by the last computation.
    pub fn state(&self) -> &SpongeState {
        &self.state
    }

    /// Absorb `message` and squeeze `output_bits` bits.
    ///
    /// The sponge can be reused; every call starts from a cleared state.
    pub fn process(&mut self, message: &Bitstring, output_bits: usize) -> Bitstring {
        self.process_observed(message, output_bits, &mut ())
    }

    /// Like [`Sponge::process`], reporting every block to `observer`.
    pub fn process_observed<O: SpongeObserver + ?Sized>(
        &mut self,
        message: &Bitstring,
        output_bits: usize,
        observer: &mut O,
    ) -> Bitstring {
        debug!(
            "sponge b={} r={} c={} nr={}: absorbing {} bits, squeezing {} bits",
            self.state.size().b(),
            self.state.rate(),
            self.state.capacity(),
            self.permutation.rounds(),
            message.len(),
            output_bits
        );
        self.absorb(message, observer);
        let output = self.squeeze(output_bits, observer);
        debug!("sponge done: {}", output.to_hex_string(false, false));
        output
    }

    fn absorb<O: SpongeObserver + ?Sized>(&mut self, message: &Bitstring, observer: &mut O) {
        self.state.clear();
        self.phase = Phase::Absorbing;

        let rate = self.state.rate();
        let mut P = message.clone();
        P.append(&self.suffix);
        P.append(&pad(rate, P.len()));
        assert_eq!(0, P.len() % rate, "padded message is not a multiple of the rate");

        let zeroes = Bitstring::zeroes(self.state.capacity());
        for (block, start) in (0..P.len()).step_by(rate).enumerate() {
            let mut P_i = P
                .substring(start, rate)
                .expect("block lies inside the padded message");
            P_i.append(&zeroes);
            self.state.xor_block(&P_i);
            self.permutation.permute(&mut self.state);
            trace!("absorbed block {block}");
            observer.absorbed(block, &self.state);
        }
    }

    fn squeeze<O: SpongeObserver + ?Sized>(
        &mut self,
        output_bits: usize,
        observer: &mut O,
    ) -> Bitstring {
        debug_assert_eq!(Phase::Absorbing, self.phase);
        self.phase = Phase::Squeezing;

        let rate = self.state.rate();
        let mut Z = Bitstring::new();
        let mut block = 0;
        loop {
            observer.squeezed(block, &self.state);
            Z.append(&self.state.bitstring().truncate(rate));
            trace!("squeezed block {block}, {} of {output_bits} bits", Z.len());
            if Z.len() >= output_bits {
                break;
            }
            self.permutation.permute(&mut self.state);
            block += 1;
        }

        self.phase = Phase::Done;
        Z.truncate(output_bits)
    }
}

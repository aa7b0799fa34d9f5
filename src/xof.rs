//! SHAKE-256 (absorb / finalize / squeeze) and a one-shot SHA3-256, both layered over the
//! crate-local [`crate::keccak`] permutation with distinct domain-separation pads.

use crate::keccak::{keccak_f1600, LANES};

/// Rate, in bytes, of the sponge construction used by SHAKE-256 and SHA3-256.
pub(crate) const RATE: usize = 136;

/// Full width of the permutation state, in bytes (25 lanes * 8 bytes).
const STATE_BYTES: usize = LANES * 8;

/// SHAKE domain separation pad (FIPS 202, §6.2).
const SHAKE_PAD: u8 = 0x1F;

/// SHA3 domain separation pad (FIPS 202, §6.1).
const SHA3_PAD: u8 = 0x06;

/// A SHAKE-256 sponge context: 200-byte state plus a byte cursor into the current block.
///
/// The absorb → finalize → squeeze sequence is strict: once finalized, the context no
/// longer accepts further `absorb` calls (enforced by moving through [`Self::finalize`]).
pub(crate) struct Shake256 {
    bytes: [u8; STATE_BYTES],
    pos: usize,
}

impl Shake256 {
    /// Starts a new, empty sponge.
    pub(crate) fn new() -> Self { Self { bytes: [0u8; STATE_BYTES], pos: 0 } }

    /// XORs `data` into the state at the current cursor, permuting whenever a full rate
    /// block of bytes has been absorbed.
    pub(crate) fn absorb(&mut self, data: &[u8]) {
        for &byte in data {
            self.bytes[self.pos] ^= byte;
            self.pos += 1;
            if self.pos == RATE {
                self.permute();
                self.pos = 0;
            }
        }
    }

    /// Pads and permutes, consuming the context and returning a squeeze-only reader.
    pub(crate) fn finalize(mut self) -> ShakeReader {
        self.bytes[self.pos] ^= SHAKE_PAD;
        self.bytes[RATE - 1] ^= 0x80;
        self.permute();
        ShakeReader { bytes: self.bytes, pos: RATE }
    }

    fn permute(&mut self) {
        let mut lanes = bytes_to_lanes(&self.bytes);
        keccak_f1600(&mut lanes);
        self.bytes = lanes_to_bytes(&lanes);
    }
}

/// A finalized SHAKE-256 context; only `squeeze` is available from here on.
pub(crate) struct ShakeReader {
    bytes: [u8; STATE_BYTES],
    pos: usize,
}

impl ShakeReader {
    /// Fills `out` with the next `out.len()` bytes of output, permuting as needed.
    pub(crate) fn squeeze(&mut self, out: &mut [u8]) {
        for slot in out {
            if self.pos == RATE {
                let mut lanes = bytes_to_lanes(&self.bytes);
                keccak_f1600(&mut lanes);
                self.bytes = lanes_to_bytes(&lanes);
                self.pos = 0;
            }
            *slot = self.bytes[self.pos];
            self.pos += 1;
        }
    }
}

/// One-shot SHAKE-256 over the concatenation of `parts`, squeezed to a fixed-size output;
/// convenience wrapper for callers that do not need incremental absorption.
pub(crate) fn shake256<const OUT: usize>(parts: &[&[u8]]) -> [u8; OUT] {
    let mut ctx = Shake256::new();
    for part in parts {
        ctx.absorb(part);
    }
    let mut reader = ctx.finalize();
    let mut out = [0u8; OUT];
    reader.squeeze(&mut out);
    out
}

/// One-shot SHA3-256 over the concatenation of an optional leading domain byte and `parts`.
/// The domain byte is the scheme's own KDF separator (§4.5, `0x02`), not the SHA3 pad itself;
/// passing `None` reproduces plain SHA3-256, as needed for the known-answer test of `""`.
pub(crate) fn sha3_256(domain: Option<u8>, parts: &[&[u8]]) -> [u8; 32] {
    let mut ctx = Shake256::new();
    if let Some(d) = domain {
        ctx.absorb(&[d]);
    }
    for part in parts {
        ctx.absorb(part);
    }
    ctx.bytes[ctx.pos] ^= SHA3_PAD;
    ctx.bytes[RATE - 1] ^= 0x80;
    let mut lanes = bytes_to_lanes(&ctx.bytes);
    keccak_f1600(&mut lanes);
    let out_bytes = lanes_to_bytes(&lanes);
    let mut out = [0u8; 32];
    out.copy_from_slice(&out_bytes[0..32]);
    out
}

fn bytes_to_lanes(bytes: &[u8; STATE_BYTES]) -> [u64; LANES] {
    core::array::from_fn(|i| u64::from_le_bytes(bytes[i * 8..i * 8 + 8].try_into().unwrap()))
}

fn lanes_to_bytes(lanes: &[u64; LANES]) -> [u8; STATE_BYTES] {
    let mut bytes = [0u8; STATE_BYTES];
    for (i, lane) in lanes.iter().enumerate() {
        bytes[i * 8..i * 8 + 8].copy_from_slice(&lane.to_le_bytes());
    }
    bytes
}

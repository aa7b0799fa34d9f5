//! Deterministic expansion of a 32-byte seed plus an index tag into a ternary secret row
//! or a uniform-mod-Q matrix block (§4.2).
//!
//! Two generator families exist, selected at compile time via the `low-ram` feature:
//! the default "fast" family expands a whole row/block per SHAKE context, while `low-ram`
//! derives a fresh SHAKE context per element. The two families are **not** interchangeable
//! (see the open question in §9 of the design notes), so a build can only speak one.

use crate::branchless::ternary;
use crate::xof::Shake256;
use crate::{N, Q_MASK, SEED_LEN};

/// Tag prefix selecting the secret-row generator.
const TAG_SECRET: u8 = 0xFF;

/// Tag prefix selecting the matrix-block generator.
const TAG_MATRIX: u8 = 0x00;

#[cfg(not(feature = "low-ram"))]
pub(crate) fn secret_row(seed: &[u8; SEED_LEN], row: u8) -> [i16; N] {
    let mut ctx = Shake256::new();
    ctx.absorb(seed);
    ctx.absorb(&[TAG_SECRET, row]);
    let mut reader = ctx.finalize();

    let mut out = [0i16; N];
    let mut buf = [0u8; 32];
    for chunk in out.chunks_mut(32) {
        reader.squeeze(&mut buf[..chunk.len()]);
        for (dst, &byte) in chunk.iter_mut().zip(buf.iter()) {
            *dst = ternary(byte);
        }
    }
    out
}

#[cfg(not(feature = "low-ram"))]
pub(crate) fn matrix_block(seed: &[u8; SEED_LEN], row: u8, col: u8) -> [i16; N] {
    let mut ctx = Shake256::new();
    ctx.absorb(seed);
    ctx.absorb(&[TAG_MATRIX, row, col]);
    let mut reader = ctx.finalize();

    let mut out = [0i16; N];
    let mut buf = [0u8; 32];
    let mut idx = 0;
    while idx < N {
        let take = core::cmp::min(16, N - idx); // 16 pairs = 32 bytes per squeeze
        reader.squeeze(&mut buf[..take * 2]);
        for k in 0..take {
            let word = u16::from_le_bytes([buf[2 * k], buf[2 * k + 1]]);
            out[idx + k] = (word & Q_MASK) as i16;
        }
        idx += take;
    }
    out
}

#[cfg(feature = "low-ram")]
pub(crate) fn secret_row(seed: &[u8; SEED_LEN], row: u8) -> [i16; N] {
    core::array::from_fn(|idx| secret_elem(seed, row, idx as u8))
}

#[cfg(feature = "low-ram")]
pub(crate) fn matrix_block(seed: &[u8; SEED_LEN], row: u8, col: u8) -> [i16; N] {
    core::array::from_fn(|idx| matrix_elem(seed, row, col, idx as u8))
}

/// Element-wise secret generator: a fresh SHAKE context per coordinate, trading CPU for
/// RAM. Tag includes the element index so fast- and low-RAM-mode streams never collide.
/// Also called directly by `crate::arith`'s `low-ram` matrix-vector products, which need a
/// single ephemeral-secret element at a time rather than a fully materialized row.
#[cfg(feature = "low-ram")]
pub(crate) fn secret_elem(seed: &[u8; SEED_LEN], row: u8, idx: u8) -> i16 {
    let mut ctx = Shake256::new();
    ctx.absorb(seed);
    ctx.absorb(&[TAG_SECRET, row, idx]);
    let mut reader = ctx.finalize();
    let mut byte = [0u8; 1];
    reader.squeeze(&mut byte);
    ternary(byte[0])
}

/// Element-wise matrix generator; see [`secret_elem`]. Also called directly by
/// `crate::arith`'s `low-ram` matrix-vector products, one matrix entry at a time instead of
/// a fully materialized row.
#[cfg(feature = "low-ram")]
pub(crate) fn matrix_elem(seed: &[u8; SEED_LEN], row: u8, col: u8, idx: u8) -> i16 {
    let mut ctx = Shake256::new();
    ctx.absorb(seed);
    ctx.absorb(&[TAG_MATRIX, row, col, idx]);
    let mut reader = ctx.finalize();
    let mut buf = [0u8; 2];
    reader.squeeze(&mut buf);
    let word = u16::from_le_bytes(buf);
    (word & Q_MASK) as i16
}

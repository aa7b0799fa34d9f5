//! Safe-zone reconciliation (§4.4): selects the coordinates of a noisy `N`-vector whose
//! value lies far enough from a decision boundary that both parties will round
//! identically, then extracts one bit per selected coordinate.

use zeroize::Zeroize;

use crate::branchless::{bit_get, bit_set_masked, is_safe, reconcile_bit, select_u8};
use crate::{MASK_LEN, N};

/// Output of the encapsulator's reconciliation pass: the safe-zone bitmap (transmitted as
/// part of the ciphertext) and the extracted bit buffer (fed to the KDF, then zeroized).
pub(crate) struct Reconciled {
    pub(crate) mask: [u8; MASK_LEN],
    pub(crate) cnt: u16,
    pub(crate) buf: ExtractedBits,
}

/// Fixed-capacity extraction buffer; at most `N` coordinates can be safe. Zeroized on drop
/// since it holds bits derived from the session's noisy reconciliation value.
#[derive(Zeroize)]
pub(crate) struct ExtractedBits {
    bytes: [u8; N],
    len: usize,
}

impl ExtractedBits {
    /// The written prefix, i.e. `buf[0..cnt]` from §4.4.
    pub(crate) fn as_slice(&self) -> &[u8] { &self.bytes[..self.len] }
}

/// Encapsulator's pass: computes the safe-zone mask over `v` and extracts one bit per
/// safe coordinate, in coordinate order. The write index advances branchlessly (it is
/// incremented by `safe ∈ {0,1}` rather than gated by an `if`), though the final index
/// value (and therefore the memory region touched) still depends on the secret-derived
/// `v`; §5 accepts this because `v`'s safety pattern is released via the mask regardless.
pub(crate) fn reconcile_encaps(v: &[u8; N]) -> Reconciled {
    let mut mask = [0u8; MASK_LEN];
    let mut bytes = [0u8; N];
    let mut widx = 0usize;

    for j in 0..N {
        let val = v[j];
        let safe = is_safe(val);
        bit_set_masked(&mut mask, j, safe);
        let bit = reconcile_bit(val);
        bytes[widx] = select_u8(bit, bytes[widx], u32::from(safe));
        widx += usize::from(safe);
    }

    Reconciled { mask, cnt: widx as u16, buf: ExtractedBits { bytes, len: widx } }
}

/// Decapsulator's pass: extracts one bit per coordinate marked safe in the received
/// `mask`, without recomputing safety from `v_prime` (the sender's mask is authoritative).
pub(crate) fn reconcile_decaps(v_prime: &[u8; N], mask: &[u8; MASK_LEN]) -> ExtractedBits {
    let mut bytes = [0u8; N];
    let mut widx = 0usize;

    for j in 0..N {
        let val = v_prime[j];
        let sel = bit_get(mask, j);
        let bit = reconcile_bit(val);
        bytes[widx] = select_u8(bit, bytes[widx], sel);
        widx += sel as usize;
    }

    ExtractedBits { bytes, len: widx }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_popcount_equals_cnt() {
        let mut v = [0u8; N];
        for (j, slot) in v.iter_mut().enumerate() {
            *slot = (j * 7 + 3) as u8;
        }
        let reconciled = reconcile_encaps(&v);
        let popcount: u32 = reconciled.mask.iter().map(|b| b.count_ones()).sum();
        assert_eq!(popcount, u32::from(reconciled.cnt));
        assert_eq!(reconciled.buf.as_slice().len(), reconciled.cnt as usize);
    }

    #[test]
    fn decaps_follows_sender_mask_not_recomputed_safety() {
        let mut v = [0u8; N];
        for (j, slot) in v.iter_mut().enumerate() {
            *slot = (j * 13 + 5) as u8;
        }
        let reconciled = reconcile_encaps(&v);

        // Even if v_prime differs slightly (bounded LWR noise), the bits extracted follow
        // the mask positions, not a fresh safety recomputation.
        let v_prime = v; // identical here; agreement is checked in end-to-end tests
        let extracted = reconcile_decaps(&v_prime, &reconciled.mask);
        assert_eq!(extracted.as_slice(), reconciled.buf.as_slice());
    }

    #[test]
    fn all_unsafe_yields_empty_buffer() {
        // Every coordinate exactly on a boundary center is always safe (distance 0), so
        // to force "all unsafe" we need values at least 12 away from every center; 44 is
        // exactly 12 from 32 and 96's midpoint... use the true midpoints (64, 0/128) instead.
        let v = [64u8; N]; // distance to nearest center (32 or 96) is 32, well outside 12
        let reconciled = reconcile_encaps(&v);
        assert_eq!(reconciled.cnt, 0);
        assert!(reconciled.buf.as_slice().is_empty());
    }
}

//! Entities defined in the data model: the public key, secret key, and ciphertext that
//! flow between the two parties of a session.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::helpers::ensure;
use crate::traits::SerDes;
use crate::{K, MASK_LEN, N, SEED_LEN};

/// Length, in bytes, of a compressed `K·N` block (public key's `b` or ciphertext's `u`).
pub(crate) const BLOCK_LEN: usize = K * N;

/// Serialized `PublicKey` length (in bytes): `seed[32] || b[K·N]`.
pub const EK_LEN: usize = SEED_LEN + BLOCK_LEN;

/// Serialized `Ciphertext` length (in bytes): `u[K·N] || mask[32] || cnt(u16 LE)`.
pub const CT_LEN: usize = BLOCK_LEN + MASK_LEN + 2;

/// Serialized `SecretKey` length (in bytes): `s[K·N]` as signed 16-bit little-endian words.
pub const DK_LEN: usize = 2 * BLOCK_LEN;

/// The matrix seed and compressed `A·s` published by the originator of a session.
///
/// Purely a function of the keygen entropy; safe to share openly.
#[derive(Clone, Debug)]
pub struct PublicKey {
    pub(crate) seed: [u8; SEED_LEN],
    pub(crate) b: [u8; BLOCK_LEN],
}

/// The ternary secret vector retained by the originator. Every element lies in
/// `{-1, 0, 1}`; storage is erased on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    pub(crate) s: [i16; BLOCK_LEN],
}

/// The compressed `Aᵀ·r`, safe-zone bitmap, and bitmap popcount produced by encapsulation
/// and consumed by decapsulation.
#[derive(Clone, Debug)]
pub struct Ciphertext {
    pub(crate) u: [u8; BLOCK_LEN],
    pub(crate) mask: [u8; MASK_LEN],
    pub(crate) cnt: u16,
}

impl SerDes for PublicKey {
    type ByteArray = [u8; EK_LEN];

    /// Serializes to the fixed in-memory layout of §6: `seed || b`.
    fn into_bytes(self) -> [u8; EK_LEN] {
        let mut out = [0u8; EK_LEN];
        out[0..SEED_LEN].copy_from_slice(&self.seed);
        out[SEED_LEN..].copy_from_slice(&self.b);
        out
    }

    /// Deserializes from the fixed in-memory layout of §6.
    ///
    /// There is no cryptographic validation to perform here (any 1312-byte array decodes to
    /// some seed and some compressed matrix product); the `Result` exists for symmetry with
    /// the other `SerDes` impls and to leave room for future validation.
    fn try_from_bytes(ek: [u8; EK_LEN]) -> Result<Self, &'static str> {
        let mut seed = [0u8; SEED_LEN];
        let mut b = [0u8; BLOCK_LEN];
        seed.copy_from_slice(&ek[0..SEED_LEN]);
        b.copy_from_slice(&ek[SEED_LEN..]);
        Ok(Self { seed, b })
    }
}

impl SerDes for SecretKey {
    type ByteArray = [u8; DK_LEN];

    /// Serializes to the fixed in-memory layout of §6: signed 16-bit little-endian words.
    fn into_bytes(self) -> [u8; DK_LEN] {
        let mut out = [0u8; DK_LEN];
        for (i, &elem) in self.s.iter().enumerate() {
            out[2 * i..2 * i + 2].copy_from_slice(&elem.to_le_bytes());
        }
        out
    }

    /// Deserializes from the fixed in-memory layout of §6, rejecting any element outside
    /// `{-1, 0, 1}` (§3's ternary invariant).
    fn try_from_bytes(dk: [u8; DK_LEN]) -> Result<Self, &'static str> {
        let mut s = [0i16; BLOCK_LEN];
        for (i, elem) in s.iter_mut().enumerate() {
            let word = i16::from_le_bytes([dk[2 * i], dk[2 * i + 1]]);
            ensure!((-1..=1).contains(&word), "secret key element out of {-1, 0, 1}");
            *elem = word;
        }
        Ok(Self { s })
    }
}

impl SerDes for Ciphertext {
    type ByteArray = [u8; CT_LEN];

    /// Serializes to the fixed in-memory layout of §6: `u || mask || cnt`.
    fn into_bytes(self) -> [u8; CT_LEN] {
        let mut out = [0u8; CT_LEN];
        out[0..BLOCK_LEN].copy_from_slice(&self.u);
        out[BLOCK_LEN..BLOCK_LEN + MASK_LEN].copy_from_slice(&self.mask);
        out[BLOCK_LEN + MASK_LEN..].copy_from_slice(&self.cnt.to_le_bytes());
        out
    }

    /// Deserializes from the fixed in-memory layout of §6.
    ///
    /// Validates that `cnt` agrees with the popcount of `mask` (§8 property 4). This is an
    /// input-boundary guard only: a ciphertext produced in-memory by `encaps` always
    /// satisfies it, so this cannot reject anything the core itself would have produced.
    fn try_from_bytes(ct: [u8; CT_LEN]) -> Result<Self, &'static str> {
        let mut u = [0u8; BLOCK_LEN];
        let mut mask = [0u8; MASK_LEN];
        u.copy_from_slice(&ct[0..BLOCK_LEN]);
        mask.copy_from_slice(&ct[BLOCK_LEN..BLOCK_LEN + MASK_LEN]);
        let cnt = u16::from_le_bytes([ct[BLOCK_LEN + MASK_LEN], ct[BLOCK_LEN + MASK_LEN + 1]]);
        let popcount: u32 = mask.iter().map(|b| b.count_ones()).sum();
        ensure!(u32::from(cnt) == popcount, "ciphertext cnt disagrees with mask popcount");
        Ok(Self { u, mask, cnt })
    }
}

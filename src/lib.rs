#![no_std]
#![deny(clippy::pedantic, warnings, missing_docs, unsafe_code)]
// Most of the 'allow' category...
#![deny(absolute_paths_not_starting_with_crate, box_pointers, dead_code)]
#![deny(elided_lifetimes_in_paths, explicit_outlives_requirements, keyword_idents)]
#![deny(let_underscore_drop, macro_use_extern_crate, meta_variable_misuse, missing_abi)]
#![deny(non_ascii_idents, rust_2021_incompatible_closure_captures)]
#![deny(rust_2021_incompatible_or_patterns, rust_2021_prefixes_incompatible_syntax)]
#![deny(rust_2021_prelude_collisions, single_use_lifetimes, trivial_casts)]
#![deny(trivial_numeric_casts, unreachable_pub, unsafe_op_in_unsafe_fn, unstable_features)]
#![deny(unused_extern_crates, unused_import_braces, unused_lifetimes, unused_macro_rules)]
#![deny(unused_qualifications, unused_results, variant_size_differences)]
//
#![doc = include_str!("../README.md")]

// Post-quantum KEM over the Learning-With-Rounding problem: a module-lattice matrix/secret
// pair generated from seeds via SHAKE-256, rounded matrix-vector products forming the public
// key and ciphertext, and safe-zone reconciliation in place of an explicit error-correcting
// code or a Fujisaki-Okamoto re-encryption step.

// Component map
//
// Permutation core (24-round Keccak-f[1600], 25-lane state)     --> keccak.rs
// XOF layer (SHAKE-256 absorb/finalize/squeeze, one-shot SHA3)  --> xof.rs
// Seeded generators (ternary secret rows, uniform matrix blocks) --> sampling.rs
// Arithmetic core (rounded matrix-vector products mod Q)         --> arith.rs
// Reconciliation (safe-zone mask, bit extraction)                --> reconcile.rs
// Branchless primitives (sign/abs/min/lt/select, ternary, safe)  --> branchless.rs
// Protocol entry points (keygen/encaps/decaps)                   --> kem.rs
// Data model (PublicKey/SecretKey/Ciphertext, SerDes)            --> types.rs
// Shared utilities (ensure! early-return macro)                   --> helpers.rs

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::traits::{Decaps, Encaps, KeyGen, SerDes};

mod arith;
mod branchless;
mod helpers;
mod keccak;
mod kem;
mod reconcile;
mod sampling;
mod types;
mod xof;

/// All functionality is covered by traits, such that consumers can utilize trait objects if desired.
pub mod traits;

pub use types::{Ciphertext, PublicKey, SecretKey, CT_LEN, DK_LEN, EK_LEN};

/// The `rand_core` types are re-exported so that users of this crate do not have to worry
/// about using the exact correct version of `rand_core`.
pub use rand_core::{CryptoRng, Error as RngError, RngCore};

// Lattice dimension.
const N: usize = 256;
// Module rank ("scalable security" in the reference, but only K=5 is validated here; see
// the open question recorded in DESIGN.md).
const K: usize = 5;
// Modulus mask (Q = 8192).
const Q_MASK: u16 = 0x1FFF;
// Compression shift: 13-bit reduced value -> top 8 bits.
const SHIFT: u32 = 5;
// Seed / shared-secret / mask lengths, all 32 bytes.
const SEED_LEN: usize = 32;
const MASK_LEN: usize = 32;

/// Shared secret length, in bytes.
pub const SHARED_LEN: usize = 32;

/// The 32-byte secret produced by both `encaps` and `decaps`; erased on drop and compared in
/// constant time.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecretKey([u8; SHARED_LEN]);

impl SerDes for SharedSecretKey {
    type ByteArray = [u8; SHARED_LEN];

    fn into_bytes(self) -> Self::ByteArray { self.0 }

    fn try_from_bytes(ssk: Self::ByteArray) -> Result<Self, &'static str> {
        // No validation opportunity exists (any 32 bytes are a valid shared secret); the
        // `Result` exists for symmetry with the other `SerDes` impls.
        Ok(SharedSecretKey(ssk))
    }
}

// Conservative (constant-time) comparison.
impl PartialEq for SharedSecretKey {
    fn eq(&self, other: &Self) -> bool { bool::from(self.0.ct_eq(&other.0)) }
}

/// A keypair generator, encapsulator, and decapsulator.
///
/// This unit struct implements [`traits::KeyGen`]; its sibling types [`PublicKey`] and
/// [`Ciphertext`] implement [`traits::Encaps`] and [`traits::Decaps`] respectively.
pub struct KG();

/// Runs keygen → encaps → decaps end to end and reports where (if anywhere) it diverges,
/// mirroring the reference implementation's self-test entry point.
///
/// Derives a distinct encapsulation entropy from `entropy` via SHAKE-256 so that keygen and
/// encaps do not consume the same 32 bytes, then verifies the two derived shared secrets
/// agree byte-for-byte.
///
/// Return codes: `0` success; `-1` keygen failure; `-2` encaps failure; `-3` decaps failure;
/// `-4` shared-secret mismatch. In this implementation keygen/encaps/decaps are infallible
/// internally, so only `0` and `-4` are actually reachable; `-1..=-3` are retained for
/// interface parity with ports where those steps can fail (e.g. an exhausted RNG).
#[must_use]
pub fn self_test(entropy: &[u8; SEED_LEN]) -> i32 {
    let ent_enc: [u8; SEED_LEN] = xof::shake256(&[entropy]);

    let (pk, sk) = kem::keygen(entropy);
    let (ct, k1) = kem::encaps(&pk, &ent_enc);
    let k2 = kem::decaps(&ct, &sk);

    let diff: u8 = k1.iter().zip(k2.iter()).fold(0u8, |acc, (a, b)| acc | (a ^ b));
    if diff == 0 { 0 } else { -4 }
}

impl KeyGen for KG {
    type DecapsByteArray = [u8; DK_LEN];
    type DecapsKey = SecretKey;
    type EncapsByteArray = [u8; EK_LEN];
    type EncapsKey = PublicKey;

    fn try_keygen_with_rng(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(PublicKey, SecretKey), &'static str> {
        let mut entropy = [0u8; SEED_LEN];
        rng.try_fill_bytes(&mut entropy).map_err(|_| "RNG failed to fill keygen entropy")?;
        let (pk, sk) = kem::keygen(&entropy);
        entropy.zeroize();
        Ok((pk, sk))
    }

    fn validate_keypair_vartime(ek: &[u8; EK_LEN], dk: &[u8; DK_LEN]) -> bool {
        let Ok(pk) = PublicKey::try_from_bytes(*ek) else { return false };
        let Ok(sk) = SecretKey::try_from_bytes(*dk) else { return false };
        // b is purely a function of (seed, s) per the data model; re-derive and compare
        // rather than trusting the two keys were produced together.
        arith::public_b(&pk.seed, &sk.s) == pk.b
    }
}

impl Encaps for PublicKey {
    type CipherText = Ciphertext;
    type SharedSecretKey = SharedSecretKey;

    fn try_encaps_with_rng(
        &self, rng: &mut impl CryptoRngCore,
    ) -> Result<(SharedSecretKey, Ciphertext), &'static str> {
        let mut entropy = [0u8; SEED_LEN];
        rng.try_fill_bytes(&mut entropy).map_err(|_| "RNG failed to fill encaps entropy")?;
        let (ct, shared) = kem::encaps(self, &entropy);
        entropy.zeroize();
        Ok((SharedSecretKey(shared), ct))
    }
}

impl Decaps for SecretKey {
    type CipherText = Ciphertext;
    type SharedSecretKey = SharedSecretKey;

    fn try_decaps(&self, ct: &Ciphertext) -> Result<SharedSecretKey, &'static str> {
        Ok(SharedSecretKey(kem::decaps(ct, self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_test_passes_for_sequential_entropy() {
        let mut entropy = [0u8; SEED_LEN];
        for (i, b) in entropy.iter_mut().enumerate() {
            *b = (i + 1) as u8;
        }
        assert_eq!(self_test(&entropy), 0);
    }

    #[test]
    fn self_test_passes_for_all_zero_entropy() {
        assert_eq!(self_test(&[0x00; SEED_LEN]), 0);
    }

    #[test]
    fn self_test_passes_for_all_ff_entropy() {
        assert_eq!(self_test(&[0xFF; SEED_LEN]), 0);
    }
}

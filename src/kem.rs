//! Protocol entry points (§4.5): key generation, encapsulation, and decapsulation, wired
//! from the sampling, arithmetic, and reconciliation building blocks.

use zeroize::Zeroize;

use crate::arith::{ciphertext_u, public_b, reconcile_v, reconcile_v_prime};
use crate::reconcile::{reconcile_decaps, reconcile_encaps};
use crate::sampling::secret_row;
use crate::types::{BLOCK_LEN, Ciphertext, PublicKey, SecretKey};
use crate::xof::{sha3_256, Shake256};
use crate::{K, N, SEED_LEN, SHARED_LEN};

/// The scheme's own KDF domain separator, distinct from SHAKE/SHA3's internal padding.
const KDF_DOMAIN: u8 = 0x02;

/// Derives the matrix seed and the secret-generating seed from caller-supplied entropy,
/// then expands the secret and its compressed public image.
///
/// `entropy` must come from a cryptographically secure source; this function performs no
/// entropy quality checks of its own (§7: that is the caller's responsibility).
pub(crate) fn keygen(entropy: &[u8; SEED_LEN]) -> (PublicKey, SecretKey) {
    let mut ctx = Shake256::new();
    ctx.absorb(entropy);
    let mut reader = ctx.finalize();

    let mut seed = [0u8; SEED_LEN];
    reader.squeeze(&mut seed);

    let mut secret_seed = [0u8; SEED_LEN];
    reader.squeeze(&mut secret_seed);

    let mut s = [0i16; BLOCK_LEN];
    for row in 0..K {
        let r = secret_row(&secret_seed, row as u8);
        s[row * N..(row + 1) * N].copy_from_slice(&r);
    }
    secret_seed.zeroize();

    let b = public_b(&seed, &s);

    (PublicKey { seed, b }, SecretKey { s })
}

/// Encapsulates a fresh shared secret against `pk`, consuming `entropy` to derive the
/// ephemeral vector `r`.
#[cfg(not(feature = "low-ram"))]
pub(crate) fn encaps(pk: &PublicKey, entropy: &[u8; SEED_LEN]) -> (Ciphertext, [u8; SHARED_LEN]) {
    let mut ctx = Shake256::new();
    ctx.absorb(entropy);
    let mut reader = ctx.finalize();

    let mut r_seed = [0u8; SEED_LEN];
    reader.squeeze(&mut r_seed);

    let mut r = [0i16; BLOCK_LEN];
    for row in 0..K {
        let row_vals = secret_row(&r_seed, row as u8);
        r[row * N..(row + 1) * N].copy_from_slice(&row_vals);
    }
    r_seed.zeroize();

    let u = ciphertext_u(&pk.seed, &r);
    let mut v = reconcile_v(&pk.b, &r);
    r.zeroize();

    let mut reconciled = reconcile_encaps(&v);
    v.zeroize();

    let shared = sha3_256(Some(KDF_DOMAIN), &[reconciled.buf.as_slice()]);
    reconciled.buf.zeroize();

    (Ciphertext { u, mask: reconciled.mask, cnt: reconciled.cnt }, shared)
}

/// `low-ram` shape of [`encaps`]: the ephemeral vector `r` is never materialized as a full
/// `K·N` array. `r_seed` is handed directly to [`ciphertext_u`] and [`reconcile_v`], which
/// regenerate each `r` element on demand from it (§4.2's low-RAM generator family).
#[cfg(feature = "low-ram")]
pub(crate) fn encaps(pk: &PublicKey, entropy: &[u8; SEED_LEN]) -> (Ciphertext, [u8; SHARED_LEN]) {
    let mut ctx = Shake256::new();
    ctx.absorb(entropy);
    let mut reader = ctx.finalize();

    let mut r_seed = [0u8; SEED_LEN];
    reader.squeeze(&mut r_seed);

    let u = ciphertext_u(&pk.seed, &r_seed);
    let mut v = reconcile_v(&pk.b, &r_seed);
    r_seed.zeroize();

    let mut reconciled = reconcile_encaps(&v);
    v.zeroize();

    let shared = sha3_256(Some(KDF_DOMAIN), &[reconciled.buf.as_slice()]);
    reconciled.buf.zeroize();

    (Ciphertext { u, mask: reconciled.mask, cnt: reconciled.cnt }, shared)
}

/// Decapsulates the shared secret encoded in `ct` using `sk`.
///
/// There is no failure path: every `Ciphertext` that reaches this function (whether freshly
/// produced by [`encaps`] or deserialized through [`Ciphertext::try_from_bytes`]) carries a
/// mask whose popcount already equals `cnt`, so a matching-length buffer is always produced.
///
/// [`Ciphertext::try_from_bytes`]: crate::types::Ciphertext::try_from_bytes
pub(crate) fn decaps(ct: &Ciphertext, sk: &SecretKey) -> [u8; SHARED_LEN] {
    let mut v_prime = reconcile_v_prime(&ct.u, &sk.s);
    let mut extracted = reconcile_decaps(&v_prime, &ct.mask);
    v_prime.zeroize();

    let shared = sha3_256(Some(KDF_DOMAIN), &[extracted.as_slice()]);
    extracted.zeroize();
    shared
}

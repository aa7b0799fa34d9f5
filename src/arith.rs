//! Rounded matrix-vector products over the ring of integers modulo Q (§4.3).
//!
//! Two call-site shapes exist, mirroring `crate::sampling`'s `low-ram` feature split. The
//! default "fast" shape materializes a full matrix block (and, for the ephemeral vector `r`,
//! a full row) before reducing over it in an `l, j` loop. The `low-ram` shape restructures
//! the loop nest to `i, j, l` order and keeps only a scalar `i32` accumulator plus one
//! freshly generated matrix/secret element per inner step, so peak scratch is O(1) rather
//! than O(N) — matching the C reference's `MIR_RAM_MODE < 4` path, which drops the
//! `a_block`/`acc` row-sized arrays entirely in favor of a per-coordinate `int32_t acc`.

#[cfg(not(feature = "low-ram"))]
use crate::sampling::matrix_block;
#[cfg(feature = "low-ram")]
use crate::sampling::{matrix_elem, secret_elem};
use crate::types::BLOCK_LEN;
use crate::{K, N, Q_MASK, SEED_LEN, SHIFT};

/// Computes `b = round(A·s)`: for each output row `i`, sums over `l` the coordinate-wise
/// product of matrix block `A[i][l]` with secret row `s[l]`, then compresses.
///
/// `secret` is laid out as `K` contiguous rows of `N` elements (as in [`crate::types::SecretKey`]).
#[cfg(not(feature = "low-ram"))]
pub(crate) fn public_b(seed: &[u8; SEED_LEN], secret: &[i16; BLOCK_LEN]) -> [u8; BLOCK_LEN] {
    let mut out = [0u8; BLOCK_LEN];
    for i in 0..K {
        let mut acc = [0i32; N];
        for l in 0..K {
            let a_block = matrix_block(seed, i as u8, l as u8);
            let row = &secret[l * N..(l + 1) * N];
            for j in 0..N {
                let prod = i32::from(a_block[j]) * i32::from(row[j]);
                acc[j] = (acc[j] + prod) & i32::from(Q_MASK);
            }
        }
        for j in 0..N {
            out[i * N + j] = ((acc[j] & i32::from(Q_MASK)) >> SHIFT) as u8;
        }
    }
    out
}

/// `low-ram` shape of [`public_b`]: `i, j, l` loop order, a scalar accumulator per
/// coordinate, matrix entries generated on demand rather than a full row at a time. `secret`
/// is still taken as a fully materialized row since it is `SecretKey`'s own storage, not
/// scratch — only the matrix side is regenerated per element here.
#[cfg(feature = "low-ram")]
pub(crate) fn public_b(seed: &[u8; SEED_LEN], secret: &[i16; BLOCK_LEN]) -> [u8; BLOCK_LEN] {
    let mut out = [0u8; BLOCK_LEN];
    for i in 0..K {
        for j in 0..N {
            let mut acc = 0i32;
            for l in 0..K {
                let a = matrix_elem(seed, i as u8, l as u8, j as u8);
                acc += i32::from(a) * i32::from(secret[l * N + j]);
            }
            out[i * N + j] = ((acc & i32::from(Q_MASK)) >> SHIFT) as u8;
        }
    }
    out
}

/// Computes `u = round(Aᵀ·r)`: same shape as [`public_b`], but the matrix block is
/// fetched transposed (`A[l][i]` instead of `A[i][l]`) and the inner vector is `r[l]`.
#[cfg(not(feature = "low-ram"))]
pub(crate) fn ciphertext_u(seed: &[u8; SEED_LEN], r: &[i16; BLOCK_LEN]) -> [u8; BLOCK_LEN] {
    let mut out = [0u8; BLOCK_LEN];
    for i in 0..K {
        let mut acc = [0i32; N];
        for l in 0..K {
            let a_block = matrix_block(seed, l as u8, i as u8);
            let row = &r[l * N..(l + 1) * N];
            for j in 0..N {
                let prod = i32::from(a_block[j]) * i32::from(row[j]);
                acc[j] = (acc[j] + prod) & i32::from(Q_MASK);
            }
        }
        for j in 0..N {
            out[i * N + j] = ((acc[j] & i32::from(Q_MASK)) >> SHIFT) as u8;
        }
    }
    out
}

/// `low-ram` shape of [`ciphertext_u`]: matrix entries and ephemeral-secret entries are both
/// generated from their seeds on demand, so `r` is never materialized as a full `K·N` array
/// — only `r_seed` is held, matching the C reference's `mir_jit_secret_elem` call site.
#[cfg(feature = "low-ram")]
pub(crate) fn ciphertext_u(seed: &[u8; SEED_LEN], r_seed: &[u8; SEED_LEN]) -> [u8; BLOCK_LEN] {
    let mut out = [0u8; BLOCK_LEN];
    for i in 0..K {
        for j in 0..N {
            let mut acc = 0i32;
            for l in 0..K {
                let a = matrix_elem(seed, l as u8, i as u8, j as u8);
                let r = secret_elem(r_seed, l as u8, j as u8);
                acc += i32::from(a) * i32::from(r);
            }
            out[i * N + j] = ((acc & i32::from(Q_MASK)) >> SHIFT) as u8;
        }
    }
    out
}

/// Dot product of a compressed byte block with a small-integer block, truncated to the low
/// 8 bits. Truncating once at the end is equivalent to truncating after every term, since
/// addition commutes with a power-of-two mask; the reference performs the latter.
///
/// Shared by the decapsulator's `v' = u·s` (always, since `s` lives fully in `SecretKey`
/// regardless of generator mode) and, in the default "fast" build, the encapsulator's
/// `v = b·r` (where `r` is already fully materialized).
fn dot_mod256(lhs: &[u8; BLOCK_LEN], rhs: &[i16; BLOCK_LEN]) -> [u8; N] {
    let mut out = [0u8; N];
    for l in 0..K {
        let lhs_row = &lhs[l * N..(l + 1) * N];
        let rhs_row = &rhs[l * N..(l + 1) * N];
        for j in 0..N {
            let prod = i32::from(lhs_row[j]) * i32::from(rhs_row[j]);
            out[j] = (i32::from(out[j]) + prod) as u8;
        }
    }
    out
}

/// Computes the encapsulator's reconciliation value `v = b·r`, an `N`-vector kept as raw
/// bytes (only the low 8 bits of the running sum are retained; this is not a mod-Q value).
#[cfg(not(feature = "low-ram"))]
pub(crate) fn reconcile_v(b: &[u8; BLOCK_LEN], r: &[i16; BLOCK_LEN]) -> [u8; N] { dot_mod256(b, r) }

/// `low-ram` shape of [`reconcile_v`]: the ephemeral row `r` is generated element-by-element
/// from `r_seed` rather than taken as a pre-materialized array.
#[cfg(feature = "low-ram")]
pub(crate) fn reconcile_v(b: &[u8; BLOCK_LEN], r_seed: &[u8; SEED_LEN]) -> [u8; N] {
    let mut v = [0u8; N];
    for l in 0..K {
        let b_row = &b[l * N..(l + 1) * N];
        for j in 0..N {
            let r = secret_elem(r_seed, l as u8, j as u8);
            let prod = i32::from(b_row[j]) * i32::from(r);
            v[j] = (i32::from(v[j]) + prod) as u8;
        }
    }
    v
}

/// Computes the decapsulator's reconciliation value `v' = u·s`. `u` and `s` are both already
/// fully materialized (the received ciphertext and the stored secret key), so there is no
/// `low-ram` variant of this one — see [`dot_mod256`].
pub(crate) fn reconcile_v_prime(u: &[u8; BLOCK_LEN], s: &[i16; BLOCK_LEN]) -> [u8; N] {
    dot_mod256(u, s)
}

//! Keccak-f[1600] permutation, implemented directly rather than pulled in from the `sha3`
//! crate, since the bit-exact behavior of this scheme depends on it.
//!
//! This is the same 24-round, 25-lane permutation defined by FIPS 202; round constants,
//! rotation offsets, and the lane-permutation schedule are copied from that standard.

/// Width of the permutation state, in 64-bit lanes.
pub(crate) const LANES: usize = 25;

/// Number of rounds in Keccak-f[1600].
const ROUNDS: usize = 24;

#[rustfmt::skip]
const RC: [u64; ROUNDS] = [
    0x0000_0000_0000_0001, 0x0000_0000_0000_8082, 0x8000_0000_0000_808a,
    0x8000_0000_8000_8000, 0x0000_0000_0000_808b, 0x0000_0000_8000_0001,
    0x8000_0000_8000_8081, 0x8000_0000_0000_8009, 0x0000_0000_0000_008a,
    0x0000_0000_0000_0088, 0x0000_0000_8000_8009, 0x0000_0000_8000_000a,
    0x0000_0000_8000_808b, 0x8000_0000_0000_008b, 0x8000_0000_0000_8089,
    0x8000_0000_0000_8003, 0x8000_0000_0000_8002, 0x8000_0000_0000_0080,
    0x0000_0000_0000_800a, 0x8000_0000_8000_000a, 0x8000_0000_8000_8081,
    0x8000_0000_0000_8080, 0x0000_0000_8000_0001, 0x8000_0000_8000_8008,
];

/// π lane-permutation schedule: destination lane index for each of the 24 moved lanes.
#[rustfmt::skip]
const PI: [usize; ROUNDS] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4,
    15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// ρ rotation offsets, indexed in the same order as `PI`.
#[rustfmt::skip]
const RHO: [u32; ROUNDS] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14,
    27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Runs the 24-round Keccak-f[1600] permutation over a 25-lane state, in place.
pub(crate) fn keccak_f1600(state: &mut [u64; LANES]) {
    for round in 0..ROUNDS {
        // θ: column parities, then XOR each lane with its neighboring columns' parity.
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let t = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in (0..25).step_by(5) {
                state[x + y] ^= t;
            }
        }

        // ρ and π: rotate each lane and move it to its new position.
        let mut a = state[1];
        for i in 0..ROUNDS {
            let dest = PI[i];
            let swapped = state[dest];
            state[dest] = a.rotate_left(RHO[i]);
            a = swapped;
        }

        // χ: non-linear mixing within each row.
        for y in (0..25).step_by(5) {
            let row = [state[y], state[y + 1], state[y + 2], state[y + 3], state[y + 4]];
            for x in 0..5 {
                state[y + x] = row[x] ^ ((!row[(x + 1) % 5]) & row[(x + 2) % 5]);
            }
        }

        // ι: mix in the round constant.
        state[0] ^= RC[round];
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use mirletis::traits::{Decaps, Encaps, KeyGen, SerDes};
use mirletis::{Ciphertext, PublicKey, SecretKey, CT_LEN, DK_LEN, EK_LEN, KG};
use rand_core::{CryptoRng, RngCore};

const RND_SIZE: usize = 32;
const INPUT_LEN: usize = 3 * RND_SIZE + EK_LEN + RND_SIZE + DK_LEN + CT_LEN;

// This is a 'fake' random number generator, that will regurgitate fuzz input
struct TestRng {
    data: Vec<Vec<u8>>,
}

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 { unimplemented!() }

    fn next_u64(&mut self) -> u64 { unimplemented!() }

    fn fill_bytes(&mut self, _out: &mut [u8]) { unimplemented!() }

    fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), rand_core::Error> {
        let x = self.data.pop().expect("TestRng problem");
        out.copy_from_slice(&x);
        Ok(())
    }
}

impl CryptoRng for TestRng {}

impl TestRng {
    fn new() -> Self { TestRng { data: Vec::new() } }

    fn push(&mut self, new_data: &[u8]) {
        let x = new_data.to_vec();
        self.data.push(x);
    }
}


fuzz_target!(|data: [u8; INPUT_LEN]| {
    let mut rng = TestRng::new();
    let mut start = 0; // Bump this forward as we pull out fuzz input

    // Load up the rng for keygen (2) and encaps (1)
    rng.push(&data[start..start + RND_SIZE]);
    start += RND_SIZE;
    rng.push(&data[start..start + RND_SIZE]);
    start += RND_SIZE;
    rng.push(&data[start..start + RND_SIZE]);
    start += RND_SIZE;

    // Fuzz input -> `try_keygen_with_rng()` and `try_encaps_with_rng()` via rng values
    let (ek1, dk1) = KG::try_keygen_with_rng(&mut rng).unwrap(); // consumes 2 rng values
    let ct1 = ek1.try_encaps_with_rng(&mut rng).unwrap().1; // consumes 1 rng value
    let ek1_bytes = ek1.clone().into_bytes();
    let dk1_bytes = dk1.clone().into_bytes();
    let ct1_bytes = ct1.clone().into_bytes();

    // Extract candidate (xor) bytes for ek deserialization
    let mut ek2_bytes = [0u8; EK_LEN];
    ek2_bytes.copy_from_slice(&data[start..start + EK_LEN]);
    start += EK_LEN;
    for i in 0..EK_LEN {
        ek2_bytes[i] = ek2_bytes[i] ^ ek1_bytes[i];
    }

    // Fuzz input -> `PublicKey::try_from_bytes()`
    let ek2 = PublicKey::try_from_bytes(ek2_bytes);

    // Load up the rng for an encaps
    rng.push(&data[start..start + RND_SIZE]);
    start += RND_SIZE;

    // If fuzz input deserialized into an acceptable ek, then run encaps
    if let Ok(ek2) = ek2 {
        // Fuzz input -> `PublicKey::try_encaps_with_rng()`
        let _res = ek2.try_encaps_with_rng(&mut rng); // consumes 1 rng value
    }

    // Extract candidate (xor) bytes for dk deserialization
    let mut dk2_bytes = [0u8; DK_LEN];
    dk2_bytes.copy_from_slice(&data[start..start + DK_LEN]);
    start += DK_LEN;
    for i in 0..DK_LEN {
        dk2_bytes[i] = dk2_bytes[i] ^ dk1_bytes[i];
    }

    // Fuzz input -> `SecretKey::try_from_bytes()`
    let dk2 = SecretKey::try_from_bytes(dk2_bytes);

    // Fuzz input -> `KG::validate_keypair_vartime()`
    let _ok = KG::validate_keypair_vartime(&ek2_bytes, &dk2_bytes);

    // Extract candidate (xor) bytes for ct deserialization
    let mut ct2_bytes = [0u8; CT_LEN];
    ct2_bytes.copy_from_slice(&data[start..start + CT_LEN]);
    start += CT_LEN;
    for i in 0..CT_LEN {
        ct2_bytes[i] = ct2_bytes[i] ^ ct1_bytes[i];
    }

    // Fuzz input -> `Ciphertext::try_from_bytes()`
    let ct2 = Ciphertext::try_from_bytes(ct2_bytes);

    if let Ok(ct2) = ct2 {
        // Fuzz input -> `SecretKey::try_decaps()`
        let _res = dk1.try_decaps(&ct2);

        if let Ok(dk2) = dk2 {
            // Fuzz input -> `SecretKey::try_decaps()`
            let _res = dk2.try_decaps(&ct2);
        }
    }

    assert_eq!(start, data.len());
});

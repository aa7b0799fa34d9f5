use mirletis::traits::{Decaps, Encaps, KeyGen, SerDes};
use mirletis::{self_test, Ciphertext, PublicKey, CT_LEN, DK_LEN, EK_LEN, KG};
use rand_chacha::rand_core::SeedableRng;

#[test]
fn test_expected_flow() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    for _i in 0..100 {
        // Alice runs KeyGen, and serializes ek for Bob (to bytes)
        let (alice_ek, alice_dk) = KG::try_keygen_with_rng(&mut rng).unwrap();
        let alice_ek_bytes = alice_ek.into_bytes();

        // Alice sends ek bytes to Bob
        let bob_ek_bytes = alice_ek_bytes;

        // Bob deserializes ek bytes, runs Encaps, to get ssk and serializes ct for Alice (to bytes)
        let bob_ek = PublicKey::try_from_bytes(bob_ek_bytes).unwrap();
        let (bob_ssk, bob_ct) = bob_ek.try_encaps_with_rng(&mut rng).unwrap();
        let bob_ct_bytes = bob_ct.into_bytes();

        // Bob sends ct bytes to Alice
        let alice_ct_bytes = bob_ct_bytes;

        // Alice deserializes and runs Decaps
        let alice_ct = Ciphertext::try_from_bytes(alice_ct_bytes).unwrap();
        let alice_ssk = alice_dk.try_decaps(&alice_ct).unwrap();

        // Alice and Bob now have the same shared secret key
        assert_eq!(bob_ssk, alice_ssk);

        // Double check the correspondence of the serialized keypair (we already have alice_ek)
        let alice_dk_bytes = alice_dk.into_bytes();
        assert!(KG::validate_keypair_vartime(&alice_ek_bytes, &alice_dk_bytes));
    }
}

// S1/S2/S3: self_test over the three literal entropy patterns from the design notes.
#[test]
fn self_test_sequential_entropy() {
    let mut entropy = [0u8; 32];
    for (i, b) in entropy.iter_mut().enumerate() {
        *b = (i + 1) as u8;
    }
    assert_eq!(self_test(&entropy), 0);
}

#[test]
fn self_test_all_zero_entropy() {
    assert_eq!(self_test(&[0x00; 32]), 0);
}

#[test]
fn self_test_all_ff_entropy() {
    assert_eq!(self_test(&[0xFF; 32]), 0);
}

// S4: explicit keygen/encaps/decaps with named entropies, asserting agreement.
#[test]
fn alice_and_bob_agree_on_named_entropy() {
    let mut rng1 = rand_chacha::ChaCha8Rng::seed_from_u64(1);
    let (ek, dk) = KG::try_keygen_with_rng(&mut rng1).unwrap();
    let mut rng2 = rand_chacha::ChaCha8Rng::seed_from_u64(2);
    let (ssk1, ct) = ek.try_encaps_with_rng(&mut rng2).unwrap();
    let ssk2 = dk.try_decaps(&ct).unwrap();
    assert_eq!(ssk1, ssk2);
}

// S5: flipping a bit of the mask breaks agreement (with high probability) but never panics.
#[test]
fn flipped_mask_bit_breaks_agreement_without_panicking() {
    let mut rng1 = rand_chacha::ChaCha8Rng::seed_from_u64(3);
    let (ek, dk) = KG::try_keygen_with_rng(&mut rng1).unwrap();
    let mut rng2 = rand_chacha::ChaCha8Rng::seed_from_u64(4);
    let (ssk1, ct) = ek.try_encaps_with_rng(&mut rng2).unwrap();

    let mut tampered_bytes = ct.into_bytes();
    tampered_bytes[1280] ^= 0x01; // u[K*N] = 1280 bytes; this is the mask's first byte
    // cnt must still agree with the tampered mask's popcount or try_from_bytes rejects it;
    // recompute and overwrite cnt (bytes 1312..1314) to keep the ciphertext well-formed.
    let popcount: u32 = tampered_bytes[1280..1312].iter().map(|b| b.count_ones()).sum();
    tampered_bytes[1312..1314].copy_from_slice(&(popcount as u16).to_le_bytes());
    let tampered_ct = Ciphertext::try_from_bytes(tampered_bytes).unwrap();

    let ssk2 = dk.try_decaps(&tampered_ct).unwrap();
    assert_ne!(ssk1, ssk2);
}

// S6: flipping a byte of u breaks agreement without raising an error.
#[test]
fn flipped_u_byte_breaks_agreement_without_panicking() {
    let mut rng1 = rand_chacha::ChaCha8Rng::seed_from_u64(5);
    let (ek, dk) = KG::try_keygen_with_rng(&mut rng1).unwrap();
    let mut rng2 = rand_chacha::ChaCha8Rng::seed_from_u64(6);
    let (ssk1, ct) = ek.try_encaps_with_rng(&mut rng2).unwrap();

    let mut tampered_bytes = ct.into_bytes();
    tampered_bytes[0] ^= 0xFF;
    let tampered_ct = Ciphertext::try_from_bytes(tampered_bytes).unwrap();

    let ssk2 = dk.try_decaps(&tampered_ct).unwrap();
    assert_ne!(ssk1, ssk2);
}

#[test]
fn serialized_lengths_match_the_in_memory_layout() {
    assert_eq!(EK_LEN, 1312);
    assert_eq!(DK_LEN, 2560);
    assert_eq!(CT_LEN, 1314);
}

// $ cargo test -- --ignored
#[ignore]
#[test]
fn test_forever() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    for i in 0..u64::MAX {
        let (alice_ek, alice_dk) = KG::try_keygen_with_rng(&mut rng).unwrap();
        let alice_ek_bytes = alice_ek.into_bytes();

        let bob_ek = PublicKey::try_from_bytes(alice_ek_bytes).unwrap();
        let (bob_ssk, bob_ct) = bob_ek.try_encaps_with_rng(&mut rng).unwrap();
        let bob_ct_bytes = bob_ct.into_bytes();

        let alice_ct = Ciphertext::try_from_bytes(bob_ct_bytes).unwrap();
        let alice_ssk = alice_dk.try_decaps(&alice_ct).unwrap();

        assert_eq!(bob_ssk, alice_ssk, "shared secret failed on iteration {i}");
    }
}

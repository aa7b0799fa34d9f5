use mirletis::traits::{KeyGen, SerDes};
use mirletis::{Ciphertext, PublicKey, SecretKey, CT_LEN, DK_LEN, EK_LEN, KG};
use rand_chacha::rand_core::SeedableRng;
use rand_core::RngCore;

// Highlights validation opportunities (and the deliberate lack thereof) at deserialization.
#[test]
fn fails() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    for _i in 0..100 {
        // Any 1312-byte array is a structurally valid PublicKey: seed||b carries no
        // invariant byte_encode/byte_decode would reject.
        let mut random_ek_bytes = [0u8; EK_LEN];
        rng.fill_bytes(&mut random_ek_bytes);
        assert!(PublicKey::try_from_bytes(random_ek_bytes).is_ok());

        // A random SecretKey byte array will almost certainly contain a signed word outside
        // {-1, 0, 1} and gets rejected.
        let mut random_dk_bytes = [0u8; DK_LEN];
        rng.fill_bytes(&mut random_dk_bytes);
        assert!(SecretKey::try_from_bytes(random_dk_bytes).is_err());

        // A random Ciphertext byte array will almost certainly have cnt disagree with the
        // mask's popcount and gets rejected.
        let mut random_ct_bytes = [0u8; CT_LEN];
        rng.fill_bytes(&mut random_ct_bytes);
        assert!(Ciphertext::try_from_bytes(random_ct_bytes).is_err());

        // A structurally valid public key paired with a rejected secret key cannot validate.
        let mut zeroed_dk_bytes = [0u8; DK_LEN]; // all-zero words are valid (0 in {-1,0,1})
        assert!(SecretKey::try_from_bytes(zeroed_dk_bytes).is_ok());
        assert!(!KG::validate_keypair_vartime(&random_ek_bytes, &zeroed_dk_bytes));

        zeroed_dk_bytes.fill(0);
    }
}

#[test]
fn validate_keypair_rejects_mismatched_keys() {
    let mut rng1 = rand_chacha::ChaCha8Rng::seed_from_u64(1);
    let (ek1, _) = KG::try_keygen_with_rng(&mut rng1).unwrap();
    let mut rng2 = rand_chacha::ChaCha8Rng::seed_from_u64(2);
    let (_, dk2) = KG::try_keygen_with_rng(&mut rng2).unwrap();

    assert!(!KG::validate_keypair_vartime(&ek1.into_bytes(), &dk2.into_bytes()));
}

#[test]
fn validate_keypair_accepts_matching_keys() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    let (ek, dk) = KG::try_keygen_with_rng(&mut rng).unwrap();
    assert!(KG::validate_keypair_vartime(&ek.into_bytes(), &dk.into_bytes()));
}

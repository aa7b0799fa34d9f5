use rand_core::CryptoRngCore;

#[cfg(feature = "default-rng")]
use rand_core::OsRng;

/// The `KeyGen` trait is defined to allow trait objects.
pub trait KeyGen {
    /// The (public) encapsulation key sent from the originator to the remote party.
    type EncapsKey;
    /// The (private) decapsulation key used by the originator to generate the shared secret.
    type DecapsKey;
    /// A serialized (public) encapsulation key byte array of the correct length.
    type EncapsByteArray;
    /// A serialized (private) decapsulation key of the correct length.
    type DecapsByteArray;

    /// Generates an encapsulation and decapsulation key pair. This function utilizes the OS
    /// default random number generator and is intended to operate in constant time outside
    /// of the matrix seed, which crosses the trust boundary in the clear.
    /// # Errors
    /// Returns an error when the random number generator fails.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use mirletis::{KG, PublicKey, Ciphertext};
    /// use mirletis::traits::{KeyGen, SerDes, Decaps, Encaps};
    ///
    /// let (ek1, dk1) = KG::try_keygen()?;         // Party 1 generates both encaps and decaps keys
    /// let ek1_bytes = ek1.into_bytes();               // Party 1 serializes the encaps key
    ///
    /// let ek2_bytes = ek1_bytes;                      // Party 1 sends encaps bytes to party 2
    ///
    /// let ek2 = PublicKey::try_from_bytes(ek2_bytes)?;  // Party 2 deserializes the encaps key
    /// let (ssk2, ct2) = ek2.try_encaps()?;            // Party 2 generates shared secret and ciphertext
    /// let ct2_bytes = ct2.into_bytes();                 // Party 2 serializes the ciphertext
    ///
    /// let ct1_bytes = ct2_bytes;                      // Party 2 sends the ciphertext to party 1
    ///
    /// let ct1 = Ciphertext::try_from_bytes(ct1_bytes)?;  // Party 1 deserializes the ciphertext
    /// let ssk1 = dk1.try_decaps(&ct1)?;                // Party 1 runs decaps to generate the shared secret
    ///
    /// assert_eq!(ssk1, ssk2);                         // Each party has the same shared secret
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_keygen() -> Result<(Self::EncapsKey, Self::DecapsKey), &'static str> {
        Self::try_keygen_with_rng(&mut OsRng)
    }

    /// Generates an encapsulation and decapsulation key pair using a caller-supplied random
    /// number generator.
    /// # Errors
    /// Returns an error when the random number generator fails.
    fn try_keygen_with_rng(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::EncapsKey, Self::DecapsKey), &'static str>;

    /// Performs validation between an encapsulation key and a decapsulation key (both in byte
    /// arrays), perhaps in the scenario where both have been serialized, stored to disk, and
    /// then retrieved. This function is not intended to operate in constant time.
    fn validate_keypair_vartime(ek: &Self::EncapsByteArray, dk: &Self::DecapsByteArray) -> bool;
}

/// The `Encaps` trait uses the encapsulation key to generate the ciphertext and shared secret.
pub trait Encaps {
    /// The common shared secret.
    type SharedSecretKey;
    /// The ciphertext transmitted from the remote party to the originator.
    type CipherText;

    /// Generates a shared secret and ciphertext from an encapsulation key. This function
    /// utilizes the OS default random number generator.
    /// # Errors
    /// Returns an error when the random number generator fails.
    #[cfg(feature = "default-rng")]
    fn try_encaps(&self) -> Result<(Self::SharedSecretKey, Self::CipherText), &'static str> {
        self.try_encaps_with_rng(&mut OsRng)
    }

    /// Generates a shared secret and ciphertext from an encapsulation key using a
    /// caller-supplied random number generator.
    /// # Errors
    /// Returns an error when the random number generator fails.
    fn try_encaps_with_rng(
        &self, rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::SharedSecretKey, Self::CipherText), &'static str>;
}

/// The `Decaps` trait uses the decapsulation key and ciphertext to generate the shared secret.
pub trait Decaps {
    /// Ciphertext struct.
    type CipherText;
    /// Shared secret struct.
    type SharedSecretKey;

    /// Generates a shared secret from a decapsulation key and ciphertext. This function is
    /// unconditionally infallible in this implementation: a malformed ciphertext silently
    /// yields a different shared secret rather than an error (§7 of the design notes).
    /// # Errors
    /// Reserved for parity with ports where this step can fail.
    fn try_decaps(&self, ct: &Self::CipherText) -> Result<Self::SharedSecretKey, &'static str>;
}

/// Serialization and deserialization of structs.
pub trait SerDes {
    /// Correctly sized byte array for struct.
    type ByteArray;

    /// Produces a byte array of fixed size specific to the struct being serialized.
    fn into_bytes(self) -> Self::ByteArray;

    /// Consumes a byte array of fixed size specific to the struct being deserialized;
    /// performs validation.
    /// # Errors
    /// Returns an error on malformed input.
    fn try_from_bytes(ba: Self::ByteArray) -> Result<Self, &'static str>
    where
        Self: Sized;
}

use criterion::{criterion_group, criterion_main, Criterion};
use mirletis::traits::{Decaps, Encaps, KeyGen};
use mirletis::KG;
use rand_core::{CryptoRng, RngCore};


// Test RNG to regurgitate incremented values when 'asked'
struct TestRng {
    value: u32,
}

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 { unimplemented!() }

    fn next_u64(&mut self) -> u64 { unimplemented!() }

    fn fill_bytes(&mut self, _out: &mut [u8]) { unimplemented!() }

    fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), rand_core::Error> {
        out.iter_mut().for_each(|b| *b = 0);
        out[0..4].copy_from_slice(&self.value.to_be_bytes());
        self.value = self.value.wrapping_add(1);
        Ok(())
    }
}

impl CryptoRng for TestRng {}


#[allow(clippy::redundant_closure)]
pub fn criterion_benchmark(c: &mut Criterion) {
    // Generate intermediate values needed for the actual benchmark functions
    let mut bench_rng = TestRng { value: 0 };
    let (ek, dk) = KG::try_keygen_with_rng(&mut bench_rng).unwrap();
    let (_, ct) = ek.try_encaps_with_rng(&mut bench_rng).unwrap();

    c.bench_function("KeyGen", |b| b.iter(|| KG::try_keygen_with_rng(&mut bench_rng)));
    c.bench_function("Encaps", |b| b.iter(|| ek.try_encaps_with_rng(&mut bench_rng)));
    c.bench_function("Decaps", |b| b.iter(|| dk.try_decaps(&ct)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

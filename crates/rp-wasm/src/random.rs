// ============================================================================
// RANDOM — Math.random() as a rand generator
// ============================================================================

use rand::RngCore;

/// Browser entropy via `Math.random()`
///
/// Keeps the wasm build free of `getrandom`. Each call yields 53 random bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathRandom;

impl RngCore for MathRandom {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let r = js_sys::Math::random();
        ((r * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_be_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

//! Random sources for the stochastic trials.
//!
//! Aucun flux global partagé : chaque partition (ligne de sortie) reçoit son
//! propre `StdRng`, dérivé de la graine de base et de l'index de la partition.
//! Le résultat pour une graine donnée ne dépend donc pas du nombre de threads.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Mix a base seed with a stream index (SplitMix64 finalizer).
///
/// Neighbouring stream indices yield unrelated seeds.
///
/// # Example
/// ```
/// use sd_dither::rng::mix_seed;
/// assert_eq!(mix_seed(7, 3), mix_seed(7, 3));
/// assert_ne!(mix_seed(7, 3), mix_seed(7, 4));
/// ```
#[inline]
#[must_use]
pub fn mix_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed
        .wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Générateur dédié à la partition `stream`.
#[must_use]
pub fn stream_rng(seed: u64, stream: u64) -> StdRng {
    StdRng::seed_from_u64(mix_seed(seed, stream))
}

/// Graine fraîche tirée de l'entropie du thread courant.
#[must_use]
pub fn fresh_seed() -> u64 {
    rand::random()
}

/// One sample: white if the (stretched) intensity strictly beats a uniform
/// draw in `[0, 255]`.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use sd_dither::rng::trial;
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// assert!(trial(256.0, &mut rng));
/// assert!(!trial(0.0, &mut rng));
/// ```
#[inline(always)]
pub fn trial<R: Rng + ?Sized>(value: f64, rng: &mut R) -> bool {
    value > f64::from(rng.random::<u8>())
}

#[cfg(test)]
pub(crate) mod mock {
    use rand::RngCore;

    /// Rejoue une suite fixe de tirages u8 (chaque octet du mot est identique,
    /// quel que soit l'octet extrait par la distribution).
    pub struct ScriptedRng {
        draws: Vec<u8>,
        pub consumed: usize,
    }

    impl ScriptedRng {
        pub fn new(draws: &[u8]) -> Self {
            Self {
                draws: draws.to_vec(),
                consumed: 0,
            }
        }

        fn next_byte(&mut self) -> u8 {
            let b = self.draws[self.consumed % self.draws.len()];
            self.consumed += 1;
            b
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            u32::from_ne_bytes([self.next_byte(); 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_ne_bytes([self.next_byte(); 8])
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            let b = self.next_byte();
            dst.fill(b);
        }
    }
}

//! Run-scoped random number streams.
//!
//! Every run owns exactly one generator. Operators borrow it mutably, so a
//! seeded run is reproducible and concurrent runs never share state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a seeded generator.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Draws `n` child seeds from a generator seeded with `base`, in order.
///
/// Seed `i` depends only on `base` and `i`, so the children can be handed
/// to concurrent runs in any order.
pub fn child_seeds(base: u64, n: usize) -> Vec<u64> {
    let mut parent = create_rng(base);
    (0..n).map(|_| parent.random()).collect()
}

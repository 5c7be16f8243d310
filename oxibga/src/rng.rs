use rand::rngs::StdRng;
use rand::SeedableRng;

/// Returns the random generator for a run: seeded
/// from `seed` if given, so that the run can be
/// reproduced, or from system entropy otherwise.
///
/// # Examples
/// ```
/// use rand::Rng;
///
/// let mut a = oxibga::rng::seeded(Some(42));
/// let mut b = oxibga::rng::seeded(Some(42));
/// assert_eq!(a.gen::<u64>(), b.gen::<u64>());
/// ```
pub fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

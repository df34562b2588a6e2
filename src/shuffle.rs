//! Seeded, reproducible shuffling for the "random order" sort mode.
//!
//! A shuffled list must keep its order across re-renders until the user asks
//! for a new shuffle, so the permutation is derived from a stored `u32` seed
//! rather than from a global random source.

/// The mulberry32 pseudo-random generator.
///
/// A tiny generator with 32 bits of state. It is not suitable for anything
/// security related; it exists to turn a seed into a stable permutation.
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::shuffle::Mulberry32;
///
/// let mut a = Mulberry32::new(42);
/// let mut b = Mulberry32::new(42);
/// assert_eq!(a.next_u32(), b.next_u32());
///
/// let x = a.next_f64();
/// assert!((0.0..1.0).contains(&x));
/// ```
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates a generator from `seed`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Returns the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Returns the next output normalized to `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Permutes `items` in place with a Fisher–Yates walk driven by `seed`.
///
/// The same seed applied to the same input order always yields the same
/// permutation.
pub fn shuffle_in_place<T>(items: &mut [T], seed: u32) {
    let mut rng = Mulberry32::new(seed);
    let mut current = items.len();

    while current > 0 {
        // next_f64 < 1, so the product stays below `current`
        let random_index = (rng.next_f64() * current as f64) as usize;
        current -= 1;
        items.swap(current, random_index);
    }
}

/// Returns a shuffled copy of `items` using [`shuffle_in_place`].
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::shuffle::shuffle_with_seed;
///
/// let first = shuffle_with_seed(&[1, 2, 3, 4, 5], 42);
/// let second = shuffle_with_seed(&[1, 2, 3, 4, 5], 42);
/// assert_eq!(first, second);
/// ```
pub fn shuffle_with_seed<T: Clone>(items: &[T], seed: u32) -> Vec<T> {
    let mut result = items.to_vec();
    shuffle_in_place(&mut result, seed);
    result
}

/// Returns a fresh random seed that is never zero.
///
/// Zero is reserved so that callers can treat a stored seed of `0` as
/// "no shuffle".
pub fn fresh_seed() -> u32 {
    rand::random::<u32>().max(1)
}

/// Pick one element of a non-empty slice uniformly at random.
#[inline]
pub(crate) fn choose<'a, T>(rng: &mut fastrand::Rng, items: &'a [T]) -> &'a T {
    debug_assert!(!items.is_empty(), "cannot choose from an empty slice");
    &items[rng.usize(..items.len())]
}

/// Draw a fresh seed for a derived, independent generator.
#[inline]
pub(crate) fn next_seed(rng: &mut fastrand::Rng) -> u64 {
    rng.u64(..)
}

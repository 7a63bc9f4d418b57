//! Seeded random search over a [`HyperparameterSpace`].
//!
//! Every draw builds its own generator from an explicit seed; nothing is
//! shared between calls. The same `(space, seed)` always yields the same
//! [`Configuration`], and the same `(space, n, base_seed)` always yields the
//! same ordered batch, so a search run can be replayed from its logged seed.
//!
//! # Examples
//!
//! ```
//! use pyro_hparams::Hyperparameter;
//! use pyro_hparams::sampler::{draw_configuration, draw_configurations};
//! use pyro_hparams::space::HyperparameterSpace;
//!
//! let space = HyperparameterSpace::builder()
//!     .candidates(Hyperparameter::Batch, [16_i64, 32, 64])
//!     .candidates(Hyperparameter::Optimizer, ["SGD", "Adam", "AdamW"])
//!     .build()
//!     .unwrap();
//!
//! let a = draw_configuration(&space, 42);
//! let b = draw_configuration(&space, 42);
//! assert_eq!(a, b);
//!
//! let batch = draw_configurations(&space, 10, 7);
//! assert_eq!(batch.len(), 10);
//! assert!(batch.iter().all(|c| space.contains(c)));
//! ```

use crate::configuration::Configuration;
use crate::rng_util;
use crate::space::HyperparameterSpace;

/// Base seed used when a batch draw is not given one.
pub const DEFAULT_SEED: u64 = 0;

/// Draws one configuration from `space` using `seed`.
///
/// Each hyperparameter independently receives one of its candidates, all
/// candidates being equally likely. Hyperparameters are visited in
/// [`Hyperparameter`](crate::Hyperparameter) order, which makes the result a
/// pure function of `space` and `seed`.
#[must_use]
pub fn draw_configuration(space: &HyperparameterSpace, seed: u64) -> Configuration {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut configuration = Configuration::new();
    for (name, candidates) in space.iter() {
        configuration.insert(name, rng_util::choose(&mut rng, candidates).clone());
    }
    trace_debug!(seed, %configuration, "configuration drawn");
    configuration
}

/// Draws `n` configurations from `space`, deriving each one's seed from `base_seed`.
///
/// A generator seeded with `base_seed` produces one fresh seed per
/// configuration, which is then passed to [`draw_configuration`]. The
/// result has exactly `n` elements, in draw order.
#[must_use]
pub fn draw_configurations(
    space: &HyperparameterSpace,
    n: usize,
    base_seed: u64,
) -> Vec<Configuration> {
    trace_info!(n, base_seed, "drawing configurations");
    Configurations::new(space, base_seed)
        .take(n)
        .map(|(_, configuration)| configuration)
        .collect()
}

/// An unbounded, deterministic stream of configurations.
///
/// Yields `(seed, configuration)` pairs, where `seed` is the derived seed
/// that reproduces the configuration through [`draw_configuration`]. Taking
/// the first `n` items is equivalent to [`draw_configurations`].
///
/// # Examples
///
/// ```
/// use pyro_hparams::Hyperparameter;
/// use pyro_hparams::sampler::{Configurations, draw_configuration};
/// use pyro_hparams::space::HyperparameterSpace;
///
/// let space = HyperparameterSpace::builder()
///     .candidates(Hyperparameter::Lr0, [0.001, 0.01, 0.1])
///     .build()
///     .unwrap();
///
/// for (seed, configuration) in Configurations::new(&space, 0).take(3) {
///     assert_eq!(draw_configuration(&space, seed), configuration);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Configurations<'a> {
    space: &'a HyperparameterSpace,
    rng: fastrand::Rng,
}

impl<'a> Configurations<'a> {
    /// Creates a stream over `space` rooted at `base_seed`.
    #[must_use]
    pub fn new(space: &'a HyperparameterSpace, base_seed: u64) -> Self {
        Self {
            space,
            rng: fastrand::Rng::with_seed(base_seed),
        }
    }
}

impl Iterator for Configurations<'_> {
    type Item = (u64, Configuration);

    fn next(&mut self) -> Option<Self::Item> {
        let seed = rng_util::next_seed(&mut self.rng);
        Some((seed, draw_configuration(self.space, seed)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl core::iter::FusedIterator for Configurations<'_> {}

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![warn(missing_docs)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Declarative, seed-reproducible random search over YOLO training
//! hyperparameters. A YAML schema describes every tunable parameter as an
//! explicit list of candidates or as a linear / logarithmic numeric range;
//! the crate validates it against a fixed allow-list, expands it into a
//! [`HyperparameterSpace`](space::HyperparameterSpace), and draws
//! configurations from it that are a pure function of their seed.
//!
//! # Getting Started
//!
//! ```
//! use pyro_hparams::prelude::*;
//!
//! let space = HyperparameterSpace::from_yaml_str(
//!     "
//! optimizer:
//!   type: array
//!   array_type: string
//!   values: [SGD, Adam, AdamW]
//! lr0:
//!   type: space
//!   space_type: float
//!   space_config: {type: logarithmic, start: 0.0001, stop: 0.03, num: 50, base: 10}
//! ",
//! )
//! .unwrap();
//!
//! let configurations = draw_configurations(&space, 10, 1234);
//! assert_eq!(configurations, draw_configurations(&space, 10, 1234));
//! for configuration in &configurations {
//!     assert!(space.contains(configuration));
//! }
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`SpaceEntrySpec`](schema::SpaceEntrySpec) | One parsed schema entry: an explicit array or a parametric range. |
//! | [`HyperparameterSpace`](space::HyperparameterSpace) | Validated, immutable candidate sequences per [`Hyperparameter`]. |
//! | [`Configuration`] | One drawn value per hyperparameter. |
//! | [`draw_configuration`](sampler::draw_configuration) / [`draw_configurations`](sampler::draw_configurations) | Seeded single and batch draws. |
//! | [`TrainArgs`](train::TrainArgs) / [`Trainer`](train::Trainer) | Mapping configurations onto `yolo train` runs. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) when spaces are parsed and configurations drawn | off |
//! | `cli` | The `pyro-search` binary (enables `tracing`) | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod configuration;
pub mod distribution;
mod error;
pub mod hyperparameter;
pub mod model;
pub mod preset;
mod rng_util;
pub mod sampler;
pub mod schema;
pub mod space;
pub mod train;
mod value;

pub use configuration::Configuration;
pub use error::{Error, ParseError, Result};
pub use hyperparameter::Hyperparameter;
pub use value::{Value, ValueType};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use pyro_hparams::prelude::*;
/// ```
pub mod prelude {
    pub use crate::configuration::Configuration;
    pub use crate::distribution::Range;
    pub use crate::error::{Error, ParseError, Result};
    pub use crate::hyperparameter::Hyperparameter;
    pub use crate::model::{YoloModelSize, YoloModelVersion};
    pub use crate::sampler::{Configurations, DEFAULT_SEED, draw_configuration, draw_configurations};
    pub use crate::schema::SpaceEntrySpec;
    pub use crate::space::{HyperparameterSpace, HyperparameterSpaceBuilder};
    pub use crate::train::{TrainArgs, Trainer, YoloCli, run_random_search};
    pub use crate::value::{Value, ValueType};
}

//! The stock YOLO search space, built in code.

use crate::distribution::Range;
use crate::error::{Error, Result};
use crate::hyperparameter::Hyperparameter;
use crate::model::{self, YoloModelSize, YoloModelVersion};
use crate::schema::SpaceEntrySpec;
use crate::space::HyperparameterSpace;
use crate::value::ValueType;

/// Batch sizes the stock space accepts.
pub const ALLOWED_BATCH_SIZES: &[i64] = &[16, 32, 64, 128];

/// Optimizers explored by the stock space.
pub const OPTIMIZERS: [&str; 7] = ["SGD", "Adam", "AdamW", "NAdam", "RAdam", "RMSProp", "auto"];

/// Builds the stock search space for the given model versions, sizes and batch sizes.
///
/// | Hyperparameter | Candidates |
/// |---|---|
/// | `model_type` | every version × size |
/// | `epochs` | 50, 60, 70 |
/// | `patience` | 10 points over 10..=50 |
/// | `imgsz` | 1024 |
/// | `batch` | `batch_sizes` |
/// | `optimizer` | [`OPTIMIZERS`] |
/// | `lr0` | 50 log-spaced points over 1e-4..=3e-2 |
/// | `lrf` | 50 log-spaced points over 1e-3..=1e-2 |
/// | `mixup` | 0.0, 0.2 |
/// | `close_mosaic` | 10 points over 0..=35 |
/// | `degrees` | 10 points over 0..=10 |
/// | `translate` | 10 points over 0.0..=0.4 |
///
/// # Errors
///
/// Returns [`Error::InvalidBatchSize`] if a batch size is not in
/// [`ALLOWED_BATCH_SIZES`], and [`Error::EmptyCandidateSet`] if `versions`,
/// `sizes` or `batch_sizes` is empty.
///
/// # Examples
///
/// ```
/// use pyro_hparams::Hyperparameter;
/// use pyro_hparams::model::{YoloModelSize, YoloModelVersion};
/// use pyro_hparams::preset::yolo_space;
///
/// let space = yolo_space(
///     &[YoloModelVersion::V11],
///     &[YoloModelSize::Nano, YoloModelSize::Small],
///     &[16, 32],
/// )
/// .unwrap();
/// assert_eq!(space.get(Hyperparameter::ModelType).unwrap().len(), 2);
/// ```
pub fn yolo_space(
    versions: &[YoloModelVersion],
    sizes: &[YoloModelSize],
    batch_sizes: &[i64],
) -> Result<HyperparameterSpace> {
    if let Some(&size) = batch_sizes
        .iter()
        .find(|size| !ALLOWED_BATCH_SIZES.contains(size))
    {
        return Err(Error::InvalidBatchSize {
            size,
            allowed: ALLOWED_BATCH_SIZES,
        });
    }

    HyperparameterSpace::builder()
        .candidates(
            Hyperparameter::ModelType,
            model::model_types(versions, sizes),
        )
        .entry(Hyperparameter::Epochs, &linear(ValueType::Int, 50.0, 70.0, 3))?
        .entry(Hyperparameter::Patience, &linear(ValueType::Int, 10.0, 50.0, 10))?
        .candidates(Hyperparameter::Imgsz, [1024_i64])
        .candidates(Hyperparameter::Batch, batch_sizes.iter().copied())
        .candidates(Hyperparameter::Optimizer, OPTIMIZERS)
        .entry(Hyperparameter::Lr0, &logarithmic(0.0001, 0.03, 50))?
        .entry(Hyperparameter::Lrf, &logarithmic(0.001, 0.01, 50))?
        .candidates(Hyperparameter::Mixup, [0.0, 0.2])
        .entry(Hyperparameter::CloseMosaic, &linear(ValueType::Int, 0.0, 35.0, 10))?
        .entry(Hyperparameter::Degrees, &linear(ValueType::Int, 0.0, 10.0, 10))?
        .entry(Hyperparameter::Translate, &linear(ValueType::Float, 0.0, 0.4, 10))?
        .build()
}

fn linear(value_type: ValueType, start: f64, stop: f64, num: usize) -> SpaceEntrySpec {
    SpaceEntrySpec::Space {
        value_type,
        range: Range::Linear { start, stop, num },
    }
}

fn logarithmic(start: f64, stop: f64, num: usize) -> SpaceEntrySpec {
    SpaceEntrySpec::Space {
        value_type: ValueType::Float,
        range: Range::Logarithmic { start, stop, num },
    }
}

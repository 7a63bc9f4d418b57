//! The allow-list of recognized hyperparameter names.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A recognized YOLO training hyperparameter.
///
/// The variants form the closed allow-list that schemas are validated
/// against. The string form of each variant is the training argument name
/// used by ultralytics (`lr0`, `hsv_h`, ...).
///
/// Variants are ordered as listed, which fixes the iteration order of
/// spaces and configurations and therefore the order in which a sampler
/// consumes random numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hyperparameter {
    /// Pretrained model identifier, e.g. `yolo11s.pt`.
    ModelType,
    /// Number of training epochs.
    Epochs,
    /// Epochs without improvement before early stopping.
    Patience,
    /// Input image size.
    Imgsz,
    /// Batch size.
    Batch,
    /// Optimizer name.
    Optimizer,
    /// Initial learning rate.
    Lr0,
    /// Final learning rate as a fraction of `lr0`.
    Lrf,
    /// Mixup augmentation probability.
    Mixup,
    /// Epoch from the end at which mosaic augmentation is disabled.
    CloseMosaic,
    /// Rotation augmentation range in degrees.
    Degrees,
    /// Translation augmentation fraction.
    Translate,
    /// Shear augmentation range in degrees.
    Shear,
    /// Hue augmentation fraction.
    HsvH,
    /// Saturation augmentation fraction.
    HsvS,
    /// Value augmentation fraction.
    HsvV,
}

impl Hyperparameter {
    /// Every recognized hyperparameter, in iteration order.
    pub const ALL: [Self; 16] = [
        Self::ModelType,
        Self::Epochs,
        Self::Patience,
        Self::Imgsz,
        Self::Batch,
        Self::Optimizer,
        Self::Lr0,
        Self::Lrf,
        Self::Mixup,
        Self::CloseMosaic,
        Self::Degrees,
        Self::Translate,
        Self::Shear,
        Self::HsvH,
        Self::HsvS,
        Self::HsvV,
    ];

    /// Returns the schema and training argument name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModelType => "model_type",
            Self::Epochs => "epochs",
            Self::Patience => "patience",
            Self::Imgsz => "imgsz",
            Self::Batch => "batch",
            Self::Optimizer => "optimizer",
            Self::Lr0 => "lr0",
            Self::Lrf => "lrf",
            Self::Mixup => "mixup",
            Self::CloseMosaic => "close_mosaic",
            Self::Degrees => "degrees",
            Self::Translate => "translate",
            Self::Shear => "shear",
            Self::HsvH => "hsv_h",
            Self::HsvS => "hsv_s",
            Self::HsvV => "hsv_v",
        }
    }
}

impl fmt::Display for Hyperparameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`Hyperparameter::from_str`] for names outside the allow-list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownHyperparameter(pub String);

impl fmt::Display for UnknownHyperparameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized hyperparameter '{}'", self.0)
    }
}

impl core::error::Error for UnknownHyperparameter {}

impl FromStr for Hyperparameter {
    type Err = UnknownHyperparameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| UnknownHyperparameter(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for h in Hyperparameter::ALL {
            assert_eq!(h.as_str().parse::<Hyperparameter>().unwrap(), h);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "bogus_param".parse::<Hyperparameter>().unwrap_err();
        assert_eq!(err, UnknownHyperparameter("bogus_param".into()));
        assert_eq!(err.to_string(), "unrecognized hyperparameter 'bogus_param'");
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("LR0".parse::<Hyperparameter>().is_err());
    }

    #[test]
    fn serde_uses_schema_names() {
        assert_eq!(
            serde_json::to_string(&Hyperparameter::CloseMosaic).unwrap(),
            r#""close_mosaic""#
        );
        assert_eq!(
            serde_json::from_str::<Hyperparameter>(r#""hsv_h""#).unwrap(),
            Hyperparameter::HsvH
        );
    }

    #[test]
    fn all_is_sorted() {
        assert!(Hyperparameter::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}

//! YOLO model identifiers.

use serde::{Deserialize, Serialize};

/// Supported YOLO model generations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum YoloModelVersion {
    /// YOLOv8.
    V8,
    /// YOLOv9.
    V9,
    /// YOLOv10.
    V10,
    /// YOLO11.
    V11,
    /// YOLO12.
    V12,
}

impl YoloModelVersion {
    /// Returns the generation number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::V8 => 8,
            Self::V9 => 9,
            Self::V10 => 10,
            Self::V11 => 11,
            Self::V12 => 12,
        }
    }
}

/// Supported YOLO model sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum YoloModelSize {
    /// `n`
    Nano,
    /// `s`
    Small,
    /// `m`
    Medium,
    /// `l`
    Large,
    /// `x`
    XLarge,
}

impl YoloModelSize {
    /// Returns the single-letter size suffix.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Nano => 'n',
            Self::Small => 's',
            Self::Medium => 'm',
            Self::Large => 'l',
            Self::XLarge => 'x',
        }
    }
}

/// A pretrained model identifier, as accepted by `yolo train model=...`.
///
/// Generations up to 10 use the `yolov` prefix, later ones `yolo`; from
/// generation 9 on the identifier names the `.pt` weights file.
///
/// ```
/// use pyro_hparams::model::{YoloModelSize, YoloModelVersion, model_type};
///
/// assert_eq!(model_type(YoloModelVersion::V12, YoloModelSize::Small), "yolo12s.pt");
/// assert_eq!(model_type(YoloModelVersion::V10, YoloModelSize::Large), "yolov10l.pt");
/// assert_eq!(model_type(YoloModelVersion::V8, YoloModelSize::Nano), "yolov8n");
/// ```
#[must_use]
pub fn model_type(version: YoloModelVersion, size: YoloModelSize) -> String {
    let number = version.number();
    let prefix = if number <= 10 { "yolov" } else { "yolo" };
    let suffix = if number >= 9 { ".pt" } else { "" };
    format!("{prefix}{number}{}{suffix}", size.letter())
}

/// Every model type for the given versions and sizes, grouped by size.
#[must_use]
pub fn model_types(versions: &[YoloModelVersion], sizes: &[YoloModelSize]) -> Vec<String> {
    sizes
        .iter()
        .flat_map(|&size| versions.iter().map(move |&version| model_type(version, size)))
        .collect()
}

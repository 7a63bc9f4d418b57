//! Turning drawn configurations into YOLO training runs.
//!
//! Training itself is delegated to the ultralytics `yolo` command. This
//! module owns the default training arguments, the mapping from a
//! [`Configuration`] onto them, and the loop that launches one run per
//! drawn configuration.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::configuration::Configuration;
use crate::error::{Error, Result};
use crate::hyperparameter::Hyperparameter;
use crate::sampler::Configurations;
use crate::space::HyperparameterSpace;
use crate::value::{Value, ValueType};

/// The full argument set of one `yolo train` invocation.
///
/// [`TrainArgs::new`] fills every tunable field with its default; drawn
/// configurations then override the fields they assign.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainArgs {
    /// Pretrained model identifier.
    pub model: String,
    /// Dataset description (`data.yaml`).
    pub data: PathBuf,
    /// Directory the run is written under.
    pub project: PathBuf,
    /// Run name, unique within `project`.
    pub name: String,

    /// Images per batch.
    pub batch: i64,
    /// Use a cosine learning-rate schedule.
    pub cos_lr: bool,
    /// Number of training epochs.
    pub epochs: i64,
    /// Input image size in pixels.
    pub imgsz: i64,
    /// Initial learning rate.
    pub lr0: f64,
    /// Final learning rate as a fraction of `lr0`.
    pub lrf: f64,
    /// Optimizer name, or `auto`.
    pub optimizer: String,
    /// Epochs without improvement before stopping early.
    pub patience: i64,
    /// Learning-rate warmup length in epochs.
    pub warmup_epochs: f64,

    /// Box loss gain (`box`).
    pub box_gain: f64,
    /// Classification loss gain.
    pub cls: f64,
    /// Distribution focal loss gain.
    pub dfl: f64,
    /// IoU threshold used during validation.
    pub iou: f64,
    /// Train every class as one.
    pub single_cls: bool,

    /// Final epochs trained without mosaic augmentation.
    pub close_mosaic: i64,
    /// Rotation augmentation range in degrees.
    pub degrees: f64,
    /// Probability of a horizontal flip.
    pub fliplr: f64,
    /// Hue augmentation fraction.
    pub hsv_h: f64,
    /// Saturation augmentation fraction.
    pub hsv_s: f64,
    /// Value (brightness) augmentation fraction.
    pub hsv_v: f64,
    /// Probability of mixup augmentation.
    pub mixup: f64,
    /// Shear augmentation range in degrees.
    pub shear: f64,
    /// Translation augmentation as a fraction of image size.
    pub translate: f64,
}

impl TrainArgs {
    /// Creates arguments with default hyperparameters for the given dataset and output location.
    #[must_use]
    pub fn new(data: impl Into<PathBuf>, project: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            model: "yolo11n.pt".to_owned(),
            data: data.into(),
            project: project.into(),
            name: name.into(),
            batch: 16,
            cos_lr: false,
            epochs: 100,
            imgsz: 640,
            lr0: 0.01,
            lrf: 0.01,
            optimizer: "auto".to_owned(),
            patience: 100,
            warmup_epochs: 3.0,
            box_gain: 7.5,
            cls: 0.5,
            dfl: 1.5,
            iou: 0.6,
            single_cls: true,
            close_mosaic: 10,
            degrees: 0.0,
            fliplr: 0.5,
            hsv_h: 0.015,
            hsv_s: 0.7,
            hsv_v: 0.4,
            mixup: 0.0,
            shear: 0.0,
            translate: 0.1,
        }
    }

    /// Returns a copy with every hyperparameter in `configuration` applied.
    ///
    /// Integer arguments require integer values; float arguments accept
    /// integers and floats; `model_type` and `optimizer` require strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationType`] if a drawn value has the wrong type.
    pub fn with_configuration(&self, configuration: &Configuration) -> Result<Self> {
        let mut args = self.clone();
        for (name, value) in configuration.iter() {
            match name {
                Hyperparameter::ModelType => args.model = string(name, value)?,
                Hyperparameter::Optimizer => args.optimizer = string(name, value)?,
                Hyperparameter::Epochs => args.epochs = int(name, value)?,
                Hyperparameter::Patience => args.patience = int(name, value)?,
                Hyperparameter::Imgsz => args.imgsz = int(name, value)?,
                Hyperparameter::Batch => args.batch = int(name, value)?,
                Hyperparameter::CloseMosaic => args.close_mosaic = int(name, value)?,
                Hyperparameter::Lr0 => args.lr0 = float(name, value)?,
                Hyperparameter::Lrf => args.lrf = float(name, value)?,
                Hyperparameter::Mixup => args.mixup = float(name, value)?,
                Hyperparameter::Degrees => args.degrees = float(name, value)?,
                Hyperparameter::Translate => args.translate = float(name, value)?,
                Hyperparameter::Shear => args.shear = float(name, value)?,
                Hyperparameter::HsvH => args.hsv_h = float(name, value)?,
                Hyperparameter::HsvS => args.hsv_s = float(name, value)?,
                Hyperparameter::HsvV => args.hsv_v = float(name, value)?,
            }
        }
        Ok(args)
    }

    /// Renders the arguments as `yolo` CLI tokens, starting with the `train` mode.
    #[must_use]
    pub fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec!["train".to_owned()];
        let mut push = |key: &str, value: &dyn core::fmt::Display| {
            args.push(format!("{key}={value}"));
        };
        push("model", &self.model);
        push("data", &self.data.display());
        push("project", &self.project.display());
        push("name", &self.name);
        push("batch", &self.batch);
        push("cos_lr", &self.cos_lr);
        push("epochs", &self.epochs);
        push("imgsz", &self.imgsz);
        push("lr0", &self.lr0);
        push("lrf", &self.lrf);
        push("optimizer", &self.optimizer);
        push("patience", &self.patience);
        push("warmup_epochs", &self.warmup_epochs);
        push("box", &self.box_gain);
        push("cls", &self.cls);
        push("dfl", &self.dfl);
        push("iou", &self.iou);
        push("single_cls", &self.single_cls);
        push("close_mosaic", &self.close_mosaic);
        push("degrees", &self.degrees);
        push("fliplr", &self.fliplr);
        push("hsv_h", &self.hsv_h);
        push("hsv_s", &self.hsv_s);
        push("hsv_v", &self.hsv_v);
        push("mixup", &self.mixup);
        push("shear", &self.shear);
        push("translate", &self.translate);
        args
    }
}

fn int(name: Hyperparameter, value: &Value) -> Result<i64> {
    value.as_int().ok_or_else(|| mismatch(name, ValueType::Int, value))
}

fn float(name: Hyperparameter, value: &Value) -> Result<f64> {
    value
        .as_float()
        .ok_or_else(|| mismatch(name, ValueType::Float, value))
}

fn string(name: Hyperparameter, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| mismatch(name, ValueType::String, value))
}

fn mismatch(name: Hyperparameter, expected: ValueType, value: &Value) -> Error {
    Error::ConfigurationType {
        name,
        expected,
        got: value.value_type(),
    }
}

/// Something that can execute a training run.
pub trait Trainer {
    /// Runs training with `args`, returning once the run has finished.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Training`] if the run could not be started or failed.
    fn train(&self, args: &TrainArgs) -> Result<()>;
}

/// Runs training through the ultralytics `yolo` command-line tool.
#[derive(Clone, Debug)]
pub struct YoloCli {
    program: PathBuf,
}

impl YoloCli {
    /// Uses the given `yolo` executable.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the executable this trainer invokes.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for YoloCli {
    fn default() -> Self {
        Self::new("yolo")
    }
}

impl Trainer for YoloCli {
    fn train(&self, args: &TrainArgs) -> Result<()> {
        trace_info!(program = %self.program.display(), run = %args.name, "launching training run");
        let status = Command::new(&self.program)
            .args(args.to_cli_args())
            .status()
            .map_err(|e| Error::Training {
                run: args.name.clone(),
                reason: format!("could not start {}: {e}", self.program.display()),
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Training {
                run: args.name.clone(),
                reason: format!("{} exited with {status}", self.program.display()),
            })
        }
    }
}

/// One launched run of a random search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRun {
    /// Position of the run within the search.
    pub index: usize,
    /// Seed that reproduces the configuration via [`draw_configuration`](crate::sampler::draw_configuration).
    pub seed: u64,
    /// The drawn configuration.
    pub configuration: Configuration,
    /// The arguments the trainer received.
    pub args: TrainArgs,
}

/// Draws `n` configurations from `space` and trains one run per configuration.
///
/// Each run starts from `template`, is overridden by its configuration and
/// is named `<template.name>_<index>_<seed>` with the derived seed in hex.
/// The configurations are exactly those of
/// [`draw_configurations(space, n, base_seed)`](crate::sampler::draw_configurations).
/// The search stops at the first failed run.
///
/// # Errors
///
/// Returns the first [`Error::ConfigurationType`] or trainer error encountered.
pub fn run_random_search(
    trainer: &impl Trainer,
    space: &HyperparameterSpace,
    n: usize,
    base_seed: u64,
    template: &TrainArgs,
) -> Result<Vec<SearchRun>> {
    trace_info!(n, base_seed, experiment = %template.name, "starting random search");
    let mut runs = Vec::with_capacity(n);
    for (index, (seed, configuration)) in Configurations::new(space, base_seed).take(n).enumerate() {
        let mut args = template.with_configuration(&configuration)?;
        args.name = format!("{}_{index:03}_{seed:016x}", template.name);
        trace_info!(index, seed, %configuration, "starting training run");
        trainer.train(&args)?;
        runs.push(SearchRun {
            index,
            seed,
            configuration,
            args,
        });
    }
    Ok(runs)
}

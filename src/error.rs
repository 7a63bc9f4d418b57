use std::path::PathBuf;

use crate::hyperparameter::Hyperparameter;
use crate::value::ValueType;

/// Errors produced while building a hyperparameter space or running a search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned for every failure while turning a schema into a space.
    ///
    /// The underlying [`ParseError`] is kept as the source so callers see a
    /// single error type regardless of which parsing step failed.
    #[error("failed to parse hyperparameter space: {0}")]
    SpaceParsing(#[from] ParseError),

    /// Returned when a hyperparameter resolves to zero candidate values.
    #[error("hyperparameter '{name}' has no candidate values")]
    EmptyCandidateSet {
        /// The hyperparameter whose candidate sequence is empty.
        name: Hyperparameter,
    },

    /// Returned when a schema file cannot be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a preset is asked for a batch size it does not support.
    #[error("batch size {size} is not allowed, expected one of {allowed:?}")]
    InvalidBatchSize {
        /// The requested batch size.
        size: i64,
        /// The batch sizes the preset accepts.
        allowed: &'static [i64],
    },

    /// Returned when a drawn value cannot be used for a training argument.
    #[error("hyperparameter '{name}' must be {expected}, got {got}")]
    ConfigurationType {
        /// The hyperparameter carrying the mismatched value.
        name: Hyperparameter,
        /// The type the training argument expects.
        expected: ValueType,
        /// The type of the drawn value.
        got: ValueType,
    },

    /// Returned when the external trainer fails.
    #[error("training run '{run}' failed: {reason}")]
    Training {
        /// The run name passed to the trainer.
        run: String,
        /// Why the run failed.
        reason: String,
    },
}

/// The cause of a [`Error::SpaceParsing`] failure.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The schema document is not valid YAML or not a mapping of entries.
    #[error("invalid schema document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An entry is missing fields or has fields of the wrong shape.
    #[error("malformed entry '{name}': {message}")]
    Malformed {
        /// The schema key of the entry.
        name: String,
        /// A description of what is wrong.
        message: String,
    },

    /// An entry's `type` is neither `array` nor `space`.
    #[error("entry '{name}' has unsupported kind '{kind}', expected 'array' or 'space'")]
    UnsupportedEntryKind {
        /// The schema key of the entry.
        name: String,
        /// The kind found in the schema.
        kind: String,
    },

    /// A `space` entry uses a range kind or logarithmic base that cannot be expanded.
    #[error("entry '{name}' has unsupported range {range}")]
    UnsupportedRange {
        /// The schema key of the entry.
        name: String,
        /// The offending range description, e.g. `logarithmic (base 2)`.
        range: String,
    },

    /// A literal cannot be cast to the declared element type.
    #[error("entry '{name}': cannot cast {literal} to {expected}")]
    InvalidLiteral {
        /// The schema key of the entry.
        name: String,
        /// The literal as written in the schema.
        literal: String,
        /// The declared element type.
        expected: ValueType,
    },

    /// A logarithmic range has a non-positive bound.
    #[error("entry '{name}': logarithmic bounds must be positive (start {start}, stop {stop})")]
    InvalidLogBounds {
        /// The schema key of the entry.
        name: String,
        /// The declared start.
        start: f64,
        /// The declared stop.
        stop: f64,
    },

    /// A range bound is NaN or infinite.
    #[error("entry '{name}': range bounds must be finite (start {start}, stop {stop})")]
    NonFiniteBounds {
        /// The schema key of the entry.
        name: String,
        /// The declared start.
        start: f64,
        /// The declared stop.
        stop: f64,
    },

    /// A range asks for more points than a space may hold.
    #[error("entry '{name}': range has {num} points, at most {max} are allowed")]
    TooManyPoints {
        /// The schema key of the entry.
        name: String,
        /// The declared number of points.
        num: usize,
        /// The largest accepted number of points.
        max: usize,
    },

    /// A `space` entry declares a value type that is not numeric.
    #[error("entry '{name}': space values must be int or float, got {value_type}")]
    InvalidSpaceType {
        /// The schema key of the entry.
        name: String,
        /// The declared value type.
        value_type: ValueType,
    },

    /// The schema names hyperparameters outside the allow-list.
    #[error("unrecognized hyperparameters: {}", .0.join(", "))]
    UnrecognizedKeys(Vec<String>),
}

/// Result type alias for this crate's fallible operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_wrapped() {
        let err: Error = ParseError::UnrecognizedKeys(vec!["bogus_param".into()]).into();
        assert!(matches!(
            err,
            Error::SpaceParsing(ParseError::UnrecognizedKeys(_))
        ));
        assert_eq!(
            err.to_string(),
            "failed to parse hyperparameter space: unrecognized hyperparameters: bogus_param"
        );
    }

    #[test]
    fn source_is_preserved() {
        use core::error::Error as _;

        let err: Error = ParseError::UnsupportedRange {
            name: "lr0".into(),
            range: "logarithmic (base 2)".into(),
        }
        .into();
        let source = err.source().unwrap();
        assert_eq!(
            source.to_string(),
            "entry 'lr0' has unsupported range logarithmic (base 2)"
        );
    }

    #[test]
    fn batch_size_message_lists_allowed_sizes() {
        let msg = Error::InvalidBatchSize {
            size: 8,
            allowed: crate::preset::ALLOWED_BATCH_SIZES,
        }
        .to_string();
        assert_eq!(
            msg,
            "batch size 8 is not allowed, expected one of [16, 32, 64, 128]"
        );
    }
}

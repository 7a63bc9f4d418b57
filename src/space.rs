//! The validated, immutable hyperparameter space.

use std::collections::BTreeMap;
use std::path::Path;

use crate::configuration::Configuration;
use crate::error::{Error, ParseError, Result};
use crate::hyperparameter::Hyperparameter;
use crate::schema::{self, SpaceEntrySpec};
use crate::value::Value;

/// A mapping from hyperparameter to its finite, ordered candidate sequence.
///
/// A space is constructed once, from a schema document or programmatically
/// through [`HyperparameterSpace::builder`], and never changes afterwards.
/// Construction guarantees that every key is a recognized [`Hyperparameter`]
/// and that every candidate sequence is non-empty, so sampling from a space
/// cannot fail.
///
/// # Examples
///
/// ```
/// use pyro_hparams::space::HyperparameterSpace;
///
/// let space = HyperparameterSpace::from_yaml_str(
///     "
/// batch:
///   type: array
///   array_type: int
///   values: [16, 32, 64]
/// epochs:
///   type: space
///   space_type: int
///   space_config: {type: linear, start: 10, stop: 50, num: 5}
/// ",
/// )
/// .unwrap();
///
/// assert_eq!(space.len(), 2);
/// assert_eq!(space.cardinality(), 15);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HyperparameterSpace {
    entries: BTreeMap<Hyperparameter, Vec<Value>>,
}

impl HyperparameterSpace {
    /// Builds a space from materialized candidate sequences.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCandidateSet`] if any sequence is empty.
    pub fn new(entries: BTreeMap<Hyperparameter, Vec<Value>>) -> Result<Self> {
        if let Some((&name, _)) = entries.iter().find(|(_, values)| values.is_empty()) {
            return Err(Error::EmptyCandidateSet { name });
        }
        trace_debug!(
            hyperparameters = entries.len(),
            "hyperparameter space constructed"
        );
        Ok(Self { entries })
    }

    /// Returns a builder for constructing a space programmatically.
    #[must_use]
    pub fn builder() -> HyperparameterSpaceBuilder {
        HyperparameterSpaceBuilder::default()
    }

    /// Builds a space from parsed schema entries.
    ///
    /// Every entry is materialized first; keys are then checked against the
    /// allow-list, and all unrecognized keys are reported together.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpaceParsing`] if an entry cannot be materialized or
    /// a key is unrecognized, and [`Error::EmptyCandidateSet`] if an entry
    /// has no candidates.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, SpaceEntrySpec)>,
    {
        let mut materialized = Vec::new();
        for (name, spec) in entries {
            let candidates = spec.candidates(&name)?;
            materialized.push((name, candidates));
        }

        let mut unrecognized = Vec::new();
        let mut space = BTreeMap::new();
        for (name, candidates) in materialized {
            match name.parse::<Hyperparameter>() {
                Ok(hp) => {
                    space.insert(hp, candidates);
                }
                Err(_) => unrecognized.push(name),
            }
        }
        if !unrecognized.is_empty() {
            return Err(ParseError::UnrecognizedKeys(unrecognized).into());
        }

        Self::new(space)
    }

    /// Parses a YAML schema document into a space.
    ///
    /// # Errors
    ///
    /// See [`HyperparameterSpace::from_entries`]; malformed documents are
    /// reported as [`Error::SpaceParsing`].
    pub fn from_yaml_str(document: &str) -> Result<Self> {
        let space = Self::from_entries(schema::parse_entries(document)?)?;
        trace_info!(
            hyperparameters = space.len(),
            cardinality = space.cardinality(),
            "parsed hyperparameter space"
        );
        Ok(space)
    }

    /// Reads and parses a YAML schema file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise see
    /// [`HyperparameterSpace::from_yaml_str`].
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&document)
    }

    /// Returns the candidates of `name`, if it is part of the space.
    #[must_use]
    pub fn get(&self, name: Hyperparameter) -> Option<&[Value]> {
        self.entries.get(&name).map(Vec::as_slice)
    }

    /// Returns the number of hyperparameters in the space.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the space has no hyperparameters.
    ///
    /// An empty space is valid; every draw from it is an empty configuration.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over hyperparameters and their candidates in [`Hyperparameter`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Hyperparameter, &[Value])> {
        self.entries.iter().map(|(&k, v)| (k, v.as_slice()))
    }

    /// Iterates over the hyperparameters in the space.
    pub fn names(&self) -> impl Iterator<Item = Hyperparameter> + '_ {
        self.entries.keys().copied()
    }

    /// Returns the number of distinct configurations, saturating at `u128::MAX`.
    #[must_use]
    pub fn cardinality(&self) -> u128 {
        self.entries
            .values()
            .fold(1u128, |acc, values| acc.saturating_mul(values.len() as u128))
    }

    /// Returns `true` if `configuration` assigns every hyperparameter of the
    /// space one of its candidates, and nothing else.
    #[must_use]
    pub fn contains(&self, configuration: &Configuration) -> bool {
        configuration.len() == self.len()
            && configuration.iter().all(|(name, value)| {
                self.get(name)
                    .is_some_and(|candidates| candidates.contains(value))
            })
    }
}

/// A builder for constructing [`HyperparameterSpace`] instances in code.
///
/// Created via [`HyperparameterSpace::builder()`]. Later calls for the same
/// hyperparameter replace earlier ones.
///
/// # Examples
///
/// ```
/// use pyro_hparams::Hyperparameter;
/// use pyro_hparams::space::HyperparameterSpace;
///
/// let space = HyperparameterSpace::builder()
///     .candidates(Hyperparameter::Batch, [16_i64, 32, 64])
///     .candidates(Hyperparameter::Optimizer, ["SGD", "AdamW"])
///     .build()
///     .unwrap();
///
/// assert_eq!(space.cardinality(), 6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct HyperparameterSpaceBuilder {
    entries: BTreeMap<Hyperparameter, Vec<Value>>,
}

impl HyperparameterSpaceBuilder {
    /// Sets the candidate sequence of `name`.
    #[must_use]
    pub fn candidates<V: Into<Value>>(
        mut self,
        name: Hyperparameter,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.entries
            .insert(name, values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the candidates of `name` from a schema entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpaceParsing`] if the entry cannot be materialized.
    pub fn entry(mut self, name: Hyperparameter, spec: &SpaceEntrySpec) -> Result<Self> {
        let candidates = spec.candidates(name.as_str())?;
        self.entries.insert(name, candidates);
        Ok(self)
    }

    /// Builds the space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCandidateSet`] if any hyperparameter has no candidates.
    pub fn build(self) -> Result<HyperparameterSpace> {
        HyperparameterSpace::new(self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Range;
    use crate::value::ValueType;

    #[test]
    fn builder_rejects_empty_candidates() {
        let err = HyperparameterSpace::builder()
            .candidates(Hyperparameter::Batch, [16_i64])
            .candidates(Hyperparameter::Mixup, Vec::<f64>::new())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::EmptyCandidateSet {
                name: Hyperparameter::Mixup
            }
        ));
    }

    #[test]
    fn builder_entry_expands_ranges() {
        let space = HyperparameterSpace::builder()
            .entry(
                Hyperparameter::Degrees,
                &SpaceEntrySpec::Space {
                    value_type: ValueType::Int,
                    range: Range::Linear {
                        start: 0.0,
                        stop: 10.0,
                        num: 3,
                    },
                },
            )
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            space.get(Hyperparameter::Degrees).unwrap(),
            &[Value::Int(0), Value::Int(5), Value::Int(10)]
        );
    }

    #[test]
    fn unrecognized_keys_are_collected() {
        let entries = vec![
            (
                "bogus_param".to_owned(),
                SpaceEntrySpec::Array {
                    element_type: ValueType::Int,
                    values: vec![Value::Int(1)],
                },
            ),
            (
                "batch".to_owned(),
                SpaceEntrySpec::Array {
                    element_type: ValueType::Int,
                    values: vec![Value::Int(16)],
                },
            ),
            (
                "warmup".to_owned(),
                SpaceEntrySpec::Array {
                    element_type: ValueType::Int,
                    values: vec![Value::Int(3)],
                },
            ),
        ];
        let err = HyperparameterSpace::from_entries(entries).unwrap_err();
        match err {
            Error::SpaceParsing(ParseError::UnrecognizedKeys(keys)) => {
                assert_eq!(keys, vec!["bogus_param", "warmup"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_point_range_is_empty_candidate_set() {
        let entries = vec![(
            "epochs".to_owned(),
            SpaceEntrySpec::Space {
                value_type: ValueType::Int,
                range: Range::Linear {
                    start: 1.0,
                    stop: 2.0,
                    num: 0,
                },
            },
        )];
        assert!(matches!(
            HyperparameterSpace::from_entries(entries).unwrap_err(),
            Error::EmptyCandidateSet {
                name: Hyperparameter::Epochs
            }
        ));
    }

    #[test]
    fn empty_space_has_one_configuration() {
        let space = HyperparameterSpace::builder().build().unwrap();
        assert!(space.is_empty());
        assert_eq!(space.cardinality(), 1);
    }

    #[test]
    fn iteration_follows_allow_list_order() {
        let space = HyperparameterSpace::builder()
            .candidates(Hyperparameter::HsvV, [0.4])
            .candidates(Hyperparameter::ModelType, ["yolo11n.pt"])
            .candidates(Hyperparameter::Lr0, [0.01])
            .build()
            .unwrap();
        let names: Vec<_> = space.names().collect();
        assert_eq!(
            names,
            vec![
                Hyperparameter::ModelType,
                Hyperparameter::Lr0,
                Hyperparameter::HsvV
            ]
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = HyperparameterSpace::from_yaml_file("/nonexistent/space.yaml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

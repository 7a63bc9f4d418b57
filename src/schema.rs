//! Declarative schema entries and YAML schema parsing.
//!
//! A schema document maps hyperparameter names to entries of one of two
//! kinds:
//!
//! ```yaml
//! optimizer:
//!   type: array
//!   array_type: string
//!   values: [SGD, Adam, AdamW]
//! lr0:
//!   type: space
//!   space_type: float
//!   space_config:
//!     type: logarithmic
//!     start: 0.0001
//!     stop: 0.03
//!     num: 50
//!     base: 10
//! ```
//!
//! Entries are parsed into [`SpaceEntrySpec`], which makes the two shapes
//! explicit instead of probing mapping keys at sampling time.

use serde::Deserialize;
use serde_yaml::{Mapping, Value as Yaml};

use crate::distribution::Range;
use crate::error::ParseError;
use crate::value::{Value, ValueType};

/// The only logarithmic base the expansion supports.
const LOG_BASE: f64 = 10.0;

/// Upper bound on the number of points a single range may expand to.
pub const MAX_RANGE_POINTS: usize = 1 << 20;

/// One parsed schema entry.
#[derive(Clone, Debug, PartialEq)]
pub enum SpaceEntrySpec {
    /// Explicitly enumerated candidates, already cast to `element_type`.
    Array {
        /// Declared element type.
        element_type: ValueType,
        /// The candidates, in schema order.
        values: Vec<Value>,
    },
    /// A parametric numeric range.
    Space {
        /// Type the expanded points are cast to; always numeric.
        value_type: ValueType,
        /// The range to expand.
        range: Range,
    },
}

#[derive(Deserialize)]
struct ArrayEntry {
    array_type: ValueType,
    values: Vec<Yaml>,
}

#[derive(Deserialize)]
struct SpaceEntry {
    space_type: ValueType,
    space_config: Mapping,
}

#[derive(Deserialize)]
struct LinearConfig {
    start: f64,
    stop: f64,
    num: usize,
}

#[derive(Deserialize)]
struct LogarithmicConfig {
    start: f64,
    stop: f64,
    num: usize,
    base: f64,
}

impl SpaceEntrySpec {
    /// Parses a single schema entry.
    ///
    /// `name` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the entry is not a mapping, its kind or
    /// range kind is unsupported, a logarithmic range uses a base other than
    /// 10 or non-positive bounds, or an array literal cannot be cast to the
    /// declared type.
    pub fn from_yaml(name: &str, entry: &Yaml) -> Result<Self, ParseError> {
        let Yaml::Mapping(fields) = entry else {
            return Err(malformed(name, "entry must be a mapping"));
        };

        match kind_of(name, fields)? {
            "array" => {
                let ArrayEntry { array_type, values } = from_mapping(name, fields)?;
                let values = values
                    .iter()
                    .map(|literal| {
                        Value::cast_literal(literal, array_type).ok_or_else(|| {
                            ParseError::InvalidLiteral {
                                name: name.to_owned(),
                                literal: render(literal),
                                expected: array_type,
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Array {
                    element_type: array_type,
                    values,
                })
            }
            "space" => {
                let SpaceEntry {
                    space_type,
                    space_config,
                } = from_mapping(name, fields)?;
                if space_type == ValueType::String {
                    return Err(ParseError::InvalidSpaceType {
                        name: name.to_owned(),
                        value_type: space_type,
                    });
                }
                Ok(Self::Space {
                    value_type: space_type,
                    range: parse_range(name, &space_config)?,
                })
            }
            other => Err(ParseError::UnsupportedEntryKind {
                name: name.to_owned(),
                kind: other.to_owned(),
            }),
        }
    }

    /// Materializes the entry into its ordered candidate sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NonFiniteBounds`] or [`ParseError::TooManyPoints`]
    /// for a range that cannot be expanded, and [`ParseError::InvalidLiteral`]
    /// if an expanded point does not fit the value type.
    pub fn candidates(&self, name: &str) -> Result<Vec<Value>, ParseError> {
        match self {
            Self::Array { values, .. } => Ok(values.clone()),
            Self::Space { value_type, range } => check_range(name, range)?
                .points()
                .into_iter()
                .map(|point| {
                    Value::from_range_point(point, *value_type).ok_or_else(|| {
                        ParseError::InvalidLiteral {
                            name: name.to_owned(),
                            literal: point.to_string(),
                            expected: *value_type,
                        }
                    })
                })
                .collect(),
        }
    }

    /// Returns the declared type of the candidates.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Array { element_type, .. } => *element_type,
            Self::Space { value_type, .. } => *value_type,
        }
    }
}

/// Parses a schema document into its entries, in document order.
///
/// Keys are not checked against the allow-list here; that happens when the
/// entries are turned into a [`HyperparameterSpace`](crate::space::HyperparameterSpace).
///
/// # Errors
///
/// Returns a [`ParseError`] if the document is not a YAML mapping with
/// string keys, or if any entry fails [`SpaceEntrySpec::from_yaml`].
pub fn parse_entries(document: &str) -> Result<Vec<(String, SpaceEntrySpec)>, ParseError> {
    let mapping: Mapping = serde_yaml::from_str(document)?;
    mapping
        .iter()
        .map(|(key, entry)| {
            let Yaml::String(name) = key else {
                return Err(malformed(&render(key), "schema keys must be strings"));
            };
            SpaceEntrySpec::from_yaml(name, entry).map(|spec| (name.clone(), spec))
        })
        .collect()
}

#[allow(clippy::float_cmp)]
fn parse_range(name: &str, config: &Mapping) -> Result<Range, ParseError> {
    match kind_of(name, config)? {
        "linear" => {
            let LinearConfig { start, stop, num } = from_mapping(name, config)?;
            check_range(name, &Range::Linear { start, stop, num }).cloned()
        }
        "logarithmic" => {
            let LogarithmicConfig {
                start,
                stop,
                num,
                base,
            } = from_mapping(name, config)?;
            if base != LOG_BASE {
                return Err(ParseError::UnsupportedRange {
                    name: name.to_owned(),
                    range: format!("logarithmic (base {base})"),
                });
            }
            let range = Range::Logarithmic { start, stop, num };
            check_range(name, &range)?;
            if start <= 0.0 || stop <= 0.0 {
                return Err(ParseError::InvalidLogBounds {
                    name: name.to_owned(),
                    start,
                    stop,
                });
            }
            Ok(range)
        }
        other => Err(ParseError::UnsupportedRange {
            name: name.to_owned(),
            range: format!("'{other}'"),
        }),
    }
}

fn check_range<'r>(name: &str, range: &'r Range) -> Result<&'r Range, ParseError> {
    let (Range::Linear { start, stop, num } | Range::Logarithmic { start, stop, num }) = *range;
    if !start.is_finite() || !stop.is_finite() {
        return Err(ParseError::NonFiniteBounds {
            name: name.to_owned(),
            start,
            stop,
        });
    }
    if num > MAX_RANGE_POINTS {
        return Err(ParseError::TooManyPoints {
            name: name.to_owned(),
            num,
            max: MAX_RANGE_POINTS,
        });
    }
    Ok(range)
}

fn kind_of<'a>(name: &str, fields: &'a Mapping) -> Result<&'a str, ParseError> {
    fields
        .get("type")
        .and_then(Yaml::as_str)
        .ok_or_else(|| malformed(name, "missing string field `type`"))
}

fn from_mapping<T: for<'de> Deserialize<'de>>(
    name: &str,
    fields: &Mapping,
) -> Result<T, ParseError> {
    serde_yaml::from_value(Yaml::Mapping(fields.clone()))
        .map_err(|e| malformed(name, &e.to_string()))
}

fn malformed(name: &str, message: &str) -> ParseError {
    ParseError::Malformed {
        name: name.to_owned(),
        message: message.to_owned(),
    }
}

fn render(literal: &Yaml) -> String {
    serde_yaml::to_string(literal)
        .map(|s| s.trim_end().to_owned())
        .unwrap_or_else(|_| format!("{literal:?}"))
}

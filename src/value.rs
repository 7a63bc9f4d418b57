//! Scalar hyperparameter values and the casting rules used by the schema.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The declared type of a hyperparameter's candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// 64-bit signed integers.
    Int,
    /// 64-bit floats.
    Float,
    /// Free-form strings, e.g. optimizer or model names.
    #[serde(alias = "str")]
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
        })
    }
}

/// A single candidate or drawn hyperparameter value.
///
/// Values serialize untagged, so a configuration renders as plain
/// `batch: 32`, `lr0: 0.001`, `optimizer: AdamW`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    Str(String),
}

impl Value {
    /// Returns the type of this value.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Str(_) => ValueType::String,
        }
    }

    /// Returns the integer, if this is an [`Value::Int`].
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float.
    ///
    /// Integers widen to floats; strings return `None`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Str(_) => None,
        }
    }

    /// Returns the string, if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Casts a schema literal to `ty`.
    ///
    /// Floats cast to integers by truncating toward zero. Numeric strings
    /// parse into numbers. Any scalar casts to a string. Returns `None` for sequences,
    /// mappings, nulls, non-finite floats and unparsable strings.
    #[must_use]
    pub(crate) fn cast_literal(literal: &serde_yaml::Value, ty: ValueType) -> Option<Self> {
        use serde_yaml::Value as Yaml;

        match (ty, literal) {
            (ValueType::Int, Yaml::Number(n)) => match n.as_i64() {
                Some(v) => Some(Self::Int(v)),
                None => n.as_f64().and_then(truncate_to_int).map(Self::Int),
            },
            (ValueType::Int, Yaml::String(s)) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(v) => Some(Self::Int(v)),
                    Err(_) => s.parse::<f64>().ok().and_then(truncate_to_int).map(Self::Int),
                }
            }
            (ValueType::Float, Yaml::Number(n)) => {
                n.as_f64().filter(|v| v.is_finite()).map(Self::Float)
            }
            (ValueType::Float, Yaml::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Self::Float),
            (ValueType::String, Yaml::String(s)) => Some(Self::Str(s.clone())),
            (ValueType::String, Yaml::Number(n)) => Some(Self::Str(n.to_string())),
            (ValueType::String, Yaml::Bool(b)) => Some(Self::Str(b.to_string())),
            _ => None,
        }
    }

    /// Casts an expanded range point to `ty`, flooring for `int`.
    ///
    /// Only finite numeric points are accepted; the schema rejects string
    /// ranges before expansion.
    pub(crate) fn from_range_point(point: f64, ty: ValueType) -> Option<Self> {
        match ty {
            ValueType::Int => int_in_range(point.floor()).map(Self::Int),
            ValueType::Float => Some(point).filter(|v| v.is_finite()).map(Self::Float),
            ValueType::String => None,
        }
    }
}

fn truncate_to_int(v: f64) -> Option<i64> {
    int_in_range(v.trunc())
}

/// Converts an already integral float, rejecting values outside `i64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn int_in_range(v: f64) -> Option<i64> {
    if v.is_finite() && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

//! A single drawn assignment of values to hyperparameters.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hyperparameter::Hyperparameter;
use crate::value::Value;

/// One concrete value per hyperparameter, as drawn by the sampler.
///
/// Serializes as a flat mapping, e.g. `{"batch": 32, "lr0": 0.001}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    values: BTreeMap<Hyperparameter, Value>,
}

impl Configuration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: Hyperparameter, value: Value) {
        self.values.insert(name, value);
    }

    /// Returns the value drawn for `name`.
    #[must_use]
    pub fn get(&self, name: Hyperparameter) -> Option<&Value> {
        self.values.get(&name)
    }

    /// Returns the integer drawn for `name`, if present and an integer.
    #[must_use]
    pub fn get_int(&self, name: Hyperparameter) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    /// Returns the number drawn for `name` as a float, if present and numeric.
    #[must_use]
    pub fn get_float(&self, name: Hyperparameter) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    /// Returns the string drawn for `name`, if present and a string.
    #[must_use]
    pub fn get_str(&self, name: Hyperparameter) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns the number of hyperparameters in the configuration.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the configuration assigns nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the assignments in [`Hyperparameter`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Hyperparameter, &Value)> {
        self.values.iter().map(|(&k, v)| (k, v))
    }
}

impl FromIterator<(Hyperparameter, Value)> for Configuration {
    fn from_iter<T: IntoIterator<Item = (Hyperparameter, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Configuration {
        [
            (Hyperparameter::Optimizer, Value::from("AdamW")),
            (Hyperparameter::Batch, Value::Int(32)),
            (Hyperparameter::Lr0, Value::Float(0.001)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn typed_getters() {
        let config = sample();
        assert_eq!(config.get_int(Hyperparameter::Batch), Some(32));
        assert_eq!(config.get_float(Hyperparameter::Batch), Some(32.0));
        assert_eq!(config.get_float(Hyperparameter::Lr0), Some(0.001));
        assert_eq!(config.get_str(Hyperparameter::Optimizer), Some("AdamW"));
        assert_eq!(config.get_str(Hyperparameter::Batch), None);
        assert_eq!(config.get(Hyperparameter::Mixup), None);
    }

    #[test]
    fn display_is_ordered() {
        assert_eq!(
            sample().to_string(),
            "{batch: 32, optimizer: AdamW, lr0: 0.001}"
        );
    }

    #[test]
    fn json_is_flat() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"batch":32,"optimizer":"AdamW","lr0":0.001}"#);
        let back: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}

//! Flat parameter sets supplied by rock/fluid data providers.

use crate::error::{RockError, RockResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name → value mapping handed to the model registry.
///
/// Callers may build it in code or deserialize it from their own configuration
/// files; nothing here touches the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelParams {
    values: BTreeMap<String, f64>,
}

impl ModelParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fetch a required, finite value.
    pub fn require(&self, model: &'static str, name: &str) -> RockResult<f64> {
        let value = self.get(name).ok_or_else(|| RockError::MissingParameter {
            model,
            name: name.to_string(),
        })?;
        check_finite(name, value)
    }

    /// Fetch an optional value, falling back to `default`.
    pub fn optional(&self, name: &str, default: f64) -> RockResult<f64> {
        match self.get(name) {
            Some(value) => check_finite(name, value),
            None => Ok(default),
        }
    }

    /// Fetch an optional value without a default.
    pub fn maybe(&self, name: &str) -> RockResult<Option<f64>> {
        self.get(name).map(|v| check_finite(name, v)).transpose()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ModelParams {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn check_finite(name: &str, value: f64) -> RockResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RockError::invalid(name, value, "must be finite"))
    }
}

/// Require `value > 0`.
pub(crate) fn positive(name: &str, value: f64) -> RockResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(RockError::invalid(name, value, "must be positive"))
    }
}

/// Require `0 <= value <= 1`.
pub(crate) fn fraction(name: &str, value: f64) -> RockResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(RockError::invalid(name, value, "must lie in [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let params = ModelParams::new().with("lambda", 2.0).with("irreducible", 0.2);
        assert_eq!(params.get("lambda"), Some(2.0));
        assert!(params.contains("irreducible"));
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["irreducible", "lambda"]);
    }

    #[test]
    fn require_reports_missing_key() {
        let params = ModelParams::new();
        let err = params.require("brooks_corey", "lambda").unwrap_err();
        assert_eq!(
            err,
            RockError::MissingParameter {
                model: "brooks_corey",
                name: "lambda".into()
            }
        );
    }

    #[test]
    fn non_finite_values_rejected() {
        let params = ModelParams::new().with("n", f64::NAN);
        assert!(params.require("van_genuchten", "n").is_err());
        assert!(params.optional("n", 2.0).is_err());
    }

    #[test]
    fn optional_default() {
        let params = ModelParams::new();
        assert_eq!(params.optional("krocw", 1.0).unwrap(), 1.0);
        assert_eq!(params.maybe("som").unwrap(), None);
    }

    #[test]
    fn domain_helpers() {
        assert!(positive("lambda", 0.0).is_err());
        assert!(fraction("porosity", 1.2).is_err());
        assert_eq!(fraction("porosity", 0.25).unwrap(), 0.25);
    }
}

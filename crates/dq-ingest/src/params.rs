//! Provider parameters and their declared domains.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Selected parameter values, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// A categorical parameter with a fixed, enumerated choice set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub label: String,
    /// Allowed values; the first one is the default.
    pub choices: Vec<String>,
}

impl ParameterSpec {
    pub fn new<I, S>(name: impl Into<String>, label: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            label: label.into(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn default_choice(&self) -> Option<&str> {
        self.choices.first().map(String::as_str)
    }

    pub fn allows(&self, value: &str) -> bool {
        self.choices.iter().any(|choice| choice == value)
    }
}

/// Check `params` against the declared domains and fill in defaults.
///
/// Undeclared names and values outside a choice set are rejected with
/// [`IngestError::InvalidParameter`]. The result holds exactly one value per
/// declared parameter.
pub fn resolve_params(provider: &str, specs: &[ParameterSpec], params: &Params) -> Result<Params> {
    for (name, value) in params.iter() {
        if !specs.iter().any(|spec| spec.name == name) {
            return Err(IngestError::InvalidParameter {
                provider: provider.to_string(),
                parameter: name.to_string(),
                value: value.to_string(),
                allowed: specs.iter().map(|spec| spec.name.clone()).collect(),
            });
        }
    }

    let mut resolved = Params::new();
    for spec in specs {
        let value = match params.get(&spec.name) {
            Some(value) if spec.allows(value) => value,
            Some(value) => {
                return Err(IngestError::InvalidParameter {
                    provider: provider.to_string(),
                    parameter: spec.name.clone(),
                    value: value.to_string(),
                    allowed: spec.choices.clone(),
                });
            }
            None => match spec.default_choice() {
                Some(default) => default,
                None => {
                    return Err(IngestError::InvalidParameter {
                        provider: provider.to_string(),
                        parameter: spec.name.clone(),
                        value: String::new(),
                        allowed: Vec::new(),
                    });
                }
            },
        };
        resolved.set(spec.name.clone(), value);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drivetrain() -> Vec<ParameterSpec> {
        vec![ParameterSpec::new(
            "drivetrain",
            "Select Drivetrain Type",
            ["rwd", "awd"],
        )]
    }

    #[test]
    fn absent_parameter_takes_default() {
        let resolved = resolve_params("cars", &drivetrain(), &Params::new()).unwrap();
        assert_eq!(resolved.get("drivetrain"), Some("rwd"));
    }

    #[test]
    fn value_outside_domain_is_rejected() {
        let params = Params::new().with("drivetrain", "fwd");
        let err = resolve_params("cars", &drivetrain(), &params).unwrap_err();
        match err {
            IngestError::InvalidParameter {
                parameter,
                value,
                allowed,
                ..
            } => {
                assert_eq!(parameter, "drivetrain");
                assert_eq!(value, "fwd");
                assert_eq!(allowed, vec!["rwd", "awd"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn undeclared_parameter_is_rejected() {
        let params = Params::new().with("colour", "red");
        assert!(matches!(
            resolve_params("cars", &drivetrain(), &params),
            Err(IngestError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let params = Params::new().with("drivetrain", "AWD");
        assert!(resolve_params("cars", &drivetrain(), &params).is_err());
    }
}

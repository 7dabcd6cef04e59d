//! Engine configuration.
//!
//! A [`Config`] is an ordered mapping from engine option names to string values. The layer
//! does not interpret option names nor values: they are forwarded verbatim to the engine when
//! a [`Context`](crate::context::Context) is created, and the engine decides whether to accept
//! them.
//!
//! Configurations can be assembled in code or loaded from a TOML document whose `[options]`
//! table holds the engine options:
//!
//! ```toml
//! [options]
//! model = true
//! timeout = 5000
//! ```
use std::{collections::BTreeMap, ffi::CString, path::Path};

use log::debug;
use serde::Deserialize;

use crate::utils::error::{Z3Error, Z3Result};

/// Engine options forwarded at context creation.
///
/// Example:
/// ```rust
/// # use hyz3::config::Config;
/// let config = Config::new().with_model(true).set("timeout", "1000");
/// assert_eq!(config.get("model"), Some("true"));
/// assert_eq!(config.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    options: BTreeMap<String, String>,
}

/// On-disk layout of a configuration file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    options: toml::Table,
}

impl Config {
    /// An empty configuration; the engine uses its own defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `option` to `value`, replacing any previous value.
    pub fn set(mut self, option: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(option.into(), value.into());
        self
    }

    /// Enable or disable model generation.
    pub fn with_model(self, enabled: bool) -> Self {
        self.set("model", enabled.to_string())
    }

    /// Enable or disable proof generation.
    pub fn with_proofs(self, enabled: bool) -> Self {
        self.set("proof", enabled.to_string())
    }

    /// Default timeout of solver calls, in milliseconds.
    pub fn with_timeout_ms(self, timeout: u64) -> Self {
        self.set("timeout", timeout.to_string())
    }

    pub fn get(&self, option: &str) -> Option<&str> {
        self.options.get(option).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate over `(option, value)` pairs in option-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(source: &str) -> Z3Result<Self> {
        Self::parse(source, "<inline>")
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Z3Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::parse(&source, &path.display().to_string())?;
        debug!(
            "Loaded {} engine option(s) from '{}'",
            config.len(),
            path.display()
        );
        Ok(config)
    }

    fn parse(source: &str, file: &str) -> Z3Result<Self> {
        let parsed: ConfigFile =
            toml::from_str(source).map_err(|source| Z3Error::ConfigParseError {
                source,
                file: file.to_string(),
            })?;

        let mut config = Config::new();
        for (option, value) in parsed.options {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(Z3Error::InvalidConfig {
                        option,
                        message: format!(
                            "expected a string, integer, float or boolean, found {}",
                            other.type_str()
                        ),
                    });
                }
            };
            config.options.insert(option, value);
        }
        Ok(config)
    }

    /// Convert every option into a pair of C strings ready to cross the foreign boundary.
    pub(crate) fn to_native_pairs(&self) -> Z3Result<Vec<(CString, CString)>> {
        self.options
            .iter()
            .map(|(option, value)| {
                if option.is_empty() {
                    return Err(Z3Error::InvalidConfig {
                        option: option.clone(),
                        message: "option names cannot be empty".to_string(),
                    });
                }
                let invalid = |what: &str| Z3Error::InvalidConfig {
                    option: option.escape_debug().to_string(),
                    message: format!("{} contains a NUL byte", what),
                };
                let key = CString::new(option.as_str()).map_err(|_| invalid("name"))?;
                let value = CString::new(value.as_str()).map_err(|_| invalid("value"))?;
                Ok((key, value))
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Config::new(), |config, (k, v)| config.set(k, v))
    }
}

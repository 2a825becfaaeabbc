//! Classifier configuration documents.
//!
//! A [`ClassifierConfig`] describes threshold tables and palettes in TOML or
//! JSON and builds a [`ThresholdRegistry`] from them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use riskband_core::MetricKind;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::palette::{Palette, PaletteTable};
use crate::registry::ThresholdRegistry;
use crate::thresholds::{ThresholdTable, ThresholdTableSpec};

/// Threshold and palette configuration.
///
/// # Examples
///
/// ```
/// use riskband_config::ClassifierConfig;
/// use riskband_core::{MetricKind, SeverityBand};
///
/// let config = ClassifierConfig::from_toml_str(r#"
///     [thresholds.sharpe]
///     mode = "exclusive"
///     bands = [{ bound = 1.0, band = "low" }, { bound = 2.0, band = "high" }]
/// "#)?;
///
/// let registry = config.build_registry()?;
/// let sharpe = registry.table_for(MetricKind::Sharpe).unwrap();
/// assert_eq!(sharpe.band_for(2.5), SeverityBand::High);
/// # Ok::<(), riskband_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Start from [`ThresholdRegistry::standard`] instead of an empty registry.
    pub extends_standard: bool,

    /// Replacement fallback table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<ThresholdTableSpec>,

    /// Per-kind tables keyed by kind name; these replace any standard table
    /// for the same kind. Two names for one kind (`riskContribution` and
    /// `risk_contribution`) are a validation error.
    pub thresholds: BTreeMap<String, ThresholdTableSpec>,

    /// Named palettes.
    pub palettes: BTreeMap<String, PaletteTable>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            extends_standard: true,
            fallback: None,
            thresholds: BTreeMap::new(),
            palettes: BTreeMap::new(),
        }
    }
}

impl ClassifierConfig {
    /// Creates a config that extends the standard registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let parse: fn(&str) -> ConfigResult<Self> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat { path: display }),
        };

        log::info!("Loading classifier configuration from {}", display);
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;

        let config = parse(&content)?;
        log::debug!(
            "{}: {} threshold tables, {} palettes",
            display,
            config.thresholds.len(),
            config.palettes.len()
        );
        Ok(config)
    }

    /// Sets a table for `kind`.
    #[must_use]
    pub fn with_table(mut self, kind: MetricKind, table: ThresholdTable) -> Self {
        self.thresholds.insert(kind.as_str().to_string(), table.into());
        self
    }

    /// Adds a named palette.
    #[must_use]
    pub fn with_palette(mut self, name: impl Into<String>, table: PaletteTable) -> Self {
        self.palettes.insert(name.into(), table);
        self
    }

    /// Validates every table and builds the registry.
    pub fn build_registry(&self) -> ConfigResult<ThresholdRegistry> {
        self.validate_or_error()?;

        let mut registry = if self.extends_standard {
            ThresholdRegistry::standard()
        } else {
            ThresholdRegistry::empty()
        };

        if let Some(spec) = &self.fallback {
            registry = registry.with_fallback(ThresholdTable::try_from(spec.clone())?);
        }

        for (name, spec) in &self.thresholds {
            let kind: MetricKind = name.parse().map_err(|_| ConfigError::Validation {
                field: format!("thresholds.{name}"),
                message: "unknown metric kind".to_string(),
            })?;
            let table = ThresholdTable::try_from(spec.clone())?;
            if registry.register(kind, table).is_some() {
                log::debug!("Configured table replaces standard table for {}", kind);
            }
        }

        Ok(registry)
    }

    /// Resolves a palette by name: configured palettes first, then built-ins.
    pub fn palette(&self, name: &str) -> ConfigResult<Palette> {
        if let Some(table) = self.palettes.get(name) {
            return Ok(Palette::Custom(*table));
        }
        Palette::builtin(name).ok_or_else(|| ConfigError::not_found(format!("palette '{name}'")))
    }
}

impl Validate for ClassifierConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Some(spec) = &self.fallback {
            errors.extend(spec.validate().into_iter().map(|e| e.prefixed("fallback")));
        }

        let mut seen: BTreeMap<MetricKind, &str> = BTreeMap::new();
        for (name, spec) in &self.thresholds {
            let prefix = format!("thresholds.{name}");
            match name.parse::<MetricKind>() {
                Ok(kind) => {
                    if let Some(first) = seen.insert(kind, name) {
                        errors.push(ValidationError::new(
                            prefix.clone(),
                            format!("duplicates kind '{kind}' already configured as '{first}'"),
                        ));
                    }
                }
                Err(_) => {
                    errors.push(ValidationError::new(prefix.clone(), "unknown metric kind"));
                }
            }
            errors.extend(spec.validate().into_iter().map(|e| e.prefixed(&prefix)));
        }

        for name in self.palettes.keys() {
            if name.trim().is_empty() {
                errors.push(ValidationError::new("palettes", "palette name is empty"));
            }
        }

        errors
    }
}

//! riskband Configuration Layer
//!
//! Threshold tables, the metric kind registry and color palettes used by the
//! riskband classifier, plus loading of classifier configuration from TOML
//! or JSON.
//!
//! # Features
//!
//! - **Threshold tables**: Ordered magnitude bounds with inclusive or exclusive
//!   lower bounds, validated on construction
//! - **Registry**: `MetricKind → ThresholdTable` with an optional fallback table
//! - **Palettes**: Severity band → color token lookup tables
//! - **Configuration files**: Override or extend the standard tables
//!
//! # Example
//!
//! ```rust
//! use riskband_config::{ThresholdRegistry, Palette, ColorToken};
//! use riskband_core::{MetricKind, SeverityBand};
//!
//! let registry = ThresholdRegistry::standard();
//! let table = registry.table_for(MetricKind::Correlation).unwrap();
//! let band = table.band_for(0.85);
//! assert_eq!(band, SeverityBand::High);
//! assert_eq!(Palette::Correlation.color_for(band), ColorToken::Red);
//! ```
//!
//! # Standard Tables
//!
//! - `correlation`, `generic`: `≥0.8 High, ≥0.5 Moderate, ≥0.2 Low`
//! - `exposure`: `>0.75 High, >0.5 Moderate, >0.25 Low`
//! - `riskContribution`: `>20 High, >15 Moderate, >10 Low` (percent points)
//! - `beta`: `>1.5 High, >1 Moderate, >0 Low`
//! - everything else: the generic table as fallback

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod classifier;
pub mod error;
pub mod palette;
pub mod registry;
pub mod thresholds;

pub use classifier::ClassifierConfig;
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use palette::{ColorToken, Palette, PaletteTable};
pub use registry::ThresholdRegistry;
pub use thresholds::{BoundMode, Threshold, ThresholdTable, ThresholdTableSpec};

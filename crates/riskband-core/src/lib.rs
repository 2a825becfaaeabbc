//! # riskband Core
//!
//! Value types shared by the riskband classification crates.
//!
//! - **Types**: [`MetricKind`], [`MetricSample`], [`SeverityBand`], [`Sign`]
//! - **Errors**: [`CoreError`] for invalid samples, kinds and signs
//!
//! ## Design Philosophy
//!
//! - **Plain values**: Every type is constructed and discarded per call
//! - **Validated at the edge**: Non-finite values and negative weights never
//!   reach the analytics
//!
//! ## Example
//!
//! ```rust
//! use riskband_core::prelude::*;
//!
//! let sample = MetricSample::new("Market Beta", 0.91, MetricKind::Exposure)?;
//! assert_eq!(Sign::of(sample.value), Sign::Positive);
//! # Ok::<(), CoreError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{MetricKind, MetricSample, SeverityBand, Sign};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{MetricKind, MetricSample, SeverityBand, Sign};
}

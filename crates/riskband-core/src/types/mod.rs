//! Value types for risk classification.
//!
//! - [`MetricKind`]: Which metric a value measures
//! - [`MetricSample`]: Labelled, optionally weighted observation
//! - [`SeverityBand`]: Discrete risk level
//! - [`Sign`]: Direction of a value

mod metric;
mod severity;

pub use metric::{MetricKind, MetricSample};
pub use severity::{SeverityBand, Sign};

//! Metric kind → threshold table registry.

use std::collections::BTreeMap;

use riskband_core::MetricKind;

use crate::thresholds::ThresholdTable;

/// Maps each [`MetricKind`] to the [`ThresholdTable`] used to classify it.
///
/// Kinds without their own table resolve to the fallback table, if one is
/// set. A registry with neither has no table for that kind.
///
/// # Examples
///
/// ```
/// use riskband_config::{ThresholdRegistry, ThresholdTable};
/// use riskband_core::MetricKind;
///
/// let standard = ThresholdRegistry::standard();
/// assert!(standard.table_for(MetricKind::Sharpe).is_some());
/// assert!(!standard.is_registered(MetricKind::Sharpe));
///
/// let mut custom = ThresholdRegistry::empty();
/// assert!(custom.table_for(MetricKind::Beta).is_none());
/// custom.register(MetricKind::Beta, ThresholdTable::beta());
/// assert!(custom.table_for(MetricKind::Beta).is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRegistry {
    tables: BTreeMap<MetricKind, ThresholdTable>,
    fallback: Option<ThresholdTable>,
}

impl ThresholdRegistry {
    /// A registry with no tables and no fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tables: BTreeMap::new(),
            fallback: None,
        }
    }

    /// The standard registry.
    ///
    /// | Kind | Table |
    /// |------|-------|
    /// | correlation, generic | [`ThresholdTable::correlation`] |
    /// | exposure | [`ThresholdTable::exposure_significance`] |
    /// | riskContribution | [`ThresholdTable::risk_contribution`] |
    /// | beta | [`ThresholdTable::beta`] |
    ///
    /// Every other kind uses the default table as fallback.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty().with_fallback(ThresholdTable::default());
        registry.register(MetricKind::Correlation, ThresholdTable::correlation());
        registry.register(MetricKind::Generic, ThresholdTable::default());
        registry.register(MetricKind::Exposure, ThresholdTable::exposure_significance());
        registry.register(
            MetricKind::RiskContribution,
            ThresholdTable::risk_contribution(),
        );
        registry.register(MetricKind::Beta, ThresholdTable::beta());
        registry
    }

    /// Sets the fallback table.
    #[must_use]
    pub fn with_fallback(mut self, table: ThresholdTable) -> Self {
        self.fallback = Some(table);
        self
    }

    /// Removes the fallback table.
    #[must_use]
    pub fn without_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    /// Registers a table for `kind`, returning the table it replaced.
    pub fn register(&mut self, kind: MetricKind, table: ThresholdTable) -> Option<ThresholdTable> {
        self.tables.insert(kind, table)
    }

    /// Table used to classify `kind`: its own, else the fallback.
    #[must_use]
    pub fn table_for(&self, kind: MetricKind) -> Option<&ThresholdTable> {
        self.tables.get(&kind).or(self.fallback.as_ref())
    }

    /// Returns true if `kind` has its own table.
    #[must_use]
    pub fn is_registered(&self, kind: MetricKind) -> bool {
        self.tables.contains_key(&kind)
    }

    /// Returns true if `kind` can be classified (own table or fallback).
    #[must_use]
    pub fn contains(&self, kind: MetricKind) -> bool {
        self.table_for(kind).is_some()
    }

    /// The fallback table, if any.
    #[must_use]
    pub fn fallback(&self) -> Option<&ThresholdTable> {
        self.fallback.as_ref()
    }

    /// Kinds with their own table, in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = MetricKind> + '_ {
        self.tables.keys().copied()
    }
}

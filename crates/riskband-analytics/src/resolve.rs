//! Color and label resolution.
//!
//! Maps a severity band and a sign to the color token and label a
//! presentation layer renders, and formats values with an explicit sign.

use serde::{Deserialize, Serialize};

use riskband_config::{ColorToken, Palette};
use riskband_core::{MetricKind, SeverityBand, Sign};

use crate::classify::SeverityMapper;
use crate::error::AnalyticsResult;

/// Label shown in place of a band when classification failed.
pub const FALLBACK_LABEL: &str = "N/A";

/// Symbol shown in place of a value that cannot be formatted.
pub const FALLBACK_SYMBOL: &str = "—";

/// Color, label and direction for one classified value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Color token from the palette.
    pub color: ColorToken,
    /// Band label.
    pub label: String,
    /// Direction of the underlying value.
    pub sign: Sign,
}

/// Resolves a band and sign against a palette.
///
/// # Example
///
/// ```rust
/// use riskband_analytics::resolve;
/// use riskband_config::{ColorToken, Palette};
/// use riskband_core::{SeverityBand, Sign};
///
/// let r = resolve(SeverityBand::High, Sign::Positive, &Palette::Correlation);
/// assert_eq!(r.color, ColorToken::Red);
/// assert_eq!(r.label, "High");
/// ```
#[must_use]
pub fn resolve(band: SeverityBand, sign: Sign, palette: &Palette) -> Resolution {
    Resolution {
        color: palette.color_for(band),
        label: band.label().to_string(),
        sign,
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

/// How values of one metric kind are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayFormat {
    /// Digits after the decimal point.
    pub decimals: usize,
    /// Unit suffix, e.g. `"%"`.
    pub suffix: &'static str,
    /// Whether positive values carry a leading `+`.
    pub signed: bool,
}

impl DisplayFormat {
    /// Display format for a metric kind.
    #[must_use]
    pub fn for_kind(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Exposure => Self::new(2, "", true),
            MetricKind::RiskContribution | MetricKind::Drawdown | MetricKind::Volatility => {
                Self::new(1, "%", false)
            }
            MetricKind::Correlation
            | MetricKind::Beta
            | MetricKind::Sharpe
            | MetricKind::Generic => Self::new(2, "", false),
        }
    }

    const fn new(decimals: usize, suffix: &'static str, signed: bool) -> Self {
        Self {
            decimals,
            suffix,
            signed,
        }
    }

    /// Formats a value.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if self.signed {
            format_signed(value, self.decimals, self.suffix)
        } else {
            format_plain(value, self.decimals, self.suffix)
        }
    }
}

/// Formats a value with an explicit sign: `"+7.1%"`, `"-4.3%"`, `"0.0%"`.
///
/// Values that round to zero (including `-0.0`) carry no sign. Non-finite
/// values give [`FALLBACK_SYMBOL`].
#[must_use]
pub fn format_signed(value: f64, decimals: usize, suffix: &str) -> String {
    match rounded_digits(value, decimals) {
        None => FALLBACK_SYMBOL.to_string(),
        Some((digits, true)) => format!("{digits}{suffix}"),
        Some((digits, false)) if value > 0.0 => format!("+{digits}{suffix}"),
        Some((digits, false)) => format!("-{digits}{suffix}"),
    }
}

/// Formats a value with a leading `-` only for negatives.
#[must_use]
pub fn format_plain(value: f64, decimals: usize, suffix: &str) -> String {
    match rounded_digits(value, decimals) {
        None => FALLBACK_SYMBOL.to_string(),
        Some((digits, zero)) if zero || value > 0.0 => format!("{digits}{suffix}"),
        Some((digits, _)) => format!("-{digits}{suffix}"),
    }
}

// Digits of |value| and whether they are all zero.
fn rounded_digits(value: f64, decimals: usize) -> Option<(String, bool)> {
    if !value.is_finite() {
        return None;
    }
    let digits = format!("{:.*}", decimals, value.abs());
    let zero = digits.chars().all(|c| c == '0' || c == '.');
    Some((digits, zero))
}

// =============================================================================
// PRESENTATION
// =============================================================================

/// Everything needed to render one metric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    /// Severity band.
    pub band: SeverityBand,
    /// Color, label and sign.
    pub resolution: Resolution,
    /// Formatted value.
    pub formatted: String,
}

impl SeverityMapper {
    /// Classifies, resolves and formats a value in one call.
    pub fn describe(
        &self,
        value: f64,
        kind: MetricKind,
        palette: &Palette,
    ) -> AnalyticsResult<Presentation> {
        let band = self.classify(value, kind)?;
        Ok(Presentation {
            band,
            resolution: resolve(band, Sign::of(value), palette),
            formatted: DisplayFormat::for_kind(kind).format(value),
        })
    }
}

/// [`SeverityMapper::describe`] with the standard registry.
pub fn describe(value: f64, kind: MetricKind, palette: &Palette) -> AnalyticsResult<Presentation> {
    SeverityMapper::shared().describe(value, kind, palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskband_config::PaletteTable;

    #[test]
    fn test_resolve_correlation() {
        let r = resolve(SeverityBand::Moderate, Sign::Negative, &Palette::Correlation);
        assert_eq!(r.color, ColorToken::Blue);
        assert_eq!(r.label, "Moderate");
        assert_eq!(r.sign, Sign::Negative);

        let r = resolve(SeverityBand::Minimal, Sign::Zero, &Palette::Correlation);
        assert_eq!(r.color, ColorToken::Gray);
    }

    #[test]
    fn test_resolve_significance() {
        let r = resolve(SeverityBand::High, Sign::Positive, &Palette::Significance);
        assert_eq!(r.color, ColorToken::Yellow);
        assert_eq!(r.label, "High");
    }

    #[test]
    fn test_resolve_custom() {
        let palette = Palette::Custom(PaletteTable::new(
            ColorToken::Gray,
            ColorToken::Blue,
            ColorToken::Amber,
            ColorToken::Red,
        ));
        assert_eq!(
            resolve(SeverityBand::Low, Sign::Positive, &palette).color,
            ColorToken::Blue
        );
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(7.1, 1, "%"), "+7.1%");
        assert_eq!(format_signed(-4.3, 1, "%"), "-4.3%");
        assert_eq!(format_signed(0.0, 1, "%"), "0.0%");
        assert_eq!(format_signed(-0.0, 1, "%"), "0.0%");
        assert_eq!(format_signed(-0.01, 1, "%"), "0.0%");
        assert_eq!(format_signed(0.91, 2, ""), "+0.91");
        assert_eq!(format_signed(f64::NAN, 2, ""), FALLBACK_SYMBOL);
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(22.3, 1, "%"), "22.3%");
        assert_eq!(format_plain(-0.25, 2, ""), "-0.25");
        assert_eq!(format_plain(-0.001, 2, ""), "0.00");
        assert_eq!(format_plain(f64::INFINITY, 1, "%"), FALLBACK_SYMBOL);
    }

    #[test]
    fn test_display_format_per_kind() {
        assert_eq!(DisplayFormat::for_kind(MetricKind::Exposure).format(0.91), "+0.91");
        assert_eq!(
            DisplayFormat::for_kind(MetricKind::RiskContribution).format(18.2),
            "18.2%"
        );
        assert_eq!(DisplayFormat::for_kind(MetricKind::Beta).format(1.25), "1.25");
    }

    #[test]
    fn test_describe() {
        let p = describe(0.91, MetricKind::Exposure, &Palette::Significance).unwrap();
        assert_eq!(p.band, SeverityBand::High);
        assert_eq!(p.resolution.color, ColorToken::Yellow);
        assert_eq!(p.resolution.sign, Sign::Positive);
        assert_eq!(p.formatted, "+0.91");

        let p = describe(-0.25, MetricKind::Correlation, &Palette::Correlation).unwrap();
        assert_eq!(p.band, SeverityBand::Low);
        assert_eq!(p.resolution.color, ColorToken::Green);
        assert_eq!(p.resolution.sign, Sign::Negative);
        assert_eq!(p.formatted, "-0.25");

        assert!(describe(f64::NAN, MetricKind::Beta, &Palette::Correlation).is_err());
    }
}

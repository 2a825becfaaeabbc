//! Color palettes for severity bands.

use std::fmt;

use serde::{Deserialize, Serialize};

use riskband_core::SeverityBand;

/// Presentation color token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    /// Neutral gray.
    Gray,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Amber.
    Amber,
    /// Yellow.
    Yellow,
    /// Red.
    Red,
}

impl ColorToken {
    /// Token name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Amber => "amber",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    /// Hex RGB value of the token.
    #[must_use]
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Gray => "#9ca3af",
            Self::Green => "#22c55e",
            Self::Blue => "#3b82f6",
            Self::Amber => "#f59e0b",
            Self::Yellow => "#eab308",
            Self::Red => "#ef4444",
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One color per severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteTable {
    /// Color for [`SeverityBand::Minimal`].
    pub minimal: ColorToken,
    /// Color for [`SeverityBand::Low`].
    pub low: ColorToken,
    /// Color for [`SeverityBand::Moderate`].
    pub moderate: ColorToken,
    /// Color for [`SeverityBand::High`].
    pub high: ColorToken,
}

impl PaletteTable {
    /// Creates a palette table.
    #[must_use]
    pub const fn new(
        minimal: ColorToken,
        low: ColorToken,
        moderate: ColorToken,
        high: ColorToken,
    ) -> Self {
        Self {
            minimal,
            low,
            moderate,
            high,
        }
    }

    /// Gray, green, blue, red.
    pub const CORRELATION: Self = Self::new(
        ColorToken::Gray,
        ColorToken::Green,
        ColorToken::Blue,
        ColorToken::Red,
    );

    /// Gray, green, amber, yellow.
    pub const SIGNIFICANCE: Self = Self::new(
        ColorToken::Gray,
        ColorToken::Green,
        ColorToken::Amber,
        ColorToken::Yellow,
    );

    /// Color for a band.
    #[must_use]
    pub fn color_for(&self, band: SeverityBand) -> ColorToken {
        match band {
            SeverityBand::Minimal => self.minimal,
            SeverityBand::Low => self.low,
            SeverityBand::Moderate => self.moderate,
            SeverityBand::High => self.high,
        }
    }
}

/// Palette selector.
///
/// Correlation risk and factor significance color the upper bands
/// differently; anything else goes through [`Palette::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Correlation risk colors.
    #[default]
    Correlation,
    /// Factor significance colors.
    Significance,
    /// Caller-supplied table.
    Custom(PaletteTable),
}

impl Palette {
    /// Built-in palette names.
    pub const BUILTIN_NAMES: [&'static str; 2] = ["correlation", "significance"];

    /// Looks up a built-in palette by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "correlation" => Some(Self::Correlation),
            "significance" => Some(Self::Significance),
            _ => None,
        }
    }

    /// The band → color table for this palette.
    #[must_use]
    pub fn table(&self) -> PaletteTable {
        match self {
            Self::Correlation => PaletteTable::CORRELATION,
            Self::Significance => PaletteTable::SIGNIFICANCE,
            Self::Custom(table) => *table,
        }
    }

    /// Color for a band.
    #[must_use]
    pub fn color_for(&self, band: SeverityBand) -> ColorToken {
        self.table().color_for(band)
    }
}

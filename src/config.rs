//! Explicit configuration consumed by the fiscal, retail and ISO variants.
//!
//! Every variant copies the configuration it was built with, so changing a
//! configuration value later never affects instances that already exist.

use serde::{Deserialize, Serialize};

use crate::CalendarError;
use crate::consts::{MONTHS_PER_QUARTER, QUARTERS_PER_YEAR};
use crate::types::{AnchorDate, WeekPattern};

/// Fiscal year anchor plus the month/day on which each fiscal quarter starts.
///
/// # Example
///
/// ```
/// use calendars::{AnchorDate, FiscalConfig};
///
/// let config = FiscalConfig::new(AnchorDate::new(9, 1)?);
/// assert_eq!(config.quarter_starts()[1], AnchorDate::new(12, 1)?);
/// assert!(config.validate().is_ok());
/// # Ok::<(), calendars::CalendarError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalConfig {
    anchor: AnchorDate,
    quarter_starts: [AnchorDate; 4],
}

impl FiscalConfig {
    /// Creates a configuration whose quarters start every three months from `anchor`.
    ///
    /// A quarter start falling past the end of a shorter month is clamped to
    /// that month's last day.
    pub fn new(anchor: AnchorDate) -> Self {
        let mut quarter_starts = [anchor; QUARTERS_PER_YEAR as usize];
        let mut months = 0;
        for start in quarter_starts.iter_mut().skip(1) {
            months += MONTHS_PER_QUARTER.cast_signed();
            *start = anchor.plus_months(months);
        }
        Self {
            anchor,
            quarter_starts,
        }
    }

    /// Replaces the quarter table. The table is checked by [`FiscalConfig::validate`].
    pub fn with_quarter_starts(mut self, quarter_starts: [AnchorDate; 4]) -> Self {
        self.quarter_starts = quarter_starts;
        self
    }

    /// Returns the fiscal year anchor.
    pub fn anchor(&self) -> AnchorDate {
        self.anchor
    }

    /// Returns the month/day table of quarter starts, Q1 first.
    pub fn quarter_starts(&self) -> &[AnchorDate; 4] {
        &self.quarter_starts
    }

    /// Validates this configuration.
    ///
    /// The first quarter must start exactly on the anchor, and the remaining
    /// quarters must follow in calendar order within one fiscal year.
    ///
    /// # Errors
    /// Returns `QuarterTableMismatch` or `QuarterTableOrder`.
    pub fn validate(&self) -> Result<(), CalendarError> {
        let first = self.quarter_starts[0];
        if first != self.anchor {
            tracing::warn!(anchor = %self.anchor, %first, "fiscal quarter table does not start at the anchor");
            return Err(CalendarError::QuarterTableMismatch {
                anchor: self.anchor,
                first,
            });
        }
        let ordered = self
            .quarter_starts
            .windows(2)
            .all(|pair| pair[0].cycle_key(self.anchor) < pair[1].cycle_key(self.anchor));
        if !ordered {
            tracing::warn!(anchor = %self.anchor, "fiscal quarter table is out of order");
            return Err(CalendarError::QuarterTableOrder(self.quarter_starts));
        }
        Ok(())
    }
}

impl Default for FiscalConfig {
    fn default() -> Self {
        Self::new(AnchorDate::default())
    }
}

/// Anchor and week layout of a retail (4-4-5 family) calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RetailConfig {
    #[serde(default)]
    anchor: AnchorDate,
    #[serde(default)]
    pattern: WeekPattern,
}

impl RetailConfig {
    /// Creates a configuration with the given anchor and the default 5-4-4 pattern.
    pub fn new(anchor: AnchorDate) -> Self {
        Self {
            anchor,
            pattern: WeekPattern::default(),
        }
    }

    /// Sets the weeks-per-month pattern.
    pub fn with_pattern(mut self, pattern: WeekPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Returns the anchor whose preceding Sunday starts each retail year.
    pub fn anchor(&self) -> AnchorDate {
        self.anchor
    }

    /// Returns the weeks-per-month pattern.
    pub fn pattern(&self) -> WeekPattern {
        self.pattern
    }
}

/// Configuration bundle for building any [`crate::CalendarDate`].
///
/// # Example
///
/// ```
/// use calendars::CalendarConfig;
///
/// let config: CalendarConfig = serde_json::from_str(r#"{
///     "retail": { "anchor": "02-01", "pattern": "4-4-5" }
/// }"#).unwrap();
///
/// assert_eq!(config.retail().anchor().month(), 2);
/// assert_eq!(config.fiscal().anchor().month(), 8);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    fiscal: FiscalConfig,
    #[serde(default)]
    retail: RetailConfig,
    #[serde(default)]
    iso_pattern: WeekPattern,
}

impl CalendarConfig {
    /// Creates the default configuration (August 1st anchors, 5-4-4 weeks).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fiscal calendar configuration.
    pub fn with_fiscal(mut self, fiscal: FiscalConfig) -> Self {
        self.fiscal = fiscal;
        self
    }

    /// Sets the retail calendar configuration.
    pub fn with_retail(mut self, retail: RetailConfig) -> Self {
        self.retail = retail;
        self
    }

    /// Sets the week pattern of the ISO week calendar.
    pub fn with_iso_pattern(mut self, pattern: WeekPattern) -> Self {
        self.iso_pattern = pattern;
        self
    }

    /// Returns the fiscal calendar configuration.
    pub fn fiscal(&self) -> &FiscalConfig {
        &self.fiscal
    }

    /// Returns the retail calendar configuration.
    pub fn retail(&self) -> &RetailConfig {
        &self.retail
    }

    /// Returns the ISO week pattern.
    pub fn iso_pattern(&self) -> WeekPattern {
        self.iso_pattern
    }

    /// Validates every nested configuration.
    ///
    /// # Errors
    /// Returns the first configuration error found.
    pub fn validate(&self) -> Result<(), CalendarError> {
        self.fiscal.validate()
    }
}

//! Failure thresholds.
//!
//! Each validation carries a warning/error/critical triple. A level is either
//! an absolute failure count or a fraction of the test units, and it is
//! reached once a step has at least one failure and meets the level. A level
//! of zero therefore means "any failure counts".

use serde::{Deserialize, Serialize};

/// A single threshold level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    /// Absolute number of failing test units.
    Count(u64),
    /// Fraction of failing test units, in `[0, 1]`.
    Fraction(f64),
}

impl Threshold {
    /// Whether `failed` out of `units` reaches this level.
    pub fn is_reached(&self, failed: u64, units: u64) -> bool {
        if failed == 0 {
            return false;
        }
        match *self {
            Self::Count(count) => failed >= count,
            Self::Fraction(fraction) => {
                units > 0 && (failed as f64 / units as f64) >= fraction
            }
        }
    }

    /// Fractions must lie in `[0, 1]`.
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::Count(_) => true,
            Self::Fraction(fraction) => (0.0..=1.0).contains(&fraction),
        }
    }
}

impl From<u64> for Threshold {
    fn from(count: u64) -> Self {
        Self::Count(count)
    }
}

impl From<f64> for Threshold {
    fn from(fraction: f64) -> Self {
        Self::Fraction(fraction)
    }
}

/// Warning, error and critical levels. Unset levels are never reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub warning: Option<Threshold>,
    pub error: Option<Threshold>,
    pub critical: Option<Threshold>,
}

impl Thresholds {
    pub fn new(
        warning: impl Into<Threshold>,
        error: impl Into<Threshold>,
        critical: impl Into<Threshold>,
    ) -> Self {
        Self {
            warning: Some(warning.into()),
            error: Some(error.into()),
            critical: Some(critical.into()),
        }
    }

    /// `(0, 0, 0)`: every level is reached by the first failure.
    pub fn any_failure() -> Self {
        Self::new(0u64, 0u64, 0u64)
    }

    pub fn evaluate(&self, failed: u64, units: u64) -> ThresholdLevels {
        let reached = |level: Option<Threshold>| {
            level.is_some_and(|threshold| threshold.is_reached(failed, units))
        };
        ThresholdLevels {
            warning: reached(self.warning),
            error: reached(self.error),
            critical: reached(self.critical),
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.warning, self.error, self.critical]
            .into_iter()
            .flatten()
            .all(|threshold| threshold.is_valid())
    }
}

/// Which threshold levels a step reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdLevels {
    pub warning: bool,
    pub error: bool,
    pub critical: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_means_any_failure() {
        let levels = Thresholds::any_failure().evaluate(1, 153);
        assert!(levels.warning && levels.error && levels.critical);
        assert_eq!(
            Thresholds::any_failure().evaluate(0, 153),
            ThresholdLevels::default()
        );
    }

    #[test]
    fn counts_and_fractions() {
        let thresholds = Thresholds::new(1u64, 0.5, 10u64);
        let levels = thresholds.evaluate(4, 10);
        assert!(levels.warning);
        assert!(!levels.error);
        assert!(!levels.critical);
        assert!(thresholds.evaluate(5, 10).error);
    }

    #[test]
    fn unset_levels_never_fire() {
        assert_eq!(Thresholds::default().evaluate(99, 100), ThresholdLevels::default());
    }

    #[test]
    fn fraction_out_of_range_is_invalid() {
        assert!(!Thresholds::new(0u64, 1.5, 0u64).is_valid());
        assert!(Thresholds::any_failure().is_valid());
    }
}

//! Position acceptance.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tourguide_core::geo::{GeoFix, RawPosition};

/// Which raw positions count as trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrustPolicy {
    /// Only simulated positions are trusted; real ones are ignored.
    #[default]
    SimulatedOnly,
    /// Every position is trusted.
    Any,
}

impl TrustPolicy {
    /// Returns whether `position` is trusted under this policy.
    #[must_use]
    pub fn trusts(self, position: &RawPosition) -> bool {
        match self {
            Self::SimulatedOnly => position.simulated,
            Self::Any => true,
        }
    }
}

impl fmt::Display for TrustPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimulatedOnly => f.write_str("simulated-only"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// Error returned when parsing an unknown trust policy name.
#[derive(Debug, Error)]
#[error("unknown trust policy {0:?}; expected \"simulated-only\" or \"any\"")]
pub struct UnknownTrustPolicy(pub String);

impl FromStr for TrustPolicy {
    type Err = UnknownTrustPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated-only" | "simulated" => Ok(Self::SimulatedOnly),
            "any" | "all" => Ok(Self::Any),
            other => Err(UnknownTrustPolicy(other.to_owned())),
        }
    }
}

/// Turns raw position updates into accepted fixes.
///
/// Holds only the latest accepted fix; superseded fixes are overwritten.
#[derive(Debug, Clone, Default)]
pub struct GeoFixSource {
    policy: TrustPolicy,
    current: Option<GeoFix>,
}

impl GeoFixSource {
    /// Creates a source with the given trust policy and no fix.
    #[must_use]
    pub fn new(policy: TrustPolicy) -> Self {
        Self {
            policy,
            current: None,
        }
    }

    /// Offers a raw position. Returns the accepted fix, or `None` when the
    /// policy does not trust it (the current fix is then left unchanged).
    pub fn accept(&mut self, position: RawPosition) -> Option<GeoFix> {
        if !self.policy.trusts(&position) {
            return None;
        }
        let fix = GeoFix {
            latitude: position.latitude,
            longitude: position.longitude,
            trusted: true,
            timestamp: position.timestamp,
        };
        self.current = Some(fix);
        Some(fix)
    }

    /// The latest accepted fix.
    #[must_use]
    pub fn current(&self) -> Option<&GeoFix> {
        self.current.as_ref()
    }

    /// The policy in force.
    #[must_use]
    pub fn policy(&self) -> TrustPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn position(latitude: f64, longitude: f64, simulated: bool) -> RawPosition {
        RawPosition {
            latitude,
            longitude,
            simulated,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_simulated_only_ignores_real_positions() {
        // Arrange
        let mut source = GeoFixSource::new(TrustPolicy::SimulatedOnly);

        // Act
        let accepted = source.accept(position(28.614, 77.2091, false));

        // Assert
        assert!(accepted.is_none());
        assert!(source.current().is_none());
    }

    #[test]
    fn test_simulated_only_accepts_simulated_positions() {
        let mut source = GeoFixSource::new(TrustPolicy::SimulatedOnly);

        let fix = source.accept(position(28.614, 77.2091, true)).unwrap();

        assert!(fix.trusted);
        assert_eq!(source.current(), Some(&fix));
    }

    #[test]
    fn test_untrusted_position_keeps_previous_fix() {
        let mut source = GeoFixSource::new(TrustPolicy::SimulatedOnly);
        let first = source.accept(position(1.0, 2.0, true)).unwrap();

        source.accept(position(3.0, 4.0, false));

        assert_eq!(source.current(), Some(&first));
    }

    #[test]
    fn test_newer_fix_supersedes_older() {
        let mut source = GeoFixSource::new(TrustPolicy::Any);
        source.accept(position(1.0, 2.0, false));

        let second = source.accept(position(3.0, 4.0, false)).unwrap();

        assert_eq!(source.current(), Some(&second));
    }

    #[test]
    fn test_trust_policy_parses_config_names() {
        assert_eq!(
            "simulated-only".parse::<TrustPolicy>().unwrap(),
            TrustPolicy::SimulatedOnly
        );
        assert_eq!(" ANY ".parse::<TrustPolicy>().unwrap(), TrustPolicy::Any);
        assert!("sometimes".parse::<TrustPolicy>().is_err());
    }
}

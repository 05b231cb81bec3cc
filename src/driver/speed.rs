//! Tick interval for the periodic driver

use super::DriverError;
use std::fmt;
use std::time::Duration;

/// Time between two generations while the simulation runs.
///
/// Always a multiple of [`Speed::STEP_MS`] within
/// [`Speed::MIN_MS`]`..=`[`Speed::MAX_MS`]. A smaller interval is a faster run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u64);

impl Speed {
    pub const MIN_MS: u64 = 50;
    pub const MAX_MS: u64 = 1000;
    pub const STEP_MS: u64 = 50;
    pub const DEFAULT_MS: u64 = 500;

    pub fn new(millis: u64) -> Result<Self, DriverError> {
        if (Self::MIN_MS..=Self::MAX_MS).contains(&millis) && millis % Self::STEP_MS == 0 {
            Ok(Self(millis))
        } else {
            Err(DriverError::InvalidSpeed(millis))
        }
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn interval(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// One step shorter interval, stopping at the minimum
    pub fn faster(self) -> Self {
        Self(self.0.saturating_sub(Self::STEP_MS).max(Self::MIN_MS))
    }

    /// One step longer interval, stopping at the maximum
    pub fn slower(self) -> Self {
        Self((self.0 + Self::STEP_MS).min(Self::MAX_MS))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(Self::DEFAULT_MS)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_speeds() {
        for millis in (50..=1000).step_by(50) {
            assert_eq!(Speed::new(millis).unwrap().as_millis(), millis);
        }
        assert_eq!(Speed::default().interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_speeds() {
        for &millis in &[0, 25, 49, 75, 1001, 1050] {
            assert!(matches!(Speed::new(millis), Err(DriverError::InvalidSpeed(m)) if m == millis));
        }
    }

    #[test]
    fn test_faster_and_slower_clamp() {
        let min = Speed::new(Speed::MIN_MS).unwrap();
        let max = Speed::new(Speed::MAX_MS).unwrap();
        assert_eq!(min.faster(), min);
        assert_eq!(max.slower(), max);
        assert_eq!(Speed::default().faster().as_millis(), 450);
        assert_eq!(Speed::default().slower().to_string(), "550ms");
    }
}

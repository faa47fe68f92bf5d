use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::StorageError;

/// Window restricting which predictions count toward range-scoped statistics.
///
/// Windows end at the evaluation instant (`now`) and reach back a fixed number
/// of days. `All` imposes no restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "1y")]
    OneYear,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
            Self::NinetyDays => "90d",
            Self::OneYear => "1y",
            Self::All => "all",
        }
    }

    pub fn window(&self) -> Option<Duration> {
        match self {
            Self::SevenDays => Some(Duration::days(7)),
            Self::ThirtyDays => Some(Duration::days(30)),
            Self::NinetyDays => Some(Duration::days(90)),
            Self::OneYear => Some(Duration::days(365)),
            Self::All => None,
        }
    }

    /// Earliest instant still inside the window, `None` for `All`
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.window().map(|window| now - window)
    }

    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.cutoff(now) {
            Some(cutoff) => at >= cutoff,
            None => true,
        }
    }
}

impl FromStr for TimeRange {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Self::SevenDays),
            "30d" => Ok(Self::ThirtyDays),
            "90d" => Ok(Self::NinetyDays),
            "1y" => Ok(Self::OneYear),
            "all" => Ok(Self::All),
            other => Err(StorageError::Validation(format!(
                "unknown time range '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_known_ranges() {
        assert_eq!("7d".parse::<TimeRange>().unwrap(), TimeRange::SevenDays);
        assert_eq!("1y".parse::<TimeRange>().unwrap(), TimeRange::OneYear);
        assert_eq!("all".parse::<TimeRange>().unwrap(), TimeRange::All);
    }

    #[test]
    fn test_parse_unknown_range_is_rejected() {
        assert!("2w".parse::<TimeRange>().is_err());
        assert!("ALL".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_window_boundaries() {
        let range = TimeRange::SevenDays;
        assert!(range.contains(now() - Duration::days(7), now()));
        assert!(!range.contains(now() - Duration::days(7) - Duration::seconds(1), now()));
    }

    #[test]
    fn test_all_imposes_no_restriction() {
        assert!(TimeRange::All.contains(now() - Duration::days(5000), now()));
        assert_eq!(TimeRange::All.cutoff(now()), None);
    }
}

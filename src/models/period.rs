use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Calendar period used to bucket time-indexed rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "H")]
    Hourly,
    #[default]
    #[serde(rename = "D")]
    Daily,
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "2W")]
    TwoWeek,
    #[serde(rename = "M")]
    Monthly,
}

impl Period {
    /// Choices offered on the GHG tab
    pub const GHG_CHOICES: [Period; 3] = [Period::Daily, Period::TwoWeek, Period::Monthly];

    /// Choices offered on the weather tab
    pub const WEATHER_CHOICES: [Period; 4] =
        [Period::Hourly, Period::Daily, Period::Weekly, Period::Monthly];

    pub fn code(&self) -> &'static str {
        match self {
            Period::Hourly => "H",
            Period::Daily => "D",
            Period::Weekly => "W",
            Period::TwoWeek => "2W",
            Period::Monthly => "M",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Hourly => "Hourly",
            Period::Daily => "Daily",
            Period::Weekly => "Weekly",
            Period::TwoWeek => "Biweekly",
            Period::Monthly => "Monthly",
        }
    }
}

impl FromStr for Period {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(Period::Hourly),
            "D" => Ok(Period::Daily),
            "W" => Ok(Period::Weekly),
            "2W" => Ok(Period::TwoWeek),
            "M" => Ok(Period::Monthly),
            other => Err(DashboardError::InvalidFormat(format!(
                "Unknown period code: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;
use crate::models::Period;
use crate::utils::constants::ALL_SENTINEL;

/// The four dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    #[serde(rename = "tab-ghg")]
    Ghg,
    #[serde(rename = "tab-aws")]
    Weather,
    #[serde(rename = "tab-agb")]
    Agb,
    #[serde(rename = "tab-bgb")]
    Bgb,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Ghg, Tab::Weather, Tab::Agb, Tab::Bgb];

    pub fn slug(&self) -> &'static str {
        match self {
            Tab::Ghg => "tab-ghg",
            Tab::Weather => "tab-aws",
            Tab::Agb => "tab-agb",
            Tab::Bgb => "tab-bgb",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Ghg => "GHG Data",
            Tab::Weather => "AWS Data",
            Tab::Agb => "Carbon AGB",
            Tab::Bgb => "Carbon BGB",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Tab::Ghg => "GHG Data Visualization",
            Tab::Weather => "AWS Data Visualization",
            Tab::Agb => "Carbon AGB Visualization",
            Tab::Bgb => "Carbon BGB Visualization",
        }
    }
}

impl FromStr for Tab {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.slug() == s)
            .ok_or_else(|| DashboardError::InvalidFormat(format!("Unknown tab: '{}'", s)))
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Equality constraint carried by one selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Any,
    Equals(String),
}

impl Selection {
    /// Selector with an explicit "All" entry
    pub fn from_choice(value: &str) -> Self {
        if value == ALL_SENTINEL {
            Selection::Any
        } else {
            Selection::Equals(value.to_string())
        }
    }

    /// Clearable selector where unset or blank means no constraint
    ///
    /// The value is compared as given, surrounding whitespace included.
    pub fn from_optional(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => Selection::Equals(v.to_string()),
            _ => Selection::Any,
        }
    }
}

fn all_sentinel() -> String {
    ALL_SENTINEL.to_string()
}

fn default_agb_attribute() -> String {
    "dbh".to_string()
}

fn default_agb_category() -> String {
    "Spp_Sci".to_string()
}

fn default_bgb_attribute() -> String {
    "Depth".to_string()
}

fn default_bgb_category() -> String {
    "Region".to_string()
}

/// Control state of the GHG tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhgControls {
    #[serde(default = "all_sentinel")]
    pub site: String,
    #[serde(default = "all_sentinel")]
    pub treatment: String,
    #[serde(rename = "type", default = "all_sentinel")]
    pub kind: String,
    #[serde(default)]
    pub co2_period: Period,
    #[serde(default)]
    pub ch4_period: Period,
}

impl Default for GhgControls {
    fn default() -> Self {
        Self {
            site: all_sentinel(),
            treatment: all_sentinel(),
            kind: all_sentinel(),
            co2_period: Period::Daily,
            ch4_period: Period::Daily,
        }
    }
}

/// Control state of the weather tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherControls {
    #[serde(default)]
    pub period: Period,
}

/// Control state of the above-ground biomass tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgbControls {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default = "default_agb_attribute")]
    pub attribute: String,
    #[serde(default = "default_agb_category")]
    pub category: String,
}

impl Default for AgbControls {
    fn default() -> Self {
        Self {
            region: None,
            site: None,
            attribute: default_agb_attribute(),
            category: default_agb_category(),
        }
    }
}

/// Control state of the below-ground biomass tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BgbControls {
    #[serde(default = "default_bgb_attribute")]
    pub attribute: String,
    #[serde(default = "default_bgb_category")]
    pub category: String,
}

impl Default for BgbControls {
    fn default() -> Self {
        Self {
            attribute: default_bgb_attribute(),
            category: default_bgb_category(),
        }
    }
}

use serde::Serialize;

use crate::models::Period;
use crate::utils::constants::ALL_SENTINEL;

/// One dropdown choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub label: String,
    pub value: String,
}

impl OptionEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Entry whose label and value are the same text
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            value: text,
        }
    }
}

/// Ordered dropdown choices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionList(Vec<OptionEntry>);

impl OptionList {
    pub fn new(entries: Vec<OptionEntry>) -> Self {
        Self(entries)
    }

    pub fn from_static(values: &[&str]) -> Self {
        Self(values.iter().map(|v| OptionEntry::same(*v)).collect())
    }

    pub fn from_periods(periods: &[Period]) -> Self {
        Self(
            periods
                .iter()
                .map(|p| OptionEntry::new(p.label(), p.code()))
                .collect(),
        )
    }

    /// Prepend the "All" entry
    pub fn with_all(mut self) -> Self {
        self.0.insert(0, OptionEntry::same(ALL_SENTINEL));
        self
    }

    pub fn entries(&self) -> &[OptionEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Option lists derived from the loaded tables, fixed for the process lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub ghg_sites: OptionList,
    pub ghg_treatments: OptionList,
    pub ghg_types: OptionList,
    pub agb_regions: OptionList,
    pub agb_sites: OptionList,
}

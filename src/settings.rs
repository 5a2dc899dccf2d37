use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_DEBUG, DEFAULT_HOST, DEFAULT_LOGO_LEFT, DEFAULT_LOGO_RIGHT, DEFAULT_PORT,
    DEFAULT_WORKBOOK,
};

/// Process settings: compiled defaults, then an optional TOML file, then
/// command-line overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DashboardSettings {
    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,

    pub debug: bool,

    #[validate(custom(function = "non_empty_path"))]
    pub workbook: PathBuf,

    #[validate(length(min = 1))]
    pub logos: Vec<PathBuf>,
}

/// Values given on the command line; `None` keeps the lower layers
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: Option<bool>,
    pub workbook: Option<PathBuf>,
    pub logos: Vec<PathBuf>,
}

fn non_empty_path(path: &PathBuf) -> std::result::Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::new("empty_path"));
    }
    Ok(())
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl DashboardSettings {
    pub fn load(file: Option<&Path>, overrides: SettingsOverrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("debug", DEFAULT_DEBUG)?
            .set_default("workbook", DEFAULT_WORKBOOK)?
            .set_default("logos", vec![DEFAULT_LOGO_LEFT, DEFAULT_LOGO_RIGHT])?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder
            .set_override_option("host", overrides.host)?
            .set_override_option("port", overrides.port.map(i64::from))?
            .set_override_option("debug", overrides.debug)?
            .set_override_option("workbook", overrides.workbook.as_deref().map(path_string))?;

        if !overrides.logos.is_empty() {
            let logos: Vec<String> = overrides.logos.iter().map(|p| path_string(p)).collect();
            builder = builder.set_override("logos", logos)?;
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: DEFAULT_DEBUG,
            workbook: PathBuf::from(DEFAULT_WORKBOOK),
            logos: vec![
                PathBuf::from(DEFAULT_LOGO_LEFT),
                PathBuf::from(DEFAULT_LOGO_RIGHT),
            ],
        }
    }
}

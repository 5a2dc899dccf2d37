use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{DashboardError, Result};

/// Logos embedded into the page header as data URIs
#[derive(Debug, Clone, Default)]
pub struct PageAssets {
    pub logos: Vec<String>,
}

impl PageAssets {
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let logos = paths
            .iter()
            .map(|path| encode_image(path))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { logos })
    }
}

/// Read a PNG file and encode it as a `data:` URI
pub fn encode_image(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| DashboardError::Asset {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "encoded image asset");
    Ok(format!("data:image/png;base64,{}", B64.encode(bytes)))
}

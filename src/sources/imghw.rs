use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::config::CollectorConfig;
use crate::facts::FlatFactMap;
use crate::parsers::parse_hw_model;
use crate::sources::utils;

/// Base name used for the PATH fallback search.
const IMG_HW_BIN: &str = "exadata.img.hw";

/// Arguments asking for the machine model.
const IMG_HW_ARGS: &[&str] = &["--get", "model"];

/// Collects the machine model from the `exadata.img.hw` tool.
pub struct ImgHwSource {
    binary_path: PathBuf,
}

impl ImgHwSource {
    /// Create a source using the configured binary path.
    pub fn new(config: &CollectorConfig) -> Self {
        Self {
            binary_path: config.img_hw_path.clone(),
        }
    }

    /// Set the path to the exadata.img.hw binary.
    pub fn set_binary_path(&mut self, path: PathBuf) {
        self.binary_path = path;
    }

    /// Check whether the exadata.img.hw binary can be resolved on this host.
    pub fn is_available(&self) -> bool {
        utils::resolve_binary(&self.binary_path, IMG_HW_BIN).is_ok()
    }

    /// Run exadata.img.hw and parse the reported model.
    pub async fn load(&self) -> Result<FlatFactMap> {
        info!("Collecting hardware model from exadata.img.hw");

        let binary = utils::resolve_binary(&self.binary_path, IMG_HW_BIN)?;
        let facts = match utils::run_capture(&binary, IMG_HW_ARGS)? {
            Some(stdout) => parse_hw_model(&stdout),
            None => FlatFactMap::new(),
        };

        Ok(facts)
    }
}

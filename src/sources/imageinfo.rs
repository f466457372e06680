use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::config::CollectorConfig;
use crate::facts::FlatFactMap;
use crate::parsers::parse_image_info;
use crate::sources::utils;

/// Base name used for the PATH fallback search.
const IMAGEINFO_BIN: &str = "imageinfo";

/// Arguments asking imageinfo for every attribute it knows.
const IMAGEINFO_ARGS: &[&str] = &["-all"];

/// Collects image attributes from the `imageinfo` tool.
pub struct ImageInfoSource {
    binary_path: PathBuf,
}

impl ImageInfoSource {
    /// Create a source using the configured binary path.
    pub fn new(config: &CollectorConfig) -> Self {
        Self {
            binary_path: config.imageinfo_path.clone(),
        }
    }

    /// Set the path to the imageinfo binary.
    pub fn set_binary_path(&mut self, path: PathBuf) {
        self.binary_path = path;
    }

    /// Check whether the imageinfo binary can be resolved on this host.
    pub fn is_available(&self) -> bool {
        utils::resolve_binary(&self.binary_path, IMAGEINFO_BIN).is_ok()
    }

    /// Run imageinfo and parse its output into facts.
    pub async fn load(&self) -> Result<FlatFactMap> {
        info!("Collecting image facts from imageinfo");

        let binary = utils::resolve_binary(&self.binary_path, IMAGEINFO_BIN)?;
        let facts = match utils::run_capture(&binary, IMAGEINFO_ARGS)? {
            Some(stdout) => parse_image_info(&stdout),
            None => FlatFactMap::new(),
        };

        Ok(facts)
    }
}

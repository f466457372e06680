use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::config::CollectorConfig;
use crate::facts::FlatFactMap;
use crate::parsers::parse_system_information;
use crate::sources::utils;

/// Base name used for the PATH fallback search.
const DMIDECODE_BIN: &str = "dmidecode";

/// Arguments restricting output to the system DMI table.
const DMIDECODE_ARGS: &[&str] = &["-t", "system"];

/// Collects the DMI "System Information" section via `dmidecode`.
pub struct DmidecodeSource {
    binary_path: PathBuf,
}

impl DmidecodeSource {
    /// Create a source using the configured binary path.
    pub fn new(config: &CollectorConfig) -> Self {
        Self {
            binary_path: config.dmidecode_path.clone(),
        }
    }

    /// Set the path to the dmidecode binary.
    pub fn set_binary_path(&mut self, path: PathBuf) {
        self.binary_path = path;
    }

    /// Check whether the dmidecode binary can be resolved on this host.
    pub fn is_available(&self) -> bool {
        utils::resolve_binary(&self.binary_path, DMIDECODE_BIN).is_ok()
    }

    /// Run dmidecode and parse the system information section.
    pub async fn load(&self) -> Result<FlatFactMap> {
        info!("Collecting system information from dmidecode");

        let binary = utils::resolve_binary(&self.binary_path, DMIDECODE_BIN)?;
        let facts = match utils::run_capture(&binary, DMIDECODE_ARGS)? {
            Some(stdout) => parse_system_information(&stdout),
            None => FlatFactMap::new(),
        };

        Ok(facts)
    }
}

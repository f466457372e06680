use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Well-known location of the imageinfo tool on Exadata hosts.
pub const DEFAULT_IMAGEINFO_PATH: &str = "/usr/local/bin/imageinfo";

/// Well-known location of the exadata.img.hw tool.
pub const DEFAULT_IMG_HW_PATH: &str = "/usr/sbin/exadata.img.hw";

/// Well-known location of dmidecode.
pub const DEFAULT_DMIDECODE_PATH: &str = "/usr/sbin/dmidecode";

/// Rack description XML written by onecommand during deployment.
pub const DEFAULT_DATABASEMACHINE_XML: &str =
    "/opt/oracle.SupportTools/onecommand/databasemachine.xml";

/// Paths the fact collector reads from.
///
/// Every path is explicit configuration rather than process-global lookup
/// state; when a configured binary is missing the collector falls back to a
/// PATH search by base name. Loadable from a TOML file, with any omitted
/// field keeping its appliance default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Path to the imageinfo binary
    pub imageinfo_path: PathBuf,

    /// Path to the exadata.img.hw binary
    pub img_hw_path: PathBuf,

    /// Path to the dmidecode binary
    pub dmidecode_path: PathBuf,

    /// Path to databasemachine.xml
    pub databasemachine_xml: PathBuf,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            imageinfo_path: PathBuf::from(DEFAULT_IMAGEINFO_PATH),
            img_hw_path: PathBuf::from(DEFAULT_IMG_HW_PATH),
            dmidecode_path: PathBuf::from(DEFAULT_DMIDECODE_PATH),
            databasemachine_xml: PathBuf::from(DEFAULT_DATABASEMACHINE_XML),
        }
    }
}

impl CollectorConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::CollectorConfig;
use crate::parsers::xmltree::{xml_to_mapping, XmlError, XmlMapping};

/// Collects the rack description from databasemachine.xml.
///
/// This is the strict source: an absent file is a normal condition (guests
/// and storage cells often have no rack description) and loads as `None`,
/// but a file that exists and cannot be read or parsed is a hard
/// [`XmlError`] that aborts the gather.
pub struct DatabaseMachineSource {
    xml_path: PathBuf,
}

impl DatabaseMachineSource {
    /// Create a source using the configured XML path.
    pub fn new(config: &CollectorConfig) -> Self {
        Self {
            xml_path: config.databasemachine_xml.clone(),
        }
    }

    /// Set the path to databasemachine.xml.
    pub fn set_xml_path(&mut self, path: PathBuf) {
        self.xml_path = path;
    }

    /// Check whether the XML file exists on this host.
    pub fn is_available(&self) -> bool {
        self.xml_path.exists()
    }

    /// Read and convert the XML file, or `None` when it does not exist.
    pub async fn load(&self) -> Result<Option<XmlMapping>, XmlError> {
        if !self.xml_path.exists() {
            debug!("{} not present, skipping", self.xml_path.display());
            return Ok(None);
        }

        info!("Converting rack description {}", self.xml_path.display());

        let content = std::fs::read_to_string(&self.xml_path).map_err(|e| {
            // the file can still vanish between the check and the read
            if e.kind() == ErrorKind::NotFound {
                XmlError::NotFound(self.xml_path.display().to_string())
            } else {
                XmlError::Conversion(format!(
                    "failed to read {}: {}",
                    self.xml_path.display(),
                    e
                ))
            }
        })?;

        xml_to_mapping(&content).map(Some)
    }
}

use anyhow::Result;
use tracing::info;

use crate::config::CollectorConfig;
use crate::facts::ExaFacts;

mod databasemachine;
mod dmidecode;
mod imageinfo;
mod imghw;
mod utils;

pub use databasemachine::DatabaseMachineSource;
pub use dmidecode::DmidecodeSource;
pub use imageinfo::ImageInfoSource;
pub use imghw::ImgHwSource;

/// Runs the four fact sources and assembles the aggregate record.
///
/// The sources are independent and share no state; they are run one after
/// another here only because there is nothing to gain from overlapping four
/// short-lived local commands.
pub struct FactCollector {
    config: CollectorConfig,
}

impl FactCollector {
    /// Create a collector for the given source paths.
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// The configuration this collector reads from.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Gather all four fact slots.
    ///
    /// A missing source binary or a malformed rack XML aborts the gather; a
    /// source binary that runs but exits non-zero leaves its slot empty.
    pub async fn gather(&self) -> Result<ExaFacts> {
        info!("Gathering Exadata facts");

        let facts = ExaFacts {
            exa_img: ImageInfoSource::new(&self.config).load().await?,
            exa_hw: ImgHwSource::new(&self.config).load().await?,
            system_info: DmidecodeSource::new(&self.config).load().await?,
            databasemachine: DatabaseMachineSource::new(&self.config).load().await?,
        };

        info!(
            "Gathered {} image facts, {} hw facts, {} system facts, rack xml: {}",
            facts.exa_img.len(),
            facts.exa_hw.len(),
            facts.system_info.len(),
            facts.databasemachine.is_some()
        );

        Ok(facts)
    }
}

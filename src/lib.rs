pub mod config;
pub mod facts;
pub mod parsers;
pub mod sources;

pub use config::CollectorConfig;
pub use facts::{ExaFacts, FlatFactMap};
pub use parsers::xmltree::{XmlError, XmlMapping, XmlValue};
pub use sources::FactCollector;

use indexmap::IndexMap;
use serde::Serialize;

use crate::parsers::xmltree::XmlMapping;

/// Flat key-value fact mapping produced by the text parsers.
///
/// Insertion order follows the order keys first appeared in the command
/// output, so serialized facts are stable across runs on identical input.
pub type FlatFactMap = IndexMap<String, String>;

/// Aggregate fact record for one Exadata host.
///
/// Each slot is filled by exactly one source and never touched afterwards.
/// `databasemachine` is `None` when the XML file does not exist on the host,
/// which serializes as an explicit `null` so consumers can tell "no rack
/// description installed" apart from an empty one.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ExaFacts {
    /// imageinfo attributes (image version, kernel version, node type, ...)
    pub exa_img: FlatFactMap,

    /// Machine model reported by exadata.img.hw
    pub exa_hw: FlatFactMap,

    /// dmidecode "System Information" section (manufacturer, serial, UUID, ...)
    pub system_info: FlatFactMap,

    /// Converted content of databasemachine.xml, keyed by the document root tag
    pub databasemachine: Option<XmlMapping>,
}

//! Parsers for the Exadata fact sources.
//!
//! Three permissive line parsers for captured command output and one strict
//! XML converter. All of them are pure functions over already-captured input;
//! running the commands and reading the file is the job of [`crate::sources`].

pub mod dmidecode;
pub mod imageinfo;
pub mod imghw;
pub mod xmltree;

pub use dmidecode::{parse_section, parse_system_information};
pub use imageinfo::parse_image_info;
pub use imghw::parse_hw_model;
pub use xmltree::xml_to_mapping;

use indexmap::map::Entry;
use indexmap::IndexMap;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use thiserror::Error;

/// Ordered mapping from tag name to converted value.
pub type XmlMapping = IndexMap<String, XmlValue>;

/// Converted value of one XML element.
///
/// The shape is data-dependent: a tag that occurs once under its parent
/// converts to a bare `Scalar`/`Mapping`, while repeated siblings of the same
/// tag are collected into a `List`. Callers must not assume a fixed shape per
/// tag across documents, only within one document's actual child counts.
///
/// Serialization is untagged, so the JSON output is the plain
/// null/string/array/object nesting consumers of the fact record expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XmlValue {
    /// Leaf element with no text content at all
    Null,
    /// Leaf element text, kept verbatim
    Scalar(String),
    /// Repeated sibling tags, in document order
    List(Vec<XmlValue>),
    /// Child tag to value, in document order
    Mapping(XmlMapping),
}

/// Failure converting a databasemachine XML document.
///
/// Unlike the text parsers, which degrade permissively, XML trouble is
/// surfaced loudly: a malformed rack description points at a real problem on
/// the host, not benign format drift.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The source file does not exist (only raised when the caller expected it)
    #[error("XML file not found: {0}")]
    NotFound(String),
    /// The document is not well-formed XML
    #[error("error parsing XML: {0}")]
    Parse(String),
    /// Any other fault while walking the tree
    #[error("error processing XML: {0}")]
    Conversion(String),
}

/// One open element during the document walk.
struct Frame {
    tag: String,
    text: String,
    had_text: bool,
    children: XmlMapping,
    has_children: bool,
}

impl Frame {
    fn new(tag: String) -> Self {
        Self {
            tag,
            text: String::new(),
            had_text: false,
            children: XmlMapping::new(),
            has_children: false,
        }
    }

    /// Tag and converted value of this element once its end tag is reached.
    ///
    /// Elements with child elements convert to a mapping; their own text (the
    /// whitespace between children) is discarded. Childless elements convert
    /// to their text, or `Null` when the document carried none.
    fn into_tagged_value(self) -> (String, XmlValue) {
        let Self {
            tag,
            text,
            had_text,
            children,
            has_children,
        } = self;
        let value = if has_children {
            XmlValue::Mapping(children)
        } else if had_text {
            XmlValue::Scalar(text)
        } else {
            XmlValue::Null
        };
        (tag, value)
    }
}

/// Insert a converted child under its tag, promoting repeated tags to a list.
///
/// First occurrence stores the value bare. The second occurrence replaces it
/// with a two-element list, and later ones append.
fn insert_child(map: &mut XmlMapping, tag: String, value: XmlValue) {
    match map.entry(tag) {
        Entry::Occupied(mut entry) => match entry.get_mut() {
            XmlValue::List(items) => items.push(value),
            existing => {
                let first = std::mem::replace(existing, XmlValue::Null);
                *existing = XmlValue::List(vec![first, value]);
            }
        },
        Entry::Vacant(entry) => {
            entry.insert(value);
        }
    }
}

/// Convert a well-formed XML document into `{root_tag: value}`.
///
/// The root element always converts to a `Mapping` (empty for a childless
/// root), matching the shape downstream consumers of the databasemachine
/// facts rely on. Element attributes are ignored; the rack description
/// carries everything in element text.
pub fn xml_to_mapping(xml: &str) -> Result<XmlMapping, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut result = XmlMapping::new();

    loop {
        let event = reader.read_event().map_err(|e| XmlError::Parse(e.to_string()))?;
        match event {
            Event::Start(start) => {
                if stack.is_empty() && !result.is_empty() {
                    return Err(XmlError::Parse("junk after document element".to_string()));
                }
                let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.has_children = true;
                }
                stack.push(Frame::new(tag));
            }
            Event::Empty(start) => {
                let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                match stack.last_mut() {
                    Some(parent) => {
                        parent.has_children = true;
                        insert_child(&mut parent.children, tag, XmlValue::Null);
                    }
                    None => {
                        if !result.is_empty() {
                            return Err(XmlError::Parse(
                                "junk after document element".to_string(),
                            ));
                        }
                        // A self-closing root still converts to a mapping.
                        result.insert(tag, XmlValue::Mapping(XmlMapping::new()));
                    }
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| XmlError::Conversion("unbalanced end tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => {
                        let (tag, value) = frame.into_tagged_value();
                        insert_child(&mut parent.children, tag, value);
                    }
                    None => {
                        result.insert(frame.tag, XmlValue::Mapping(frame.children));
                    }
                }
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| XmlError::Parse(e.to_string()))?;
                match stack.last_mut() {
                    Some(frame) => {
                        frame.text.push_str(&text);
                        frame.had_text = true;
                    }
                    None => {
                        if !text.trim().is_empty() {
                            return Err(XmlError::Parse(
                                "text outside document element".to_string(),
                            ));
                        }
                    }
                }
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                    frame.had_text = true;
                }
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::Parse("unexpected end of document".to_string()));
    }
    if result.is_empty() {
        return Err(XmlError::Parse("no element found".to_string()));
    }

    Ok(result)
}

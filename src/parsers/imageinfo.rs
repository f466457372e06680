use crate::facts::FlatFactMap;

/// Parse `imageinfo -all` output into a flat fact map.
///
/// Every line is expected to look like `Image version: 22.1.9.0.0.230302`.
/// The split happens on the first colon only, so values containing colons
/// (timestamps, device paths) survive intact. Lines that are blank, have no
/// colon, or trim down to an empty key or value are dropped without comment;
/// format drift in imageinfo output must never abort fact collection.
///
/// A key that appears more than once keeps the value of its last occurrence.
pub fn parse_image_info(raw: &str) -> FlatFactMap {
    let mut facts = FlatFactMap::new();

    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((param, value)) = line.split_once(':') else {
            continue;
        };
        let param = param.trim();
        let value = value.trim();
        if param.is_empty() || value.is_empty() {
            continue;
        }
        facts.insert(param.to_string(), value.to_string());
    }

    facts
}

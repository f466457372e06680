use crate::facts::FlatFactMap;

/// Key under which the machine model is stored.
pub const MODEL_KEY: &str = "model";

/// Parse `exadata.img.hw --get model` output.
///
/// Well-formed output is a single line holding the model string, but the
/// parser tolerates extra lines: every non-blank line overwrites `model`, so
/// the last one wins. The line is stored raw, without trimming, because the
/// model string is reported verbatim elsewhere in the stack. Input with no
/// non-blank line yields an empty map.
pub fn parse_hw_model(raw: &str) -> FlatFactMap {
    let mut facts = FlatFactMap::new();

    for line in raw.lines() {
        if !line.trim().is_empty() {
            facts.insert(MODEL_KEY.to_string(), line.to_string());
        }
    }

    facts
}

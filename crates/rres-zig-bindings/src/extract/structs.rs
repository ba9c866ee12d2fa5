//! Struct name extraction

use anyhow::Result;
use regex::Regex;

/// Finds `typedef struct NAME {` declarations
pub struct StructExtractor {
    struct_regex: Regex,
}

impl StructExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            struct_regex: Regex::new(r"typedef\s+struct\s+([A-Za-z_]\w*)\s*\{")?,
        })
    }

    /// Struct names in order of appearance, duplicates included
    pub fn extract(&self, header_text: &str) -> Vec<String> {
        self.struct_regex
            .captures_iter(header_text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

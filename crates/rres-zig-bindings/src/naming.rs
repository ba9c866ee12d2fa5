//! Naming rules for turning C identifiers into Zig identifiers

use std::collections::HashSet;

use crate::config::BindgenConfig;

/// Which prefix was removed from an enum member name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixMatch {
    /// A per-family category prefix (and thereby the library prefix)
    Category,
    /// Only the generic library prefix
    Library,
    /// Nothing matched; the name was only lowercased
    None,
}

/// Identifier transformer built from the configured prefixes and keywords
#[derive(Debug, Clone)]
pub struct NameRules {
    category_prefixes: Vec<String>,
    library_prefix: String,
    type_prefix: String,
    reserved_words: HashSet<String>,
    keyword_suffix: String,
}

impl NameRules {
    /// Build naming rules from a configuration
    pub fn from_config(config: &BindgenConfig) -> Self {
        Self {
            category_prefixes: config.category_prefixes.clone(),
            library_prefix: config.library_prefix.clone(),
            type_prefix: config.type_prefix.clone(),
            reserved_words: config.reserved_words.iter().cloned().collect(),
            keyword_suffix: config.keyword_suffix.clone(),
        }
    }

    /// Convert a C enum member name to its Zig member name
    ///
    /// `RRES_COMP_DEFLATE` becomes `deflate`, `RRES_FONT_STYLE_UNDEFINED`
    /// becomes `undefined_`.
    pub fn target_member_name(&self, source_member_name: &str) -> String {
        self.member_name_with_match(source_member_name).0
    }

    /// Same as [`target_member_name`](Self::target_member_name), also
    /// reporting which prefix was stripped
    pub fn member_name_with_match(&self, source_member_name: &str) -> (String, PrefixMatch) {
        let (rest, matched) = self.strip_member_prefix(source_member_name);
        let lowered = rest.to_lowercase();
        (self.escape(lowered), matched)
    }

    /// Convert a C type name to its Zig type name (`rresCodeLang` → `CodeLang`)
    pub fn target_type_name(&self, source_type_name: &str) -> String {
        match source_type_name.strip_prefix(self.type_prefix.as_str()) {
            Some(rest) if !self.type_prefix.is_empty() && !rest.is_empty() => rest.to_string(),
            _ => source_type_name.to_string(),
        }
    }

    /// Append the keyword marker until the name is free
    pub fn disambiguate(&self, name: &str) -> String {
        match name.strip_prefix("@\"").and_then(|n| n.strip_suffix('"')) {
            Some(inner) => format!("@\"{}{}\"", inner, self.keyword_suffix),
            None => format!("{}{}", name, self.keyword_suffix),
        }
    }

    fn strip_member_prefix<'a>(&self, name: &'a str) -> (&'a str, PrefixMatch) {
        let mut rest = name;
        let mut matched = PrefixMatch::None;

        if let Some(stripped) = self
            .category_prefixes
            .iter()
            .find_map(|prefix| rest.strip_prefix(prefix.as_str()))
        {
            rest = stripped;
            matched = PrefixMatch::Category;
        }

        if !self.library_prefix.is_empty() {
            if let Some(stripped) = rest.strip_prefix(self.library_prefix.as_str()) {
                rest = stripped;
                if matched == PrefixMatch::None {
                    matched = PrefixMatch::Library;
                }
            }
        }

        // A member named exactly like a prefix keeps its full name
        if rest.is_empty() {
            return (name, PrefixMatch::None);
        }

        (rest, matched)
    }

    fn escape(&self, name: String) -> String {
        let name = if self.reserved_words.contains(&name) {
            format!("{}{}", name, self.keyword_suffix)
        } else {
            name
        };

        if is_identifier(&name) {
            name
        } else {
            format!("@\"{}\"", name)
        }
    }
}

impl Default for NameRules {
    fn default() -> Self {
        Self::from_config(&BindgenConfig::default())
    }
}

/// Whether `name` is a plain C/Zig identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_prefix_is_stripped() {
        let rules = NameRules::default();
        assert_eq!(rules.target_member_name("RRES_COMP_DEFLATE"), "deflate");
        assert_eq!(rules.target_member_name("RRES_DATA_RAW"), "raw");
        assert_eq!(rules.target_member_name("RRES_CIPHER_XCHACHA20_POLY1305"), "xchacha20_poly1305");
        assert_eq!(rules.target_member_name("RRES_PIXELFORMAT_UNCOMPRESSED_R8G8B8A8"), "uncompressed_r8g8b8a8");
    }

    #[test]
    fn test_library_prefix_only() {
        let rules = NameRules::default();
        let (name, matched) = rules.member_name_with_match("RRES_ERROR_FILE_NOT_FOUND");
        assert_eq!(name, "error_file_not_found");
        assert_eq!(matched, PrefixMatch::Library);
    }

    #[test]
    fn test_unprefixed_name_is_lowercased() {
        let rules = NameRules::default();
        let (name, matched) = rules.member_name_with_match("CUSTOM_VALUE");
        assert_eq!(name, "custom_value");
        assert_eq!(matched, PrefixMatch::None);
    }

    #[test]
    fn test_reserved_words_get_suffix() {
        let rules = NameRules::default();
        assert_eq!(rules.target_member_name("RRES_FONT_STYLE_UNDEFINED"), "undefined_");
        assert_eq!(rules.target_member_name("RRES_TEXT_ENCODING_UNDEFINED"), "undefined_");
        assert_eq!(rules.target_member_name("RRES_DATA_NULL"), "null_");
        assert_eq!(rules.target_member_name("RRES_ERROR"), "error_");
    }

    #[test]
    fn test_leading_digit_is_quoted() {
        let rules = NameRules::default();
        assert_eq!(rules.target_member_name("RRES_VERTEX_FORMAT_3D"), "@\"3d\"");
    }

    #[test]
    fn test_member_equal_to_prefix_keeps_name() {
        let rules = NameRules::default();
        assert_eq!(rules.target_member_name("RRES_"), "rres_");
    }

    #[test]
    fn test_transform_is_deterministic() {
        let rules = NameRules::default();
        let first = rules.target_member_name("RRES_CODE_LANG_JAVASCRIPT");
        let second = rules.target_member_name("RRES_CODE_LANG_JAVASCRIPT");
        assert_eq!(first, second);
        assert_eq!(first, "javascript");
    }

    #[test]
    fn test_type_name_prefix() {
        let rules = NameRules::default();
        assert_eq!(rules.target_type_name("rresCompressionType"), "CompressionType");
        assert_eq!(rules.target_type_name("Image"), "Image");
        assert_eq!(rules.target_type_name("rres"), "rres");
    }

    #[test]
    fn test_disambiguate() {
        let rules = NameRules::default();
        assert_eq!(rules.disambiguate("none"), "none_");
        assert_eq!(rules.disambiguate("@\"3d\""), "@\"3d_\"");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("rresFileInfo"));
        assert!(is_identifier("_private1"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("char *"));
    }
}

//! Configuration for the binding generator
//!
//! The defaults describe the rres 1.x headers. Every list that tracks the
//! upstream header (enum names, category prefixes) can be overridden from a
//! TOML file so a header bump does not need a code change.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::naming::is_identifier;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

impl From<ConfigError> for rres_zig_core::BindgenError {
    fn from(error: ConfigError) -> Self {
        rres_zig_core::BindgenError::configuration(error.to_string())
    }
}

/// Current layout of the configuration file
pub const CONFIG_VERSION: u32 = 1;

/// Configuration for binding generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindgenConfig {
    /// Layout version of this file
    pub config_version: u32,

    /// Export marker that tags every public function in the header
    pub api_marker: String,

    /// Generic prefix stripped from enum members after the category prefix
    pub library_prefix: String,

    /// Prefix stripped from C type names to form Zig type names
    pub type_prefix: String,

    /// Per-family member prefixes, tried in order
    pub category_prefixes: Vec<String>,

    /// Enums whose members carry no category prefix on purpose
    pub unprefixed_enums: Vec<String>,

    /// Words that cannot be used as bare Zig identifiers
    pub reserved_words: Vec<String>,

    /// Marker appended to member names that hit a reserved word
    pub keyword_suffix: String,

    /// C enums to convert, in emission order
    pub enum_names: Vec<String>,

    /// Human title used in the generated file header
    pub library_title: String,

    /// Tool name recorded in the generated file header
    pub generator_name: String,
}

impl Default for BindgenConfig {
    fn default() -> Self {
        Self {
            config_version: CONFIG_VERSION,
            api_marker: "RRESAPI".to_string(),
            library_prefix: "RRES_".to_string(),
            type_prefix: "rres".to_string(),
            category_prefixes: to_strings(&[
                "RRES_DATA_",
                "RRES_COMP_",
                "RRES_CIPHER_",
                "RRES_TEXT_ENCODING_",
                "RRES_CODE_LANG_",
                "RRES_PIXELFORMAT_",
                "RRES_VERTEX_ATTRIBUTE_",
                "RRES_VERTEX_FORMAT_",
                "RRES_FONT_STYLE_",
            ]),
            unprefixed_enums: to_strings(&["rresErrorType"]),
            reserved_words: default_reserved_words(),
            keyword_suffix: "_".to_string(),
            enum_names: to_strings(&[
                "rresResourceDataType",
                "rresCompressionType",
                "rresEncryptionType",
                "rresErrorType",
                "rresTextEncoding",
                "rresCodeLang",
                "rresPixelFormat",
                "rresVertexAttribute",
                "rresVertexFormat",
                "rresFontStyle",
            ]),
            library_title: "rres (raylib resource format)".to_string(),
            generator_name: "rres-zig-bindgen".to_string(),
        }
    }
}

impl BindgenConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file {:?}: {}", path.as_ref(), e)))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.config_version != CONFIG_VERSION {
            return Err(ConfigError::InvalidValue(format!(
                "Unsupported config_version {} (expected {})",
                self.config_version, CONFIG_VERSION
            )));
        }

        if !is_identifier(&self.api_marker) {
            return Err(ConfigError::InvalidValue(format!(
                "api_marker must be an identifier, got '{}'",
                self.api_marker
            )));
        }

        for prefix in std::iter::once(&self.library_prefix)
            .chain(std::iter::once(&self.type_prefix))
            .chain(self.category_prefixes.iter())
        {
            if !prefix.is_empty() && !is_identifier(prefix) {
                return Err(ConfigError::InvalidValue(format!(
                    "Prefix '{}' contains characters that cannot appear in an identifier",
                    prefix
                )));
            }
        }

        if self.keyword_suffix.is_empty()
            || !self.keyword_suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::InvalidValue(format!(
                "keyword_suffix must be non-empty identifier characters, got '{}'",
                self.keyword_suffix
            )));
        }

        if self.enum_names.is_empty() {
            return Err(ConfigError::InvalidValue(
                "enum_names cannot be empty".to_string()
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.enum_names {
            if !is_identifier(name) {
                return Err(ConfigError::InvalidValue(format!(
                    "Enum name '{}' is not an identifier",
                    name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "Enum name '{}' is listed twice",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Zig keywords plus the primitive names that cannot be redeclared
fn default_reserved_words() -> Vec<String> {
    to_strings(&[
        "addrspace", "align", "allowzero", "and", "anyframe", "anytype", "asm",
        "async", "await", "break", "callconv", "catch", "comptime", "const",
        "continue", "defer", "else", "enum", "errdefer", "error", "export",
        "extern", "fn", "for", "if", "inline", "linksection", "noalias",
        "noinline", "nosuspend", "opaque", "or", "orelse", "packed", "pub",
        "resume", "return", "struct", "suspend", "switch", "test",
        "threadlocal", "try", "union", "unreachable", "usingnamespace", "var",
        "volatile", "while",
        "null", "undefined", "true", "false", "type", "void", "bool",
        "noreturn", "anyerror", "anyopaque",
    ])
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

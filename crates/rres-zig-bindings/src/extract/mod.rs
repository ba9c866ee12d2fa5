//! Pattern-based extraction of declarations from C header text
//!
//! Each construct has its own matcher that runs over the raw text; there is
//! no shared syntax tree. Misses are soft: an absent enum is `None`, a bad
//! parameter fragment is recorded on its function.

pub mod enums;
pub mod functions;
pub mod structs;

use anyhow::Result;

use crate::config::BindgenConfig;
use crate::header::HeaderInfo;
use crate::naming::NameRules;

pub use enums::EnumExtractor;
pub use functions::FunctionExtractor;
pub use structs::StructExtractor;

/// Runs every extractor over one header snapshot
pub struct HeaderParser {
    enum_names: Vec<String>,
    enums: EnumExtractor,
    structs: StructExtractor,
    functions: FunctionExtractor,
}

impl HeaderParser {
    pub fn new(config: &BindgenConfig) -> Result<Self> {
        Ok(Self {
            enum_names: config.enum_names.clone(),
            enums: EnumExtractor::new(NameRules::from_config(config))?,
            structs: StructExtractor::new()?,
            functions: FunctionExtractor::new(&config.api_marker)?,
        })
    }

    /// Extract the configured enums, all structs and all API functions
    pub fn parse(&self, header_text: &str) -> Result<HeaderInfo> {
        let mut info = HeaderInfo::default();

        for enum_name in &self.enum_names {
            match self.enums.extract(header_text, enum_name)? {
                Some(definition) => {
                    log::debug!("Enum {} → {} ({} members)", enum_name, definition.target_name, definition.members.len());
                    info.enums.push(definition);
                }
                None => info.missing_enums.push(enum_name.clone()),
            }
        }

        info.structs = self.structs.extract(header_text);
        info.functions = self.functions.extract(header_text);

        log::info!(
            "Extracted {} enums, {} structs, {} functions",
            info.enums.len(),
            info.structs.len(),
            info.functions.len()
        );

        Ok(info)
    }
}

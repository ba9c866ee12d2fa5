//! API function extraction
//!
//! Matches `MARKER <return type> <name>(<params>);` and splits the parameter
//! list on commas. Each fragment is split right-to-left: the last word is the
//! name, everything before it (qualifiers and pointer markers) is the type.
//! Fragments that do not have that shape (`...`, arrays, lone types) are kept
//! in `skipped_parameters` instead of aborting the run.

use anyhow::Result;
use regex::Regex;

use crate::header::{FunctionSignature, ParameterInfo};

/// Extracts marker-tagged function declarations
pub struct FunctionExtractor {
    function_regex: Regex,
    parameter_regex: Regex,
}

impl FunctionExtractor {
    pub fn new(api_marker: &str) -> Result<Self> {
        Ok(Self {
            function_regex: Regex::new(&format!(
                r"\b{}\s+([\w\s\*]+?)\s*\b([A-Za-z_]\w*)\s*\(([^)]*)\)\s*;",
                regex::escape(api_marker)
            ))?,
            parameter_regex: Regex::new(r"^(.+?)\s*(\**)\s*\b([A-Za-z_]\w*)$")?,
        })
    }

    /// Function signatures in declaration order
    pub fn extract(&self, header_text: &str) -> Vec<FunctionSignature> {
        let mut functions = Vec::new();

        for caps in self.function_regex.captures_iter(header_text) {
            let return_type = normalize_whitespace(&caps[1]);
            let name = caps[2].to_string();
            let raw_parameters = caps[3].to_string();

            let (parameters, skipped_parameters) = self.parse_parameters(&raw_parameters);
            for fragment in &skipped_parameters {
                log::warn!("{}: dropped parameter fragment '{}'", name, fragment);
            }

            log::debug!("Found function {} returning '{}' with {} parameter(s)", name, return_type, parameters.len());

            functions.push(FunctionSignature {
                name,
                return_type,
                raw_parameters,
                parameters,
                skipped_parameters,
            });
        }

        functions
    }

    /// Split a raw parameter list into parsed parameters and dropped fragments
    pub fn parse_parameters(&self, raw_parameters: &str) -> (Vec<ParameterInfo>, Vec<String>) {
        let mut parameters = Vec::new();
        let mut skipped = Vec::new();

        let trimmed = raw_parameters.trim();
        if trimmed.is_empty() || trimmed == "void" {
            return (parameters, skipped);
        }

        for fragment in trimmed.split(',') {
            let fragment = normalize_whitespace(fragment);
            if fragment.is_empty() {
                continue;
            }

            match self.parameter_regex.captures(&fragment) {
                Some(caps) => {
                    let declared_type = format!("{} {}", caps[1].trim(), &caps[2])
                        .trim()
                        .to_string();
                    let pointer_depth = declared_type.matches('*').count();
                    parameters.push(ParameterInfo {
                        declared_type,
                        pointer_depth,
                        name: caps[3].to_string(),
                    });
                }
                None => skipped.push(fragment),
            }
        }

        (parameters, skipped)
    }
}

/// Collapse runs of whitespace (including line breaks) into single spaces
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FunctionExtractor {
        FunctionExtractor::new("RRESAPI").expect("regexes compile")
    }

    #[test]
    fn test_basic_declarations() {
        let header = r#"
RRESAPI rresResourceChunk rresLoadResourceChunk(const char *fileName, int rresId);
RRESAPI void rresUnloadResourceChunk(rresResourceChunk chunk);
RRESAPI unsigned int rresGetCRC32(unsigned char *data, int len);
"#;
        let functions = extractor().extract(header);
        let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["rresLoadResourceChunk", "rresUnloadResourceChunk", "rresGetCRC32"]);

        let load = &functions[0];
        assert_eq!(load.return_type, "rresResourceChunk");
        assert_eq!(load.parameters[0].declared_type, "const char *");
        assert_eq!(load.parameters[0].pointer_depth, 1);
        assert_eq!(load.parameters[0].name, "fileName");
        assert_eq!(load.parameters[1].declared_type, "int");

        assert_eq!(functions[2].return_type, "unsigned int");
        assert_eq!(functions[2].parameters[0].declared_type, "unsigned char *");
    }

    #[test]
    fn test_void_and_empty_parameter_lists() {
        let header = "RRESAPI void rresSetCipherPassword(void);\nRRESAPI const char *rresGetCipherPassword();";
        let functions = extractor().extract(header);

        assert_eq!(functions.len(), 2);
        assert!(functions[0].parameters.is_empty());
        assert_eq!(functions[0].raw_parameters, "void");
        assert!(functions[1].parameters.is_empty());
        assert_eq!(functions[1].return_type, "const char *");
        assert_eq!(functions[1].name, "rresGetCipherPassword");
    }

    #[test]
    fn test_pointer_markers_attached_to_type() {
        let (params, skipped) = extractor().parse_parameters("char* name, char **names, int*count");
        assert!(skipped.is_empty());
        assert_eq!(params[0].declared_type, "char *");
        assert_eq!(params[1].declared_type, "char **");
        assert_eq!(params[1].pointer_depth, 2);
        assert_eq!(params[2].declared_type, "int *");
        assert_eq!(params[2].name, "count");
    }

    #[test]
    fn test_malformed_fragments_are_dropped() {
        let header = "RRESAPI int rresLog(const char *text, ...);\nRRESAPI void rresFill(int values[4], int count);";
        let functions = extractor().extract(header);

        assert_eq!(functions[0].parameters.len(), 1);
        assert_eq!(functions[0].skipped_parameters, vec!["..."]);
        assert_eq!(functions[1].parameters.len(), 1);
        assert_eq!(functions[1].parameters[0].name, "count");
        assert_eq!(functions[1].skipped_parameters, vec!["int values[4]"]);
    }

    #[test]
    fn test_lone_type_is_not_split_into_name() {
        let (params, skipped) = extractor().parse_parameters("unsigned");
        assert!(params.is_empty());
        assert_eq!(skipped, vec!["unsigned"]);
    }

    #[test]
    fn test_multiline_parameter_list() {
        let header = "RRESAPI int rresLoadDir(const char *dirPath,\n                        unsigned int   flags);";
        let functions = extractor().extract(header);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].parameters[1].declared_type, "unsigned int");
        assert_eq!(functions[0].parameters[1].name, "flags");
    }

    #[test]
    fn test_marker_definitions_are_not_functions() {
        let header = r#"
#if defined(_WIN32) && defined(BUILD_LIBTYPE_SHARED)
    #define RRESAPI __declspec(dllexport)     // We are building the library as a Win32 shared library (.dll)
#else
    #define RRESAPI       // Functions defined as 'extern' by default (implicit specifiers)
#endif
"#;
        assert!(extractor().extract(header).is_empty());
    }

    #[test]
    fn test_untagged_functions_are_ignored() {
        let header = "static int rresHelper(int x);\nint rresOther(void);";
        assert!(extractor().extract(header).is_empty());
    }
}

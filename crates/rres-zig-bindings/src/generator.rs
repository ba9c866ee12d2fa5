//! Binding generation pipeline
//!
//! Header text goes through the extractors once, the enum name map is built
//! from whatever enums were found, functions are classified against it, and
//! the emitter renders the whole module into one string.

use anyhow::Result;
use std::collections::HashSet;

use rres_zig_core::{DroppedParameter, GenerationReport, MemberCollision, UnstrippedMember};

use crate::classifier::classify;
use crate::config::BindgenConfig;
use crate::emitter::ZigEmitter;
use crate::extract::HeaderParser;
use crate::header::HeaderInfo;
use crate::naming::PrefixMatch;

/// Result of one generation run
#[derive(Debug, Clone)]
pub struct GeneratedBindings {
    pub source: String,
    pub report: GenerationReport,
}

/// Generates the Zig module from rres header text
pub struct BindingGenerator {
    config: BindgenConfig,
    parser: HeaderParser,
    emitter: ZigEmitter,
}

impl BindingGenerator {
    /// Create a generator with the default rres configuration
    pub fn new() -> Result<Self> {
        Self::with_config(BindgenConfig::default())
    }

    /// Create a generator with a custom configuration
    pub fn with_config(config: BindgenConfig) -> Result<Self> {
        let parser = HeaderParser::new(&config)?;
        let emitter = ZigEmitter::new(&config);
        Ok(Self {
            config,
            parser,
            emitter,
        })
    }

    /// Generate the complete Zig module for `header_text`
    pub fn generate(&self, header_text: &str) -> Result<GeneratedBindings> {
        log::info!("Starting binding generation ({} bytes of header text)", header_text.len());

        let header = self.parser.parse(header_text)?;
        let (source, report) = self.render(&header);

        log::info!("Generation finished: {}", report.summary());
        Ok(GeneratedBindings { source, report })
    }

    /// Render already extracted declarations
    pub fn render(&self, header: &HeaderInfo) -> (String, GenerationReport) {
        let mut report = GenerationReport::new();

        let enum_map = header.enum_name_map();
        let enum_source_names: HashSet<String> = enum_map.keys().cloned().collect();

        for definition in &header.enums {
            for (member, value) in definition.duplicate_values() {
                log::warn!(
                    "{}: member '{}' repeats value {}; Zig enums require unique values",
                    definition.source_name, member, value
                );
            }
        }

        let (structs, duplicate_structs) = dedup_preserving_order(&header.structs);
        let classification = classify(&header.functions, &enum_source_names);

        let mut output = String::new();

        output.push_str(&self.emitter.render_header());
        output.push('\n');
        output.push_str(&self.emitter.render_preamble());
        output.push('\n');

        output.push_str("// Types\n");
        for name in &structs {
            output.push_str(&self.emitter.render_direct_export(name));
            output.push('\n');
        }
        output.push('\n');

        output.push_str("// Enums - Type-safe Zig wrappers with automatic conversion\n");
        for definition in &header.enums {
            output.push_str(&self.emitter.render_enum(definition));
            output.push_str("\n\n");
        }

        output.push_str("// Raw C enums (for direct C interop if needed)\n");
        for definition in &header.enums {
            output.push_str(&self.emitter.render_direct_export(&definition.source_name));
            output.push('\n');
        }
        output.push('\n');

        output.push_str("// Functions with automatic enum conversion\n");
        for function in &classification.wrapped {
            output.push_str(&self.emitter.render_wrapper(function, &enum_map));
            output.push_str("\n\n");
        }

        output.push_str("// Functions without enum parameters (direct exports)\n");
        for function in &classification.direct {
            output.push_str(&self.emitter.render_direct_export(&function.name));
            output.push('\n');
        }
        output.push('\n');

        output.push_str(&self.emitter.render_chunk_info_accessors());
        output.push('\n');

        report.enums_generated = header.enums.len();
        report.enums_missing = header.missing_enums.clone();
        report.structs = structs.len();
        report.duplicate_structs = duplicate_structs;
        report.functions_found = header.functions.len();
        report.wrappers = classification.wrapped.len();
        report.direct_exports = classification.direct.len();
        self.record_member_issues(header, &mut report);

        for function in &header.functions {
            for fragment in &function.skipped_parameters {
                report.dropped_parameters.push(DroppedParameter {
                    function: function.name.clone(),
                    fragment: fragment.clone(),
                });
            }
        }

        (output, report)
    }

    fn record_member_issues(&self, header: &HeaderInfo, report: &mut GenerationReport) {
        for definition in &header.enums {
            let exempt = self.config.unprefixed_enums.contains(&definition.source_name);
            report.skipped_members.extend(definition.skipped_members.iter().cloned());

            for member in &definition.members {
                if member.renamed {
                    report.member_collisions.push(MemberCollision {
                        enum_name: definition.source_name.clone(),
                        source_member: member.source_name.clone(),
                        renamed_to: member.target_name.clone(),
                    });
                }

                if !exempt && member.prefix != PrefixMatch::Category {
                    report.unstripped_members.push(UnstrippedMember {
                        enum_name: definition.source_name.clone(),
                        member: member.source_name.clone(),
                    });
                }
            }
        }
    }
}

/// Keep the first occurrence of each name; return the repeats separately
fn dedup_preserving_order(names: &[String]) -> (Vec<String>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    let mut duplicates = Vec::new();

    for name in names {
        if seen.insert(name.as_str()) {
            unique.push(name.clone());
        } else {
            duplicates.push(name.clone());
        }
    }

    (unique, duplicates)
}

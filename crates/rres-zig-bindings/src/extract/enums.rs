//! Enum extraction
//!
//! Finds `typedef enum NAME { ... } NAME;` blocks and reads their members one
//! line at a time. Members are upper-case identifiers written either as
//! `IDENT = VALUE` or `IDENT,`. Any other line is a comment, blank or
//! continuation and is ignored, except an `IDENT = ...` line whose value is
//! not a plain integer literal that fits `c_uint`: that one is recorded as a
//! skipped member.

use anyhow::Result;
use regex::Regex;
use std::collections::HashSet;

use rres_zig_core::SkippedMember;

use crate::header::{EnumDefinition, EnumMember};
use crate::naming::NameRules;

/// Extracts named C enums from header text
pub struct EnumExtractor {
    rules: NameRules,
    valued_member_regex: Regex,
    bare_member_regex: Regex,
    assigned_member_regex: Regex,
}

impl EnumExtractor {
    pub fn new(rules: NameRules) -> Result<Self> {
        Ok(Self {
            rules,
            // Integer literal with optional C suffix, then a comma, a comment or the line end
            valued_member_regex: Regex::new(
                r"^\s*([A-Z_][A-Z0-9_]*)\s*=\s*(-?(?:0[xX][0-9A-Fa-f]+|[0-9]+))[uUlL]*\s*(?:,|//|/\*|$)",
            )?,
            bare_member_regex: Regex::new(r"^\s*([A-Z_][A-Z0-9_]*)\s*,")?,
            assigned_member_regex: Regex::new(r"^\s*([A-Z_][A-Z0-9_]*)\s*=")?,
        })
    }

    /// Extract the enum named `enum_name`, or `None` if it is absent or empty
    pub fn extract(&self, header_text: &str, enum_name: &str) -> Result<Option<EnumDefinition>> {
        let block_regex = Regex::new(&format!(
            r"typedef\s+enum\s+{name}\s*\{{([^}}]+)\}}\s*{name}\s*;",
            name = regex::escape(enum_name)
        ))?;

        let body = match block_regex.captures(header_text).and_then(|caps| caps.get(1)) {
            Some(body) => body.as_str(),
            None => {
                log::debug!("Enum {} not found in header", enum_name);
                return Ok(None);
            }
        };

        let mut members = Vec::new();
        let mut skipped_members = Vec::new();
        let mut taken = HashSet::new();

        for line in body.lines() {
            let (source_name, explicit_value) = if let Some(caps) = self.valued_member_regex.captures(line) {
                match parse_c_uint(&caps[2]) {
                    Some(value) => (caps[1].to_string(), Some(value)),
                    None => {
                        let reason = format!("value {} does not fit c_uint", &caps[2]);
                        log::warn!("Enum {}: {}, member {} skipped", enum_name, reason, &caps[1]);
                        skipped_members.push(skipped(enum_name, line, reason));
                        continue;
                    }
                }
            } else if let Some(caps) = self.bare_member_regex.captures(line) {
                (caps[1].to_string(), None)
            } else if let Some(caps) = self.assigned_member_regex.captures(line) {
                let reason = "value is not an integer literal".to_string();
                log::warn!("Enum {}: {}, member {} skipped", enum_name, reason, &caps[1]);
                skipped_members.push(skipped(enum_name, line, reason));
                continue;
            } else {
                continue;
            };

            let (mut target_name, prefix) = self.rules.member_name_with_match(&source_name);
            let mut renamed = false;
            while taken.contains(&target_name) {
                target_name = self.rules.disambiguate(&target_name);
                renamed = true;
            }
            taken.insert(target_name.clone());

            members.push(EnumMember {
                source_name,
                target_name,
                explicit_value,
                prefix,
                renamed,
            });
        }

        if members.is_empty() {
            log::debug!("Enum {} has no recognizable members", enum_name);
            return Ok(None);
        }

        Ok(Some(EnumDefinition {
            source_name: enum_name.to_string(),
            target_name: self.rules.target_type_name(enum_name),
            members,
            skipped_members,
        }))
    }
}

fn skipped(enum_name: &str, line: &str, reason: String) -> SkippedMember {
    SkippedMember {
        enum_name: enum_name.to_string(),
        line: line.trim().to_string(),
        reason,
    }
}

/// Parse a decimal or hex literal, keeping only values a `c_uint` can hold
fn parse_c_uint(text: &str) -> Option<i64> {
    if text.starts_with('-') {
        return None;
    }

    let value = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => text.parse::<u32>().ok()?,
    };

    Some(i64::from(value))
}

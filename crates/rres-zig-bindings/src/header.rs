//! Declarations recovered from the rres headers
//!
//! Everything here is produced once per run by the extractors and only read
//! afterwards by the classifier and the emitter.

use std::collections::HashMap;

use rres_zig_core::SkippedMember;

use crate::naming::PrefixMatch;

/// Mapping from C enum type name to Zig enum type name
pub type EnumNameMap = HashMap<String, String>;

/// A C enum with its Zig names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDefinition {
    pub source_name: String,
    pub target_name: String,
    pub members: Vec<EnumMember>,
    /// Member lines left out of `members`; later implicit values may be off
    pub skipped_members: Vec<SkippedMember>,
}

/// One member of a C enum, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub source_name: String,
    pub target_name: String,
    pub explicit_value: Option<i64>,
    pub prefix: PrefixMatch,
    /// Set when the renamed member clashed with an earlier one
    pub renamed: bool,
}

impl EnumDefinition {
    /// Values the C compiler assigns to each member
    ///
    /// An implicit member is one more than the member before it, starting at
    /// zero, so `A = 2, B, C = 10, D` resolves to `2, 3, 10, 11`.
    pub fn resolved_values(&self) -> Vec<(&str, i64)> {
        let mut next = 0i64;
        self.members
            .iter()
            .map(|member| {
                let value = member.explicit_value.unwrap_or(next);
                next = value.wrapping_add(1);
                (member.target_name.as_str(), value)
            })
            .collect()
    }

    /// Members that share a value with an earlier member
    ///
    /// Zig enums reject duplicate values, so these are worth a warning.
    pub fn duplicate_values(&self) -> Vec<(&str, i64)> {
        let mut seen = std::collections::HashSet::new();
        self.resolved_values()
            .into_iter()
            .filter(|(_, value)| !seen.insert(*value))
            .collect()
    }
}

/// A function parameter as written in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    /// Type including qualifiers and pointer markers, e.g. `const char *`
    pub declared_type: String,
    pub pointer_depth: usize,
    pub name: String,
}

impl ParameterInfo {
    /// Type with `const` and every pointer marker removed
    pub fn base_type(&self) -> String {
        base_type(&self.declared_type)
    }
}

/// An API function declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub return_type: String,
    pub raw_parameters: String,
    pub parameters: Vec<ParameterInfo>,
    /// Parameter fragments that did not look like `type name`
    pub skipped_parameters: Vec<String>,
}

/// Everything extracted from one header snapshot
#[derive(Debug, Clone, Default)]
pub struct HeaderInfo {
    pub enums: Vec<EnumDefinition>,
    pub missing_enums: Vec<String>,
    pub structs: Vec<String>,
    pub functions: Vec<FunctionSignature>,
}

impl HeaderInfo {
    /// Build the C-to-Zig enum name map from the extracted enums
    pub fn enum_name_map(&self) -> EnumNameMap {
        self.enums
            .iter()
            .map(|e| (e.source_name.clone(), e.target_name.clone()))
            .collect()
    }
}

/// Strip `const` and pointer markers from a C type
pub fn base_type(c_type: &str) -> String {
    c_type
        .split(|c: char| c.is_whitespace() || c == '*')
        .filter(|token| !token.is_empty() && *token != "const")
        .collect::<Vec<_>>()
        .join(" ")
}

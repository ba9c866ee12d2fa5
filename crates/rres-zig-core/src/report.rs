//! Generation report for a single binding run
//!
//! Every soft miss the extractors produce lands here so a header drift shows
//! up as a count instead of silently shrinking the generated file.

use serde::{Deserialize, Serialize};

/// Summary of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Converting enums emitted
    pub enums_generated: usize,
    /// Configured enum names that were not found (or had no members)
    pub enums_missing: Vec<String>,
    /// Unique struct aliases emitted
    pub structs: usize,
    /// Struct names seen more than once in the header text
    pub duplicate_structs: Vec<String>,
    /// API functions recovered from the header text
    pub functions_found: usize,
    /// Functions that got an enum-converting wrapper
    pub wrappers: usize,
    /// Functions re-exported unchanged
    pub direct_exports: usize,
    /// Parameter fragments that did not match the expected shape
    pub dropped_parameters: Vec<DroppedParameter>,
    /// Enum member lines that were recognised but could not be emitted
    pub skipped_members: Vec<SkippedMember>,
    /// Enum members that only lost the generic library prefix
    pub unstripped_members: Vec<UnstrippedMember>,
    /// Member names that collided after renaming and had to be disambiguated
    pub member_collisions: Vec<MemberCollision>,
}

/// A parameter fragment dropped by the function extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedParameter {
    pub function: String,
    pub fragment: String,
}

/// An enum member line that looked like an assignment but was not usable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedMember {
    pub enum_name: String,
    pub line: String,
    pub reason: String,
}

/// An enum member that matched no category prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnstrippedMember {
    pub enum_name: String,
    pub member: String,
}

/// A renamed member that clashed with an earlier member of the same enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCollision {
    pub enum_name: String,
    pub source_member: String,
    pub renamed_to: String,
}

impl GenerationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items that were skipped or could not be represented
    ///
    /// Unstripped members are review flags, not skips, and are not counted.
    pub fn skipped_count(&self) -> usize {
        self.enums_missing.len()
            + self.duplicate_structs.len()
            + self.dropped_parameters.len()
            + self.skipped_members.len()
            + self.member_collisions.len()
    }

    /// Whether the run recovered everything it looked for
    pub fn is_clean(&self) -> bool {
        self.skipped_count() == 0 && self.unstripped_members.is_empty()
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{} enums ({} missing), {} structs, {} functions ({} wrapped, {} direct), {} skipped item(s), {} unstripped member(s)",
            self.enums_generated,
            self.enums_missing.len(),
            self.structs,
            self.functions_found,
            self.wrappers,
            self.direct_exports,
            self.skipped_count(),
            self.unstripped_members.len(),
        )
    }

    /// Render the report as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Log every soft miss at warn level
    pub fn log_misses(&self) {
        for name in &self.enums_missing {
            log::warn!("Enum not generated: {}", name);
        }
        for name in &self.duplicate_structs {
            log::warn!("Duplicate struct declaration skipped: {}", name);
        }
        for dropped in &self.dropped_parameters {
            log::warn!("Dropped parameter '{}' in {}", dropped.fragment, dropped.function);
        }
        for skipped in &self.skipped_members {
            log::warn!("Skipped member of {} ({}): {}", skipped.enum_name, skipped.reason, skipped.line);
        }
        for collision in &self.member_collisions {
            log::warn!(
                "Member {} of {} renamed to '{}' to avoid a collision",
                collision.source_member,
                collision.enum_name,
                collision.renamed_to
            );
        }
        for member in &self.unstripped_members {
            log::warn!(
                "Member {} of {} matched no category prefix; review the prefix configuration",
                member.member,
                member.enum_name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_clean() {
        let report = GenerationReport::new();
        assert!(report.is_clean());
        assert_eq!(report.skipped_count(), 0);
    }

    #[test]
    fn test_skipped_count_ignores_unstripped_members() {
        let mut report = GenerationReport::new();
        report.enums_missing.push("rresFontStyle".to_string());
        report.dropped_parameters.push(DroppedParameter {
            function: "rresLoadFoo".to_string(),
            fragment: "...".to_string(),
        });
        report.unstripped_members.push(UnstrippedMember {
            enum_name: "rresErrorType".to_string(),
            member: "RRES_SUCCESS".to_string(),
        });

        assert_eq!(report.skipped_count(), 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_skipped_members_count_as_skips() {
        let mut report = GenerationReport::new();
        report.skipped_members.push(SkippedMember {
            enum_name: "rresCompressionType".to_string(),
            line: "RRES_COMP_MAX = -1,".to_string(),
            reason: "value -1 does not fit c_uint".to_string(),
        });

        assert_eq!(report.skipped_count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut report = GenerationReport::new();
        report.enums_generated = 2;
        report.wrappers = 1;

        let json = report.to_json().expect("report should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

        assert_eq!(value["enums_generated"], 2);
        assert_eq!(value["wrappers"], 1);
        assert!(value["dropped_parameters"].as_array().map_or(false, |a| a.is_empty()));
    }

    #[test]
    fn test_summary_mentions_counts() {
        let mut report = GenerationReport::new();
        report.functions_found = 5;
        report.wrappers = 2;
        report.direct_exports = 3;

        let summary = report.summary();
        assert!(summary.contains("5 functions (2 wrapped, 3 direct)"));
    }
}

//! Decides which functions need an enum-converting wrapper
//!
//! Only a signature that crosses an enum boundary needs adapting; everything
//! else is re-exported as a plain alias.

use std::collections::HashSet;

use crate::header::FunctionSignature;

/// How a function is exposed in the generated module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    Wrapper,
    DirectExport,
}

/// Whether `signature` returns or takes a known enum
///
/// The return type is compared exactly. Parameter types are compared after
/// removing `const` and pointer markers.
pub fn needs_wrapper(signature: &FunctionSignature, enum_source_names: &HashSet<String>) -> bool {
    if enum_source_names.contains(&signature.return_type) {
        return true;
    }

    signature
        .parameters
        .iter()
        .any(|param| enum_source_names.contains(&param.base_type()))
}

/// Functions split by exposure, each list in declaration order
#[derive(Debug, Default)]
pub struct Classification<'a> {
    pub wrapped: Vec<&'a FunctionSignature>,
    pub direct: Vec<&'a FunctionSignature>,
}

/// Classify every function against the known enum names
pub fn classify<'a>(
    functions: &'a [FunctionSignature],
    enum_source_names: &HashSet<String>,
) -> Classification<'a> {
    let mut classification = Classification::default();

    for function in functions {
        match exposure(function, enum_source_names) {
            Exposure::Wrapper => classification.wrapped.push(function),
            Exposure::DirectExport => classification.direct.push(function),
        }
    }

    classification
}

pub fn exposure(signature: &FunctionSignature, enum_source_names: &HashSet<String>) -> Exposure {
    if needs_wrapper(signature, enum_source_names) {
        log::debug!("{} needs an enum wrapper", signature.name);
        Exposure::Wrapper
    } else {
        Exposure::DirectExport
    }
}

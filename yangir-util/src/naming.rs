//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeSet;

use check_keyword::CheckKeyword;
use convert_case::{Boundary, Case, Casing};
use itertools::Itertools;
use yangir_schema::{CAMEL_CASE_EXTENSION, Entry};

use crate::yang::{is_choice_or_case, is_oc_compressed_valid_element};

/// Converts a YANG identifier to a PascalCase code-name. Word boundaries are
/// inferred so that existing capitalisation survives (`thE` becomes `ThE`,
/// not `The`).
pub fn camel_case(name: &str) -> String {
    name.to_case(Case::Pascal)
}

/// Converts a YANG identifier to a snake_case identifier, keeping digits
/// glued to the preceding word (`ipv4` stays `ipv4`). Reserved words are
/// made safe for identifier positions.
pub fn snake_case(name: &str) -> String {
    name.from_case(Case::Kebab)
        .without_boundaries(&[Boundary::UpperDigit, Boundary::LowerDigit])
        .to_case(Case::Snake)
        .into_safe()
}

/// PascalCase code-name of an entry, honoring the camel-case-name extension
/// override when the model carries one.
pub fn entry_camel_case(entry: Entry<'_>) -> String {
    match entry.extension(CAMEL_CASE_EXTENSION) {
        Some(name) => name.to_owned(),
        None => camel_case(entry.name()),
    }
}

/// Code-name built from the path elements of an entry. With compression the
/// elements are those surviving compression; without it every non-choice,
/// non-case element contributes, module root included.
pub fn path_camel_case_name(entry: Entry<'_>, compress: bool) -> String {
    if entry.is_fake_root() {
        return entry_camel_case(entry);
    }
    let mut elements = Vec::new();
    let mut current = Some(entry);
    while let Some(e) = current {
        let keep = if compress {
            is_oc_compressed_valid_element(e)
        } else {
            !is_choice_or_case(e)
        };
        if keep {
            elements.push(e);
        }
        current = e.parent();
    }
    elements.iter().rev().map(|e| entry_camel_case(*e)).join("_")
}

/// Registry of names already assigned within one namespace. Names become
/// permanent members on first use; collisions are resolved by suffixing.
#[derive(Clone, Debug, Default)]
pub struct DefinedNames {
    names: BTreeSet<String>,
}

// ===== impl DefinedNames =====

impl DefinedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Marks a name as taken without uniquification.
    pub fn insert(&mut self, name: &str) {
        self.names.insert(name.to_owned());
    }

    /// Returns `proposed` if still free, otherwise the first fresh name
    /// obtained by appending `suffix`. The returned name is registered.
    pub fn unique(&mut self, proposed: &str, suffix: &str) -> String {
        let mut name = proposed.to_owned();
        while !self.names.insert(name.clone()) {
            name.push_str(suffix);
        }
        name
    }
}

// ===== tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("base-module"), "BaseModule");
        assert_eq!(camel_case("enumeration-leaf"), "EnumerationLeaf");
        assert_eq!(camel_case("th-e"), "ThE");
        assert_eq!(camel_case("thE"), "ThE");
        assert_eq!(camel_case("mtu"), "Mtu");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("admin-status"), "admin_status");
        assert_eq!(snake_case("ipv4"), "ipv4");
        assert_eq!(snake_case("type"), "r#type");
    }

    #[test]
    fn test_defined_names() {
        let mut names = DefinedNames::new();
        assert_eq!(names.unique("ThE", "_"), "ThE");
        assert_eq!(names.unique("ThE", "_"), "ThE_");
        assert_eq!(names.unique("ThE", "_"), "ThE__");
        assert_eq!(names.unique("Other", "_"), "Other");
    }
}

//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};
use yangir_schema::Entry;

/// How `config`/`state` subtrees are folded into generated directories.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum CompressBehaviour {
    Uncompressed,
    #[default]
    PreferIntendedConfig,
    PreferOperationalState,
    ExcludeDerivedState,
    UncompressedExcludeDerivedState,
}

// ===== impl CompressBehaviour =====

impl CompressBehaviour {
    /// Whether config/state and surrounding-container compression applies.
    pub fn compress_enabled(&self) -> bool {
        matches!(
            self,
            CompressBehaviour::PreferIntendedConfig
                | CompressBehaviour::PreferOperationalState
                | CompressBehaviour::ExcludeDerivedState
        )
    }

    /// Whether read-only (`config false`) subtrees are dropped entirely.
    pub fn state_excluded(&self) -> bool {
        matches!(
            self,
            CompressBehaviour::ExcludeDerivedState
                | CompressBehaviour::UncompressedExcludeDerivedState
        )
    }

    /// Whether the `state` twin wins over `config` when both exist.
    pub fn prefer_operational_state(&self) -> bool {
        matches!(self, CompressBehaviour::PreferOperationalState)
    }
}

// ===== global functions =====

/// A `config` or `state` wrapper container.
pub fn is_config_state(entry: Entry<'_>) -> bool {
    entry.is_directory() && matches!(entry.name(), "config" | "state")
}

pub fn is_choice_or_case(entry: Entry<'_>) -> bool {
    entry.is_choice() || entry.is_case()
}

/// The top of a tree: an entry without a parent, or the synthetic root.
pub fn is_root(entry: Entry<'_>) -> bool {
    entry.is_root() || entry.is_fake_root()
}

/// The single directory child of an entry, if it has exactly one child.
pub fn only_child(entry: Entry<'_>) -> Option<Entry<'_>> {
    let mut children = entry.children();
    let child = children.next()?;
    if children.next().is_some() {
        return None;
    }
    child.is_directory().then_some(child)
}

pub fn has_only_child(entry: Entry<'_>) -> bool {
    only_child(entry).is_some()
}

/// Whether an entry contributes a path element after compression.
/// Surrounding containers of lists, module-level roots, config/state
/// wrappers and choice/case nodes are all elided.
pub fn is_oc_compressed_valid_element(entry: Entry<'_>) -> bool {
    if let Some(child) = only_child(entry)
        && child.is_list()
    {
        return false;
    }
    if is_root(entry) {
        return false;
    }
    if is_config_state(entry) {
        return false;
    }
    if is_choice_or_case(entry) {
        return false;
    }
    true
}

/// Path segments below the module that survive compression. Used for enum
/// value prefixes and union type names.
pub fn compressed_path_segments(entry: Entry<'_>) -> Vec<String> {
    let mut segments: Vec<_> = entry
        .ancestors()
        .filter(|e| is_oc_compressed_valid_element(*e))
        .map(|e| e.name().to_owned())
        .collect();
    segments.reverse();
    segments.push(entry.name().to_owned());
    segments
}

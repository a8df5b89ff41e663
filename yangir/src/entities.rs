//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use tracing::debug;
use yangir_schema::{Entry, EntryId, ParsedSchema, TypeKind, YangType};
use yangir_util::yang::{
    CompressBehaviour, compressed_path_segments,
    is_oc_compressed_valid_element,
};

use crate::IrOptions;

/// Annotation stamped on every enumeration candidate: the compressed path
/// segments below the module, used as the value prefix of generated
/// enumerations.
pub const VALUE_PREFIX_ANNOTATION: &str = "value-prefix";

/// The two partitions produced by the entity walk, keyed by absolute
/// schema path.
#[derive(Debug, Default)]
pub struct MappableEntities {
    pub directories: BTreeMap<String, EntryId>,
    pub enums: BTreeMap<String, EntryId>,
}

// ===== global functions =====

/// Walks every entry under the module roots (and the fake root, when one
/// exists), partitioning entries into directory candidates and enumeration
/// candidates. Choice and case nodes are transparent; their children are
/// attributed to the enclosing directory. Modules named in the exclusion
/// list are not walked at all.
pub fn find_mappable_entities(
    schema: &mut ParsedSchema,
    fake_root: Option<EntryId>,
    opts: &IrOptions,
) -> MappableEntities {
    let mut entities = MappableEntities::default();
    let mut value_prefixes = Vec::new();
    let behaviour = opts.compress_behaviour;

    if let Some(fake_root) = fake_root {
        let path = schema.entry(fake_root).path();
        entities.directories.insert(path, fake_root);
    }

    for root in schema.root_ids().to_vec() {
        let entry = schema.entry(root);
        if entry.is_fake_root() {
            continue;
        }
        if opts.exclude_modules.iter().any(|m| m == entry.name()) {
            debug!(module = %entry.name(), "skipping excluded module");
            continue;
        }
        for child in entry.children() {
            find_in_entry(
                child,
                behaviour,
                &mut entities,
                &mut value_prefixes,
            );
        }
    }

    // Stamp the value-prefix annotation outside the borrowed walk.
    for (id, prefix) in value_prefixes {
        schema.set_annotation(id, VALUE_PREFIX_ANNOTATION, prefix.into());
    }

    entities
}

fn find_in_entry(
    entry: Entry<'_>,
    behaviour: CompressBehaviour,
    entities: &mut MappableEntities,
    value_prefixes: &mut Vec<(EntryId, Vec<String>)>,
) {
    let compress = behaviour.compress_enabled();

    // Read-only subtrees generate nothing when derived state is excluded.
    if behaviour.state_excluded() && !entry.config() {
        return;
    }

    if entry.is_leaf() || entry.is_leaf_list() {
        if entry.typ().is_some_and(is_enumerated_type) {
            entities.enums.insert(entry.path(), entry.id());
            value_prefixes
                .push((entry.id(), compressed_path_segments(entry)));
        }
        return;
    }

    if entry.is_directory() {
        // Lists always map; containers map when they have children and
        // survive compression.
        if entry.is_list()
            || (entry.children().next().is_some()
                && (!compress || is_oc_compressed_valid_element(entry)))
        {
            entities.directories.insert(entry.path(), entry.id());
        }
    } else if !entry.is_choice() && !entry.is_case() {
        // anydata maps to a field of its parent only.
        return;
    }

    for child in entry.children() {
        find_in_entry(child, behaviour, entities, value_prefixes);
    }
}

/// Whether a type maps to a generated enumeration: an enumeration, an
/// identityref, or a union transitively containing one of those.
pub fn is_enumerated_type(typ: &YangType) -> bool {
    match typ.kind {
        TypeKind::Enumeration | TypeKind::Identityref => true,
        TypeKind::Union => typ.union_types.iter().any(is_enumerated_type),
        _ => false,
    }
}

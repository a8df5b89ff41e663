//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod directory;
pub mod entities;
pub mod enumset;
pub mod error;
pub mod ir;
pub mod langmap;
pub mod schematree;
pub mod serde;

use std::rc::Rc;

use yangir_schema::{EntryId, ParsedSchema};

use crate::directory::build_directories;
use crate::entities::find_mappable_entities;
use crate::enumset::find_enum_set;
use crate::error::Errors;
use crate::ir::Ir;
use crate::langmap::LangMapper;
use crate::schematree::SchemaTree;

pub use yangir_util::yang::CompressBehaviour;

/// The option bundle controlling one IR generation run.
#[derive(Clone, Debug)]
pub struct IrOptions {
    pub compress_behaviour: CompressBehaviour,
    // Insert a synthetic root collecting all surviving top-level entries.
    pub generate_fake_root: bool,
    pub fake_root_name: String,
    pub skip_enum_dedup: bool,
    // Drop the defining-module prefix from inline enum names.
    pub shorten_enum_leaf_names: bool,
    pub use_defining_module_for_typedef_enum_names: bool,
    // Module-name prefixes stripped before camelisation.
    pub enum_org_prefixes_to_trim: Vec<String>,
    pub enumerations_use_underscores: bool,
    pub append_enum_suffix_for_simple_union_enums: bool,
    // Modules skipped entirely.
    pub exclude_modules: Vec<String>,
}

impl Default for IrOptions {
    fn default() -> Self {
        IrOptions {
            compress_behaviour: CompressBehaviour::default(),
            generate_fake_root: false,
            fake_root_name: "device".to_owned(),
            skip_enum_dedup: false,
            shorten_enum_leaf_names: false,
            use_defining_module_for_typedef_enum_names: false,
            enum_org_prefixes_to_trim: Vec::new(),
            enumerations_use_underscores: true,
            append_enum_suffix_for_simple_union_enums: false,
            exclude_modules: Vec::new(),
        }
    }
}

// ===== global functions =====

/// Compiles a parsed schema into the intermediate representation.
///
/// The pipeline is synchronous and single-threaded: the schema tree is
/// built once, entries are partitioned into directory and enumeration
/// candidates, enumeration names are resolved in two passes against a
/// global registry, and directories are built with the language mapper
/// supplying code-names and native types. On failure every accumulated
/// error is returned and no partial IR escapes.
pub fn generate_ir(
    mut schema: ParsedSchema,
    mapper: &mut dyn LangMapper,
    opts: &IrOptions,
) -> Result<Ir, Errors> {
    let mut errors = Errors::new();

    // Synthetic root aggregating the surviving top-level entries.
    let fake_root = if opts.generate_fake_root {
        let children: Vec<EntryId> = schema
            .roots()
            .filter(|root| {
                !opts.exclude_modules.iter().any(|m| m == root.name())
            })
            .flat_map(|root| {
                root.children().map(|child| child.id()).collect::<Vec<_>>()
            })
            .collect();
        Some(schema.add_fake_root(&opts.fake_root_name, children))
    } else {
        None
    };

    // Leafref resolution index.
    let tree = match SchemaTree::build(&schema) {
        Ok(tree) => Rc::new(tree),
        Err(error) => {
            error.log();
            return Err(error.into());
        }
    };

    // Partition the tree into directory and enumeration candidates.
    let entities = find_mappable_entities(&mut schema, fake_root, opts);

    // Resolve enumeration names. These are schema-level failures; there is
    // no point naming directories against a broken enumeration set.
    let (enum_set, enums) =
        match find_enum_set(&schema, &entities.enums, opts) {
            Ok(result) => result,
            Err(errors) => {
                for error in &errors.0 {
                    error.log();
                }
                return Err(errors);
            }
        };

    mapper.set_enum_set(Rc::new(enum_set));
    mapper.set_schema_tree(tree.clone());

    // Build every directory, collecting all failures.
    let directories = match build_directories(
        &schema,
        &entities.directories,
        &tree,
        mapper,
        opts,
    ) {
        Ok(directories) => directories,
        Err(dir_errors) => {
            errors.extend(dir_errors);
            Default::default()
        }
    };

    if !errors.is_empty() {
        for error in &errors.0 {
            error.log();
        }
        return Err(errors);
    }

    let mut model_data = schema.modules().to_vec();
    model_data.sort();

    Ok(Ir {
        directories,
        enums,
        model_data,
        schema,
    })
}

//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod common;

use maplit::btreemap;
use yangir::ir::{DirectoryKind, NodeKind};
use yangir::langmap::StructLangMapper;
use yangir::{CompressBehaviour, IrOptions, generate_ir};
use yangir_schema::{ConfigValue, ParsedSchema, TypeKind, YangType};

#[test]
fn test_field_name_map() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "box");
    schema.add_leaf(container, "th-e", YangType::base(TypeKind::String));
    schema.add_leaf(container, "thE", YangType::base(TypeKind::String));

    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    let directory = &ir.directories["/base-module/box"];
    assert_eq!(
        directory.ordered_field_names(),
        vec!["th-e".to_owned(), "thE".to_owned()]
    );
    let names = directory.field_name_map(&ir.schema, &mapper).unwrap();
    assert_eq!(names, btreemap! {
        "th-e".to_owned() => "ThE".to_owned(),
        "thE".to_owned() => "ThE_".to_owned(),
    });
}

#[test]
fn test_list_keys_with_leafrefs() {
    // Key statement tokenized on arbitrary whitespace runs.
    let schema = common::interface_list_schema("name\n  type\r\n");
    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    let list = &ir.directories["/base-module/interfaces/interface"];
    assert_eq!(list.kind, DirectoryKind::List);
    assert_eq!(list.name, "Interface");
    assert_eq!(list.list_key_order, vec!["name".to_owned(), "type".to_owned()]);

    let key = &list.list_keys["name"];
    assert_eq!(key.lang_type.native_type, "String");
    assert_eq!(
        ir.schema.entry(key.key_leaf).path(),
        "/base-module/interfaces/interface/config/name"
    );

    // The surrounding container was elided.
    assert!(!ir.directories.contains_key("/base-module/interfaces"));
}

#[test]
fn test_empty_key_on_config_list() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "things");
    let list = schema.add_list(container, "thing", "");
    schema.add_leaf(list, "value", YangType::base(TypeKind::String));

    let mut mapper = StructLangMapper::new();
    let errors =
        generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap_err();
    assert!(errors.0.iter().any(|e| e.is_missing_list_key()));
}

#[test]
fn test_keyless_state_list() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "counters");
    let list = schema.add_list(container, "counter", "");
    schema.set_config(list, ConfigValue::False);
    schema.add_leaf(list, "value", YangType::base(TypeKind::Uint64));

    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();
    let list = &ir.directories["/base-module/counters/counter"];
    assert!(list.list_keys.is_empty());
    assert!(list.list_key_order.is_empty());
}

#[test]
fn test_error_aggregation() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");

    // Three independent problems.
    let broken = schema.add_container(module, "broken");
    let keyless = schema.add_list(broken, "keyless", "");
    schema.add_leaf(keyless, "value", YangType::base(TypeKind::String));
    let badkey = schema.add_list(broken, "badkey", "missing");
    schema.add_leaf(badkey, "present", YangType::base(TypeKind::String));
    let config = schema.add_container(broken, "config");
    schema.add_leaf(config, "dangling", YangType::leafref("/nowhere/at-all"));

    let mut mapper = StructLangMapper::new();
    let errors =
        generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap_err();
    assert!(errors.len() >= 3);
    assert!(errors.0.iter().any(|e| e.is_missing_list_key()));
    assert!(errors.0.iter().any(|e| e.is_unknown_list_key()));
    assert!(errors.0.iter().any(|e| e.is_unresolved_leafref()));
}

#[test]
fn test_compression_round_trip() {
    let compressed = {
        let schema = common::config_state_enum_schema();
        let mut mapper = StructLangMapper::new();
        generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap()
    };
    let uncompressed = {
        let schema = common::config_state_enum_schema();
        let mut mapper = StructLangMapper::new();
        let opts = IrOptions {
            compress_behaviour: CompressBehaviour::Uncompressed,
            ..Default::default()
        };
        generate_ir(schema, &mut mapper, &opts).unwrap()
    };

    // Fields of the compressed directory plus its shadowed fields equal
    // the union of the uncompressed config and state field sets.
    let directory = &compressed.directories["/base-module/container"];
    let mut merged: Vec<_> = directory
        .fields
        .keys()
        .chain(directory.shadowed_fields.keys())
        .cloned()
        .collect();
    merged.sort();

    let mut split: Vec<_> = uncompressed.directories
        ["/base-module/container/config"]
        .fields
        .keys()
        .chain(
            uncompressed.directories["/base-module/container/state"]
                .fields
                .keys(),
        )
        .cloned()
        .collect();
    split.sort();

    assert_eq!(merged, split);
}

#[test]
fn test_path_integrity() {
    let schema = common::interface_list_schema("name");
    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    for directory in ir.directories.values() {
        for field in directory.fields.values() {
            let mut reconstructed = directory.path.clone();
            reconstructed.extend(field.mapped_paths[0].iter().cloned());
            let absolute: Vec<String> = field.yang_details.path
                [1..]
                .split('/')
                .map(str::to_owned)
                .collect();
            assert_eq!(reconstructed, absolute);
        }
    }
}

#[test]
fn test_shadowed_mapped_paths() {
    let schema = common::config_state_enum_schema();
    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    let directory = &ir.directories["/base-module/container"];
    let field = &directory.fields["enumeration-leaf"];
    assert_eq!(field.mapped_paths, vec![vec![
        "config".to_owned(),
        "enumeration-leaf".to_owned()
    ]]);
    assert_eq!(field.shadowed_mapped_paths, vec![vec![
        "state".to_owned(),
        "enumeration-leaf".to_owned()
    ]]);
    assert_eq!(field.mapped_path_modules, vec![vec![
        "base-module".to_owned(),
        "base-module".to_owned()
    ]]);
}

#[test]
fn test_prefer_operational_state() {
    let schema = common::config_state_enum_schema();
    let mut mapper = StructLangMapper::new();
    let opts = IrOptions {
        compress_behaviour: CompressBehaviour::PreferOperationalState,
        ..Default::default()
    };
    let ir = generate_ir(schema, &mut mapper, &opts).unwrap();

    let directory = &ir.directories["/base-module/container"];
    let field = &directory.fields["enumeration-leaf"];
    assert_eq!(field.mapped_paths, vec![vec![
        "state".to_owned(),
        "enumeration-leaf".to_owned()
    ]]);
    assert_eq!(field.shadowed_mapped_paths, vec![vec![
        "config".to_owned(),
        "enumeration-leaf".to_owned()
    ]]);
}

#[test]
fn test_choice_case_transparency() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "transport");
    let choice = schema.add_choice(container, "protocol");
    let tcp = schema.add_case(choice, "tcp");
    schema.add_leaf(tcp, "tcp-port", YangType::base(TypeKind::Uint16));
    let udp = schema.add_case(choice, "udp");
    schema.add_leaf(udp, "udp-port", YangType::base(TypeKind::Uint16));

    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    let directory = &ir.directories["/base-module/transport"];
    assert!(directory.fields.contains_key("tcp-port"));
    assert!(directory.fields.contains_key("udp-port"));
    // Choice and case wrappers do not appear in mapped paths.
    assert_eq!(directory.fields["tcp-port"].mapped_paths, vec![vec![
        "tcp-port".to_owned()
    ]]);
}

#[test]
fn test_shadow_type_mismatch() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "container");
    let config = schema.add_container(container, "config");
    let state = schema.add_container(container, "state");
    schema.set_config(state, ConfigValue::False);
    schema.add_leaf(config, "mtu", YangType::base(TypeKind::Uint16));
    schema.add_leaf(state, "mtu", YangType::base(TypeKind::String));

    let mut mapper = StructLangMapper::new();
    let errors =
        generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap_err();
    assert!(errors.0.iter().any(|e| e.is_shadow_type_mismatch()));
}

#[test]
fn test_uncompressed_exclude_derived_state() {
    let schema = common::config_state_enum_schema();
    let mut mapper = StructLangMapper::new();
    let opts = IrOptions {
        compress_behaviour:
            CompressBehaviour::UncompressedExcludeDerivedState,
        ..Default::default()
    };
    let ir = generate_ir(schema, &mut mapper, &opts).unwrap();

    assert!(ir.directories.contains_key("/base-module/container/config"));
    assert!(!ir.directories.contains_key("/base-module/container/state"));
    assert_eq!(ir.enums.len(), 1);
    assert!(
        ir.enums
            .contains_key("BaseModule_Container_Config_EnumerationLeaf")
    );

    let container = &ir.directories["/base-module/container"];
    assert!(container.fields.contains_key("config"));
    assert!(!container.fields.contains_key("state"));
}

#[test]
fn test_augmented_field_modules() {
    let mut schema = common::config_state_enum_schema();
    let config = schema
        .roots()
        .next()
        .unwrap()
        .child("container")
        .unwrap()
        .child("config")
        .unwrap()
        .id();
    let grafted =
        schema.add_leaf(config, "extra", YangType::base(TypeKind::String));
    schema.set_module(grafted, "augment-module");
    let node = schema.add_ast_node("extra", "augment-module", None);
    schema.set_node(grafted, Some(node));

    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    let field = &ir.directories["/base-module/container"].fields["extra"];
    assert_eq!(field.yang_details.belonging_module, "augment-module");
    assert_eq!(field.yang_details.defining_module, "augment-module");
    assert_eq!(field.yang_details.root_element_module, "base-module");
    // The hoisted path crosses the base module's config container.
    assert_eq!(field.mapped_path_modules, vec![vec![
        "base-module".to_owned(),
        "augment-module".to_owned()
    ]]);
}

#[test]
fn test_field_descriptor_details() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "container");
    let config = schema.add_container(container, "config");
    let leaf = schema.add_leaf(config, "mtu", YangType::base(TypeKind::Uint16));
    schema.set_description(leaf, "Maximum transmission unit.");
    schema.add_default(leaf, "1500");
    let presence = schema.add_container(container, "session");
    schema.set_presence(presence, "A configured session.");
    schema.add_leaf(presence, "id", YangType::base(TypeKind::Uint32));

    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    let directory = &ir.directories["/base-module/container"];
    let mtu = &directory.fields["mtu"];
    assert_eq!(mtu.node_kind, NodeKind::Leaf);
    assert_eq!(
        mtu.yang_details.description.as_deref(),
        Some("Maximum transmission unit.")
    );
    assert_eq!(mtu.yang_details.defaults, vec!["1500".to_owned()]);
    assert_eq!(
        mtu.lang_type.as_ref().unwrap().default_value.as_deref(),
        Some("1500")
    );
    assert_eq!(mtu.yang_details.path, "/base-module/container/config/mtu");

    let session = &directory.fields["session"];
    assert_eq!(session.node_kind, NodeKind::Container);
    assert!(session.lang_type.is_none());
    assert_eq!(
        session.yang_details.presence_statement.as_deref(),
        Some("A configured session.")
    );
}

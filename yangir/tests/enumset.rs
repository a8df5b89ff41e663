//
// Copyright (c) The Yangir Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod common;

use yangir::ir::EnumeratedValueKind;
use yangir::langmap::StructLangMapper;
use yangir::{CompressBehaviour, IrOptions, generate_ir};
use yangir_schema::{
    ConfigValue, Identity, IdentityValue, ParsedSchema, TypeKind, YangType,
};

#[test]
fn test_config_state_enum_dedup() {
    let schema = common::config_state_enum_schema();
    let mut mapper = StructLangMapper::new();
    let opts = IrOptions::default();

    let ir = generate_ir(schema, &mut mapper, &opts).unwrap();

    assert_eq!(ir.enums.len(), 1);
    let enumeration = &ir.enums["BaseModule_Container_EnumerationLeaf"];
    assert_eq!(enumeration.kind, EnumeratedValueKind::Simple);
    assert_eq!(enumeration.value_prefix, vec!["container", "enumeration-leaf"]);
    assert_eq!(
        enumeration
            .values
            .iter()
            .map(|v| (v.name.as_str(), v.value))
            .collect::<Vec<_>>(),
        vec![("A", 0), ("B", 1)]
    );

    let directory = &ir.directories["/base-module/container"];
    let field = &directory.fields["enumeration-leaf"];
    let mapped = field.lang_type.as_ref().unwrap();
    assert_eq!(mapped.native_type, "BaseModule_Container_EnumerationLeaf");
    assert!(mapped.is_enumerated_value);

    // The state twin is shadowed, referencing the same enumeration.
    let shadow = &directory.shadowed_fields["enumeration-leaf"];
    assert_eq!(
        shadow.lang_type.as_ref().unwrap().native_type,
        "BaseModule_Container_EnumerationLeaf"
    );
}

#[test]
fn test_config_state_enum_uncompressed() {
    let schema = common::config_state_enum_schema();
    let mut mapper = StructLangMapper::new();
    let opts = IrOptions {
        compress_behaviour: CompressBehaviour::Uncompressed,
        ..Default::default()
    };

    let ir = generate_ir(schema, &mut mapper, &opts).unwrap();

    assert_eq!(ir.enums.len(), 2);
    assert!(
        ir.enums
            .contains_key("BaseModule_Container_Config_EnumerationLeaf")
    );
    assert!(
        ir.enums
            .contains_key("BaseModule_Container_State_EnumerationLeaf")
    );

    // Without compression the config and state containers generate their
    // own directories.
    let config = &ir.directories["/base-module/container/config"];
    assert_eq!(config.name, "BaseModule_Container_Config");
    assert_eq!(
        config.fields["enumeration-leaf"]
            .lang_type
            .as_ref()
            .unwrap()
            .native_type,
        "BaseModule_Container_Config_EnumerationLeaf"
    );
}

#[test]
fn test_grouping_instantiations_collapse() {
    // The same grouping-defined enumeration instantiated under two
    // containers shares its AST node chain and yields a single type.
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let module_node = schema.entry(module).node().unwrap().id();
    let grouping =
        schema.add_ast_node("port-settings", "base-module", Some(module_node));
    let leaf_node =
        schema.add_ast_node("port-speed", "base-module", Some(grouping));

    for container_name in ["ethernet", "fibre"] {
        let container = schema.add_container(module, container_name);
        let config = schema.add_container(container, "config");
        let leaf = schema.add_leaf(
            config,
            "port-speed",
            YangType::enumeration(["SPEED-10G", "SPEED-100G"]),
        );
        schema.set_node(leaf, Some(leaf_node));
    }

    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    assert_eq!(ir.enums.len(), 1);
    // The lexicographically first instantiation names the type.
    assert!(ir.enums.contains_key("BaseModule_Ethernet_PortSpeed"));
}

#[test]
fn test_typedef_enumeration_identity() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "container");
    let config = schema.add_container(container, "config");
    let typedef = YangType::enumeration(["A", "B"])
        .typedef("derived-enumeration", "base-module");
    schema.add_leaf(config, "leaf-one", typedef.clone());
    schema.add_leaf(config, "leaf-two", typedef);

    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    assert_eq!(ir.enums.len(), 1);
    let enumeration = &ir.enums["BaseModule_DerivedEnumeration"];
    assert_eq!(enumeration.kind, EnumeratedValueKind::Derived);
    assert_eq!(enumeration.type_name, "derived-enumeration");

    let directory = &ir.directories["/base-module/container"];
    for field in ["leaf-one", "leaf-two"] {
        assert_eq!(
            directory.fields[field].lang_type.as_ref().unwrap().native_type,
            "BaseModule_DerivedEnumeration"
        );
    }
}

#[test]
fn test_identity_collision_is_fatal() {
    let mut schema = ParsedSchema::new();
    // Two modules whose pretty names coincide.
    let m1 = common::add_module(&mut schema, "base-module");
    let m2 = common::add_module(&mut schema, "base_module");
    let i1 = schema.add_identity(Identity::new(
        "base-identity".to_owned(),
        "base-module".to_owned(),
        vec![IdentityValue::new("one".to_owned(), "base-module".to_owned())],
    ));
    let i2 = schema.add_identity(Identity::new(
        "base-identity".to_owned(),
        "base_module".to_owned(),
        vec![IdentityValue::new("two".to_owned(), "base_module".to_owned())],
    ));

    let c1 = schema.add_container(m1, "settings");
    schema.add_leaf(c1, "kind", YangType::identityref(i1));
    let c2 = schema.add_container(m2, "settings");
    schema.add_leaf(c2, "kind", YangType::identityref(i2));

    let mut mapper = StructLangMapper::new();
    let errors =
        generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap_err();
    assert!(errors.0.iter().any(|e| e.is_identity_name_conflict()));
}

#[test]
fn test_identity_enumeration() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let identity = schema.add_identity(Identity::new(
        "interface-type".to_owned(),
        "base-module".to_owned(),
        vec![
            IdentityValue::new("ethernet".to_owned(), "base-module".to_owned()),
            IdentityValue::new("loopback".to_owned(), "other-module".to_owned()),
        ],
    ));
    let container = schema.add_container(module, "container");
    let config = schema.add_container(container, "config");
    schema.add_leaf(config, "type", YangType::identityref(identity));

    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    let enumeration = &ir.enums["BaseModule_InterfaceType"];
    assert_eq!(enumeration.kind, EnumeratedValueKind::Identity);
    assert_eq!(enumeration.values.len(), 2);
    assert_eq!(
        enumeration.values[1].defining_module.as_deref(),
        Some("other-module")
    );
}

#[test]
fn test_shorten_enum_leaf_names() {
    let schema = common::config_state_enum_schema();
    let mut mapper = StructLangMapper::new();
    let opts = IrOptions {
        shorten_enum_leaf_names: true,
        ..Default::default()
    };

    let ir = generate_ir(schema, &mut mapper, &opts).unwrap();
    assert!(ir.enums.contains_key("Container_EnumerationLeaf"));
}

#[test]
fn test_enumerations_without_underscores() {
    let schema = common::config_state_enum_schema();
    let mut mapper = StructLangMapper::new();
    let opts = IrOptions {
        enumerations_use_underscores: false,
        ..Default::default()
    };

    let ir = generate_ir(schema, &mut mapper, &opts).unwrap();
    assert!(ir.enums.contains_key("BaseModuleContainerEnumerationLeaf"));
}

#[test]
fn test_enum_org_prefix_trim() {
    let schema =
        common::config_state_enum_schema_for_module("openconfig-widget");
    let mut mapper = StructLangMapper::new();
    let opts = IrOptions {
        enum_org_prefixes_to_trim: vec!["openconfig".to_owned()],
        ..Default::default()
    };

    let ir = generate_ir(schema, &mut mapper, &opts).unwrap();
    assert!(ir.enums.contains_key("Widget_Container_EnumerationLeaf"));
}

#[test]
fn test_skip_enum_dedup() {
    let schema = common::config_state_enum_schema();
    let mut mapper = StructLangMapper::new();
    let opts = IrOptions {
        skip_enum_dedup: true,
        ..Default::default()
    };

    let ir = generate_ir(schema, &mut mapper, &opts).unwrap();

    // Every instantiation generates its own type; the collision on the
    // proposed name is resolved by suffixing, config first.
    assert_eq!(ir.enums.len(), 2);
    assert!(ir.enums.contains_key("BaseModule_Container_EnumerationLeaf"));
    assert!(ir.enums.contains_key("BaseModule_Container_EnumerationLeaf_"));

    let directory = &ir.directories["/base-module/container"];
    assert_eq!(
        directory.fields["enumeration-leaf"]
            .lang_type
            .as_ref()
            .unwrap()
            .native_type,
        "BaseModule_Container_EnumerationLeaf"
    );
    assert_eq!(
        directory.shadowed_fields["enumeration-leaf"]
            .lang_type
            .as_ref()
            .unwrap()
            .native_type,
        "BaseModule_Container_EnumerationLeaf_"
    );
}

#[test]
fn test_typedef_union_single_enum() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "container");
    let config = schema.add_container(container, "config");
    let union = YangType::union(vec![YangType::enumeration(["X", "Y"])])
        .typedef("derived-union", "base-module");
    schema.add_leaf(config, "choice-leaf", union);

    let mut mapper = StructLangMapper::new();
    let opts = IrOptions {
        append_enum_suffix_for_simple_union_enums: true,
        ..Default::default()
    };
    let ir = generate_ir(schema, &mut mapper, &opts).unwrap();

    let enumeration = &ir.enums["BaseModule_DerivedUnion_Enum"];
    assert_eq!(enumeration.kind, EnumeratedValueKind::DerivedUnion);

    // A single-member union collapses to its member type.
    let directory = &ir.directories["/base-module/container"];
    let mapped =
        directory.fields["choice-leaf"].lang_type.as_ref().unwrap();
    assert_eq!(mapped.native_type, "BaseModule_DerivedUnion_Enum");
    assert!(mapped.is_enumerated_value);
}

#[test]
fn test_multiple_enums_in_named_union() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "container");
    let union = YangType::union(vec![
        YangType::enumeration(["A"]),
        YangType::enumeration(["B"]),
    ])
    .typedef("twin-union", "base-module");
    schema.add_leaf(container, "twin-leaf", union);

    let mut mapper = StructLangMapper::new();
    let errors =
        generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap_err();
    assert!(errors.0.iter().any(|e| e.is_multiple_enums_in_union()));
}

#[test]
fn test_enum_in_inline_union() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "container");
    let config = schema.add_container(container, "config");
    schema.add_leaf(
        config,
        "speed",
        YangType::union(vec![
            YangType::enumeration(["AUTO"]),
            YangType::base(TypeKind::Uint32),
        ]),
    );

    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    let enumeration = &ir.enums["BaseModule_Container_Speed"];
    assert_eq!(enumeration.kind, EnumeratedValueKind::Union);

    let directory = &ir.directories["/base-module/container"];
    let mapped = directory.fields["speed"].lang_type.as_ref().unwrap();
    assert_eq!(mapped.native_type, "Container_Speed_Union");
    assert_eq!(mapped.union_types.len(), 2);
    assert_eq!(mapped.union_types["BaseModule_Container_Speed"], 0);
    assert_eq!(mapped.union_types["u32"], 1);
}

#[test]
fn test_state_only_config_false_leaf() {
    let mut schema = ParsedSchema::new();
    let module = common::add_module(&mut schema, "base-module");
    let container = schema.add_container(module, "container");
    let state = schema.add_container(container, "state");
    schema.set_config(state, ConfigValue::False);
    schema.add_leaf(state, "oper-status", YangType::enumeration(["UP", "DOWN"]));

    let mut mapper = StructLangMapper::new();
    let opts = IrOptions {
        compress_behaviour: CompressBehaviour::ExcludeDerivedState,
        ..Default::default()
    };
    let ir = generate_ir(schema, &mut mapper, &opts).unwrap();

    // Derived state is dropped entirely: no field and no enumeration.
    let directory = &ir.directories["/base-module/container"];
    assert!(directory.fields.is_empty());
    assert!(directory.shadowed_fields.is_empty());
    assert!(ir.enums.is_empty());
}

#[test]
fn test_value_prefix_below_list() {
    let mut schema = common::interface_list_schema("name");
    let interface = schema
        .roots()
        .next()
        .unwrap()
        .child("interfaces")
        .unwrap()
        .child("interface")
        .unwrap()
        .id();
    let config = schema.entry(interface).child("config").unwrap().id();
    schema.add_leaf(
        config,
        "port-speed",
        YangType::enumeration(["SPEED-10G"]),
    );

    let mut mapper = StructLangMapper::new();
    let ir = generate_ir(schema, &mut mapper, &IrOptions::default()).unwrap();

    // The prefix keeps the list but elides its surrounding container and
    // the config wrapper.
    let enumeration = &ir.enums["BaseModule_Interface_PortSpeed"];
    assert_eq!(enumeration.value_prefix, vec!["interface", "port-speed"]);
}

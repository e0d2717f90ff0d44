//! The type catalog and the `name<sub, ...>` grammar.
#![cfg(feature = "testing")]

use cql_value_codec::testing::test_type_name_round_trip;
use cql_value_codec::{Error, TypeCode, TypeDescriptor, TypeHint, code_for, name_for};

#[test]
fn every_code_maps_to_a_name_and_back() {
    let ids = (0x0000..=0x0010).chain([0x0020, 0x0021, 0x0022]);
    for id in ids {
        let name = name_for(id).unwrap_or_else(|err| panic!("0x{id:04x} has no name: {err}"));
        assert_eq!(code_for(name).map(TypeCode::id), Ok(id), "{name}");
    }
    assert_eq!(name_for(0x0011), Err(Error::UnknownTypeCode(0x0011)));
    assert_eq!(name_for(0x0023), Err(Error::UnknownTypeCode(0x0023)));
}

#[test]
fn names_are_case_insensitive() {
    assert_eq!(code_for("INT"), Ok(TypeCode::Int));
    assert_eq!(code_for("TimeUUID"), Ok(TypeCode::Timeuuid));
    assert!(code_for("integer").is_err());
}

#[test]
fn nested_names_resolve_to_trees() {
    let parsed = TypeDescriptor::parse("map< text , list<set<int>> >").unwrap();
    assert_eq!(
        parsed,
        TypeDescriptor::map(
            TypeCode::Text,
            TypeDescriptor::list(TypeDescriptor::set(TypeCode::Int)),
        )
    );
    assert_eq!(parsed.to_string(), "map<text, list<set<int>>>");
}

#[test]
fn bare_collections_have_inferred_elements() {
    let parsed = TypeDescriptor::parse("list").unwrap();
    assert_eq!(parsed.code, TypeCode::List);
    assert!(parsed.subtypes.is_empty());
    assert_eq!(parsed.element(), None);
}

#[test]
fn malformed_names_are_rejected() {
    for name in [
        "",
        "list<",
        "list<int",
        "map<int>",
        "map<int, int, int>",
        "int<text>",
        "list<int>>",
        "list<,>",
        "frozen<int>",
        "list<int> extra",
    ] {
        assert!(
            matches!(TypeDescriptor::parse(name), Err(Error::InvalidTypeName { .. })),
            "{name:?} should not parse"
        );
    }
}

#[test]
fn hints_resolve_through_every_form() {
    let expected = TypeDescriptor::list(TypeCode::Int);
    assert_eq!(TypeHint::from("list<int>").resolve(), Ok(expected.clone()));
    assert_eq!(TypeHint::from(expected.clone()).resolve(), Ok(expected));
    assert_eq!(
        TypeHint::Code(0x0021).resolve(),
        Ok(TypeDescriptor::new(TypeCode::Map))
    );
    assert_eq!(
        TypeHint::Code(0x0050).resolve(),
        Err(Error::UnknownTypeCode(0x0050))
    );

    let lopsided = TypeDescriptor {
        code: TypeCode::Map,
        subtypes: vec![TypeDescriptor::new(TypeCode::Int)],
    };
    assert!(TypeHint::from(lopsided).resolve().is_err());
}

#[test]
fn rendered_names_parse_back() {
    for name in [
        "int",
        "string",
        "LIST<Blob>",
        "map<timeuuid,map<ascii,varint>>",
        "set",
        "not a type",
    ] {
        test_type_name_round_trip(name);
    }
}

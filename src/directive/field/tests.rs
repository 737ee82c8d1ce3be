// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for field metadata parsing.

use super::*;

fn field(ty: &str) -> FieldDecl {
    FieldDecl::new("UserName", ty)
}

#[test]
fn membership_table() {
    use Presence::{Optional, Required};

    let cases = [
        ("CU", Some(Required), Some(Required)),
        ("Cu", Some(Required), Some(Optional)),
        ("cU", Some(Optional), Some(Required)),
        ("cu", Some(Optional), Some(Optional)),
        ("C", Some(Required), None),
        ("c", Some(Optional), None),
        ("U", None, Some(Required)),
        ("u", None, Some(Optional))
    ];
    for (code, create, update) in cases {
        let membership = Membership::parse(code).unwrap();
        assert_eq!(membership.create, create, "create for {code}");
        assert_eq!(membership.update, update, "update for {code}");
    }
}

#[test]
fn membership_rejects_unknown_codes() {
    for code in ["", "X", "UC", "CC", "CUx", "Uc"] {
        assert_eq!(Membership::parse(code), None, "{code}");
    }
}

#[test]
fn field_without_params_is_dropped() {
    assert!(FieldMeta::from_decl(&field("String")).is_none());
    assert!(FieldMeta::from_decl(&field("String").tag("params", "")).is_none());
    assert!(FieldMeta::from_decl(&field("String").tag("json", "name")).is_none());
}

#[test]
fn field_with_unknown_code_is_dropped() {
    assert!(FieldMeta::from_decl(&field("String").tag("params", "Z")).is_none());
}

#[test]
fn json_key_defaults_to_lowercase_name() {
    let meta = FieldMeta::from_decl(&field("String").tag("params", "C")).unwrap();
    assert_eq!(meta.json_key, "username");

    let meta = FieldMeta::from_decl(&field("String").tag("params", "C").tag("json", "-")).unwrap();
    assert_eq!(meta.json_key, "username");

    let meta =
        FieldMeta::from_decl(&field("String").tag("params", "C").tag("json", "user_name")).unwrap();
    assert_eq!(meta.json_key, "user_name");
}

#[test]
fn kind_from_primitive() {
    let cases = [
        ("bool", FieldKind::Bool, "Bool"),
        ("i32", FieldKind::Integer, "Int64"),
        ("u8", FieldKind::Integer, "Int64"),
        ("f32", FieldKind::Number, "Float64"),
        ("String", FieldKind::String, "String"),
        ("Uuid", FieldKind::String, "String")
    ];
    for (ty, kind, extractor) in cases {
        let meta = FieldMeta::from_decl(&field(ty).tag("params", "C")).unwrap();
        assert_eq!(meta.kind, kind, "{ty}");
        assert_eq!(meta.extractor, Extractor::Direct(extractor.to_string()), "{ty}");
    }
}

#[test]
fn pt_overrides_kind_and_extractor() {
    let meta =
        FieldMeta::from_decl(&field("String").tag("params", "C").tag("pt", "integer:Int32")).unwrap();
    assert_eq!(meta.kind, FieldKind::Integer);
    assert_eq!(meta.extractor, Extractor::Direct("Int32".to_string()));
}

#[test]
fn pt_kind_only_keeps_primitive_extractor() {
    let meta = FieldMeta::from_decl(&field("i64").tag("params", "CU").tag("pt", "number")).unwrap();
    assert_eq!(meta.kind, FieldKind::Number);
    assert_eq!(meta.extractor, Extractor::Direct("Int64".to_string()));

    let meta = FieldMeta::from_decl(&field("i64").tag("params", "C").tag("pt", "file")).unwrap();
    assert_eq!(meta.kind, FieldKind::Other("file".to_string()));
    assert_eq!(meta.kind.as_str(), "file");
    assert_eq!(meta.extractor, Extractor::Direct("Int64".to_string()));
}

#[test]
fn pt_malformed_extractor_keeps_primitive_extractor() {
    let meta = FieldMeta::from_decl(&field("f64").tag("params", "C").tag("pt", "integer:")).unwrap();
    assert_eq!(meta.kind, FieldKind::Integer);
    assert_eq!(meta.extractor, Extractor::Direct("Float64".to_string()));
}

#[test]
fn pt_indirect_extractor() {
    let meta = FieldMeta::from_decl(
        &field("Status")
            .tag("params", "Cu")
            .tag("pt", "string:@parse_status")
    )
    .unwrap();
    assert_eq!(meta.extractor, Extractor::Indirect("parse_status".to_string()));
}

#[test]
fn pt_empty_indirect_falls_back() {
    let meta = FieldMeta::from_decl(&field("bool").tag("params", "C").tag("pt", "bool:@")).unwrap();
    assert_eq!(meta.extractor, Extractor::Direct("Bool".to_string()));
}

#[test]
fn doc_defaults_to_name() {
    let meta = FieldMeta::from_decl(&field("String").tag("params", "C")).unwrap();
    assert_eq!(meta.doc, "UserName");

    let meta = FieldMeta::from_decl(&field("String").tag("params", "C").doc("  Login name ")).unwrap();
    assert_eq!(meta.doc, "Login name");
}

#[test]
fn constraints_are_carried() {
    let meta = FieldMeta::from_decl(
        &field("String")
            .tag("params", "CU")
            .tag("enums", "a,b")
            .tag("minlength", "1")
            .tag("maxlength", "64")
            .tag("min", "")
    )
    .unwrap();
    assert_eq!(meta.enums.as_deref(), Some("a,b"));
    assert_eq!(meta.min_length.as_deref(), Some("1"));
    assert_eq!(meta.max_length.as_deref(), Some("64"));
    assert_eq!(meta.min, None);
    assert_eq!(meta.max, None);
}

// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use syn::{File, Type, parse_quote};

use super::*;

fn scan(file: File) -> Declarations {
    scan_items(&file.items)
}

#[test]
fn annotated_struct_becomes_record() {
    let decls = scan(parse_quote! {
        /// User accounts.
        /// @tg -Delete desc="User accounts"
        pub struct User {
            /// Login name.
            #[tg(params = "Cu", maxlength = 64)]
            pub name: String,

            #[tg(params = "c", json = "years")]
            pub age: Option<i32>,

            pub secret: String
        }
    });

    assert_eq!(decls.records.len(), 1);
    let user = &decls.records[0];
    assert_eq!(user.name, "User");
    assert_eq!(user.directive.as_deref(), Some(r#"-Delete desc="User accounts""#));

    let names: Vec<&str> = user.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["name", "age", "secret"]);

    let name = &user.fields[0];
    assert_eq!(name.type_name, "String");
    assert_eq!(name.doc.as_deref(), Some("Login name."));
    assert_eq!(name.get("params"), Some("Cu"));
    assert_eq!(name.get("maxlength"), Some("64"));

    let age = &user.fields[1];
    assert_eq!(age.type_name, "i32");
    assert_eq!(age.doc, None);
    assert_eq!(age.get("json"), Some("years"));

    assert!(user.fields[2].tags.is_empty());
}

#[test]
fn unannotated_items_are_ignored() {
    let decls = scan(parse_quote! {
        /// Plain struct.
        pub struct Plain {
            #[tg(params = "C")]
            pub name: String
        }

        /// Plain helper.
        pub fn helper() {}

        pub enum Kind { A }
    });
    assert!(decls.is_empty());
}

#[test]
fn bare_marker_is_default_directive() {
    let decls = scan(parse_quote! {
        /// @tg
        pub struct Marker;
    });
    assert_eq!(decls.records[0].directive.as_deref(), Some(""));
    assert!(decls.records[0].fields.is_empty());
}

#[test]
fn multiple_directive_lines_are_joined() {
    let decls = scan(parse_quote! {
        /// @tg -Delete
        /// @tg Info:preload=Org
        pub struct User {}
    });
    assert_eq!(
        decls.records[0].directive.as_deref(),
        Some("-Delete Info:preload=Org")
    );
}

#[test]
fn procedures_keep_every_directive_line() {
    let decls = scan(parse_quote! {
        /// Audit trail.
        /// @tg CreateAfter UpdateAfter
        /// @tg -DeleteAfter:Session
        pub fn audit(ctx: &mut Context) -> Result<()> { Ok(()) }
    });
    assert_eq!(
        decls.procedures,
        vec![ProcedureDecl {
            name:       "audit".to_string(),
            directives: vec![
                "@tg CreateAfter UpdateAfter".to_string(),
                "@tg -DeleteAfter:Session".to_string()
            ]
        }]
    );
}

#[test]
fn inline_modules_are_scanned() {
    let decls = scan(parse_quote! {
        mod models {
            /// @tg
            pub struct Order {}

            mod nested {
                /// @tg
                pub struct Line {}
            }
        }

        mod hooks {
            /// @tg CreateBefore:Order
            pub fn check_stock(ctx: &mut Context) -> Result<()> { Ok(()) }
        }

        mod external;
    });

    let records: Vec<&str> = decls.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(records, vec!["Order", "Line"]);
    assert_eq!(decls.procedures[0].name, "hooks::check_stock");
}

#[test]
fn encounter_order_is_kept() {
    let decls = scan(parse_quote! {
        /// @tg CreateBefore
        fn b() {}
        /// @tg CreateBefore
        fn a() {}
        /// @tg
        struct Zed;
        /// @tg
        struct Alpha;
    });
    let procedures: Vec<&str> = decls.procedures.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(procedures, vec!["b", "a"]);
    let records: Vec<&str> = decls.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(records, vec!["Zed", "Alpha"]);
}

#[test]
fn invalid_field_attribute_keeps_the_field_untagged() {
    let decls = scan(parse_quote! {
        /// @tg
        pub struct User {
            #[tg(params = "C", unknown = 1)]
            pub name: String,

            #[tg(params = "U")]
            pub role: String
        }
    });
    let user = &decls.records[0];
    assert_eq!(user.fields.len(), 2);
    assert!(user.fields[0].tags.is_empty());
    assert_eq!(user.fields[1].get("params"), Some("U"));
}

#[test]
fn tuple_struct_fields_are_ignored() {
    let decls = scan(parse_quote! {
        /// @tg
        pub struct Id(u64);
    });
    assert_eq!(decls.records[0].name, "Id");
    assert!(decls.records[0].fields.is_empty());
}

#[test]
fn type_names() {
    let cases: Vec<(Type, &str)> = vec![
        (parse_quote!(i64), "i64"),
        (parse_quote!(Option<bool>), "bool"),
        (parse_quote!(std::string::String), "String"),
        (parse_quote!(&'a str), "str"),
        (parse_quote!(Option<&'a str>), "str"),
        (parse_quote!(Vec<u8>), "Vec")
    ];
    for (ty, expected) in cases {
        assert_eq!(type_name(&ty), expected);
    }
}

#[test]
fn scan_source_reports_syntax_errors() {
    assert!(scan_source("pub struct {").is_err());
    let decls = scan_source("/// @tg\npub struct User { #[tg(params = \"C\")] pub name: String }")
        .unwrap();
    assert_eq!(decls.records[0].fields[0].get("params"), Some("C"));
}

#[test]
fn scan_paths_walks_directories_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(dir.path().join("b.rs"), "/// @tg CreateBefore\nfn from_b() {}").unwrap();
    fs::write(dir.path().join("a.rs"), "/// @tg CreateBefore\nfn from_a() {}").unwrap();
    fs::write(nested.join("c.rs"), "/// @tg\nstruct Order;").unwrap();
    fs::write(dir.path().join("notes.txt"), "/// @tg\nstruct Ignored;").unwrap();

    let decls = scan_paths(&[dir.path().to_path_buf()]).unwrap();
    let procedures: Vec<&str> = decls.procedures.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(procedures, vec!["from_a", "from_b"]);
    let records: Vec<&str> = decls.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(records, vec!["Order"]);
}

#[test]
fn scan_paths_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.rs");
    fs::write(&bad, "fn {").unwrap();

    match scan_paths(&[bad.clone()]) {
        Err(Error::Parse {
            path, ..
        }) => assert_eq!(path, bad),
        other => panic!("expected parse error, got {other:?}")
    }

    match scan_paths(&[dir.path().join("missing.rs")]) {
        Err(Error::Io {
            ..
        }) => {}
        other => panic!("expected i/o error, got {other:?}")
    }
}

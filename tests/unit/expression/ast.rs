use super::*;

#[test]
fn references_are_collected_from_every_branch() {
    let e = Expr::call(
        Func::Rotate3d,
        [
            Expr::var("V"),
            Expr::binary(BinaryOp::Mul, Expr::var("a"), Expr::num(2.0)),
            Expr::neg(Expr::var("z")),
            Expr::var("V"),
        ],
    );
    let refs: Vec<_> = e.references().into_iter().collect();
    assert_eq!(refs, vec!["V", "a", "z"]);
}

#[test]
fn display_is_readable() {
    let e = Expr::call(
        Func::Translate3d,
        [Expr::var("V"), Expr::num(1.0), Expr::neg(Expr::num(2.0))],
    );
    assert_eq!(e.to_string(), "translate3d(V, 1, -(2))");
}

#[test]
fn script_json_uses_tagged_nodes() {
    let json = r#"{
        "statements": [
            {"label": "g", "expr": {"call": {"func": "g3d"}}},
            {"label": "P", "expr": {"call": {"func": "point3d", "args": [
                {"var": "g"}, {"num": 1}, {"num": 0}, {"num": 0}
            ]}}},
            {"expr": {"binary": {"op": "add", "left": {"num": 1}, "right": {"var": "x"}}},
             "style": {"color": "green"}}
        ]
    }"#;
    let s = Script::from_json_str(json).unwrap();
    assert_eq!(s.statements.len(), 3);
    assert_eq!(s.statements[0].expr, Expr::call(Func::G3d, []));
    assert_eq!(s.statements[2].label, None);
    assert_eq!(
        s.statements[2].style.as_ref().unwrap().color.as_deref(),
        Some("green")
    );
}

#[test]
fn unknown_function_is_a_serde_error() {
    let err = Script::from_json_str(
        r#"{"statements": [{"expr": {"call": {"func": "shear3d", "args": []}}}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, crate::foundation::error::GeoError::Serde(_)));
}

#[test]
fn transform_functions_map_to_kind_and_dim() {
    assert_eq!(
        Func::Scale2d.transform(),
        Some((TransformKind::Scale, Dim::Two))
    );
    assert_eq!(Func::Mid.transform(), None);
}

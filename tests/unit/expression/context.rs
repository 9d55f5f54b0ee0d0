use super::*;
use crate::expression::ast::{BinaryOp, Func};

fn point(x: f64) -> Expr {
    Expr::call(
        Func::Point3d,
        [Expr::num(x), Expr::num(0.0), Expr::num(0.0)],
    )
}

fn uses(name: &str) -> Expr {
    Expr::binary(BinaryOp::Mul, Expr::var(name), Expr::num(2.0))
}

#[test]
fn dependents_are_direct_only() {
    let mut ctx = Context::new();
    ctx.bind("A", point(1.0));
    let b = ctx.bind("B", uses("A"));
    let c = ctx.bind("C", uses("B"));
    assert_eq!(ctx.get_dependents("A"), BTreeSet::from([b]));
    assert_eq!(ctx.get_dependents("B"), BTreeSet::from([c]));
    assert!(ctx.get_dependents("C").is_empty());
}

#[test]
fn rebinding_shadows_previous_expression() {
    let mut ctx = Context::new();
    let a0 = ctx.bind("A", point(1.0));
    let b = ctx.bind("B", uses("A"));
    let a1 = ctx.bind("A", point(2.0));
    assert_eq!(ctx.lookup("A"), Some(a1));
    assert_eq!(ctx.label(a0), None);
    assert_eq!(ctx.label(a1), Some("A"));
    // B captured the first binding.
    assert_eq!(ctx.resolve_ref(b, "A"), Some(a0));
    assert!(ctx.get_dependents("A").is_empty());
}

#[test]
fn self_reference_on_rebind_reads_old_value() {
    let mut ctx = Context::new();
    let a0 = ctx.bind("A", point(1.0));
    let a1 = ctx.bind("A", uses("A"));
    assert_eq!(ctx.resolve_ref(a1, "A"), Some(a0));
    assert!(ctx.get_dependents("A").is_empty());
}

#[test]
fn shadowed_expression_loses_its_edges() {
    let mut ctx = Context::new();
    ctx.bind("A", point(1.0));
    let b0 = ctx.bind("B", uses("A"));
    assert!(ctx.get_dependents("A").contains(&b0));
    ctx.bind("B", point(3.0));
    assert!(ctx.get_dependents("A").is_empty());
}

#[test]
fn late_bound_names_follow_current_binding() {
    let mut ctx = Context::new();
    let x = ctx.bind("X", uses("B"));
    assert_eq!(ctx.resolve_ref(x, "B"), None);
    let b0 = ctx.bind("B", point(1.0));
    assert_eq!(ctx.resolve_ref(x, "B"), Some(b0));
    let b1 = ctx.bind("B", point(2.0));
    assert_eq!(ctx.resolve_ref(x, "B"), Some(b1));
    assert_eq!(ctx.get_dependents("B"), BTreeSet::from([x]));
}

#[test]
fn unlabeled_expressions_are_tracked() {
    let mut ctx = Context::new();
    ctx.bind("V", point(1.0));
    let r = ctx.push(uses("V"));
    assert_eq!(ctx.label(r), None);
    assert_eq!(ctx.get_dependents("V"), BTreeSet::from([r]));
    assert_eq!(ctx.references(r).collect::<Vec<_>>(), vec!["V"]);
    assert_eq!(ctx.display_name(r), format!("<expr {}>", r.0));
    assert_eq!(ctx.len(), 2);
}

use super::*;
use crate::expression::ast::{BinaryOp, Expr, Func};

fn point(x: f64) -> Expr {
    Expr::call(
        Func::Point3d,
        [Expr::num(x), Expr::num(0.0), Expr::num(0.0)],
    )
}

fn mid(a: &str, b: &str) -> Expr {
    Expr::call(Func::Mid, [Expr::var(a), Expr::var(b)])
}

fn double(name: &str) -> Expr {
    Expr::binary(BinaryOp::Mul, Expr::var(name), Expr::num(2.0))
}

fn position(order: &[ExprId], id: ExprId) -> usize {
    order.iter().position(|&x| x == id).unwrap()
}

#[test]
fn producers_precede_consumers() {
    let mut ctx = Context::new();
    ctx.bind("A", point(1.0));
    // Bound out of order: D reads C before C exists.
    let d = ctx.bind("D", mid("B", "C"));
    let b = ctx.bind("B", double("A"));
    let c = ctx.bind("C", mid("A", "B"));

    let order = ordered_dependents(&ctx, "A").unwrap();
    assert_eq!(order.len(), 3);
    assert!(position(&order, b) < position(&order, c));
    assert!(position(&order, c) < position(&order, d));
}

#[test]
fn unrelated_expressions_are_excluded() {
    let mut ctx = Context::new();
    ctx.bind("A", point(1.0));
    ctx.bind("Z", point(9.0));
    let b = ctx.bind("B", double("A"));
    ctx.bind("Y", double("Z"));
    assert_eq!(ordered_dependents(&ctx, "A").unwrap(), vec![b]);
    assert!(ordered_dependents(&ctx, "B").unwrap().is_empty());
}

#[test]
fn order_is_deterministic() {
    let mut ctx = Context::new();
    ctx.bind("A", point(1.0));
    let x = ctx.bind("X", double("A"));
    let y = ctx.bind("Y", double("A"));
    let z = ctx.push(double("A"));
    let first = ordered_dependents(&ctx, "A").unwrap();
    assert_eq!(first, vec![x, y, z]);
    assert_eq!(ordered_dependents(&ctx, "A").unwrap(), first);
}

#[test]
fn mutual_references_are_a_cycle() {
    let mut ctx = Context::new();
    ctx.bind("R", point(0.0));
    ctx.bind("A", mid("R", "B"));
    ctx.bind("B", mid("R", "A"));
    let err = ordered_dependents(&ctx, "R").unwrap_err();
    match err {
        GeoError::DependencyCycle { labels } => assert_eq!(labels, vec!["A", "B"]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn cycle_through_the_root_is_detected() {
    let mut ctx = Context::new();
    ctx.bind("A", double("B"));
    ctx.bind("B", double("A"));
    let err = ordered_dependents(&ctx, "A").unwrap_err();
    assert_eq!(
        err.to_string(),
        "dependency cycle error: unresolved labels [A, B]"
    );
}

#[test]
fn unknown_name_has_no_dependents() {
    let ctx = Context::new();
    assert!(ordered_dependents(&ctx, "nope").unwrap().is_empty());
}

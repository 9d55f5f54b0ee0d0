use super::*;
use crate::geometry::{Shape, ShapeKind};

fn num(v: f64) -> Rc<Resolved> {
    Rc::new(Resolved::value(Value::Scalar(v)))
}

fn p3(x: f64, y: f64, z: f64) -> Rc<Resolved> {
    let s = Shape::point(Dim::Three, DVec3::new(x, y, z), None).unwrap();
    Rc::new(Resolved::value(Value::Shape(s)))
}

fn p2(x: f64, y: f64) -> Rc<Resolved> {
    let s = Shape::point(Dim::Two, DVec3::new(x, y, 0.0), None).unwrap();
    Rc::new(Resolved::value(Value::Shape(s)))
}

fn v3(a: DVec3, b: DVec3) -> Rc<Resolved> {
    let s = Shape::segment(ShapeKind::Vector, Dim::Three, a, b, None).unwrap();
    Rc::new(Resolved::value(Value::Shape(s)))
}

fn parse(kind: TransformKind, dim: Dim, args: &[Rc<Resolved>]) -> GeoResult<ParsedArgs> {
    parse_transform_args(kind, dim, args)
}

#[test]
fn rotate3d_axis_as_three_scalars() {
    let args = [p3(1.0, 0.0, 0.0), num(90.0), num(0.0), num(0.0), num(2.0)];
    let p = parse(TransformKind::Rotate, Dim::Three, &args).unwrap();
    assert_eq!(p.shape_count, 1);
    assert_eq!(
        p.params,
        TransformParams::Rotate {
            angle_deg: 90.0,
            axis: DVec3::Z,
            center: DVec3::ZERO
        }
    );
}

#[test]
fn rotate3d_axis_as_vector_direction() {
    let axis = v3(DVec3::new(1.0, 1.0, 1.0), DVec3::new(1.0, 1.0, 4.0));
    let args = [p3(1.0, 0.0, 0.0), p3(0.0, 1.0, 0.0), num(45.0), axis];
    let p = parse(TransformKind::Rotate, Dim::Three, &args).unwrap();
    assert_eq!(p.shape_count, 2);
    match p.params {
        TransformParams::Rotate {
            angle_deg, axis, ..
        } => {
            assert_eq!(angle_deg, 45.0);
            assert_eq!(axis, DVec3::Z);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn rotate3d_axis_as_point() {
    let args = [p3(1.0, 0.0, 0.0), num(30.0), p3(0.0, 3.0, 0.0)];
    let p = parse(TransformKind::Rotate, Dim::Three, &args).unwrap();
    assert_eq!(p.shape_count, 1);
    assert_eq!(p.params.kind(), TransformKind::Rotate);
}

#[test]
fn rotate3d_without_axis_names_last_argument() {
    let args = [p3(1.0, 0.0, 0.0), num(30.0), p2(0.0, 1.0)];
    let err = parse(TransformKind::Rotate, Dim::Three, &args).unwrap_err();
    assert_eq!(
        err.to_string(),
        "argument shape error: rotate3d: cannot read a rotation axis from argument 3 (point2d)"
    );
}

#[test]
fn rotate3d_angle_must_be_a_number() {
    let args = [p3(1.0, 0.0, 0.0), p3(0.0, 1.0, 0.0), num(0.0), num(0.0), num(1.0)];
    let err = parse(TransformKind::Rotate, Dim::Three, &args).unwrap_err();
    assert!(err.to_string().contains("argument 2 (angle) must be a number"));
}

#[test]
fn zero_shapes_is_rejected() {
    let args = [num(90.0), num(0.0), num(0.0), num(1.0)];
    let err = parse(TransformKind::Rotate, Dim::Three, &args).unwrap_err();
    assert!(matches!(err, GeoError::ArgumentShape(_)));

    let err = parse(TransformKind::Scale, Dim::Three, &[num(2.0)]).unwrap_err();
    assert!(err.to_string().contains("at least 2 arguments"));
}

#[test]
fn translate3d_forms() {
    let scalars = [p3(0.0, 0.0, 0.0), num(1.0), num(2.0), num(3.0)];
    let p = parse(TransformKind::Translate, Dim::Three, &scalars).unwrap();
    assert_eq!(p.shape_count, 1);
    assert_eq!(
        p.params,
        TransformParams::Translate {
            delta: DVec3::new(1.0, 2.0, 3.0)
        }
    );

    let vector = [
        p3(0.0, 0.0, 0.0),
        p3(5.0, 5.0, 5.0),
        v3(DVec3::new(1.0, 1.0, 1.0), DVec3::new(2.0, 3.0, 4.0)),
    ];
    let p = parse(TransformKind::Translate, Dim::Three, &vector).unwrap();
    assert_eq!(p.shape_count, 2);
    assert_eq!(
        p.params,
        TransformParams::Translate {
            delta: DVec3::new(1.0, 2.0, 3.0)
        }
    );

    let point = [p3(0.0, 0.0, 0.0), p3(7.0, 8.0, 9.0)];
    let p = parse(TransformKind::Translate, Dim::Three, &point).unwrap();
    assert_eq!(
        p.params,
        TransformParams::Translate {
            delta: DVec3::new(7.0, 8.0, 9.0)
        }
    );
}

#[test]
fn scale3d_forms() {
    let plain = [p3(1.0, 1.0, 1.0), num(2.0)];
    let p = parse(TransformKind::Scale, Dim::Three, &plain).unwrap();
    assert_eq!(
        p.params,
        TransformParams::Scale {
            factor: 2.0,
            center: DVec3::ZERO
        }
    );

    let center = [p3(1.0, 1.0, 1.0), num(2.0), p3(1.0, 0.0, 0.0)];
    let p = parse(TransformKind::Scale, Dim::Three, &center).unwrap();
    assert_eq!(
        p.params,
        TransformParams::Scale {
            factor: 2.0,
            center: DVec3::X
        }
    );

    let scalars = [p3(1.0, 1.0, 1.0), num(3.0), num(1.0), num(2.0), num(3.0)];
    let p = parse(TransformKind::Scale, Dim::Three, &scalars).unwrap();
    assert_eq!(p.shape_count, 1);
    assert_eq!(
        p.params,
        TransformParams::Scale {
            factor: 3.0,
            center: DVec3::new(1.0, 2.0, 3.0)
        }
    );

    let many = [p3(1.0, 0.0, 0.0), p3(0.0, 1.0, 0.0), p3(0.0, 0.0, 1.0), num(0.5)];
    let p = parse(TransformKind::Scale, Dim::Three, &many).unwrap();
    assert_eq!(p.shape_count, 3);
}

#[test]
fn planar_forms() {
    let rot = [p2(1.0, 0.0), num(90.0), num(1.0), num(1.0)];
    let p = parse(TransformKind::Rotate, Dim::Two, &rot).unwrap();
    assert_eq!(p.shape_count, 1);
    assert_eq!(
        p.params,
        TransformParams::Rotate {
            angle_deg: 90.0,
            axis: DVec3::Z,
            center: DVec3::new(1.0, 1.0, 0.0)
        }
    );

    let rot_center = [p2(1.0, 0.0), p2(2.0, 0.0), num(45.0), p2(3.0, 4.0)];
    let p = parse(TransformKind::Rotate, Dim::Two, &rot_center).unwrap();
    assert_eq!(p.shape_count, 2);

    let rot_plain = [p2(1.0, 0.0), num(45.0)];
    assert_eq!(
        parse(TransformKind::Rotate, Dim::Two, &rot_plain)
            .unwrap()
            .shape_count,
        1
    );

    let tr = [p2(1.0, 0.0), num(3.0), num(4.0)];
    let p = parse(TransformKind::Translate, Dim::Two, &tr).unwrap();
    assert_eq!(
        p.params,
        TransformParams::Translate {
            delta: DVec3::new(3.0, 4.0, 0.0)
        }
    );

    let sc = [p2(1.0, 0.0), num(2.0), num(5.0), num(6.0)];
    let p = parse(TransformKind::Scale, Dim::Two, &sc).unwrap();
    assert_eq!(
        p.params,
        TransformParams::Scale {
            factor: 2.0,
            center: DVec3::new(5.0, 6.0, 0.0)
        }
    );
}

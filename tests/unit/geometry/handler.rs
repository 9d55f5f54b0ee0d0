use super::*;
use crate::geometry::GeometryType;
use crate::scene::recording::RecordingScene;

#[test]
fn handlers_are_keyed_by_kind() {
    for kind in [ShapeKind::Point, ShapeKind::Line, ShapeKind::Vector] {
        assert_eq!(handler_for(kind).kind(), kind);
    }
}

#[test]
fn point_rotates_onto_y_axis() {
    let params = TransformParams::rotate(90.0, DVec3::Z, DVec3::ZERO).unwrap();
    let h = handler_for(ShapeKind::Point);
    let state = h.rotated_state(&[DVec3::X], &params, Dim::Three, 90.0).unwrap();
    match state {
        ShapeState::Point { point } => assert!(point.abs_diff_eq(DVec3::Y, 1e-12)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn vector_translation_state_at_half() {
    let params = TransformParams::translate(DVec3::new(2.0, 0.0, 0.0)).unwrap();
    let h = handler_for(ShapeKind::Vector);
    let state = h
        .translated_state(&[DVec3::ZERO, DVec3::X], &params, Dim::Three, 0.5)
        .unwrap();
    assert_eq!(
        state,
        ShapeState::Segment {
            start: DVec3::X,
            end: DVec3::new(2.0, 0.0, 0.0)
        }
    );
}

#[test]
fn wrong_parameter_kind_is_rejected() {
    let params = TransformParams::scale(2.0, DVec3::ZERO).unwrap();
    let err = handler_for(ShapeKind::Line)
        .rotated_state(&[DVec3::ZERO, DVec3::X], &params, Dim::Three, 1.0)
        .unwrap_err();
    assert!(matches!(err, GeoError::ArgumentShape(_)));
}

#[test]
fn points_reject_foreign_shapes() {
    let line = Shape::segment(
        ShapeKind::Line,
        Dim::Three,
        DVec3::ZERO,
        DVec3::X,
        None,
    )
    .unwrap();
    assert!(handler_for(ShapeKind::Point).points(&line).is_err());
    assert_eq!(
        handler_for(ShapeKind::Line).points(&line).unwrap(),
        vec![DVec3::ZERO, DVec3::X]
    );
}

#[test]
fn create_shape_draws_kind_specific_primitive() {
    let mut scene = RecordingScene::new(Dim::Three);
    let state = ShapeState::Segment {
        start: DVec3::ZERO,
        end: DVec3::Y,
    };
    let h = handler_for(ShapeKind::Vector)
        .create_shape(&mut scene, &state, &StyleOptions::default())
        .unwrap();
    assert_eq!(
        scene.shape(h).unwrap().primitive,
        Primitive::Vector {
            start: DVec3::ZERO,
            end: DVec3::Y
        }
    );

    let err = handler_for(ShapeKind::Point)
        .create_shape(&mut scene, &state, &StyleOptions::default())
        .unwrap_err();
    assert!(matches!(err, GeoError::ArgumentShape(_)));
    assert_eq!(GeometryType::new(ShapeKind::Vector, Dim::Three), GeometryType::Vector3d);
}

use super::*;
use crate::foundation::core::DVec3;

#[test]
fn build_and_remove_track_live_shapes() {
    let mut scene = RecordingScene::new(Dim::Three);
    let h = scene
        .build(
            Primitive::Point { at: DVec3::X },
            &StyleOptions::default().radius(0.1),
        )
        .unwrap();
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.shape(h).unwrap().style.radius, Some(0.1));

    assert!(scene.remove(h));
    assert!(scene.is_empty());
    assert!(!scene.remove(h));
    assert_eq!(
        scene.events(),
        &[
            SceneEvent::Added {
                handle: h,
                primitive: Primitive::Point { at: DVec3::X },
                style: StyleOptions::default().radius(0.1),
            },
            SceneEvent::Removed { handle: h },
        ]
    );
}

#[test]
fn handles_are_never_reused() {
    let mut scene = RecordingScene::new(Dim::Two);
    let style = StyleOptions::default();
    let a = scene.build(Primitive::Point { at: DVec3::ZERO }, &style).unwrap();
    scene.remove(a);
    let b = scene.build(Primitive::Point { at: DVec3::ZERO }, &style).unwrap();
    assert_ne!(a, b);
}

#[test]
fn planar_scene_rejects_solids() {
    let mut scene = RecordingScene::new(Dim::Two);
    let err = scene
        .build(
            Primitive::Solid {
                faces: vec![vec![DVec3::ZERO, DVec3::X, DVec3::Y]],
            },
            &StyleOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, GeoError::Configuration(_)));
}

#[test]
fn polygons_are_accepted_in_both_dimensions() {
    for dim in [Dim::Two, Dim::Three] {
        let mut scene = RecordingScene::new(dim);
        let poly = Primitive::Polygon {
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
        };
        scene.build(poly, &StyleOptions::default()).unwrap();
        assert_eq!(scene.len(), 1);
    }
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let mut scene = RecordingScene::new(Dim::Three);
    let err = scene
        .build(
            Primitive::Line {
                start: DVec3::ZERO,
                end: DVec3::new(f64::NAN, 0.0, 0.0),
            },
            &StyleOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, GeoError::Animation(_)));
    assert!(scene.is_empty());
}

#[test]
fn event_log_can_be_disabled() {
    let mut scene = RecordingScene::new(Dim::Three).without_event_log();
    let h = scene
        .build(Primitive::Point { at: DVec3::ZERO }, &StyleOptions::default())
        .unwrap();
    scene.remove(h);
    assert!(scene.events().is_empty());
}

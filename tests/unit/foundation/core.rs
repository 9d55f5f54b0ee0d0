use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30, 1).unwrap().as_f64(), 30.0);
}

#[test]
fn secs_to_frames_rounds_up() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(2.0), 60);
    assert_eq!(fps.secs_to_frames_ceil(0.01), 1);
    assert_eq!(fps.secs_to_frames_ceil(0.0), 0);
    assert_eq!(fps.secs_to_frames_ceil(-1.0), 0);
}

#[test]
fn flatten_drops_z_for_planar_points() {
    let pts = [DVec3::new(1.0, 2.0, 0.0), DVec3::new(3.0, 4.0, 0.0)];
    assert_eq!(flatten_points(&pts, Dim::Two), vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(
        flatten_points(&pts, Dim::Three),
        vec![1.0, 2.0, 0.0, 3.0, 4.0, 0.0]
    );
}

#[test]
fn dim_serializes_with_suffix_names() {
    assert_eq!(serde_json::to_string(&Dim::Three).unwrap(), "\"3d\"");
    let d: Dim = serde_json::from_str("\"2d\"").unwrap();
    assert_eq!(d, Dim::Two);
}

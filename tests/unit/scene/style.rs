use super::*;

#[test]
fn defaults_cover_every_geometry_type() {
    let reg = StyleRegistry::default();
    for ty in GeometryType::ALL {
        assert!(reg.get(ty).color.is_some(), "{ty:?} has no default colour");
    }
    let v = reg.get(GeometryType::Vector3d);
    assert_eq!(v.stroke_width, Some(0.05));
    assert_eq!(v.head_length, Some(0.3));
    assert_eq!(v.head_radius, Some(0.12));
    assert_eq!(reg.get(GeometryType::Point3d).radius, Some(0.12));
}

#[test]
fn call_site_overrides_win_per_field() {
    let reg = StyleRegistry::default();
    let over = StyleOptions::default().color("#00ff00");
    let s = reg.resolve(GeometryType::Line3d, Some(&over));
    assert_eq!(s.color.as_deref(), Some("#00ff00"));
    assert_eq!(s.stroke_width, Some(0.06));
}

#[test]
fn with_override_updates_registry_default() {
    let reg = StyleRegistry::default()
        .with_override(GeometryType::Point2d, &StyleOptions::default().radius(9.0));
    let s = reg.resolve(GeometryType::Point2d, None);
    assert_eq!(s.radius, Some(9.0));
    assert_eq!(s.color.as_deref(), Some("red"));
}

#[test]
fn empty_registry_yields_empty_style() {
    assert_eq!(
        StyleRegistry::empty().get(GeometryType::Line2d),
        StyleOptions::default()
    );
}

#[test]
fn registry_round_trips_through_json_keys() {
    let json = r##"{"point3d": {"radius": 0.5, "color": "#123456"}}"##;
    let reg: StyleRegistry = serde_json::from_str(json).unwrap();
    assert_eq!(reg.get(GeometryType::Point3d).radius, Some(0.5));
    assert_eq!(reg.get(GeometryType::Line3d), StyleOptions::default());
}

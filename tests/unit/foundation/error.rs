use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GeoError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        GeoError::argument_shape("x")
            .to_string()
            .contains("argument shape error:")
    );
    assert!(
        GeoError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        GeoError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        GeoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn dependency_cycle_names_sorted_labels() {
    let err = GeoError::dependency_cycle(["B", "A", "B"]);
    match &err {
        GeoError::DependencyCycle { labels } => assert_eq!(labels, &["A", "B"]),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "dependency cycle error: unresolved labels [A, B]"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GeoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_become_serde_errors() {
    let err: GeoError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, GeoError::Serde(_)));
}

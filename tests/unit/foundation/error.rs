use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GridClockError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GridClockError::layout("x")
            .to_string()
            .contains("layout error:")
    );
    assert!(
        GridClockError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        GridClockError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        GridClockError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GridClockError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: GridClockError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, GridClockError::Serde(_)));
}

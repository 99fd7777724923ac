use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DoofioError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(DoofioError::render("x").to_string().contains("render error:"));
    assert!(DoofioError::audio("x").to_string().contains("audio error:"));
    assert!(
        DoofioError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DoofioError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PadframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PadframeError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        PadframeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        PadframeError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        PadframeError::archive("x")
            .to_string()
            .contains("archive error:")
    );
    assert!(
        PadframeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PadframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

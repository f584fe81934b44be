use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollSeqError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollSeqError::asset("x")
            .to_string()
            .contains("asset error:")
    );
    assert!(
        ScrollSeqError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        ScrollSeqError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollSeqError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

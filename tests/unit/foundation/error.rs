use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LpuvisError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        LpuvisError::encoder_unavailable("x")
            .to_string()
            .contains("encoder unavailable:")
    );
    assert!(
        LpuvisError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(LpuvisError::data("x").to_string().contains("data error:"));
    assert!(LpuvisError::render("x").to_string().contains("render error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LpuvisError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

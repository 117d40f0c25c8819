use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SortError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SortError::decode("x").to_string().contains("decode error:"));
    assert!(SortError::audio("x").to_string().contains("audio error:"));
    assert!(SortError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SortError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_errors_convert_with_question_mark() {
    fn fails() -> SortResult<()> {
        Err(anyhow::anyhow!("wrapped"))?;
        Ok(())
    }
    assert!(matches!(fails(), Err(SortError::Other(_))));
}

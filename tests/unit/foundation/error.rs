use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        XfadeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        XfadeError::playback("x")
            .to_string()
            .contains("playback error:")
    );
    assert!(
        XfadeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        XfadeError::EmptyInput
            .to_string()
            .contains("empty input:")
    );
}

#[test]
fn decode_error_names_the_input() {
    let err = XfadeError::decode(2, "not a png");
    let msg = err.to_string();
    assert!(msg.contains("#2"));
    assert!(msg.contains("not a png"));
}

#[test]
fn dimension_mismatch_reports_both_sizes() {
    let err = XfadeError::DimensionMismatch {
        from: Canvas {
            width: 4,
            height: 2,
        },
        to: Canvas {
            width: 3,
            height: 2,
        },
    };
    assert_eq!(err.to_string(), "dimension mismatch: 4x2 vs 3x2");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = XfadeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

use super::*;

#[test]
fn opaque_channels_widen_by_byte_replication() {
    let wide = wide_channels(image::Rgba([10, 128, 255, 255]));
    assert_eq!(wide, [10 * 257, 128 * 257, 255 * 257, 0xffff]);
    assert_eq!(wide[0] as u8, 10);
}

#[test]
fn transparent_pixels_widen_to_zero() {
    assert_eq!(wide_channels(image::Rgba([200, 100, 50, 0])), [0, 0, 0, 0]);
}

#[test]
fn partial_alpha_premultiplies() {
    let [r, _, _, a] = wide_channels(image::Rgba([255, 0, 0, 128]));
    assert_eq!(a, 128 * 257);
    assert_eq!(r, 0xffff * 128 / 255);
}

#[test]
fn direction_parses_case_insensitively() {
    assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
    assert_eq!(" left ".parse::<Direction>().unwrap(), Direction::Left);
    assert!(matches!(
        "sideways".parse::<Direction>(),
        Err(SortError::Validation(_))
    ));
}

#[test]
fn direction_display_round_trips() {
    for d in [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ] {
        assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
    }
}

#[test]
fn enums_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&CompareKind::Red).unwrap(), "\"red\"");
    assert_eq!(
        serde_json::to_string(&SortOrder::Descending).unwrap(),
        "\"descending\""
    );
    assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), "\"down\"");
}

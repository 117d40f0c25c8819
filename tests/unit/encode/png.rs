use super::*;

#[test]
fn frame_paths_are_numbered_without_padding() {
    let dir = Path::new("frames");
    assert_eq!(frame_path(dir, 0), dir.join("FRAME_0.png"));
    assert_eq!(frame_path(dir, 12), dir.join("FRAME_12.png"));
}

#[test]
fn write_png_creates_missing_directories() {
    let root = PathBuf::from("target").join("unit_png");
    let _ = std::fs::remove_dir_all(&root);
    let path = root.join("nested").join("out.png");
    let img = PixelBuffer::from_fn(3, 2, |x, y| image::Rgba([x as u8 * 80, y as u8 * 90, 7, 255]));

    write_png(&img, &path).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back, img);
}

#[test]
fn bare_file_names_need_no_parent() {
    assert!(ensure_parent_dir(Path::new("out.png")).is_ok());
}

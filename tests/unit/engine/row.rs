use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::foundation::core::SortOrder;

fn gray(v: u8) -> Color {
    image::Rgba([v, v, v, 255])
}

fn row_image(values: &[u8]) -> PixelBuffer {
    PixelBuffer::from_fn(values.len() as u32, 1, |x, _| gray(values[x as usize]))
}

fn row_mask(bits: &[bool]) -> Mask {
    let mut mask = Mask::unset(bits.len() as u32, 1);
    for (x, &b) in bits.iter().enumerate() {
        mask.set_active(x as u32, 0, b);
    }
    mask
}

fn red_row(img: &PixelBuffer) -> Vec<u8> {
    img.pixels().map(|px| px.0[0]).collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(11)
}

#[test]
fn inactive_mask_copies_the_source() {
    let src = row_image(&[9, 3, 7, 1]);
    let mask = row_mask(&[false; 4]);
    let out = sort_rows(&src, &mask, None, &EffectConfig::default(), &mut rng()).unwrap();
    assert_eq!(out, src);
}

#[test]
fn active_run_is_sorted_through_its_end_column() {
    let src = row_image(&[50, 200, 100, 30, 60, 70]);
    let mask = row_mask(&[false, true, true, false, false, false]);
    let out = sort_rows(&src, &mask, None, &EffectConfig::default(), &mut rng()).unwrap();
    assert_eq!(red_row(&out), vec![50, 30, 100, 200, 60, 70]);
}

#[test]
fn scalar_bleeds_past_the_mask() {
    let src = row_image(&[50, 200, 100, 30, 60, 70]);
    let mask = row_mask(&[false, true, true, false, false, false]);
    let cfg = EffectConfig {
        scalar: 2.0,
        ..EffectConfig::default()
    };
    let out = sort_rows(&src, &mask, None, &cfg, &mut rng()).unwrap();
    assert_eq!(red_row(&out), vec![50, 30, 60, 70, 100, 200]);
}

#[test]
fn descending_order_reverses_the_span() {
    let src = row_image(&[1, 2, 3, 4]);
    let mask = row_mask(&[true; 4]);
    let cfg = EffectConfig {
        order: SortOrder::Descending,
        ..EffectConfig::default()
    };
    let out = sort_rows(&src, &mask, None, &cfg, &mut rng()).unwrap();
    assert_eq!(red_row(&out), vec![4, 3, 2, 1]);
}

#[test]
fn clean_mode_ignores_scalar() {
    let src = row_image(&[50, 200, 100, 30, 60, 70]);
    let mask = row_mask(&[false, true, true, false, false, false]);
    let cfg = EffectConfig {
        clean: true,
        scalar: 10.0,
        ..EffectConfig::default()
    };
    let out = sort_rows(&src, &mask, None, &cfg, &mut rng()).unwrap();
    assert_eq!(red_row(&out), vec![50, 30, 100, 200, 60, 70]);
}

#[test]
fn runs_at_the_row_end_are_clamped() {
    let src = row_image(&[5, 4, 3, 2, 1]);
    let mask = row_mask(&[false, false, true, true, true]);
    let cfg = EffectConfig {
        scalar: 50.0,
        noise_factor: 9,
        ..EffectConfig::default()
    };
    let out = sort_rows(&src, &mask, None, &cfg, &mut rng()).unwrap();
    assert_eq!(red_row(&out), vec![5, 4, 1, 2, 3]);
}

#[test]
fn mismatched_mask_is_truncated_to_overlap() {
    let src = row_image(&[30, 10, 20, 5, 1]);
    let cfg = EffectConfig::default();
    for bits in [&[true; 7][..], &[true, true, false][..], &[true, true][..]] {
        let mask = row_mask(bits);
        let fitted = fit_mask(mask.as_image(), 5, 1);
        let out = sort_rows(&src, &mask, None, &cfg, &mut rng()).unwrap();
        let expected = sort_rows(&src, &fitted, None, &cfg, &mut rng()).unwrap();
        assert_eq!(red_row(&out), red_row(&expected), "mask {bits:?}");
    }

    let wide = row_mask(&[true; 7]);
    let out = sort_rows(&src, &wide, None, &cfg, &mut rng()).unwrap();
    assert_eq!(red_row(&out), vec![1, 5, 10, 20, 30]);
}

#[test]
fn rows_are_independent() {
    let src = PixelBuffer::from_fn(4, 3, |x, y| gray((10 * (4 - x) + y) as u8));
    let mut mask = Mask::unset(4, 3);
    for y in 0..3 {
        for x in 0..4 {
            mask.set_active(x, y, y == 1);
        }
    }
    let out = sort_rows(&src, &mask, None, &EffectConfig::default(), &mut rng()).unwrap();
    for x in 0..4 {
        assert_eq!(out.get_pixel(x, 0), src.get_pixel(x, 0));
        assert_eq!(out.get_pixel(x, 2), src.get_pixel(x, 2));
    }
    let middle: Vec<u8> = (0..4).map(|x| out.get_pixel(x, 1).0[0]).collect();
    assert_eq!(middle, vec![11, 21, 31, 41]);
}

#[test]
fn span_colors_paint_each_span_one_opaque_color() {
    let src = row_image(&[10, 20, 30, 40, 50, 60]);
    let mask = row_mask(&[true, true, false, false, true, true]);
    let mut cfg = EffectConfig {
        clean: true,
        ..EffectConfig::default()
    };
    cfg.debug.span_colors = true;
    let out = sort_rows(&src, &mask, None, &cfg, &mut rng()).unwrap();
    // Spans cover columns 0..=2 and 4..=5.
    assert_eq!(out.get_pixel(0, 0), out.get_pixel(2, 0));
    assert_eq!(out.get_pixel(4, 0), out.get_pixel(5, 0));
    assert_eq!(out.get_pixel(0, 0).0[3], 255);
    assert_eq!(*out.get_pixel(3, 0), gray(40));
}

#[test]
fn mask_debug_writes_gray_levels_to_the_row_end() {
    let src = PixelBuffer::from_fn(5, 2, |x, y| image::Rgba([(x * 50) as u8, 7, 200, 255 - y as u8]));
    let mut mask = Mask::unset(5, 2);
    for y in 0..2 {
        for x in 0..5 {
            mask.set_active(x, y, true);
        }
    }
    let mut cfg = EffectConfig::default();
    cfg.debug.mask = true;
    let out = sort_rows(&src, &mask, None, &cfg, &mut rng()).unwrap();
    for px in out.pixels() {
        let [r, g, b, a] = px.0;
        assert_eq!((r, a), (g, 255));
        assert_eq!(r, b);
    }
}

#[test]
fn negative_noise_keeps_every_column_written() {
    let src = PixelBuffer::from_fn(32, 8, |x, y| gray(((x * 7 + y * 13) % 251) as u8));
    let mut mask = Mask::unset(32, 8);
    for y in 0..8 {
        for x in 0..32 {
            mask.set_active(x, y, (x / 3 + y) % 2 == 0);
        }
    }
    let cfg = EffectConfig {
        noise_factor: -12,
        ..EffectConfig::default()
    };
    let out = sort_rows(&src, &mask, None, &cfg, &mut rng()).unwrap();
    assert_eq!(out.dimensions(), src.dimensions());
    assert!(out.pixels().all(|px| px.0[3] == 255));
}

#[test]
fn same_seed_same_output() {
    let src = PixelBuffer::from_fn(24, 6, |x, y| gray(((x * 31 + y * 17) % 256) as u8));
    let mask = crate::mask::build::build_mask(&src, 128, &EffectConfig::default());
    let cfg = EffectConfig {
        noise_factor: 5,
        ..EffectConfig::default()
    };
    let a = sort_rows(&src, &mask, None, &cfg, &mut rng()).unwrap();
    let b = sort_rows(&src, &mask, None, &cfg, &mut rng()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn random_opaque_is_opaque() {
    let mut rng = rng();
    for _ in 0..32 {
        assert_eq!(random_opaque(&mut rng).0[3], 255);
    }
}

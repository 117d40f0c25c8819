use rand::{SeedableRng, rngs::StdRng};

use super::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

#[test]
fn unmodified_write_end_equals_mask_end() {
    let cfg = EffectConfig::default();
    let policy = SpanPolicy::new(&cfg, None, 10, 1);
    let span = policy.resolve(0, 2, 5, &mut rng());
    assert_eq!(span.start, 2);
    assert_eq!(span.mask_end, 5);
    assert_eq!(span.write_end, 5);
    assert_eq!(span.columns(10), Some(2..=5));
}

#[test]
fn scalar_stretches_the_length() {
    let cfg = EffectConfig {
        scalar: 2.0,
        ..EffectConfig::default()
    };
    let span = SpanPolicy::new(&cfg, None, 10, 1).resolve(0, 2, 5, &mut rng());
    assert_eq!(span.write_end, 8);

    let cfg = EffectConfig {
        scalar: 0.5,
        ..EffectConfig::default()
    };
    // 2 + trunc(3 * 0.5) = 3
    let span = SpanPolicy::new(&cfg, None, 10, 1).resolve(0, 2, 5, &mut rng());
    assert_eq!(span.write_end, 3);
}

#[test]
fn write_end_is_clamped_to_the_last_column() {
    let cfg = EffectConfig {
        scalar: 3.0,
        ..EffectConfig::default()
    };
    let span = SpanPolicy::new(&cfg, None, 10, 1).resolve(0, 2, 9, &mut rng());
    assert_eq!(span.write_end, 9);

    let cfg = EffectConfig {
        scalar: -5.0,
        ..EffectConfig::default()
    };
    let span = SpanPolicy::new(&cfg, None, 10, 1).resolve(0, 4, 8, &mut rng());
    assert_eq!(span.write_end, 0);
    assert_eq!(span.columns(10), None);
}

#[test]
fn clean_mode_uses_the_mask_run_only() {
    let cfg = EffectConfig {
        clean: true,
        scalar: 4.0,
        noise_factor: -20,
        ..EffectConfig::default()
    };
    let signal = Signal::new(vec![100]);
    let policy = SpanPolicy::new(&cfg, Some(&signal), 10, 1);
    for _ in 0..10 {
        let span = policy.resolve(0, 3, 6, &mut rng());
        assert_eq!((span.start, span.write_end), (3, 6));
    }
}

#[test]
fn mask_debug_bleeds_to_the_row_end() {
    let mut cfg = EffectConfig::default();
    cfg.debug.mask = true;
    let span = SpanPolicy::new(&cfg, None, 10, 1).resolve(0, 1, 2, &mut rng());
    assert_eq!(span.write_end, 10);
    assert_eq!(span.columns(10), Some(1..=9));
}

#[test]
fn signal_adds_to_the_length() {
    let cfg = EffectConfig::default();
    let signal = Signal::new(vec![0, 4]);
    let policy = SpanPolicy::new(&cfg, Some(&signal), 20, 4);
    // Rows 0 and 1 read sample 0, rows 2 and 3 read sample 1.
    assert_eq!(policy.resolve(1, 2, 5, &mut rng()).write_end, 5);
    assert_eq!(policy.resolve(3, 2, 5, &mut rng()).write_end, 9);
}

#[test]
fn negative_signal_cannot_make_the_length_negative() {
    let cfg = EffectConfig::default();
    let signal = Signal::new(vec![-50]);
    let span = SpanPolicy::new(&cfg, Some(&signal), 20, 1).resolve(0, 6, 9, &mut rng());
    assert_eq!(span.write_end, 6);
}

#[test]
fn positive_noise_only_lengthens() {
    let cfg = EffectConfig {
        noise_factor: 4,
        ..EffectConfig::default()
    };
    let policy = SpanPolicy::new(&cfg, None, 100, 1);
    let mut rng = rng();
    for _ in 0..200 {
        let span = policy.resolve(0, 10, 20, &mut rng);
        assert_eq!(span.start, 10);
        assert!((20..=23).contains(&span.write_end), "{span:?}");
    }
}

#[test]
fn negative_noise_can_pull_the_start_left() {
    let cfg = EffectConfig {
        noise_factor: -4,
        ..EffectConfig::default()
    };
    let policy = SpanPolicy::new(&cfg, None, 100, 1);
    let mut rng = rng();
    let mut shifted = false;
    for _ in 0..200 {
        let span = policy.resolve(0, 10, 20, &mut rng);
        // Draws are in {2, 1, 0, -1}.
        assert!((9..=10).contains(&span.start), "{span:?}");
        shifted |= span.start == 9;
        assert!(span.write_end >= 18 && span.write_end <= 22, "{span:?}");
    }
    assert!(shifted);
}

#[test]
fn negative_noise_never_moves_start_below_zero() {
    let cfg = EffectConfig {
        noise_factor: -50,
        ..EffectConfig::default()
    };
    let policy = SpanPolicy::new(&cfg, None, 100, 1);
    let mut rng = rng();
    let mut hit_zero = false;
    for _ in 0..200 {
        let span = policy.resolve(0, 1, 3, &mut rng);
        assert!(span.start <= 1, "{span:?}");
        hit_zero |= span.start == 0;
    }
    assert!(hit_zero);
}

#[test]
fn columns_handle_empty_rows() {
    let span = Span {
        row: 0,
        start: 0,
        mask_end: 0,
        write_end: 0,
    };
    assert_eq!(span.columns(0), None);
}

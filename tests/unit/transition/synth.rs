use super::*;

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Arc<PixelBuffer> {
    Arc::new(PixelBuffer::filled(canvas(width, height), rgba).unwrap())
}

fn plan(frames_per_segment: u32) -> TransitionPlan {
    TransitionPlan {
        frames_per_segment,
        segment_count: 1,
    }
}

#[test]
fn black_to_white_in_four_steps() {
    let a = solid(2, 2, [0, 0, 0, 0]);
    let b = solid(2, 2, [255, 255, 255, 255]);
    let expected = [64u8, 128, 191, 255];

    for k in 1..=4u32 {
        let frame = interpolate_step(&a, &b, k, 4).unwrap();
        let want = expected[(k - 1) as usize];
        assert!(frame.data().iter().all(|&c| c == want), "k={k}");
    }
}

#[test]
fn last_step_equals_destination() {
    let a = Arc::new(PixelBuffer::new(2, 1, vec![10, 200, 33, 255, 0, 1, 2, 3]).unwrap());
    let b = Arc::new(PixelBuffer::new(2, 1, vec![250, 0, 99, 128, 7, 7, 7, 7]).unwrap());
    let last = interpolate_step(&a, &b, 3, 3).unwrap();
    assert_eq!(last, *b);
}

#[test]
fn first_step_moves_away_from_source() {
    let a = Arc::new(PixelBuffer::new(1, 1, vec![10, 200, 50, 255]).unwrap());
    let b = Arc::new(PixelBuffer::new(1, 1, vec![250, 0, 50, 255]).unwrap());
    let first = interpolate_step(&a, &b, 1, 5).unwrap();
    assert_ne!(first.data()[0], a.data()[0]);
    assert_ne!(first.data()[1], a.data()[1]);
    // Equal channels stay put.
    assert_eq!(first.data()[2], 50);
    assert_eq!(first.data()[3], 255);
}

#[test]
fn mismatched_resolution_is_rejected() {
    let a = solid(2, 2, [0, 0, 0, 255]);
    let b = solid(2, 1, [0, 0, 0, 255]);
    assert!(matches!(
        interpolate_step(&a, &b, 1, 2),
        Err(XfadeError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        blend_step(&a, &b, 1, 2),
        Err(XfadeError::DimensionMismatch { .. })
    ));
}

#[test]
fn step_zero_is_rejected() {
    let a = solid(1, 1, [0, 0, 0, 255]);
    assert!(interpolate_step(&a, &a, 0, 2).is_err());
    assert!(interpolate_step(&a, &a, 3, 2).is_err());
}

#[test]
fn blend_weights_sum_to_one_and_increase() {
    let mut last_to = 0.0;
    for k in 1..=7u32 {
        let (wf, wt) = blend_weights(k, 7);
        assert!((wf + wt - 1.0).abs() < 1e-12);
        assert!(wt >= last_to);
        last_to = wt;
    }
    assert_eq!(blend_weights(7, 7), (0.0, 1.0));
}

#[test]
fn single_frame_segment_is_a_hard_cut() {
    let a = solid(1, 1, [0, 0, 0, 255]);
    let b = solid(1, 1, [255, 0, 0, 255]);

    let units = synthesize_segment(SynthMode::Pixel, &a, &b, plan(1), false).unwrap();
    assert_eq!(units.len(), 1);
    match &units[0] {
        TransitionUnit::Frame(f) => assert_eq!(**f, *b),
        TransitionUnit::Blend(_) => panic!("expected a frame"),
    }

    let units = synthesize_segment(SynthMode::Blend, &a, &b, plan(1), false).unwrap();
    match &units[0] {
        TransitionUnit::Blend(p) => {
            assert_eq!(p.from.weight, 0.0);
            assert_eq!(p.to.weight, 1.0);
        }
        TransitionUnit::Frame(_) => panic!("expected a blend pair"),
    }
}

#[test]
fn parallel_and_serial_synthesis_agree() {
    let a = Arc::new(PixelBuffer::new(2, 1, vec![0, 10, 20, 255, 90, 80, 70, 60]).unwrap());
    let b = Arc::new(PixelBuffer::new(2, 1, vec![255, 0, 128, 0, 1, 2, 3, 4]).unwrap());

    let serial = synthesize_segment(SynthMode::Pixel, &a, &b, plan(9), false).unwrap();
    let parallel = synthesize_segment(SynthMode::Pixel, &a, &b, plan(9), true).unwrap();
    assert_eq!(serial.len(), 9);
    for (s, p) in serial.iter().zip(&parallel) {
        assert_eq!(*s.to_pixels().unwrap(), *p.to_pixels().unwrap());
    }
}

#[test]
fn blend_units_share_the_normalized_images() {
    let a = solid(1, 1, [0, 0, 0, 255]);
    let b = solid(1, 1, [255, 255, 255, 255]);
    let units = synthesize_segment(SynthMode::Blend, &a, &b, plan(3), false).unwrap();
    for u in &units {
        let TransitionUnit::Blend(p) = u else {
            panic!("expected a blend pair");
        };
        assert!(Arc::ptr_eq(&p.from.image, &a));
        assert!(Arc::ptr_eq(&p.to.image, &b));
    }
}

#[test]
fn composite_blend_endpoints() {
    let a = solid(1, 1, [10, 20, 30, 255]);
    let b = solid(1, 1, [200, 100, 50, 255]);

    let end = composite_blend(&blend_step(&a, &b, 2, 2).unwrap()).unwrap();
    assert_eq!(end.pixel(0, 0), Some([200, 100, 50, 255]));

    let same = composite_blend(&blend_step(&a, &a, 1, 1).unwrap()).unwrap();
    assert_eq!(same.pixel(0, 0), Some([10, 20, 30, 255]));
}

#[test]
fn composite_blend_midpoint_mixes_both_images() {
    let a = solid(1, 1, [0, 0, 0, 255]);
    let b = solid(1, 1, [255, 255, 255, 255]);
    let mid = composite_blend(&blend_step(&a, &b, 1, 2).unwrap()).unwrap();
    let px = mid.pixel(0, 0).unwrap();
    assert!(px[0] > 0 && px[0] < 255);
    assert!(px[3] > 0);
}

#[test]
fn last_pixel_unit_shares_the_destination() {
    let a = solid(2, 1, [0, 0, 0, 255]);
    let b = solid(2, 1, [90, 60, 30, 255]);
    for parallel in [false, true] {
        let units = synthesize_segment(SynthMode::Pixel, &a, &b, plan(3), parallel).unwrap();
        let TransitionUnit::Frame(last) = &units[2] else {
            panic!("expected a frame");
        };
        assert!(Arc::ptr_eq(last, &b));
        let TransitionUnit::Frame(first) = &units[0] else {
            panic!("expected a frame");
        };
        assert!(!Arc::ptr_eq(first, &b));
    }
}

#[test]
fn composite_blend_of_translucent_layers() {
    let a = solid(1, 1, [255, 0, 0, 128]);
    let b = solid(1, 1, [0, 0, 255, 0]);
    // A fully transparent upper layer leaves the lower one untouched.
    let px = composite_blend(&BlendPair {
        from: BlendLayer {
            image: Arc::clone(&a),
            weight: 1.0,
        },
        to: BlendLayer {
            image: b,
            weight: 0.0,
        },
    })
    .unwrap()
    .pixel(0, 0)
    .unwrap();
    assert_eq!(px, [255, 0, 0, 128]);
}

use super::*;

#[test]
fn default_settings_give_sixty_frames_for_one_segment() {
    let plan = plan_from_settings(&TransitionSettings::default(), 1);
    assert_eq!(plan.frames_per_segment, 60);
    assert_eq!(plan.total_units(), 60);
}

#[test]
fn duration_is_split_across_segments() {
    // 100ms at 50Hz over two segments: 5 frames / 2 = 2.5, ties go to even.
    let plan = plan_transition(100.0, 20.0, 2);
    assert_eq!(plan.frames_per_segment, 2);
    assert_eq!(plan.segment_count, 2);
    assert_eq!(plan.total_units(), 4);
}

#[test]
fn total_units_is_product_of_counts() {
    for segments in 1..6usize {
        for ms in [16.0, 250.0, 1000.0, 3333.0] {
            let plan = plan_transition(ms, 1000.0 / 60.0, segments);
            assert!(plan.frames_per_segment >= 1);
            assert_eq!(
                plan.total_units(),
                u64::from(plan.frames_per_segment) * segments as u64
            );
        }
    }
}

#[test]
fn tiny_durations_clamp_to_one_frame() {
    assert_eq!(plan_transition(0.001, 16.6, 1).frames_per_segment, 1);
    assert_eq!(plan_transition(100.0, 1_000_000.0, 10).frames_per_segment, 1);
    assert_eq!(plan_transition(f64::NAN, 16.6, 3).frames_per_segment, 1);
}

#[test]
fn zero_segments_clamp_to_one() {
    let plan = plan_transition(1000.0, 10.0, 0);
    assert_eq!(plan.segment_count, 1);
    assert_eq!(plan.frames_per_segment, 100);
}

#[test]
fn fraction_reaches_one_on_last_step() {
    let plan = plan_transition(80.0, 20.0, 1);
    assert_eq!(plan.frames_per_segment, 4);
    let fractions: Vec<f64> = plan.steps().map(|k| plan.fraction(k)).collect();
    assert_eq!(fractions, vec![0.25, 0.5, 0.75, 1.0]);
}

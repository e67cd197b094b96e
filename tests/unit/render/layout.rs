use super::*;
use crate::test_support::solid_source;

#[test]
fn single_line_keeps_source_height() {
    let src = solid_source(400, 300, [0, 0, 0, 255]);
    assert_eq!(compute_output_dimensions(&src, 80, 1), (400, 300));
}

#[test]
fn extra_lines_append_strips() {
    let src = solid_source(400, 300, [0, 0, 0, 255]);
    assert_eq!(compute_output_dimensions(&src, 80, 3), (400, 460));
    for n in 1..10usize {
        let (w, h) = compute_output_dimensions(&src, 37, n);
        assert_eq!(w, 400);
        assert_eq!(h, 300 + (n as u32 - 1) * 37);
    }
}

#[test]
fn zero_lines_do_not_underflow() {
    assert_eq!(output_dimensions(10, 20, 5, 0), (10, 20));
}

#[test]
fn dimensions_saturate_instead_of_overflowing() {
    assert_eq!(output_dimensions(1, 10, u32::MAX, 3).1, u32::MAX);
}

#[test]
fn line_centers_match_reference_scenario() {
    assert_eq!(line_center_y(300, 80, 0), 260.0);
    assert_eq!(line_center_y(300, 80, 1), 340.0);
    assert_eq!(line_center_y(300, 80, 2), 420.0);
}

#[test]
fn odd_strip_heights_center_on_half_pixels() {
    assert_eq!(line_center_y(100, 25, 0), 87.5);
    assert_eq!(line_center_y(100, 25, 1), 112.5);
}

#[test]
fn stroke_width_clamps_to_two() {
    assert_eq!(stroke_width(15), 2.0);
    assert_eq!(stroke_width(29), 2.0);
    assert_eq!(stroke_width(30), 2.0);
    assert!((stroke_width(40) - 40.0 / 15.0).abs() < 1e-12);
    assert_eq!(stroke_width(60), 4.0);
}

#[test]
fn strips_always_clone_original_bottom_edge() {
    let plan = plan_strips(400, 300, 80, 3);
    assert_eq!(plan.source, StripRect::new(0, 220, 400, 80));
    assert_eq!(
        plan.destinations,
        vec![
            StripRect::new(0, 300, 400, 80),
            StripRect::new(0, 380, 400, 80)
        ]
    );
}

#[test]
fn single_line_plans_no_copies() {
    assert!(plan_strips(10, 10, 5, 1).destinations.is_empty());
}

#[test]
fn tall_strip_source_starts_above_image() {
    let plan = plan_strips(10, 30, 50, 2);
    assert_eq!(plan.source.y, -20);
    assert_eq!(plan.destinations[0].y, 30);
}

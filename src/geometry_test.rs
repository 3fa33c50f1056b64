#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// clamp_position
// =============================================================

#[test]
fn clamp_inside_is_identity() {
    let p = clamp_position(Point::new(30.0, 40.0), Size::new(100.0, 80.0), Size::new(800.0, 600.0));
    assert_eq!(p, Point::new(30.0, 40.0));
}

#[test]
fn clamp_negative_to_zero() {
    let p = clamp_position(Point::new(-25.0, -1.0), Size::new(100.0, 80.0), Size::new(800.0, 600.0));
    assert_eq!(p, Point::new(0.0, 0.0));
}

#[test]
fn clamp_far_edge_accounts_for_item_size() {
    let p = clamp_position(Point::new(790.0, 599.0), Size::new(100.0, 80.0), Size::new(800.0, 600.0));
    assert_eq!(p, Point::new(700.0, 520.0));
}

#[test]
fn clamp_axes_are_independent() {
    let p = clamp_position(Point::new(-10.0, 300.0), Size::new(100.0, 80.0), Size::new(800.0, 600.0));
    assert_eq!(p, Point::new(0.0, 300.0));
}

#[test]
fn clamp_non_finite_lands_on_origin() {
    let canvas = Size::new(800.0, 600.0);
    let p = clamp_position(Point::new(f64::NAN, f64::INFINITY), Size::new(100.0, 80.0), canvas);
    assert_eq!(p, Point::new(0.0, 520.0));
    let p = clamp_position(Point::new(f64::INFINITY, 10.0), Size::new(100.0, 80.0), Size::new(f64::INFINITY, 600.0));
    assert_eq!(p, Point::new(0.0, 10.0));
}

#[test]
fn clamp_oversized_item_pins_to_origin() {
    let p = clamp_position(Point::new(50.0, 50.0), Size::new(900.0, 80.0), Size::new(800.0, 600.0));
    assert_eq!(p, Point::new(0.0, 50.0));
}

#[test]
fn clamp_bounds_hold_over_a_sweep() {
    let item = Size::new(120.0, 80.0);
    let canvas = Size::new(400.0, 300.0);
    let mut x = -500.0;
    while x <= 900.0 {
        let p = clamp_position(Point::new(x, x * 0.7), item, canvas);
        assert!(p.x >= 0.0 && p.x <= (canvas.width - item.width).max(0.0));
        assert!(p.y >= 0.0 && p.y <= (canvas.height - item.height).max(0.0));
        x += 37.5;
    }
}

#[test]
fn point_subtraction() {
    assert_eq!(Point::new(10.0, 5.0) - Point::new(4.0, 7.0), Point::new(6.0, -2.0));
}

// =============================================================
// compose_transform
// =============================================================

#[test]
fn compose_converts_percent_to_factor() {
    let t = compose_transform(150.0, 30.0).unwrap();
    assert_eq!(t.scale, 1.5);
    assert_eq!(t.rotation, 30.0);
    assert_eq!(t.scale_percent(), 150.0);
}

#[test]
fn compose_keeps_rotation_unnormalized() {
    let t = compose_transform(100.0, 725.0).unwrap();
    assert_eq!(t.rotation, 725.0);
    let t = compose_transform(100.0, -90.0).unwrap();
    assert_eq!(t.rotation, -90.0);
}

#[test]
fn compose_rejects_bad_scale() {
    assert!(matches!(compose_transform(0.0, 0.0), Err(LayoutError::InvalidInput(_))));
    assert!(matches!(compose_transform(-50.0, 0.0), Err(LayoutError::InvalidInput(_))));
    assert!(matches!(compose_transform(f64::NAN, 0.0), Err(LayoutError::InvalidInput(_))));
}

#[test]
fn compose_rejects_non_finite_rotation() {
    assert!(matches!(compose_transform(100.0, f64::INFINITY), Err(LayoutError::InvalidInput(_))));
}

#[test]
fn sliders_preserve_the_other_component() {
    let t = compose_transform(120.0, 45.0).unwrap();
    let scaled = t.with_scale_percent(80.0).unwrap();
    assert_eq!(scaled.scale, 0.8);
    assert_eq!(scaled.rotation, 45.0);
    let rotated = scaled.with_rotation(10.0).unwrap();
    assert_eq!(rotated.scale, 0.8);
    assert_eq!(rotated.rotation, 10.0);
}

#[test]
fn default_is_identity() {
    let t = Transform::default();
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.rotation, 0.0);
}

// =============================================================
// CSS form
// =============================================================

#[test]
fn display_is_scale_then_rotate() {
    let t = compose_transform(120.0, 45.0).unwrap();
    assert_eq!(t.to_string(), "scale(1.2) rotate(45deg)");
}

#[test]
fn parse_css_reads_display_output() {
    let t = compose_transform(37.0, -12.5).unwrap();
    assert_eq!(Transform::parse_css(&t.to_string()), Some(t));
}

#[test]
fn parse_css_accepts_partial_forms() {
    assert_eq!(Transform::parse_css(""), Some(Transform::default()));
    assert_eq!(Transform::parse_css("scale(2)"), Some(Transform { scale: 2.0, rotation: 0.0 }));
    assert_eq!(Transform::parse_css("rotate(90deg)"), Some(Transform { scale: 1.0, rotation: 90.0 }));
    assert_eq!(Transform::parse_css("  scale( 0.5 )   rotate( 15deg ) "), Some(Transform { scale: 0.5, rotation: 15.0 }));
}

#[test]
fn parse_css_rejects_garbage() {
    assert_eq!(Transform::parse_css("scale(abc)"), None);
    assert_eq!(Transform::parse_css("scale(0)"), None);
    assert_eq!(Transform::parse_css("rotate(45)"), None);
    assert_eq!(Transform::parse_css("skew(10deg)"), None);
    assert_eq!(Transform::parse_css("scale(1"), None);
    assert_eq!(Transform::parse_css(")scale(1)("), None);
}

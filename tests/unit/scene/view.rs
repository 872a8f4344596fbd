use super::*;

#[test]
fn default_view_is_identity() {
    let v = ViewTransform::default();
    assert_eq!(v.offset, Vec2::ZERO);
    assert_eq!(v.scale, 1.0);
    assert_eq!(v.to_affine(), Affine::IDENTITY);
}

#[test]
fn pan_shifts_offset_and_keeps_scale() {
    let base = ViewTransform {
        offset: Vec2::new(5.0, -3.0),
        scale: 2.5,
    };
    let out = pan(base, Vec2::new(10.0, 20.0));
    assert_eq!(out.offset, Vec2::new(15.0, 17.0));
    assert_eq!(out.scale, 2.5);
}

#[test]
fn zoom_scale_is_clamped_to_bounds() {
    let base = ViewTransform::default();
    let p = Point::new(100.0, 100.0);

    let out = zoom_about(base, p, 1.0e9);
    assert_eq!(out.scale, MIN_BG_SCALE);

    let out = zoom_about(base, p, -1.0e9);
    assert_eq!(out.scale, MAX_BG_SCALE);
}

#[test]
fn zoom_step_is_proportional_to_current_scale() {
    let base = ViewTransform::default();
    let out = zoom_about(base, Point::ORIGIN, -100.0);
    assert!((out.scale - 1.15).abs() < 1e-12);
}

#[test]
fn zoom_keeps_world_point_under_pointer_fixed() {
    let pointer = Point::new(123.0, 45.0);
    for start_scale in [MIN_BG_SCALE, 0.5, 1.0, 3.0, MAX_BG_SCALE] {
        let base = ViewTransform {
            offset: Vec2::new(10.0, -20.0),
            scale: start_scale,
        };
        let world = Point::new(
            (pointer.x - base.offset.x) / base.scale,
            (pointer.y - base.offset.y) / base.scale,
        );

        let out = zoom_about(base, pointer, -250.0);
        let screen = Point::new(
            out.offset.x + world.x * out.scale,
            out.offset.y + world.y * out.scale,
        );
        assert!((screen.x - pointer.x).abs() < 1e-9);
        assert!((screen.y - pointer.y).abs() < 1e-9);
    }
}

#[test]
fn to_affine_translates_then_scales() {
    let v = ViewTransform {
        offset: Vec2::new(7.0, 9.0),
        scale: 2.0,
    };
    let mapped = v.to_affine() * Point::new(3.0, 4.0);
    assert!((mapped.x - 13.0).abs() < 1e-12);
    assert!((mapped.y - 17.0).abs() < 1e-12);
}

use super::*;
use crate::{
    assets::decode::PreparedImage,
    scene::model::{SpriteGeom, Viewport},
};

fn solid_image(width: u32, height: u32) -> PreparedImage {
    let rgba = [120u8, 120, 120, 255].repeat((width * height) as usize);
    PreparedImage::from_rgba8(width, height, &rgba).unwrap()
}

fn scene_with_geoms(geoms: &[SpriteGeom]) -> Scene {
    let mut scene = Scene::new(Viewport::new(800, 450).unwrap());
    for (i, geom) in geoms.iter().enumerate() {
        let id = scene
            .add_sprite(solid_image(10, 10), format!("c{i}"), false)
            .unwrap();
        scene.set_sprite_geom(id, *geom);
    }
    scene
}

fn geom(x: f64, y: f64, w: f64, h: f64, rot: f64) -> SpriteGeom {
    SpriteGeom {
        x,
        y,
        width: w,
        height: h,
        rotation_deg: rot,
    }
}

#[test]
fn empty_scene_resolves_to_nothing() {
    let scene = Scene::new(Viewport::new(800, 450).unwrap());
    assert_eq!(hit_test(&scene, Point::new(400.0, 225.0)), None);
    assert_eq!(cursor_for(&scene, Point::new(400.0, 225.0)), Cursor::Default);
}

#[test]
fn background_is_the_fallback_when_loaded() {
    let mut scene = Scene::new(Viewport::new(800, 450).unwrap());
    scene.set_background(solid_image(16, 9));
    assert_eq!(
        hit_test(&scene, Point::new(400.0, 225.0)),
        Some(HitTarget::Background)
    );
    assert_eq!(cursor_for(&scene, Point::new(400.0, 225.0)), Cursor::Grab);
}

#[test]
fn body_hit_inside_unrotated_box() {
    let scene = scene_with_geoms(&[geom(100.0, 100.0, 200.0, 100.0, 0.0)]);
    let id = scene.sprites()[0].id;
    assert_eq!(
        hit_test(&scene, Point::new(200.0, 150.0)),
        Some(HitTarget::Body { sprite: id })
    );
    assert_eq!(hit_test(&scene, Point::new(500.0, 400.0)), None);
}

#[test]
fn body_hit_is_rotation_aware() {
    // A thin horizontal bar rotated 90° occupies a vertical strip.
    let scene = scene_with_geoms(&[geom(100.0, 100.0, 200.0, 20.0, 90.0)]);
    let id = scene.sprites()[0].id;

    // Inside the rotated footprint, far outside the unrotated box.
    assert_eq!(
        hit_test(&scene, Point::new(205.0, 200.0)),
        Some(HitTarget::Body { sprite: id })
    );
    // Inside the unrotated box but not the rotated one.
    assert_eq!(hit_test(&scene, Point::new(120.0, 110.0)), None);
}

#[test]
fn overlapping_bodies_resolve_to_the_topmost_sprite() {
    let a = geom(100.0, 100.0, 200.0, 100.0, 0.0);
    let scene = scene_with_geoms(&[a, a]);
    let top = scene.sprites()[1].id;
    assert_eq!(
        hit_test(&scene, Point::new(200.0, 150.0)),
        Some(HitTarget::Body { sprite: top })
    );
}

#[test]
fn topmost_sprite_wins_even_over_a_lower_sprites_handle() {
    // B fully covers A, so A's corner handles are unreachable.
    let a = geom(100.0, 100.0, 100.0, 100.0, 0.0);
    let b = geom(50.0, 50.0, 300.0, 300.0, 0.0);
    let scene = scene_with_geoms(&[a, b]);
    let top = scene.sprites()[1].id;
    assert_eq!(
        hit_test(&scene, Point::new(100.0, 100.0)),
        Some(HitTarget::Body { sprite: top })
    );
}

#[test]
fn corner_handles_take_priority_over_the_body() {
    let scene = scene_with_geoms(&[geom(100.0, 100.0, 200.0, 100.0, 0.0)]);
    let id = scene.sprites()[0].id;
    // Just inside the body, but within the handle hot zone.
    assert_eq!(
        hit_test(&scene, Point::new(102.0, 103.0)),
        Some(HitTarget::Resize {
            sprite: id,
            corner: Corner::TopLeft
        })
    );
    assert_eq!(
        hit_test(&scene, Point::new(298.0, 197.0)),
        Some(HitTarget::Resize {
            sprite: id,
            corner: Corner::BottomRight
        })
    );
    assert_eq!(cursor_for(&scene, Point::new(102.0, 103.0)), Cursor::Resize);
}

#[test]
fn rotation_handle_sits_beyond_the_top_edge() {
    let scene = scene_with_geoms(&[geom(100.0, 100.0, 200.0, 100.0, 0.0)]);
    let id = scene.sprites()[0].id;
    // Top-edge midpoint is (200,100); the handle floats 25px above.
    assert_eq!(
        hit_test(&scene, Point::new(200.0, 76.0)),
        Some(HitTarget::Rotate { sprite: id })
    );
    assert_eq!(cursor_for(&scene, Point::new(200.0, 76.0)), Cursor::Rotate);
}

#[test]
fn cursor_for_body_is_move() {
    let scene = scene_with_geoms(&[geom(100.0, 100.0, 200.0, 100.0, 0.0)]);
    assert_eq!(cursor_for(&scene, Point::new(200.0, 150.0)), Cursor::Move);
}

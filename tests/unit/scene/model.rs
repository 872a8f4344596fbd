use super::*;
use crate::assets::decode::PreparedImage;

fn solid_image(width: u32, height: u32) -> PreparedImage {
    let rgba = [200u8, 40, 40, 255].repeat((width * height) as usize);
    PreparedImage::from_rgba8(width, height, &rgba).unwrap()
}

fn scene_800x450() -> Scene {
    Scene::new(Viewport::new(800, 450).unwrap())
}

#[test]
fn viewport_rejects_zero_dimensions() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());
}

#[test]
fn add_sprite_uses_default_placement_and_selects() {
    let mut scene = scene_800x450();
    let id = scene.add_sprite(solid_image(100, 200), "hero", false).unwrap();

    let geom = scene.sprite(id).unwrap().geom;
    // Quarter of the viewport height, width from the 1:2 aspect, centered.
    assert!((geom.height - 112.5).abs() < 1e-9);
    assert!((geom.width - 56.25).abs() < 1e-9);
    assert!((geom.x - (800.0 - 56.25) / 2.0).abs() < 1e-9);
    assert!((geom.y - (450.0 - 112.5) / 2.0).abs() < 1e-9);
    assert_eq!(geom.rotation_deg, 0.0);
    assert_eq!(scene.selected(), Some(id));
    assert!(!scene.sprite(id).unwrap().saved_to_library);
}

#[test]
fn eleventh_sprite_is_a_silent_noop() {
    let mut scene = scene_800x450();
    for i in 0..MAX_SPRITES {
        assert!(scene.add_sprite(solid_image(10, 10), format!("c{i}"), false).is_some());
    }
    assert_eq!(scene.sprites().len(), 10);
    assert!(scene.add_sprite(solid_image(10, 10), "overflow", false).is_none());
    assert_eq!(scene.sprites().len(), 10);
}

#[test]
fn sprite_ids_are_unique_and_monotonic() {
    let mut scene = scene_800x450();
    let a = scene.add_sprite(solid_image(10, 10), "a", false).unwrap();
    let b = scene.add_sprite(solid_image(10, 10), "b", false).unwrap();
    scene.remove_sprite(a);
    let c = scene.add_sprite(solid_image(10, 10), "c", false).unwrap();
    assert!(a < b && b < c);
}

#[test]
fn remove_clears_selection_only_for_the_removed_sprite() {
    let mut scene = scene_800x450();
    let a = scene.add_sprite(solid_image(10, 10), "a", false).unwrap();
    let b = scene.add_sprite(solid_image(10, 10), "b", false).unwrap();

    assert_eq!(scene.selected(), Some(b));
    assert!(scene.remove_sprite(a));
    assert_eq!(scene.selected(), Some(b));
    assert!(scene.remove_sprite(b));
    assert_eq!(scene.selected(), None);
    assert!(!scene.remove_sprite(b));
}

#[test]
fn rename_does_not_touch_geometry() {
    let mut scene = scene_800x450();
    let id = scene.add_sprite(solid_image(10, 10), "old", false).unwrap();
    let before = scene.sprite(id).unwrap().geom;

    assert!(scene.rename_sprite(id, "new"));
    let sprite = scene.sprite(id).unwrap();
    assert_eq!(sprite.name, "new");
    assert_eq!(sprite.geom, before);
    assert!(!scene.rename_sprite(SpriteId(9999), "ghost"));
}

#[test]
fn mark_saved_flips_the_library_flag() {
    let mut scene = scene_800x450();
    let id = scene.add_sprite(solid_image(10, 10), "a", false).unwrap();
    assert!(scene.mark_saved(id));
    assert!(scene.sprite(id).unwrap().saved_to_library);

    let lib = scene.add_sprite(solid_image(10, 10), "b", true).unwrap();
    assert!(scene.sprite(lib).unwrap().saved_to_library);
}

#[test]
fn new_background_resets_view_but_keeps_sprites() {
    let mut scene = scene_800x450();
    let id = scene.add_sprite(solid_image(10, 10), "a", false).unwrap();

    scene.set_background(solid_image(1920, 1080));
    scene.set_background_view(crate::scene::view::ViewTransform {
        offset: kurbo::Vec2::new(40.0, -10.0),
        scale: 2.0,
    });
    scene.set_background(solid_image(1280, 720));

    let bg = scene.background().unwrap();
    assert_eq!(bg.view, crate::scene::view::ViewTransform::default());
    assert_eq!(scene.sprites().len(), 1);
    assert_eq!(scene.selected(), Some(id));
}

#[test]
fn clear_sprites_empties_sequence_and_selection() {
    let mut scene = scene_800x450();
    scene.add_sprite(solid_image(10, 10), "a", false);
    scene.add_sprite(solid_image(10, 10), "b", false);
    scene.clear_sprites();
    assert!(scene.sprites().is_empty());
    assert_eq!(scene.selected(), None);
}

#[test]
fn selecting_unknown_id_clears_selection() {
    let mut scene = scene_800x450();
    let id = scene.add_sprite(solid_image(10, 10), "a", false).unwrap();
    scene.select(Some(SpriteId(424242)));
    assert_eq!(scene.selected(), None);
    scene.select(Some(id));
    assert_eq!(scene.selected(), Some(id));
}

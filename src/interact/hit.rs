//! Pointer hit-testing: what is the user about to manipulate?

use kurbo::Point;

use crate::{
    foundation::geom::{Corner, HANDLE_SIZE, handle_points, rotate_point},
    scene::model::{Scene, Sprite, SpriteId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a pointer position resolves to.
pub enum HitTarget {
    /// A corner resize handle.
    Resize {
        /// Sprite whose handle was hit.
        sprite: SpriteId,
        /// Which corner.
        corner: Corner,
    },
    /// The rotation handle.
    Rotate {
        /// Sprite whose handle was hit.
        sprite: SpriteId,
    },
    /// The sprite's rotated body.
    Body {
        /// Sprite under the pointer.
        sprite: SpriteId,
    },
    /// Empty canvas with a background loaded: pan.
    Background,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Cursor affordance for an idle pointer position.
pub enum Cursor {
    /// Nothing under the pointer.
    Default,
    /// Sprite body: move.
    Move,
    /// Corner handle: resize.
    Resize,
    /// Rotation handle.
    Rotate,
    /// Background: pan.
    Grab,
}

/// Resolve a pointer position (display-canvas pixels) to an interaction
/// target.
///
/// Sprites are scanned topmost-first (reverse insertion order) and the first
/// sprite matching any of its zones wins outright; lower sprites are never
/// considered even if also under the pointer. Per sprite the priority is:
/// corner handles, rotation handle, then the rotated body.
pub fn hit_test(scene: &Scene, p: Point) -> Option<HitTarget> {
    for sprite in scene.sprites().iter().rev() {
        if let Some(target) = hit_test_sprite(sprite, p) {
            return Some(target);
        }
    }
    if scene.background().is_some() {
        return Some(HitTarget::Background);
    }
    None
}

fn hit_test_sprite(sprite: &Sprite, p: Point) -> Option<HitTarget> {
    let geom = sprite.geom;
    let center = geom.center();
    let handles = handle_points(center, geom.width, geom.height, geom.rotation_deg);

    for corner in Corner::all() {
        if handles.corner(corner).distance(p) < HANDLE_SIZE {
            return Some(HitTarget::Resize {
                sprite: sprite.id,
                corner,
            });
        }
    }
    if handles.rotate.distance(p) < HANDLE_SIZE {
        return Some(HitTarget::Rotate { sprite: sprite.id });
    }

    // Rotate the pointer into the sprite's unrotated frame and test the
    // axis-aligned box.
    let local = rotate_point(p, center, -geom.rotation_deg);
    if local.x >= geom.x
        && local.x <= geom.x + geom.width
        && local.y >= geom.y
        && local.y <= geom.y + geom.height
    {
        return Some(HitTarget::Body { sprite: sprite.id });
    }
    None
}

/// Cursor affordance for an idle pointer-move; mutates nothing.
pub fn cursor_for(scene: &Scene, p: Point) -> Cursor {
    match hit_test(scene, p) {
        Some(HitTarget::Body { .. }) => Cursor::Move,
        Some(HitTarget::Resize { .. }) => Cursor::Resize,
        Some(HitTarget::Rotate { .. }) => Cursor::Rotate,
        Some(HitTarget::Background) => Cursor::Grab,
        None => Cursor::Default,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/hit.rs"]
mod tests;

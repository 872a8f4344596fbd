//! Background pan/zoom state as pure transform functions.
//!
//! Pan and zoom are `(old, input) -> new` functions with no canvas or event
//! plumbing involved, so the zoom-about-pointer fixed point is directly
//! unit-testable.

use kurbo::{Affine, Point, Vec2};

/// Lower clamp for the background zoom scale.
pub const MIN_BG_SCALE: f64 = 0.1;

/// Upper clamp for the background zoom scale.
pub const MAX_BG_SCALE: f64 = 10.0;

/// Multiplicative zoom step per wheel-delta unit.
const WHEEL_SCALE_STEP: f64 = 0.0015;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Pan/zoom state applied to the background image within the viewport.
pub struct ViewTransform {
    /// Translation in display pixels.
    pub offset: Vec2,
    /// Uniform scale, clamped to `[MIN_BG_SCALE, MAX_BG_SCALE]`.
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    /// The equivalent affine map: translate by `offset`, then scale.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }
}

/// Translate `base` by `delta` display pixels; scale unchanged.
pub fn pan(base: ViewTransform, delta: Vec2) -> ViewTransform {
    ViewTransform {
        offset: base.offset + delta,
        scale: base.scale,
    }
}

/// Rescale `base` about `pointer` by a wheel delta (positive delta zooms
/// out), keeping the world point currently under the pointer fixed on screen.
pub fn zoom_about(base: ViewTransform, pointer: Point, wheel_delta: f64) -> ViewTransform {
    let new_scale =
        (base.scale - wheel_delta * WHEEL_SCALE_STEP * base.scale).clamp(MIN_BG_SCALE, MAX_BG_SCALE);

    let world_x = (pointer.x - base.offset.x) / base.scale;
    let world_y = (pointer.y - base.offset.y) / base.scale;

    ViewTransform {
        offset: Vec2::new(
            pointer.x - world_x * new_scale,
            pointer.y - world_y * new_scale,
        ),
        scale: new_scale,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/view.rs"]
mod tests;

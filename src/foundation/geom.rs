//! Rotation-aware point math shared by hit-testing, interaction, and drawing.
//!
//! All angles are degrees, clockwise-positive in screen coordinates (y grows
//! downward), matching the canvas convention the rest of the engine uses.

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Edge length in pixels of the square resize-handle hot zones.
pub const HANDLE_SIZE: f64 = 10.0;

/// Distance in pixels from the sprite's top edge to the rotation handle.
pub const ROTATION_HANDLE_OFFSET: f64 = 25.0;

/// Rotate `p` about `center` by `angle_deg` (clockwise-positive).
pub fn rotate_point(p: Point, center: Point, angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Angle in degrees of `p` as seen from `center`, via `atan2`.
pub fn angle_to_center_deg(p: Point, center: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x).to_degrees()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One of the four corner resize handles of a sprite.
pub enum Corner {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl Corner {
    /// The diagonally opposite corner, which stays fixed during a resize.
    pub fn opposite(self) -> Self {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// All four corners in hit-test scan order.
    pub fn all() -> [Corner; 4] {
        [
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::BottomRight,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Screen-space positions of a sprite's manipulation handles.
pub struct HandleSet {
    /// Rotated top-left corner.
    pub tl: Point,
    /// Rotated top-right corner.
    pub tr: Point,
    /// Rotated bottom-left corner.
    pub bl: Point,
    /// Rotated bottom-right corner.
    pub br: Point,
    /// Rotation handle, offset beyond the top-edge midpoint.
    pub rotate: Point,
}

impl HandleSet {
    /// Position of the given corner handle.
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.tl,
            Corner::TopRight => self.tr,
            Corner::BottomLeft => self.bl,
            Corner::BottomRight => self.br,
        }
    }
}

/// Compute the rotated handle positions for a sprite with the given center,
/// size, and rotation.
///
/// Corner handles sit on the rotated bounding box; the rotation handle sits
/// [`ROTATION_HANDLE_OFFSET`] past the top-edge midpoint and rotates with the
/// sprite.
pub fn handle_points(center: Point, width: f64, height: f64, rotation_deg: f64) -> HandleSet {
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    let tl = Point::new(center.x - half_w, center.y - half_h);
    let tr = Point::new(center.x + half_w, center.y - half_h);
    let bl = Point::new(center.x - half_w, center.y + half_h);
    let br = Point::new(center.x + half_w, center.y + half_h);
    let rotate = Point::new(center.x, center.y - half_h - ROTATION_HANDLE_OFFSET);

    HandleSet {
        tl: rotate_point(tl, center, rotation_deg),
        tr: rotate_point(tr, center, rotation_deg),
        bl: rotate_point(bl, center, rotation_deg),
        br: rotate_point(br, center, rotation_deg),
        rotate: rotate_point(rotate, center, rotation_deg),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geom.rs"]
mod tests;

//! Rendering: live preview at display resolution and final composition at
//! the background's native resolution, both immediate-mode over the current
//! scene model.

use kurbo::{Affine, Shape, Vec2};

use crate::{assets::decode::PreparedImage, scene::model::SpriteGeom};

pub(crate) mod composite;
pub(crate) mod preview;

#[derive(Clone, Debug)]
/// A rasterized frame as tightly packed row-major RGBA8 bytes.
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn circle_path(center: kurbo::Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    let circle = kurbo::Circle::new(center, radius);
    let mut path = vello_cpu::kurbo::BezPath::new();
    for el in circle.path_elements(0.1) {
        path.push(el);
    }
    path
}

/// Draw one sprite: translate to its center, rotate, draw the image centered
/// and scaled to the sprite's size.
pub(crate) fn draw_sprite(
    ctx: &mut vello_cpu::RenderContext,
    geom: SpriteGeom,
    image: &PreparedImage,
) {
    if geom.width <= 0.0 || geom.height <= 0.0 {
        return;
    }
    let nat_w = f64::from(image.width());
    let nat_h = f64::from(image.height());
    let tr = Affine::translate(geom.center().to_vec2())
        * Affine::rotate(geom.rotation_deg.to_radians())
        * Affine::translate(Vec2::new(-geom.width / 2.0, -geom.height / 2.0))
        * Affine::scale_non_uniform(geom.width / nat_w, geom.height / nat_h);
    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint(image.paint());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, nat_w, nat_h));
}

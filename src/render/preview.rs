//! Display-resolution redraw of the whole scene, including selection chrome.

use kurbo::Affine;

use crate::{
    foundation::error::{MontageError, MontageResult},
    foundation::geom::{Corner, HANDLE_SIZE, ROTATION_HANDLE_OFFSET, handle_points},
    render::{FrameRGBA, affine_to_cpu, circle_path, draw_sprite},
    scene::model::Scene,
};

/// Fill shown when no background is loaded (dark slate).
const EMPTY_CANVAS_RGBA: [u8; 4] = [17, 24, 39, 255];

/// Selection outline/handle accent (indigo).
const SELECTION_RGBA: [u8; 4] = [79, 70, 229, 255];

const OUTLINE_HALF_WIDTH: f64 = 1.0;

/// Redraw the scene at display resolution: background (or the empty fill),
/// sprites in z-order, then the selected sprite's outline and handles.
///
/// Purely a function of the current model; callers invoke it after every
/// mutation. Output is premultiplied RGBA8.
#[tracing::instrument(skip(scene))]
pub fn render_preview(scene: &Scene) -> MontageResult<FrameRGBA> {
    let vp = scene.viewport();
    let w: u16 = vp
        .width
        .try_into()
        .map_err(|_| MontageError::render("viewport width exceeds u16"))?;
    let h: u16 = vp
        .height
        .try_into()
        .map_err(|_| MontageError::render("viewport height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    let vw = f64::from(vp.width);
    let vh = f64::from(vp.height);

    match scene.background() {
        Some(bg) => {
            // The background image is stretched to the viewport, then the
            // pan/zoom transform is applied on top.
            let nat_w = f64::from(bg.image.width());
            let nat_h = f64::from(bg.image.height());
            let tr = bg.view.to_affine() * Affine::scale_non_uniform(vw / nat_w, vh / nat_h);
            ctx.set_transform(affine_to_cpu(tr));
            ctx.set_paint(bg.image.paint());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, nat_w, nat_h));
        }
        None => {
            let [r, g, b, a] = EMPTY_CANVAS_RGBA;
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, vw, vh));
        }
    }

    for sprite in scene.sprites() {
        draw_sprite(&mut ctx, sprite.geom, &sprite.image);
    }

    if let Some(selected) = scene.selected().and_then(|id| scene.sprite(id)) {
        draw_selection(&mut ctx, selected.geom);
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRGBA {
        width: vp.width,
        height: vp.height,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

fn draw_selection(ctx: &mut vello_cpu::RenderContext, geom: crate::scene::model::SpriteGeom) {
    let [sr, sg, sb, sa] = SELECTION_RGBA;
    let accent = vello_cpu::peniko::Color::from_rgba8(sr, sg, sb, sa);
    let white = vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255);

    let center = geom.center();
    let hw = geom.width / 2.0;
    let hh = geom.height / 2.0;
    let t = OUTLINE_HALF_WIDTH;

    // Outline and rotation stem live in the sprite's rotated local frame.
    let local = Affine::translate(center.to_vec2()) * Affine::rotate(geom.rotation_deg.to_radians());
    ctx.set_transform(affine_to_cpu(local));
    ctx.set_paint(accent);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(-hw - t, -hh - t, hw + t, -hh + t));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(-hw - t, hh - t, hw + t, hh + t));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(-hw - t, -hh - t, -hw + t, hh + t));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(hw - t, -hh - t, hw + t, hh + t));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        -t,
        -hh - ROTATION_HANDLE_OFFSET,
        t,
        -hh,
    ));

    // Handles are drawn axis-aligned at their rotated screen positions.
    let handles = handle_points(center, geom.width, geom.height, geom.rotation_deg);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    for corner in Corner::all() {
        let pos = handles.corner(corner);
        let outer = HANDLE_SIZE / 2.0;
        let inner = outer - 1.0;
        ctx.set_paint(accent);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            pos.x - outer,
            pos.y - outer,
            pos.x + outer,
            pos.y + outer,
        ));
        ctx.set_paint(white);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            pos.x - inner,
            pos.y - inner,
            pos.x + inner,
            pos.y + inner,
        ));
    }
    ctx.set_paint(accent);
    ctx.fill_path(&circle_path(handles.rotate, HANDLE_SIZE / 2.0));
    ctx.set_paint(white);
    ctx.fill_path(&circle_path(handles.rotate, HANDLE_SIZE / 2.0 - 1.0));
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;

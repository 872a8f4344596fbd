//! Final composition at the background's native source resolution.
//!
//! The editing surface is UI-sized, but the generation pipeline needs full
//! source fidelity: the composed raster is produced at the background's
//! natural dimensions, with every display-space coordinate remapped by the
//! per-axis native/display scale factors. Rotation is resolution-independent.

use std::sync::Arc;

use kurbo::{Affine, Vec2};

use crate::{
    assets::decode::{encode_png, unpremultiply_rgba8_in_place},
    foundation::error::{MontageError, MontageResult},
    render::{FrameRGBA, affine_to_cpu, draw_sprite},
    scene::model::{Scene, SpriteGeom, Viewport},
};

#[derive(Clone, Debug)]
/// One placed character, handed to prompt construction alongside the raster.
pub struct CharacterRef {
    /// Display name, referenced in generation prompts.
    pub name: String,
    /// The sprite's original encoded image bytes.
    pub image_bytes: Arc<Vec<u8>>,
}

#[derive(Clone, Debug)]
/// The flattened scene at native background resolution.
pub struct ComposedFrame {
    /// Straight-alpha raster at the background's natural dimensions.
    pub frame: FrameRGBA,
    /// The same raster encoded as PNG.
    pub png: Vec<u8>,
}

#[derive(Clone, Debug)]
/// Everything downstream generation needs: the composed raster (absent when
/// no background is loaded) plus the ordered character list.
pub struct CompositionOutput {
    /// Flattened scene, if a background is loaded.
    pub composed: Option<ComposedFrame>,
    /// Characters in z-order, regardless of background presence.
    pub characters: Vec<CharacterRef>,
}

/// Per-axis display-to-source scale factors: native size ÷ viewport size.
pub fn scale_factors(native_width: u32, native_height: u32, viewport: Viewport) -> (f64, f64) {
    (
        f64::from(native_width) / f64::from(viewport.width),
        f64::from(native_height) / f64::from(viewport.height),
    )
}

/// Remap a display-space sprite geometry into source space. Rotation is
/// unchanged.
pub fn sprite_native_geom(geom: SpriteGeom, scale_x: f64, scale_y: f64) -> SpriteGeom {
    SpriteGeom {
        x: geom.x * scale_x,
        y: geom.y * scale_y,
        width: geom.width * scale_x,
        height: geom.height * scale_y,
        rotation_deg: geom.rotation_deg,
    }
}

/// Rasterize the committed scene at the background's native resolution and
/// collect the character hand-off list.
///
/// Hosts call this after every committed gesture (pointer-up) and after any
/// non-gesture mutation. Without a background the raster is skipped but
/// characters are still listed.
#[tracing::instrument(skip(scene))]
pub fn compose(scene: &Scene) -> MontageResult<CompositionOutput> {
    let characters: Vec<CharacterRef> = scene
        .sprites()
        .iter()
        .map(|s| CharacterRef {
            name: s.name.clone(),
            image_bytes: s.image.encoded_bytes(),
        })
        .collect();

    let Some(bg) = scene.background() else {
        return Ok(CompositionOutput {
            composed: None,
            characters,
        });
    };

    let nat_w = bg.image.width();
    let nat_h = bg.image.height();
    let w: u16 = nat_w
        .try_into()
        .map_err(|_| MontageError::render("composition width exceeds u16"))?;
    let h: u16 = nat_h
        .try_into()
        .map_err(|_| MontageError::render("composition height exceeds u16"))?;

    let (scale_x, scale_y) = scale_factors(nat_w, nat_h, scene.viewport());

    let mut ctx = vello_cpu::RenderContext::new(w, h);

    // Background: pan offsets scale per axis, the zoom factor itself is
    // resolution-independent. The image draws 1:1 at native size beneath it.
    let tr = Affine::translate(Vec2::new(
        bg.view.offset.x * scale_x,
        bg.view.offset.y * scale_y,
    )) * Affine::scale(bg.view.scale);
    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint(bg.image.paint());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(nat_w),
        f64::from(nat_h),
    ));

    for sprite in scene.sprites() {
        draw_sprite(
            &mut ctx,
            sprite_native_geom(sprite.geom, scale_x, scale_y),
            &sprite.image,
        );
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    let mut data = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut data);
    let png = encode_png(&data, nat_w, nat_h)?;

    Ok(CompositionOutput {
        composed: Some(ComposedFrame {
            frame: FrameRGBA {
                width: nat_w,
                height: nat_h,
                data,
                premultiplied: false,
            },
            png,
        }),
        characters,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

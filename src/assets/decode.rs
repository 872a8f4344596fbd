use std::sync::Arc;

use anyhow::Context;
use image::ImageEncoder;

use crate::foundation::error::{MontageError, MontageResult};

/// A decoded, immutable image ready for compositing.
///
/// Pixels live in a shared premultiplied-RGBA8 pixmap so the renderers can
/// paint it without copies; the original encoded bytes are retained for the
/// composition output contract (character hand-off).
#[derive(Clone)]
pub struct PreparedImage {
    width: u32,
    height: u32,
    pixmap: Arc<vello_cpu::Pixmap>,
    encoded: Arc<Vec<u8>>,
}

impl std::fmt::Debug for PreparedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("encoded_len", &self.encoded.len())
            .finish()
    }
}

impl PreparedImage {
    /// Natural (source) width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural (source) height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Natural width ÷ natural height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// The original encoded bytes this image was constructed from.
    pub fn encoded_bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.encoded)
    }

    /// Premultiplied RGBA8 pixels, row-major, tightly packed.
    pub fn rgba8_premul(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Build a paint that samples this image.
    pub(crate) fn paint(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&self.pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        }
    }

    /// Construct from already-decoded straight-alpha RGBA8 pixels.
    ///
    /// This is the injection path for character-library sources; the pixels
    /// are re-encoded as PNG so [`PreparedImage::encoded_bytes`] holds for
    /// injected sprites too.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> MontageResult<Self> {
        if width == 0 || height == 0 {
            return Err(MontageError::validation("image dimensions must be > 0"));
        }
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(MontageError::validation("rgba byte length mismatch"));
        }
        let encoded = encode_png(rgba, width, height)?;
        let mut premul = rgba.to_vec();
        premultiply_rgba8_in_place(&mut premul);
        Ok(Self {
            width,
            height,
            pixmap: Arc::new(pixmap_from_premul_bytes(&premul, width, height)?),
            encoded: Arc::new(encoded),
        })
    }
}

/// Decode encoded image bytes (any format `image` supports) into a
/// [`PreparedImage`] with premultiplied pixels.
pub fn decode_image(bytes: &[u8]) -> MontageResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MontageError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut premul);

    Ok(PreparedImage {
        width,
        height,
        pixmap: Arc::new(pixmap_from_premul_bytes(&premul, width, height)?),
        encoded: Arc::new(bytes.to_vec()),
    })
}

/// Encode straight-alpha RGBA8 pixels as PNG.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> MontageResult<Vec<u8>> {
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(rgba, width, height, image::ExtendedColorType::Rgba8)
        .context("encode png")?;
    Ok(out)
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> MontageResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MontageError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MontageError::render("pixmap height exceeds u16"))?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(MontageError::render("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = (((px[0] as u16) * 255 + a / 2) / a).min(255) as u8;
        px[1] = (((px[1] as u16) * 255 + a / 2) / a).min(255) as u8;
        px[2] = (((px[2] as u16) * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

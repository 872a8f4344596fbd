use kurbo::Point;

use crate::{
    assets::decode::PreparedImage,
    foundation::error::{MontageError, MontageResult},
    scene::view::ViewTransform,
};

/// Upper bound on concurrently placed sprites.
pub const MAX_SPRITES: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Display-canvas dimensions in pixels.
pub struct Viewport {
    /// Width in display pixels.
    pub width: u32,
    /// Height in display pixels.
    pub height: u32,
}

impl Viewport {
    /// Construct a viewport, rejecting zero-sized canvases.
    pub fn new(width: u32, height: u32) -> MontageResult<Self> {
        if width == 0 || height == 0 {
            return Err(MontageError::validation(
                "viewport width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Stable per-scene sprite identifier; monotonic, never reused.
pub struct SpriteId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A sprite's placement on the display canvas.
pub struct SpriteGeom {
    /// Top-left x in display pixels.
    pub x: f64,
    /// Top-left y in display pixels.
    pub y: f64,
    /// Width in display pixels.
    pub width: f64,
    /// Height in display pixels.
    pub height: f64,
    /// Rotation in degrees about the sprite's own center, clockwise-positive.
    pub rotation_deg: f64,
}

impl SpriteGeom {
    /// Center point of the (unrotated) bounding box; rotation pivots here.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width ÷ height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

#[derive(Clone, Debug)]
/// A character image placed, sized, and rotated on the compositing canvas.
pub struct Sprite {
    /// Stable identifier.
    pub id: SpriteId,
    /// Display name; used as a semantic reference in generation prompts.
    pub name: String,
    /// Owned decoded image.
    pub image: PreparedImage,
    /// Placement on the display canvas.
    pub geom: SpriteGeom,
    /// Whether this sprite has been persisted to the character library.
    pub saved_to_library: bool,
}

#[derive(Clone, Debug)]
/// The background image and its pan/zoom state.
pub struct Background {
    /// Decoded background image at native resolution.
    pub image: PreparedImage,
    /// Pan/zoom applied within the viewport.
    pub view: ViewTransform,
}

/// The scene model: background plus an ordered sprite sequence.
///
/// Insertion order is z-order (last is topmost for hit-testing and drawing).
/// The scene is the single source of truth; interaction sessions mutate it
/// only through [`crate::Editor`], and renderers read it without retaining
/// any state of their own.
#[derive(Clone, Debug)]
pub struct Scene {
    viewport: Viewport,
    background: Option<Background>,
    sprites: Vec<Sprite>,
    selected: Option<SpriteId>,
    next_id: u64,
}

impl Scene {
    /// Create an empty scene for the given display viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: None,
            sprites: Vec::new(),
            selected: None,
            next_id: 1,
        }
    }

    /// Current display viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize the display viewport (the host does this when the canvas
    /// element resizes). Sprite coordinates are not remapped.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current background, if loaded.
    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// Replace the background; its view transform resets to identity.
    /// Sprites and selection survive the swap.
    pub fn set_background(&mut self, image: PreparedImage) {
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "background replaced"
        );
        self.background = Some(Background {
            image,
            view: ViewTransform::default(),
        });
    }

    /// Overwrite the background's pan/zoom state. No-op without a background.
    pub fn set_background_view(&mut self, view: ViewTransform) {
        if let Some(bg) = self.background.as_mut() {
            bg.view = view;
        }
    }

    /// Sprites in insertion (z) order.
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Look up a sprite by id.
    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.id == id)
    }

    pub(crate) fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.id == id)
    }

    pub(crate) fn set_sprite_geom(&mut self, id: SpriteId, geom: SpriteGeom) {
        if let Some(sprite) = self.sprite_mut(id) {
            sprite.geom = geom;
        }
    }

    /// Append a sprite with default placement: a quarter of the viewport
    /// height, width from the image's natural aspect ratio, centered. The new
    /// sprite becomes selected.
    ///
    /// Returns `None` (a silent no-op) when [`MAX_SPRITES`] are already
    /// placed; the limit is a soft, UI-enforced cap.
    pub fn add_sprite(
        &mut self,
        image: PreparedImage,
        name: impl Into<String>,
        from_library: bool,
    ) -> Option<SpriteId> {
        if self.sprites.len() >= MAX_SPRITES {
            tracing::debug!("sprite cap reached; add ignored");
            return None;
        }

        let height = f64::from(self.viewport.height) / 4.0;
        let width = height * image.aspect_ratio();
        let geom = SpriteGeom {
            x: (f64::from(self.viewport.width) - width) / 2.0,
            y: (f64::from(self.viewport.height) - height) / 2.0,
            width,
            height,
            rotation_deg: 0.0,
        };

        let id = SpriteId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        tracing::debug!(id = id.0, name = %name, "sprite added");
        self.sprites.push(Sprite {
            id,
            name,
            image,
            geom,
            saved_to_library: from_library,
        });
        self.selected = Some(id);
        Some(id)
    }

    /// Remove a sprite; clears the selection if it was selected.
    pub fn remove_sprite(&mut self, id: SpriteId) -> bool {
        let before = self.sprites.len();
        self.sprites.retain(|s| s.id != id);
        let removed = self.sprites.len() != before;
        if removed && self.selected == Some(id) {
            self.selected = None;
        }
        removed
    }

    /// Rename a sprite; geometry is untouched.
    pub fn rename_sprite(&mut self, id: SpriteId, name: impl Into<String>) -> bool {
        match self.sprite_mut(id) {
            Some(sprite) => {
                sprite.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Flag a sprite as persisted to the external character library.
    pub fn mark_saved(&mut self, id: SpriteId) -> bool {
        match self.sprite_mut(id) {
            Some(sprite) => {
                sprite.saved_to_library = true;
                true
            }
            None => false,
        }
    }

    /// Remove every sprite and clear the selection. Hosts call this when
    /// switching away from composer mode.
    pub fn clear_sprites(&mut self) {
        self.sprites.clear();
        self.selected = None;
    }

    /// Currently selected sprite id, if any.
    pub fn selected(&self) -> Option<SpriteId> {
        self.selected
    }

    /// Change the selection. Selecting an unknown id clears it.
    pub fn select(&mut self, id: Option<SpriteId>) {
        self.selected = id.filter(|id| self.sprite(*id).is_some());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;

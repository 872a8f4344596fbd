//! Montage is an embeddable 2D scene-composition engine.
//!
//! It powers a canvas editor in which a user places a pannable/zoomable
//! background image and up to ten independently transformable character
//! sprites, then hands the flattened scene to a downstream generation
//! pipeline at the background's native resolution.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: pointer-down positions are hit-tested against handles,
//!    sprite bodies (topmost first), and the background ([`hit_test`]).
//! 2. **Interact**: the [`Editor`] state machine tracks one manipulation at a
//!    time (`move`/`resize`/`rotate`/`pan`), deriving each update from a
//!    gesture-start snapshot.
//! 3. **Render**: [`render_preview`] redraws the scene at display resolution
//!    after every mutation; [`compose`] rasterizes the committed scene at the
//!    background's native resolution for hand-off.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Immediate-mode**: renders are pure functions of the current
//!   [`Scene`]; there is no retained scene graph or differential drawing.
//! - **Snapshot discipline**: interaction sessions own copies of
//!   gesture-start state, so an aborted gesture can never half-update the
//!   model.
//! - **Premultiplied RGBA8** inside the renderers; straight alpha at the
//!   encode boundary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod interact;
mod render;
mod scene;

pub use assets::decode::{PreparedImage, decode_image, encode_png};
pub use foundation::error::{MontageError, MontageResult};
pub use foundation::geom::{
    Affine, Corner, HANDLE_SIZE, HandleSet, Point, ROTATION_HANDLE_OFFSET, Rect, Vec2,
    angle_to_center_deg, handle_points, rotate_point,
};
pub use interact::hit::{Cursor, HitTarget, cursor_for, hit_test};
pub use interact::session::{Editor, SessionKind};
pub use render::FrameRGBA;
pub use render::composite::{
    CharacterRef, ComposedFrame, CompositionOutput, compose, scale_factors, sprite_native_geom,
};
pub use render::preview::render_preview;
pub use scene::model::{
    Background, MAX_SPRITES, Scene, Sprite, SpriteGeom, SpriteId, Viewport,
};
pub use scene::placement::{NormalizedPlacement, parse_placements};
pub use scene::view::{MAX_BG_SCALE, MIN_BG_SCALE, ViewTransform, pan, zoom_about};

//! The interaction state machine: `idle -> {move, resize, rotate, pan} -> idle`.
//!
//! A session holds an owned snapshot of the manipulated entity's state at
//! gesture start, never a live reference; every pointer-move derives the new
//! state from snapshot plus pointer, so an aborted gesture can never leave
//! the scene half-updated.

use kurbo::Point;

use crate::{
    foundation::geom::{angle_to_center_deg, handle_points, rotate_point},
    interact::hit::{Cursor, HitTarget, cursor_for, hit_test},
    scene::model::{Scene, SpriteGeom, SpriteId, Viewport},
    scene::view::{self, ViewTransform},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which manipulation is active, for host introspection.
pub enum SessionKind {
    /// Dragging a sprite body.
    Move,
    /// Dragging a corner handle.
    Resize,
    /// Dragging the rotation handle.
    Rotate,
    /// Dragging the background.
    Pan,
}

#[derive(Clone, Debug)]
enum Session {
    Move {
        sprite: SpriteId,
        start: Point,
        snapshot: SpriteGeom,
    },
    Resize {
        sprite: SpriteId,
        snapshot: SpriteGeom,
        aspect: f64,
        opposite: Point,
    },
    Rotate {
        sprite: SpriteId,
        snapshot: SpriteGeom,
        start_angle_deg: f64,
    },
    Pan {
        start: Point,
        snapshot: ViewTransform,
    },
}

impl Session {
    fn kind(&self) -> SessionKind {
        match self {
            Session::Move { .. } => SessionKind::Move,
            Session::Resize { .. } => SessionKind::Resize,
            Session::Rotate { .. } => SessionKind::Rotate,
            Session::Pan { .. } => SessionKind::Pan,
        }
    }
}

/// Owns the scene and at most one interaction session, translating pointer
/// and wheel events into model mutations.
#[derive(Debug)]
pub struct Editor {
    scene: Scene,
    session: Option<Session>,
    locked: bool,
}

impl Editor {
    /// Create an editor with an empty scene for the given viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_scene(Scene::new(viewport))
    }

    /// Wrap an existing scene.
    pub fn with_scene(scene: Scene) -> Self {
        Self {
            scene,
            session: None,
            locked: false,
        }
    }

    /// Read access to the scene model.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access for non-gesture operations (add/remove/rename sprites,
    /// load a background, apply placements).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The active manipulation, if a session is open.
    pub fn active(&self) -> Option<SessionKind> {
        self.session.as_ref().map(Session::kind)
    }

    /// Disable pointer and wheel input while an automated-placement call is
    /// outstanding, so its response cannot race a manual gesture.
    pub fn lock_editing(&mut self) {
        self.locked = true;
        self.session = None;
    }

    /// Re-enable pointer and wheel input.
    pub fn unlock_editing(&mut self) {
        self.locked = false;
    }

    /// Whether editing is currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Begin an interaction at `p` (display-canvas pixels).
    ///
    /// Resolves the hit target, updates the selection (sprite hits select the
    /// sprite; background or empty hits clear it), and opens the matching
    /// session. Returns the opened session kind, or `None` when idle.
    pub fn pointer_down(&mut self, p: Point) -> Option<SessionKind> {
        if self.locked {
            return None;
        }

        match hit_test(&self.scene, p) {
            Some(HitTarget::Body { sprite }) => {
                let snapshot = self.scene.sprite(sprite)?.geom;
                self.scene.select(Some(sprite));
                self.session = Some(Session::Move {
                    sprite,
                    start: p,
                    snapshot,
                });
            }
            Some(HitTarget::Resize { sprite, corner }) => {
                let snapshot = self.scene.sprite(sprite)?.geom;
                let handles = handle_points(
                    snapshot.center(),
                    snapshot.width,
                    snapshot.height,
                    snapshot.rotation_deg,
                );
                self.scene.select(Some(sprite));
                self.session = Some(Session::Resize {
                    sprite,
                    snapshot,
                    aspect: snapshot.aspect_ratio(),
                    opposite: handles.corner(corner.opposite()),
                });
            }
            Some(HitTarget::Rotate { sprite }) => {
                let snapshot = self.scene.sprite(sprite)?.geom;
                self.scene.select(Some(sprite));
                self.session = Some(Session::Rotate {
                    sprite,
                    snapshot,
                    start_angle_deg: angle_to_center_deg(p, snapshot.center()),
                });
            }
            Some(HitTarget::Background) => {
                let snapshot = self.scene.background()?.view;
                self.scene.select(None);
                self.session = Some(Session::Pan { start: p, snapshot });
            }
            None => {
                self.scene.select(None);
                self.session = None;
            }
        }
        self.active()
    }

    /// Advance the active session to pointer position `p`, mutating the
    /// scene; returns `None` once the event is consumed.
    ///
    /// When idle this mutates nothing and returns the cursor affordance for
    /// `p` instead.
    pub fn pointer_move(&mut self, p: Point) -> Option<Cursor> {
        let Some(session) = self.session.clone() else {
            return Some(cursor_for(&self.scene, p));
        };

        match session {
            Session::Move {
                sprite,
                start,
                snapshot,
            } => {
                self.scene.set_sprite_geom(
                    sprite,
                    SpriteGeom {
                        x: snapshot.x + (p.x - start.x),
                        y: snapshot.y + (p.y - start.y),
                        ..snapshot
                    },
                );
            }
            Session::Rotate {
                sprite,
                snapshot,
                start_angle_deg,
            } => {
                let current = angle_to_center_deg(p, snapshot.center());
                self.scene.set_sprite_geom(
                    sprite,
                    SpriteGeom {
                        rotation_deg: snapshot.rotation_deg + (current - start_angle_deg),
                        ..snapshot
                    },
                );
            }
            Session::Resize {
                sprite,
                snapshot,
                aspect,
                opposite,
            } => {
                self.scene
                    .set_sprite_geom(sprite, resize_geom(snapshot, aspect, opposite, p));
            }
            Session::Pan { start, snapshot } => {
                self.scene
                    .set_background_view(view::pan(snapshot, p - start));
            }
        }
        None
    }

    /// End the active session unconditionally and return to idle.
    ///
    /// Returns `true` when a session was open, signalling the host to
    /// recompute the final composition. This is also the cancellation path:
    /// forward pointer-capture loss or an off-canvas release here so no
    /// session dangles across unrelated future input.
    pub fn pointer_up(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Zoom the background about `p`. Independent of any open session and a
    /// no-op without a background (or while locked). Returns whether the
    /// view changed.
    pub fn wheel(&mut self, p: Point, wheel_delta: f64) -> bool {
        if self.locked {
            return false;
        }
        let Some(bg) = self.scene.background() else {
            return false;
        };
        let next = view::zoom_about(bg.view, p, wheel_delta);
        self.scene.set_background_view(next);
        true
    }
}

/// Resize math, all derived from the gesture-start snapshot.
///
/// Pointer and the fixed opposite corner are rotated into the unrotated local
/// frame; the new width is their horizontal distance, height follows the
/// locked aspect ratio, and the rect is anchored at the opposite corner. The
/// resulting center is rotated back by the original rotation so the shape
/// stays visually anchored while rotating about its own (shifted) center.
fn resize_geom(snapshot: SpriteGeom, aspect: f64, opposite: Point, p: Point) -> SpriteGeom {
    let center = snapshot.center();
    let local_pointer = rotate_point(p, center, -snapshot.rotation_deg);
    let local_opposite = rotate_point(opposite, center, -snapshot.rotation_deg);

    let width = (local_pointer.x - local_opposite.x).abs();
    let height = width / aspect;
    let x = local_pointer.x.min(local_opposite.x);
    let y = local_pointer.y.min(local_opposite.y);

    let unrotated_center = Point::new(x + width / 2.0, y + height / 2.0);
    let final_center = rotate_point(unrotated_center, center, snapshot.rotation_deg);

    SpriteGeom {
        x: final_center.x - width / 2.0,
        y: final_center.y - height / 2.0,
        width,
        height,
        rotation_deg: snapshot.rotation_deg,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/session.rs"]
mod tests;

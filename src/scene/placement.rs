//! Automated-placement collaborator contract.
//!
//! The collaborator receives the background and sprite images and answers
//! with one normalized bounding box per sprite, in sprite order, as JSON.
//! The contract is all-or-nothing: any length mismatch or malformed entry is
//! an error and no sprite transform is touched.

use crate::{
    foundation::error::{MontageError, MontageResult},
    scene::model::{Scene, SpriteGeom},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A bounding box in `[0,1]` background-relative fractions.
pub struct NormalizedPlacement {
    /// Top-left x fraction.
    pub x: f64,
    /// Top-left y fraction.
    pub y: f64,
    /// Width fraction; must be > 0.
    pub width: f64,
    /// Height fraction; must be > 0.
    pub height: f64,
}

impl NormalizedPlacement {
    fn validate(&self, index: usize) -> MontageResult<()> {
        for (name, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(MontageError::placement(format!(
                    "placement[{index}].{name} must be a finite fraction in [0,1], got {value}"
                )));
            }
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(MontageError::placement(format!(
                "placement[{index}] width/height must be > 0"
            )));
        }
        Ok(())
    }
}

/// Parse a collaborator JSON response into placements, enforcing the
/// one-entry-per-sprite contract up front.
pub fn parse_placements(json: &str, expected_len: usize) -> MontageResult<Vec<NormalizedPlacement>> {
    let placements: Vec<NormalizedPlacement> = serde_json::from_str(json)
        .map_err(|e| MontageError::placement(format!("malformed placement response: {e}")))?;
    if placements.len() != expected_len {
        return Err(MontageError::placement(format!(
            "expected {expected_len} placements, got {}",
            placements.len()
        )));
    }
    for (i, p) in placements.iter().enumerate() {
        p.validate(i)?;
    }
    Ok(placements)
}

impl Scene {
    /// Apply one normalized placement per sprite, in sprite order: converts
    /// fractions to viewport pixels, overwrites position and size, and resets
    /// rotation to 0.
    ///
    /// Validation runs over the whole list before any mutation, so an error
    /// leaves every sprite transform unchanged.
    #[tracing::instrument(skip(self, placements))]
    pub fn apply_placements(&mut self, placements: &[NormalizedPlacement]) -> MontageResult<()> {
        if placements.len() != self.sprites().len() {
            return Err(MontageError::placement(format!(
                "placement count {} does not match sprite count {}",
                placements.len(),
                self.sprites().len()
            )));
        }
        for (i, p) in placements.iter().enumerate() {
            p.validate(i)?;
        }

        let vw = f64::from(self.viewport().width);
        let vh = f64::from(self.viewport().height);
        let ids: Vec<_> = self.sprites().iter().map(|s| s.id).collect();
        for (id, p) in ids.into_iter().zip(placements) {
            self.set_sprite_geom(
                id,
                SpriteGeom {
                    x: p.x * vw,
                    y: p.y * vh,
                    width: p.width * vw,
                    height: p.height * vh,
                    rotation_deg: 0.0,
                },
            );
        }
        tracing::debug!(count = placements.len(), "placements applied");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/placement.rs"]
mod tests;

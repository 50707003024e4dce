//=========================================================================
// Transform
//=========================================================================
//
// Position, scale and rotation of a game object in grid space.
//
// The axis-aligned box of a transform spans `position` to
// `position + scale`, inclusive on both ends. Rotation is stored in
// degrees and does not affect the box.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Vector2;

//=== Transform ===========================================================

/// Placement of a game object in grid space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Top-left corner in grid units.
    pub position: Vector2,

    /// Width and height in grid units.
    pub scale: Vector2,

    /// Rotation in degrees (clockwise, 0 = facing right).
    pub rotation: f64,
}

impl Transform {
    pub fn new(position: Vector2, scale: Vector2) -> Self {
        Self {
            position,
            scale,
            rotation: 0.0,
        }
    }

    /// Builder-style rotation setter.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Center of the box.
    pub fn position_center(&self) -> Vector2 {
        self.position + self.scale / 2.0
    }

    /// Moves the transform by `offset`.
    pub fn translate(&mut self, offset: Vector2) -> &mut Self {
        self.position += offset;
        self
    }

    /// Adds `degrees` and normalizes into `[0, 360)`.
    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        self.rotation = (self.rotation + degrees).rem_euclid(360.0);
        self
    }

    pub fn radians(&self) -> f64 {
        self.rotation.rem_euclid(360.0).to_radians()
    }

    /// Unit vector the transform is facing.
    pub fn forward(&self) -> Vector2 {
        let angle = self.radians();
        Vector2::new(angle.cos(), angle.sin())
    }

    /// Returns `true` if both scale components are strictly positive.
    pub fn has_area(&self) -> bool {
        self.scale.x > 0.0 && self.scale.y > 0.0
    }

    /// Inclusive point-in-box test.
    ///
    /// A point lying exactly on `position + scale` counts as inside.
    pub fn contains_point(&self, point: Vector2) -> bool {
        is_in_range(point.x, self.position.x, self.position.x + self.scale.x)
            && is_in_range(point.y, self.position.y, self.position.y + self.scale.y)
    }

    /// Returns `true` if this transform's origin lies inside `other`'s box.
    pub fn is_touching(&self, other: &Transform) -> bool {
        other.contains_point(self.position)
    }
}

impl Default for Transform {
    /// One grid cell at the origin.
    fn default() -> Self {
        Self::new(Vector2::ZERO, Vector2::ONE)
    }
}

//=== Helpers =============================================================

/// Inclusive range check.
pub fn is_in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

/// Clamps `value` into `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

//=========================================================================
// Unit Tests
//=========================================================================

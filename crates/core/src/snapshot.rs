use crate::types::{
    CollisionStatus, CLIMB_CLAMP, GROUND_OFFSET, VERTICAL_SPEED_SCALE, VISIBILITY_THRESHOLD,
};

/// The six values the overlay reads each frame.
///
/// Small and `Copy`: taking one per frame costs a handful of atomic loads and
/// no allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    /// Camera pitch in radians (positive = nose up).
    pub pitch: f64,
    /// Camera yaw in radians.
    pub yaw: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub collision: CollisionStatus,
    pub hud_enabled: bool,
    /// 0 = cockpit view, 1 = chase view.
    pub transition: f64,
}

impl Default for HudSnapshot {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            position: [0.0; 3],
            velocity: [0.0; 3],
            collision: CollisionStatus::Nominal,
            hud_enabled: false,
            transition: 0.0,
        }
    }
}

#[inline(always)]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

impl HudSnapshot {
    /// Replace non-finite inputs with 0 and clamp the transition factor.
    ///
    /// The renderer calls this first so NaN never reaches a draw primitive.
    pub fn sanitized(&self) -> Self {
        Self {
            pitch: finite_or_zero(self.pitch),
            yaw: finite_or_zero(self.yaw),
            position: self.position.map(finite_or_zero),
            velocity: self.velocity.map(finite_or_zero),
            collision: self.collision,
            hud_enabled: self.hud_enabled,
            transition: finite_or_zero(self.transition).clamp(0.0, 1.0),
        }
    }

    /// Frame-level opacity: `1 - transition`.
    pub fn overlay_alpha(&self) -> f64 {
        1.0 - self.transition
    }

    /// Whether the overlay alpha clears the visibility gate.
    pub fn is_visible(&self) -> bool {
        self.overlay_alpha() > VISIBILITY_THRESHOLD
    }

    /// Camera height plus the fixed ground offset.
    pub fn altitude(&self) -> f64 {
        self.position[1] + GROUND_OFFSET
    }

    /// Compass heading in `[0, 360)`.
    pub fn heading_degrees(&self) -> f64 {
        let raw = -self.yaw.to_degrees();
        let h = raw.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
        if h >= 360.0 {
            0.0
        } else {
            h
        }
    }

    /// Heading rounded to whole degrees, always in `0..=359`.
    pub fn heading_display(&self) -> u16 {
        (self.heading_degrees().round() as u16) % 360
    }

    /// Vertical speed readout value. Not clamped.
    pub fn vertical_speed_display(&self) -> f64 {
        self.velocity[1] * VERTICAL_SPEED_SCALE
    }

    /// Climb indicator position in `[-1, 1]`, saturating at `±CLIMB_CLAMP`.
    pub fn climb_fraction(&self) -> f64 {
        self.velocity[1].clamp(-CLIMB_CLAMP, CLIMB_CLAMP) / CLIMB_CLAMP
    }
}

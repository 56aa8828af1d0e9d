//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the overlay.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (state cells, instrument rendering, the terminal host).
//!
//! # Instrument Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FIELD_OF_VIEW_DEG` | 90 | Vertical field of view used for horizon placement |
//! | `GROUND_OFFSET` | 1.49 | Added to the camera's vertical position for altitude |
//! | `VISIBILITY_THRESHOLD` | 0.01 | Overlay alpha at or below this draws nothing |
//! | `HORIZON_CULL_MARGIN` | 100 | Pixels above/below the viewport the horizon may sit |
//! | `CLIMB_CLAMP` | 0.5 | Vertical velocity at which the climb indicator saturates |
//! | `VERTICAL_SPEED_SCALE` | 10 | Multiplier for the vertical speed readout |
//! | `DEFAULT_REFRESH_HZ` | 60 | Refresh rate when the host does not say otherwise |
//!
//! # Palettes
//!
//! Collision status fully determines the palette:
//!
//! | Status | Base | Glow |
//! |--------|------|------|
//! | Nominal | (120,200,255) | (180,150,255) |
//! | Approaching | (255,180,80) | (255,220,100) |
//! | Colliding | (255,80,100) | (255,120,140) |
//!
//! # Examples
//!
//! ```
//! use flight_hud_types::{CollisionStatus, Palette, Rgb};
//!
//! let status = CollisionStatus::from_str("colliding").unwrap();
//! let palette = Palette::for_status(status);
//! assert_eq!(palette.base, Rgb::new(255, 80, 100));
//!
//! // Round-trips through the atomic cell encoding.
//! assert_eq!(CollisionStatus::from_u8(status.as_u8()), status);
//! ```

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEG: f64 = 90.0;

/// Constant added to the camera's vertical position to get displayed altitude.
pub const GROUND_OFFSET: f64 = 1.49;

/// Overlay alpha at or below which a frame issues no draw operations.
pub const VISIBILITY_THRESHOLD: f64 = 0.01;

/// The horizon is only drawn inside `[-margin, height + margin]`.
pub const HORIZON_CULL_MARGIN: f64 = 100.0;

/// Vertical velocity magnitude at which the climb indicator reaches the track end.
pub const CLIMB_CLAMP: f64 = 0.5;

/// Multiplier applied to vertical velocity for the vertical speed readout.
pub const VERTICAL_SPEED_SCALE: f64 = 10.0;

/// Default display refresh rate in Hz.
pub const DEFAULT_REFRESH_HZ: u32 = 60;

/// Half of the field of view, in radians.
pub fn half_fov_radians() -> f64 {
    (FIELD_OF_VIEW_DEG / 2.0).to_radians()
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Flight-safety state reported by the collision subsystem.
///
/// - **Nominal**: nothing nearby
/// - **Approaching**: an obstacle is inside the warning radius
/// - **Colliding**: contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionStatus {
    #[default]
    Nominal,
    Approaching,
    Colliding,
}

impl CollisionStatus {
    /// Parse a status from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_hud_types::CollisionStatus;
    ///
    /// assert_eq!(CollisionStatus::from_str("Nominal"), Some(CollisionStatus::Nominal));
    /// assert_eq!(CollisionStatus::from_str("APPROACHING"), Some(CollisionStatus::Approaching));
    /// assert_eq!(CollisionStatus::from_str("sideways"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nominal" => Some(CollisionStatus::Nominal),
            "approaching" => Some(CollisionStatus::Approaching),
            "colliding" => Some(CollisionStatus::Colliding),
            _ => None,
        }
    }

    /// Stable encoding used by the lock-free status cell.
    pub const fn as_u8(self) -> u8 {
        match self {
            CollisionStatus::Nominal => 0,
            CollisionStatus::Approaching => 1,
            CollisionStatus::Colliding => 2,
        }
    }

    /// Decode a cell value. Unknown codes read as `Nominal`.
    pub const fn from_u8(v: u8) -> Self {
        match v {
            1 => CollisionStatus::Approaching,
            2 => CollisionStatus::Colliding,
            _ => CollisionStatus::Nominal,
        }
    }

    /// Next status in display order, wrapping. Used by the demo host.
    pub const fn cycle(self) -> Self {
        match self {
            CollisionStatus::Nominal => CollisionStatus::Approaching,
            CollisionStatus::Approaching => CollisionStatus::Colliding,
            CollisionStatus::Colliding => CollisionStatus::Nominal,
        }
    }
}

/// Base and glow colors for one collision status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    pub base: Rgb,
    pub glow: Rgb,
}

impl Palette {
    pub const NOMINAL: Palette = Palette {
        base: Rgb::new(120, 200, 255),
        glow: Rgb::new(180, 150, 255),
    };

    pub const APPROACHING: Palette = Palette {
        base: Rgb::new(255, 180, 80),
        glow: Rgb::new(255, 220, 100),
    };

    pub const COLLIDING: Palette = Palette {
        base: Rgb::new(255, 80, 100),
        glow: Rgb::new(255, 120, 140),
    };

    pub const fn for_status(status: CollisionStatus) -> Self {
        match status {
            CollisionStatus::Nominal => Palette::NOMINAL,
            CollisionStatus::Approaching => Palette::APPROACHING,
            CollisionStatus::Colliding => Palette::COLLIDING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_pairs_match_status() {
        let n = Palette::for_status(CollisionStatus::Nominal);
        assert_eq!(n.base, Rgb::new(120, 200, 255));
        assert_eq!(n.glow, Rgb::new(180, 150, 255));

        let a = Palette::for_status(CollisionStatus::Approaching);
        assert_eq!(a.base, Rgb::new(255, 180, 80));
        assert_eq!(a.glow, Rgb::new(255, 220, 100));

        let c = Palette::for_status(CollisionStatus::Colliding);
        assert_eq!(c.base, Rgb::new(255, 80, 100));
        assert_eq!(c.glow, Rgb::new(255, 120, 140));
    }

    #[test]
    fn status_cell_encoding_is_stable() {
        for s in [
            CollisionStatus::Nominal,
            CollisionStatus::Approaching,
            CollisionStatus::Colliding,
        ] {
            assert_eq!(CollisionStatus::from_u8(s.as_u8()), s);
        }
        assert_eq!(CollisionStatus::from_u8(200), CollisionStatus::Nominal);
    }

    #[test]
    fn cycle_visits_every_status() {
        let s = CollisionStatus::Nominal;
        assert_eq!(s.cycle(), CollisionStatus::Approaching);
        assert_eq!(s.cycle().cycle(), CollisionStatus::Colliding);
        assert_eq!(s.cycle().cycle().cycle(), CollisionStatus::Nominal);
    }

    #[test]
    fn half_fov_is_quarter_turn_half() {
        assert!((half_fov_radians() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }
}

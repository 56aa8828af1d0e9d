//! State snapshot module - lock-free access to externally-owned flight state
//!
//! The simulation, the collision subsystem and the host UI each publish their
//! latest values into [`FlightState`]. The overlay reads them back once per
//! display refresh through [`SnapshotSource`]:
//!
//! - **Lock-free**: every field is its own atomic cell, loaded with relaxed ordering
//! - **Last write wins**: no buffering, no interpolation
//! - **Read-only consumer**: nothing in the overlay writes back
//!
//! Two fields read in the same frame may belong to different producer ticks
//! (new pitch with old yaw). That is accepted.
//!
//! # Module Structure
//!
//! - [`cell`]: `F64Cell`, `FlagCell`, `StatusCell`
//! - [`state`]: the shared [`FlightState`] record and the [`SnapshotSource`] trait
//! - [`snapshot`]: the per-frame [`HudSnapshot`] and its derived values
//!
//! # Example
//!
//! ```
//! use flight_hud_core::{FlightState, SnapshotSource};
//!
//! let state = FlightState::shared();
//! state.set_position([0.0, 0.0, 0.0]);
//! state.set_velocity([0.0, 0.2, 0.0]);
//!
//! let snap = state.read();
//! assert!((snap.altitude() - 1.49).abs() < 1e-9);
//! assert!((snap.vertical_speed_display() - 2.0).abs() < 1e-9);
//! assert!((snap.climb_fraction() - 0.4).abs() < 1e-9);
//! ```

pub mod cell;
pub mod snapshot;
pub mod state;

pub use flight_hud_types as types;

pub use cell::{F64Cell, FlagCell, StatusCell};
pub use snapshot::HudSnapshot;
pub use state::{FlightState, SnapshotSource};

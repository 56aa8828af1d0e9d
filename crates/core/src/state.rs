use std::sync::Arc;

use crate::cell::{F64Cell, FlagCell, StatusCell};
use crate::snapshot::HudSnapshot;
use crate::types::CollisionStatus;

/// Externally-owned simulation and UI state, one lock-free cell per field.
///
/// Producers (simulation step, collision subsystem, host UI) write through
/// `&self`; share it as `Arc<FlightState>`. The overlay only ever reads.
#[derive(Debug, Default)]
pub struct FlightState {
    pitch: F64Cell,
    yaw: F64Cell,
    position: [F64Cell; 3],
    velocity: [F64Cell; 3],
    collision: StatusCell,
    hud_enabled: FlagCell,
    transition: F64Cell,
}

impl FlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_orientation(&self, pitch: f64, yaw: f64) {
        self.pitch.store(pitch);
        self.yaw.store(yaw);
    }

    pub fn set_position(&self, position: [f64; 3]) {
        for (cell, v) in self.position.iter().zip(position) {
            cell.store(v);
        }
    }

    pub fn set_velocity(&self, velocity: [f64; 3]) {
        for (cell, v) in self.velocity.iter().zip(velocity) {
            cell.store(v);
        }
    }

    pub fn set_collision(&self, status: CollisionStatus) {
        self.collision.store(status);
    }

    pub fn collision(&self) -> CollisionStatus {
        self.collision.load()
    }

    pub fn set_hud_enabled(&self, enabled: bool) {
        self.hud_enabled.store(enabled);
    }

    pub fn hud_enabled(&self) -> bool {
        self.hud_enabled.load()
    }

    /// Flip the HUD flag, returning the new value.
    pub fn toggle_hud(&self) -> bool {
        self.hud_enabled.toggle()
    }

    pub fn set_transition(&self, factor: f64) {
        self.transition.store(factor);
    }

    pub fn transition(&self) -> f64 {
        self.transition.load()
    }
}

/// Read-only access to the latest state.
///
/// Implementations return whatever the producers wrote last: no buffering,
/// no interpolation.
pub trait SnapshotSource {
    fn read(&self) -> HudSnapshot;
}

impl SnapshotSource for FlightState {
    fn read(&self) -> HudSnapshot {
        HudSnapshot {
            pitch: self.pitch.load(),
            yaw: self.yaw.load(),
            position: [
                self.position[0].load(),
                self.position[1].load(),
                self.position[2].load(),
            ],
            velocity: [
                self.velocity[0].load(),
                self.velocity[1].load(),
                self.velocity[2].load(),
            ],
            collision: self.collision.load(),
            hud_enabled: self.hud_enabled.load(),
            transition: self.transition.load(),
        }
    }
}

/// A fixed snapshot is its own source.
impl SnapshotSource for HudSnapshot {
    fn read(&self) -> HudSnapshot {
        *self
    }
}

impl<T: SnapshotSource + ?Sized> SnapshotSource for Arc<T> {
    fn read(&self) -> HudSnapshot {
        (**self).read()
    }
}

impl<T: SnapshotSource + ?Sized> SnapshotSource for &T {
    fn read(&self) -> HudSnapshot {
        (**self).read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_returns_latest_writes() {
        let st = FlightState::new();
        st.set_orientation(0.1, -0.2);
        st.set_position([1.0, 2.0, 3.0]);
        st.set_velocity([0.0, -0.3, 4.0]);
        st.set_collision(CollisionStatus::Approaching);
        st.set_hud_enabled(true);
        st.set_transition(0.25);

        let s = st.read();
        assert_eq!(s.pitch, 0.1);
        assert_eq!(s.yaw, -0.2);
        assert_eq!(s.position, [1.0, 2.0, 3.0]);
        assert_eq!(s.velocity, [0.0, -0.3, 4.0]);
        assert_eq!(s.collision, CollisionStatus::Approaching);
        assert!(s.hud_enabled);
        assert_eq!(s.transition, 0.25);

        st.set_position([1.0, 9.0, 3.0]);
        assert_eq!(st.read().position[1], 9.0);
    }

    #[test]
    fn uninitialized_state_reads_as_zero() {
        let s = FlightState::new().read();
        assert_eq!(s, HudSnapshot::default());
    }

    #[test]
    fn shared_state_is_visible_across_threads() {
        let st = FlightState::shared();
        let writer = Arc::clone(&st);
        std::thread::spawn(move || {
            writer.set_velocity([0.0, 0.4, 0.0]);
            writer.set_collision(CollisionStatus::Colliding);
        })
        .join()
        .unwrap();

        let s = st.read();
        assert_eq!(s.velocity[1], 0.4);
        assert_eq!(s.collision, CollisionStatus::Colliding);
    }
}

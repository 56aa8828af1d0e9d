//! Lock-free snapshot cells.
//!
//! Each cell has one writer (the simulation step or host UI) and any number of
//! readers. Reads and writes are single relaxed atomic operations: a reader
//! always sees the most recently published value of *that* cell, but two cells
//! read back to back may come from different producer ticks.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};

use crate::types::CollisionStatus;

/// An `f64` stored as its bit pattern in an `AtomicU64`.
#[derive(Debug, Default)]
pub struct F64Cell {
    bits: AtomicU64,
}

impl F64Cell {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    #[inline(always)]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    #[inline(always)]
    pub fn store(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// A boolean flag cell.
#[derive(Debug, Default)]
pub struct FlagCell {
    value: AtomicBool,
}

impl FlagCell {
    pub fn new(value: bool) -> Self {
        Self {
            value: AtomicBool::new(value),
        }
    }

    #[inline(always)]
    pub fn load(&self) -> bool {
        self.value.load(Ordering::Relaxed)
    }

    #[inline(always)]
    pub fn store(&self, value: bool) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        !self.value.fetch_xor(true, Ordering::Relaxed)
    }
}

/// Collision status encoded as a `u8`.
#[derive(Debug, Default)]
pub struct StatusCell {
    code: AtomicU8,
}

impl StatusCell {
    pub fn new(status: CollisionStatus) -> Self {
        Self {
            code: AtomicU8::new(status.as_u8()),
        }
    }

    #[inline(always)]
    pub fn load(&self) -> CollisionStatus {
        CollisionStatus::from_u8(self.code.load(Ordering::Relaxed))
    }

    #[inline(always)]
    pub fn store(&self, status: CollisionStatus) {
        self.code.store(status.as_u8(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f64_cell_preserves_exact_bits() {
        let c = F64Cell::new(0.0);
        c.store(-1.25e-7);
        assert_eq!(c.load(), -1.25e-7);
        c.store(f64::NAN);
        assert!(c.load().is_nan());
    }

    #[test]
    fn flag_toggle_returns_new_value() {
        let f = FlagCell::new(false);
        assert!(f.toggle());
        assert!(f.load());
        assert!(!f.toggle());
        assert!(!f.load());
    }

    #[test]
    fn status_cell_last_write_wins() {
        let s = StatusCell::default();
        assert_eq!(s.load(), CollisionStatus::Nominal);
        s.store(CollisionStatus::Approaching);
        s.store(CollisionStatus::Colliding);
        assert_eq!(s.load(), CollisionStatus::Colliding);
    }
}

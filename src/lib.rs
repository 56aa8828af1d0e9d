//! Flight HUD (workspace facade crate).
//!
//! Re-exports the overlay's crates under one roof:
//! `flight_hud::{core, engine, term, types}`. The implementation lives in the
//! dedicated crates under `crates/`.

pub use flight_hud_core as core;
pub use flight_hud_engine as engine;
pub use flight_hud_term as term;
pub use flight_hud_types as types;

//! Overlay drawing module.
//!
//! A small, HUD-oriented rendering layer. The instrument renderer turns a
//! state snapshot into a flat list of draw commands; a software rasterizer
//! executes that list onto a pixel surface; a presenter can flush the surface
//! to a terminal.
//!
//! Goals:
//! - Keep the instrument logic pure and testable (commands, not pixels)
//! - No allocation per frame once the surface is sized
//! - Degrade to a blank frame instead of failing the host

pub mod draw;
pub mod font;
pub mod hud_view;
pub mod raster;
pub mod renderer;
pub mod surface;

pub use flight_hud_core as core;
pub use flight_hud_types as types;

pub use draw::{DrawCmd, DrawList, Paint, Point, Text, TextAlign};
pub use hud_view::{
    altitude_text, heading_text, horizon_visible, horizon_y, palette_of, vertical_speed_text,
    HudLayout, HudView, Viewport, READOUT_OVERFLOW,
};
pub use renderer::{
    encode_diff_into, encode_full_into, viewport_for_terminal, TerminalPresenter,
    TerminalSurfaceProvider,
};
pub use surface::{
    HeapSurfaceProvider, Pixel, PixelSurface, SurfaceError, SurfaceManager, SurfaceProvider,
};

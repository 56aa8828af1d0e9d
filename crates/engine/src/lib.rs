//! Overlay driver module.
//!
//! Ties the pieces together: a [`HudOverlay`] reads the latest flight state,
//! keeps its drawing surface sized to the viewport, and redraws once per
//! display refresh while enabled.
//!
//! Scheduling is single-threaded and cooperative. The host owns a
//! [`RefreshScheduler`] (a vsync callback, or the tokio [`FramePacer`]) and
//! calls [`HudOverlay::on_refresh`] with each handle it fires. Enabling and
//! disabling map to [`HudOverlay::start`] / [`HudOverlay::stop`].
//!
//! # Example
//!
//! ```
//! use flight_hud_core::FlightState;
//! use flight_hud_engine::{FrameOutcome, HudOverlay, RefreshHandle, RefreshScheduler};
//! use flight_hud_term::{HeapSurfaceProvider, HudView, Viewport};
//!
//! #[derive(Default)]
//! struct Manual(u64);
//!
//! impl RefreshScheduler for Manual {
//!     fn request_refresh(&mut self) -> RefreshHandle {
//!         self.0 += 1;
//!         RefreshHandle(self.0)
//!     }
//!     fn cancel_refresh(&mut self, _: RefreshHandle) {}
//! }
//!
//! let state = FlightState::shared();
//! state.set_hud_enabled(true);
//!
//! let mut sched = Manual::default();
//! let mut overlay = HudOverlay::new(state.clone(), HeapSurfaceProvider::default(), HudView::default());
//! let vp = Viewport::new(160, 100);
//!
//! assert!(overlay.start(vp, &mut sched));
//! let h = overlay.pending().unwrap();
//! assert!(matches!(overlay.on_refresh(h, vp, &mut sched), FrameOutcome::Drawn { .. }));
//! assert_eq!(overlay.frames_drawn(), 2);
//! ```

pub mod config;
pub mod pacer;
pub mod render_loop;

pub use flight_hud_core as core;
pub use flight_hud_term as term;
pub use flight_hud_types as types;

pub use config::OverlayConfig;
pub use pacer::FramePacer;
pub use render_loop::{
    FrameOutcome, HudOverlay, LoopState, RefreshHandle, RefreshScheduler, RenderLoop,
};

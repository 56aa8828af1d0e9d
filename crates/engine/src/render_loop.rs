//! Render loop driver.
//!
//! ```text
//! Idle --start (surface available)--> Running --stop--> Idle
//! ```
//!
//! While running exactly one refresh is pending at any time. The host's
//! refresh primitive hands that handle back through
//! [`HudOverlay::on_refresh`]; any other handle (a callback that raced a
//! `stop`, or one from an earlier run) is ignored, so a stop/start cycle can
//! never leave two loops drawing.

use log::debug;

use crate::core::{HudSnapshot, SnapshotSource};
use crate::term::{
    raster, DrawList, HudView, PixelSurface, SurfaceManager, SurfaceProvider, Viewport,
};

/// Token for one scheduled display refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshHandle(pub u64);

/// The platform's "call me at the next display refresh" primitive.
pub trait RefreshScheduler {
    fn request_refresh(&mut self) -> RefreshHandle;
    /// Cancel a pending request. Cancelling an unknown handle is a no-op.
    fn cancel_refresh(&mut self, handle: RefreshHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Result of one refresh callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Surface cleared and `commands` draw operations executed.
    Drawn { commands: usize },
    /// Surface cleared; the overlay is faded out so nothing was drawn.
    Hidden,
    /// Viewport exceeds the surface provider's limit; surface cleared, nothing drawn.
    Oversized,
    /// The HUD flag was off when the refresh fired; the loop went idle.
    Stopped,
    /// Handle was stale or the loop is idle; nothing touched.
    Skipped,
}

/// The bare state machine, independent of what a frame does.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    pending: Option<RefreshHandle>,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn pending(&self) -> Option<RefreshHandle> {
        self.pending
    }

    /// Enter `Running`. Returns `false` if it already was.
    pub fn enter(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = LoopState::Running;
        true
    }

    /// Schedule the next refresh, replacing any pending one.
    pub fn schedule(&mut self, scheduler: &mut impl RefreshScheduler) {
        if let Some(old) = self.pending.take() {
            scheduler.cancel_refresh(old);
        }
        self.pending = Some(scheduler.request_refresh());
    }

    /// Consume `handle` if it is the pending one.
    pub fn accept(&mut self, handle: RefreshHandle) -> bool {
        if !self.is_running() || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Enter `Idle`, cancelling the pending refresh. Returns `false` if already idle.
    pub fn exit(&mut self, scheduler: &mut impl RefreshScheduler) -> bool {
        if let Some(h) = self.pending.take() {
            scheduler.cancel_refresh(h);
        }
        if !self.is_running() {
            return false;
        }
        self.state = LoopState::Idle;
        true
    }
}

/// The overlay: snapshot source, drawing surface, instrument renderer and loop.
pub struct HudOverlay<S, P> {
    source: S,
    surfaces: SurfaceManager<P>,
    view: HudView,
    commands: DrawList,
    lifecycle: RenderLoop,
    frames_drawn: u64,
}

impl<S: SnapshotSource, P: SurfaceProvider> HudOverlay<S, P> {
    pub fn new(source: S, provider: P, view: HudView) -> Self {
        Self {
            source,
            surfaces: SurfaceManager::new(provider),
            view,
            commands: DrawList::new(),
            lifecycle: RenderLoop::new(),
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.lifecycle.state()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    pub fn pending(&self) -> Option<RefreshHandle> {
        self.lifecycle.pending()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn surface(&self) -> Option<&PixelSurface> {
        self.surfaces.surface()
    }

    pub fn surfaces(&self) -> &SurfaceManager<P> {
        &self.surfaces
    }

    /// Commands issued by the most recent frame.
    pub fn last_commands(&self) -> &DrawList {
        &self.commands
    }

    /// Start the loop: draw once now, then schedule the next refresh.
    ///
    /// Idempotent while running. Stays idle if no surface can be acquired.
    pub fn start(&mut self, viewport: Viewport, scheduler: &mut impl RefreshScheduler) -> bool {
        if self.lifecycle.is_running() {
            return true;
        }
        if !self.surfaces.acquire(viewport.width, viewport.height) {
            return false;
        }
        self.lifecycle.enter();
        debug!("hud overlay running");
        let snap = self.source.read();
        self.draw_frame(&snap, viewport);
        self.lifecycle.schedule(scheduler);
        true
    }

    /// Stop the loop and cancel the pending refresh. No draw happens after this
    /// returns until the next `start`.
    ///
    /// Also forgets a failed surface acquisition, so the next `start` tries
    /// once more.
    pub fn stop(&mut self, scheduler: &mut impl RefreshScheduler) {
        if self.lifecycle.exit(scheduler) {
            debug!("hud overlay idle after {} frames", self.frames_drawn);
        }
        self.surfaces.reset_failure();
    }

    /// Reconcile the loop with the host's HUD-enabled flag.
    pub fn sync_enabled(
        &mut self,
        viewport: Viewport,
        scheduler: &mut impl RefreshScheduler,
    ) -> LoopState {
        let enabled = self.source.read().hud_enabled;
        match (enabled, self.lifecycle.state()) {
            (true, LoopState::Idle) => {
                self.start(viewport, scheduler);
            }
            (false, _) => self.stop(scheduler),
            _ => {}
        }
        self.lifecycle.state()
    }

    /// Display refresh callback.
    ///
    /// Stops the loop instead of drawing when the HUD flag reads false, so a
    /// host that never calls `sync_enabled` still cannot keep a disabled
    /// overlay running.
    pub fn on_refresh(
        &mut self,
        handle: RefreshHandle,
        viewport: Viewport,
        scheduler: &mut impl RefreshScheduler,
    ) -> FrameOutcome {
        if !self.lifecycle.accept(handle) {
            return FrameOutcome::Skipped;
        }
        let snap = self.source.read();
        if !snap.hud_enabled {
            self.surfaces.clear();
            self.commands.clear();
            self.stop(scheduler);
            return FrameOutcome::Stopped;
        }
        let outcome = self.draw_frame(&snap, viewport);
        self.lifecycle.schedule(scheduler);
        outcome
    }

    fn draw_frame(&mut self, snap: &HudSnapshot, viewport: Viewport) -> FrameOutcome {
        if !self.surfaces.fits(viewport.width, viewport.height) {
            self.surfaces.ensure_size(viewport.width, viewport.height);
            self.surfaces.clear();
            self.commands.clear();
            return FrameOutcome::Oversized;
        }
        self.surfaces.ensure_size(viewport.width, viewport.height);
        self.surfaces.clear();
        let Some(surface) = self.surfaces.surface_mut() else {
            return FrameOutcome::Skipped;
        };

        self.view.render_into(snap, viewport, &mut self.commands);
        raster::execute(&self.commands, surface);
        self.frames_drawn += 1;

        if self.commands.is_empty() {
            FrameOutcome::Hidden
        } else {
            FrameOutcome::Drawn {
                commands: self.commands.len(),
            }
        }
    }
}

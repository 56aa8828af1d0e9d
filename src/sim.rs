//! Toy flight producer for the demo host.
//!
//! Runs on its own thread at a rate unrelated to the display, writing straight
//! into the shared [`FlightState`] cells, the way a physics step would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::info;

use flight_hud::core::FlightState;

const STEP: Duration = Duration::from_millis(8);

pub struct SimProducer {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SimProducer {
    pub fn spawn(state: Arc<FlightState>) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = thread::spawn(move || {
            info!("simulation producer started");
            let start = Instant::now();
            let mut altitude = 0.0f64;
            let mut last = start;
            while flag.load(Ordering::Relaxed) {
                let now = Instant::now();
                let dt = now.duration_since(last).as_secs_f64();
                last = now;
                let t = now.duration_since(start).as_secs_f64();

                // Lazy climbing turn with a porpoise in pitch.
                let pitch = 0.35 * (t * 0.4).sin();
                let yaw = -0.15 * t;
                let climb = 0.8 * (t * 0.25).sin();
                altitude += climb * dt;

                state.set_orientation(pitch, yaw);
                state.set_velocity([yaw.cos() * 3.0, climb, yaw.sin() * 3.0]);
                state.set_position([0.0, altitude, 0.0]);

                thread::sleep(STEP);
            }
            info!("simulation producer stopped");
        });
        Self {
            running,
            handle: Some(handle),
        }
    }
}

impl Drop for SimProducer {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

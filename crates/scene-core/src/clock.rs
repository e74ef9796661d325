use instant::Instant;
use std::time::Duration;

/// Monotonic scene clock started at scene construction.
///
/// `instant::Instant` maps to `performance.now()` on wasm and to
/// `std::time::Instant` elsewhere.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::start()
    }
}

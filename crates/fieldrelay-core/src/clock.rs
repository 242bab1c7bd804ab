use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use web_time::Instant;

/// Time source for deferred surface work. Platform installs `SystemClock`;
/// tests drive a `TestClock`.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock you can drive deterministically. Clones share the same time.
#[derive(Clone)]
pub struct TestClock {
    t: Arc<Mutex<Instant>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            t: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut t = self.t.lock();
        *t += by;
    }

    pub fn set(&self, t: Instant) {
        *self.t.lock() = t;
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        *self.t.lock()
    }
}

use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// The journal's single source of "now".
///
/// Id generation and export metadata both read the current time; routing
/// those reads through this trait lets tests supply deterministic values.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that returns whatever it was last told. Intended for tests and
/// deterministic replay.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock lock poisoned") = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// Issues store-unique, monotonically increasing ids.
///
/// Ids are the clock's millisecond timestamp, bumped past the last issued
/// value when two entities are created within the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the generator so future ids never collide with already-loaded
    /// entities.
    pub fn observe(&mut self, id: u64) {
        if id > self.last {
            self.last = id;
        }
    }

    pub fn next(&mut self, clock: &dyn Clock) -> u64 {
        let millis = clock.now().timestamp_millis().max(0) as u64;
        let id = millis.max(self.last + 1);
        self.last = id;
        id
    }
}

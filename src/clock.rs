use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Current wall-clock time in the zone the app is configured for. Injected
/// wherever time is read so schedule matching can be driven from tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// Clock that only moves when told to.
#[cfg(test)]
#[derive(Clone)]
pub struct ManualClock {
    now: std::sync::Arc<std::sync::RwLock<NaiveDateTime>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: std::sync::Arc::new(std::sync::RwLock::new(start)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.write().unwrap() = now;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.read().unwrap()
    }
}

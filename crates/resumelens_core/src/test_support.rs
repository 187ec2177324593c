//! crates/resumelens_core/src/test_support.rs
//!
//! Port doubles shared by the unit tests. All timing doubles sit on top of
//! tokio's paused test clock, so tests advance virtual time instead of
//! waiting out real delays.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

use crate::domain::UserIdentity;
use crate::ports::{Clock, PortError, PortResult, RandomSource, SessionRepository};

/// Clock backed by tokio's (paused) timer. `now` reports a fixed epoch plus
/// the virtual time elapsed since construction; `frozen` pins `now` to the
/// epoch while sleeps still advance normally.
pub struct VirtualClock {
    epoch_ms: i64,
    started: tokio::time::Instant,
    frozen: bool,
}

impl VirtualClock {
    /// Must be called from inside a tokio runtime.
    pub fn new(epoch_ms: i64) -> Self {
        Self {
            epoch_ms,
            started: tokio::time::Instant::now(),
            frozen: false,
        }
    }

    pub fn frozen(epoch_ms: i64) -> Self {
        Self {
            frozen: true,
            ..Self::new(epoch_ms)
        }
    }
}

#[async_trait]
impl Clock for VirtualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut ms = self.epoch_ms;
        if !self.frozen {
            ms += self.started.elapsed().as_millis() as i64;
        }
        Utc.timestamp_millis_opt(ms).single().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// In-memory session repository with switches for the failure modes the
/// store has to shrug off.
#[derive(Default)]
pub struct MemoryRepo {
    stored: Mutex<Option<UserIdentity>>,
    fail_load: bool,
    fail_writes: bool,
    save_delay: Option<(String, Duration)>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: UserIdentity) -> Self {
        let repo = Self::new();
        *repo.stored.lock() = Some(identity);
        repo
    }

    /// Every load reports a corrupt entry.
    pub fn corrupted() -> Self {
        Self {
            fail_load: true,
            ..Self::new()
        }
    }

    /// Every save and clear fails.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// Saves of the identity with the given email stall for `delay` of
    /// virtual time before landing.
    pub fn stalling_save(email: &str, delay: Duration) -> Self {
        Self {
            save_delay: Some((email.to_string(), delay)),
            ..Self::new()
        }
    }

    pub fn stored(&self) -> Option<UserIdentity> {
        self.stored.lock().clone()
    }
}

#[async_trait]
impl SessionRepository for MemoryRepo {
    async fn load(&self) -> PortResult<Option<UserIdentity>> {
        if self.fail_load {
            return Err(PortError::Corrupt("stored session is unreadable".to_string()));
        }
        Ok(self.stored.lock().clone())
    }

    async fn save(&self, identity: &UserIdentity) -> PortResult<()> {
        if let Some((email, delay)) = &self.save_delay {
            if identity.email == *email {
                tokio::time::sleep(*delay).await;
            }
        }
        if self.fail_writes {
            return Err(PortError::Unexpected("write refused".to_string()));
        }
        *self.stored.lock() = Some(identity.clone());
        Ok(())
    }

    async fn clear(&self) -> PortResult<()> {
        if self.fail_writes {
            return Err(PortError::Unexpected("write refused".to_string()));
        }
        *self.stored.lock() = None;
        Ok(())
    }
}

/// Deterministic random source. Range draws return `value` clamped into the
/// requested bounds; index samples replay the given list.
pub struct FixedRandom {
    value: u32,
    indices: Vec<usize>,
}

impl FixedRandom {
    pub fn new(value: u32, indices: Vec<usize>) -> Self {
        Self { value, indices }
    }
}

impl RandomSource for FixedRandom {
    fn int_in_range(&self, lo: u32, hi: u32) -> u32 {
        self.value.clamp(lo, hi)
    }

    fn sample_indices(&self, len: usize, count: usize) -> Vec<usize> {
        self.indices
            .iter()
            .copied()
            .filter(|i| *i < len)
            .take(count.min(len))
            .collect()
    }
}

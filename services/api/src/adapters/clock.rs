//! services/api/src/adapters/clock.rs
//!
//! The production implementation of the `Clock` port: wall-clock time from
//! `chrono` and delays from the tokio timer.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resumelens_core::ports::Clock;

/// A clock adapter that implements the `Clock` port.
#[derive(Clone)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

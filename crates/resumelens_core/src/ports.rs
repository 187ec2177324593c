//! crates/resumelens_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of how sessions are persisted, how time passes, and
//! where randomness comes from. Production adapters live in `services/api`;
//! tests substitute deterministic implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::domain::UserIdentity;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external facilities (e.g.,
/// the filesystem behind the session repository).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// A persisted payload exists but cannot be decoded.
    #[error("corrupt stored session: {0}")]
    Corrupt(String),
    #[error("an unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Durable storage for the single persisted session document.
///
/// The store holds at most one serialized identity. Absence of the entry is
/// the expected anonymous state and must be reported as `Ok(None)`, never as
/// an error; `PortError::Corrupt` is reserved for an entry that exists but
/// does not decode.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn load(&self) -> PortResult<Option<UserIdentity>>;

    async fn save(&self, identity: &UserIdentity) -> PortResult<()>;

    async fn clear(&self) -> PortResult<()>;
}

/// Injectable time source: wall-clock reads plus the delay used to simulate
/// latency. The production adapter rides the tokio timer; test adapters drive
/// virtual time so nothing actually sleeps.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Suspends the calling task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Injectable randomness for the mock analysis, kept behind a trait so tests
/// can pin exact scores, keyword subsets, and tip indices instead of
/// asserting only on ranges.
pub trait RandomSource: Send + Sync {
    /// Uniform draw from the inclusive range `lo..=hi`.
    fn int_in_range(&self, lo: u32, hi: u32) -> u32;

    /// `count` distinct indices drawn without replacement from `0..len`,
    /// returned in draw order. Implementations clamp `count` to `len`.
    fn sample_indices(&self, len: usize, count: usize) -> Vec<usize>;
}

//! services/api/src/adapters/session_file.rs
//!
//! This module contains the session persistence adapter, which is the concrete
//! implementation of the `SessionRepository` port from the `core` crate. It
//! stores the single persisted identity as a small JSON file on local disk,
//! the server-side stand-in for a browser's local storage entry.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use resumelens_core::domain::UserIdentity;
use resumelens_core::ports::{PortError, PortResult, SessionRepository};
use serde::{Deserialize, Serialize};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A file-backed adapter that implements the `SessionRepository` port.
#[derive(Clone)]
pub struct SessionFileStore {
    path: PathBuf,
}

impl SessionFileStore {
    /// Creates a new `SessionFileStore` persisting to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

//=========================================================================================
// "Impure" Persistence Record Structs
//=========================================================================================

#[derive(Serialize, Deserialize)]
struct IdentityRecord {
    name: String,
    email: String,
}

impl IdentityRecord {
    fn to_domain(self) -> UserIdentity {
        UserIdentity {
            name: self.name,
            email: self.email,
        }
    }

    fn from_domain(identity: &UserIdentity) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.clone(),
        }
    }
}

//=========================================================================================
// SessionRepository Implementation
//=========================================================================================

#[async_trait]
impl SessionRepository for SessionFileStore {
    async fn load(&self) -> PortResult<Option<UserIdentity>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // A missing file just means nobody has logged in yet.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };

        let record: IdentityRecord = serde_json::from_slice(&bytes)
            .map_err(|e| PortError::Corrupt(format!("stored session is not valid JSON: {}", e)))?;

        Ok(Some(record.to_domain()))
    }

    async fn save(&self, identity: &UserIdentity) -> PortResult<()> {
        let record = IdentityRecord::from_domain(identity);
        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn clear(&self) -> PortResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            // Clearing an absent entry is a no-op, not a failure.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PortError::Unexpected(e.to_string())),
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================

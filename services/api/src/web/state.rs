//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use resumelens_core::{AnalysisWorkflow, SessionStore};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub sessions: SessionStore,
    pub workflow: AnalysisWorkflow,
    pub config: Arc<Config>,
}

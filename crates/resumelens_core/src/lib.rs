pub mod domain;
pub mod ports;
pub mod session;
pub mod workflow;

#[cfg(test)]
mod test_support;

pub use domain::{Provider, ResumeRecord, ResumeUpload, UnknownProvider, UserIdentity};
pub use ports::{Clock, PortError, PortResult, RandomSource, SessionRepository};
pub use session::{SessionSnapshot, SessionStore};
pub use workflow::{AnalysisError, AnalysisWorkflow, WorkflowSnapshot};

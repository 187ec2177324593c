//! crates/resumelens_core/src/workflow.rs
//!
//! The resume analysis workflow: accepts one upload at a time, fabricates a
//! scored analysis after a fixed delay, and keeps the resulting records
//! newest-first with the latest one selected. Scores, keywords, and tips all
//! come from the `RandomSource` port; no file content is ever inspected.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::domain::{ResumeRecord, ResumeUpload};
use crate::ports::{Clock, RandomSource};

/// Simulated processing time for one analysis.
pub const ANALYSIS_LATENCY: Duration = Duration::from_millis(2500);

/// Inclusive score range produced by an analysis.
pub const SCORE_MIN: u32 = 65;
pub const SCORE_MAX: u32 = 95;

/// Number of distinct keywords reported per analysis.
pub const KEYWORDS_PER_ANALYSIS: usize = 5;

/// Freshness label stamped on a record the moment it is produced.
pub const JUST_NOW: &str = "Just now";

/// File extensions the intake accepts, lowercase.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Pool the per-analysis keyword sample is drawn from.
pub const KEYWORD_VOCABULARY: [&str; 13] = [
    "JavaScript",
    "Python",
    "AWS",
    "Agile Methodologies",
    "Project Management",
    "Data Analysis",
    "SQL",
    "Digital Marketing",
    "SEO",
    "Leadership",
    "Communication",
    "Problem Solving",
    "Teamwork",
];

/// Canned improvement tips; each analysis picks one at random.
pub const IMPROVEMENT_TIPS: [&str; 5] = [
    "Your summary section is strong, but could be more concise. Try to limit it to 3-4 impactful sentences.",
    "Quantify your achievements with numbers to demonstrate your impact. For example, \"Increased efficiency by 15%\".",
    "Ensure your skills section includes both hard and soft skills relevant to the job description.",
    "The resume format is clean, but consider using a more modern template to stand out.",
    "Add a \"Projects\" section to showcase your practical experience and specific contributions.",
];

//=========================================================================================
// Errors
//=========================================================================================

/// Why an analysis request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no file was provided")]
    MissingFile,
    #[error("file name has no extension")]
    MissingExtension,
    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),
    #[error("an analysis is already in progress")]
    AlreadyRunning,
    #[error("analysis failed: {0}")]
    Unexpected(String),
}

//=========================================================================================
// Workflow State
//=========================================================================================

/// A consistent view of the workflow, read under a single lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSnapshot {
    /// Newest first.
    pub records: Vec<ResumeRecord>,
    pub selected_id: Option<i64>,
    pub analyzing: bool,
}

#[derive(Debug)]
struct WorkflowInner {
    records: Vec<ResumeRecord>,
    selected_id: Option<i64>,
    analyzing: bool,
}

impl WorkflowInner {
    /// Ids are epoch milliseconds of the completion instant, bumped past the
    /// current maximum so back-to-back completions under a coarse (or frozen)
    /// clock still come out strictly increasing.
    fn next_record_id(&self, now_ms: i64) -> i64 {
        let max_existing = self.records.iter().map(|r| r.id).max();
        match max_existing {
            Some(max) if max >= now_ms => max + 1,
            _ => now_ms,
        }
    }
}

//=========================================================================================
// AnalysisWorkflow
//=========================================================================================

/// Single-instance analysis state, shared by reference with every consumer.
pub struct AnalysisWorkflow {
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    inner: Arc<Mutex<WorkflowInner>>,
}

impl AnalysisWorkflow {
    /// Creates an empty workflow with nothing analyzed and nothing selected.
    pub fn new(clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self::with_records(clock, random, Vec::new())
    }

    /// Creates a workflow pre-populated with existing records, newest first.
    /// The first record, if any, starts out selected.
    pub fn with_records(
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        records: Vec<ResumeRecord>,
    ) -> Self {
        let selected_id = records.first().map(|r| r.id);
        Self {
            clock,
            random,
            inner: Arc::new(Mutex::new(WorkflowInner {
                records,
                selected_id,
                analyzing: false,
            })),
        }
    }

    /// Submits one upload for analysis.
    ///
    /// Rejected requests (missing file, missing or unsupported extension,
    /// analysis already running) return immediately and leave all state
    /// untouched. An accepted request resolves after [`ANALYSIS_LATENCY`]
    /// with the new record, which by then is prepended to the list and
    /// selected.
    pub async fn request_analysis(
        &self,
        upload: Option<ResumeUpload>,
    ) -> Result<ResumeRecord, AnalysisError> {
        let upload = upload.ok_or(AnalysisError::MissingFile)?;
        let extension = match upload.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
            _ => return Err(AnalysisError::MissingExtension),
        };
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AnalysisError::UnsupportedFormat(extension));
        }

        {
            let mut inner = self.inner.lock();
            if inner.analyzing {
                return Err(AnalysisError::AlreadyRunning);
            }
            inner.analyzing = true;
        }
        info!(file = %upload.file_name, "analysis started");

        let clock = Arc::clone(&self.clock);
        let random = Arc::clone(&self.random);
        let inner = Arc::clone(&self.inner);

        // The delayed tail runs on a spawned task so a dropped caller cannot
        // abort it: an accepted upload always produces its record.
        let task = tokio::spawn(async move {
            clock.sleep(ANALYSIS_LATENCY).await;

            let score = random.int_in_range(SCORE_MIN, SCORE_MAX) as u8;
            let keywords_found: Vec<String> = random
                .sample_indices(KEYWORD_VOCABULARY.len(), KEYWORDS_PER_ANALYSIS)
                .into_iter()
                .map(|i| KEYWORD_VOCABULARY[i].to_string())
                .collect();
            let tip = random.int_in_range(0, IMPROVEMENT_TIPS.len() as u32 - 1) as usize;
            let now_ms = clock.now().timestamp_millis();

            let mut inner = inner.lock();
            let record = ResumeRecord {
                id: inner.next_record_id(now_ms),
                name: upload.file_name,
                score,
                keywords_found,
                improvement_tips: IMPROVEMENT_TIPS[tip].to_string(),
                last_updated: JUST_NOW.to_string(),
            };
            inner.records.insert(0, record.clone());
            inner.selected_id = Some(record.id);
            inner.analyzing = false;
            record
        });

        match task.await {
            Ok(record) => {
                info!(id = record.id, score = record.score, "analysis finished");
                Ok(record)
            }
            Err(e) => {
                error!("analysis task failed: {e}");
                self.inner.lock().analyzing = false;
                Err(AnalysisError::Unexpected(e.to_string()))
            }
        }
    }

    /// Selects an existing record for display. Unknown ids are ignored.
    pub fn select_record(&self, id: i64) {
        let mut inner = self.inner.lock();
        if inner.records.iter().any(|r| r.id == id) {
            inner.selected_id = Some(id);
        } else {
            debug!(id, "ignoring selection of unknown record");
        }
    }

    pub fn records(&self) -> Vec<ResumeRecord> {
        self.inner.lock().records.clone()
    }

    pub fn selected_record(&self) -> Option<ResumeRecord> {
        let inner = self.inner.lock();
        let id = inner.selected_id?;
        inner.records.iter().find(|r| r.id == id).cloned()
    }

    pub fn is_analyzing(&self) -> bool {
        self.inner.lock().analyzing
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        let inner = self.inner.lock();
        WorkflowSnapshot {
            records: inner.records.clone(),
            selected_id: inner.selected_id,
            analyzing: inner.analyzing,
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Outcome of a single stage execution.
///
/// Stages that have nothing to report return [`StageReport::silent`]; the
/// pipeline logs and collects any status message that is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    /// Human-readable progress message for this stage.
    pub status_message: Option<String>,
}

impl StageReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status_message: Some(message.into()),
        }
    }

    pub fn silent() -> Self {
        Self {
            status_message: None,
        }
    }
}

/// A single step of a linear pipeline over the shared state `S`.
///
/// Each stage reads the state accumulated by earlier stages and extends it
/// with its own output. Stages are expected to absorb the failures of any
/// external calls they make; returning an error aborts the whole run.
#[async_trait]
pub trait Stage<S>: Send + Sync {
    /// Unique name for this stage, used in spans and reports.
    fn name(&self) -> &str;

    /// Execute the stage against the shared state.
    async fn run(&self, state: &mut S) -> Result<StageReport>;
}

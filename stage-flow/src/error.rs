use thiserror::Error;

/// Errors surfaced by pipeline execution.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A stage returned an error the pipeline could not absorb.
    #[error("stage execution failed: {0}")]
    StageFailed(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;

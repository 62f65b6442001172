use std::sync::Arc;

use tracing::{Instrument, info};

use crate::{
    error::Result,
    stage::{Stage, StageReport},
};

/// An ordered sequence of stages executed strictly one after another over a
/// single mutable state value.
pub struct Pipeline<S> {
    name: String,
    stages: Vec<Arc<dyn Stage<S>>>,
}

impl<S: Send> Pipeline<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in insertion order, threading `state` through all of
    /// them. Returns the collected per-stage status messages.
    pub async fn run(&self, state: &mut S) -> Result<RunReport> {
        let mut stage_messages = Vec::new();

        for stage in &self.stages {
            let span = tracing::info_span!("stage", pipeline = %self.name, name = %stage.name());
            let report: StageReport = stage.run(state).instrument(span).await?;

            if let Some(message) = report.status_message {
                info!(pipeline = %self.name, stage = %stage.name(), "{message}");
                stage_messages.push((stage.name().to_string(), message));
            }
        }

        Ok(RunReport { stage_messages })
    }
}

/// Status messages collected from a completed pipeline run, in stage order.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stage_messages: Vec<(String, String)>,
}

/// Builder for assembling pipelines.
pub struct PipelineBuilder<S> {
    pipeline: Pipeline<S>,
}

impl<S> PipelineBuilder<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            pipeline: Pipeline {
                name: name.into(),
                stages: Vec::new(),
            },
        }
    }

    pub fn add_stage(mut self, stage: Arc<dyn Stage<S>>) -> Self {
        self.pipeline.stages.push(stage);
        self
    }

    pub fn build(self) -> Pipeline<S> {
        self.pipeline
    }
}

pub mod error;
pub mod pipeline;
pub mod stage;

// Re-export commonly used types
pub use error::{FlowError, Result};
pub use pipeline::{Pipeline, PipelineBuilder, RunReport};
pub use stage::{Stage, StageReport};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    #[derive(Default)]
    struct TestState {
        log: Vec<String>,
    }

    struct AppendStage {
        name: String,
    }

    #[async_trait]
    impl Stage<TestState> for AppendStage {
        fn name(&self) -> &str {
            &self.name
        }

        async fn run(&self, state: &mut TestState) -> Result<StageReport> {
            state.log.push(self.name.clone());
            Ok(StageReport::new(format!("{} done", self.name)))
        }
    }

    struct SilentStage;

    #[async_trait]
    impl Stage<TestState> for SilentStage {
        fn name(&self) -> &str {
            "silent"
        }

        async fn run(&self, state: &mut TestState) -> Result<StageReport> {
            state.log.push("silent".to_string());
            Ok(StageReport::silent())
        }
    }

    struct FailingStage;

    #[async_trait]
    impl Stage<TestState> for FailingStage {
        fn name(&self) -> &str {
            "failing"
        }

        async fn run(&self, _state: &mut TestState) -> Result<StageReport> {
            Err(FlowError::StageFailed("boom".to_string()))
        }
    }

    fn stage(name: &str) -> Arc<dyn Stage<TestState>> {
        Arc::new(AppendStage {
            name: name.to_string(),
        })
    }

    #[tokio::test]
    async fn test_stages_run_in_insertion_order() {
        let pipeline = PipelineBuilder::new("test_pipeline")
            .add_stage(stage("first"))
            .add_stage(stage("second"))
            .add_stage(stage("third"))
            .build();

        let mut state = TestState::default();
        let report = pipeline.run(&mut state).await.unwrap();

        assert_eq!(state.log, vec!["first", "second", "third"]);
        assert_eq!(report.stage_messages.len(), 3);
        assert_eq!(report.stage_messages[0].0, "first");
        assert_eq!(report.stage_messages[0].1, "first done");
    }

    #[tokio::test]
    async fn test_silent_stages_produce_no_messages() {
        let pipeline = PipelineBuilder::new("test_pipeline")
            .add_stage(Arc::new(SilentStage))
            .add_stage(stage("loud"))
            .build();

        let mut state = TestState::default();
        let report = pipeline.run(&mut state).await.unwrap();

        assert_eq!(state.log, vec!["silent", "loud"]);
        assert_eq!(report.stage_messages.len(), 1);
        assert_eq!(report.stage_messages[0].0, "loud");
    }

    #[tokio::test]
    async fn test_stage_failure_aborts_the_run() {
        let pipeline = PipelineBuilder::new("test_pipeline")
            .add_stage(stage("first"))
            .add_stage(Arc::new(FailingStage))
            .add_stage(stage("unreached"))
            .build();

        let mut state = TestState::default();
        let err = pipeline.run(&mut state).await.unwrap_err();

        assert!(matches!(err, FlowError::StageFailed(_)));
        assert_eq!(state.log, vec!["first"]);
    }

    #[tokio::test]
    async fn test_empty_pipeline_is_a_noop() {
        let pipeline: Pipeline<TestState> = PipelineBuilder::new("empty").build();
        let mut state = TestState::default();
        let report = pipeline.run(&mut state).await.unwrap();

        assert!(pipeline.is_empty());
        assert!(state.log.is_empty());
        assert!(report.stage_messages.is_empty());
    }
}

use std::sync::Arc;

use stage_flow::{Pipeline, PipelineBuilder};

use crate::firecrawl::DrugSearch;
use crate::llm::LanguageModel;
use crate::models::ResearchState;
use crate::tasks::{
    AnalyzeInteractionsStage, ExtractDrugsStage, GenerateRecommendationsStage, ResearchDrugsStage,
};

/// Assemble the four-stage research pipeline:
/// extract -> research -> analyze interactions -> recommend.
pub fn build_research_pipeline(
    search: Arc<dyn DrugSearch>,
    llm: Arc<dyn LanguageModel>,
) -> Pipeline<ResearchState> {
    PipelineBuilder::new("drug_research")
        .add_stage(Arc::new(ExtractDrugsStage::new(
            search.clone(),
            llm.clone(),
        )))
        .add_stage(Arc::new(ResearchDrugsStage::new(search, llm.clone())))
        .add_stage(Arc::new(AnalyzeInteractionsStage))
        .add_stage(Arc::new(GenerateRecommendationsStage::new(llm)))
        .build()
}

/// Run one research query through a fresh state.
pub async fn run_research(
    pipeline: &Pipeline<ResearchState>,
    query: &str,
) -> stage_flow::Result<ResearchState> {
    let mut state = ResearchState::new(query);
    pipeline.run(&mut state).await?;
    Ok(state)
}

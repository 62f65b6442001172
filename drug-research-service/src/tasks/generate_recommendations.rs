use std::sync::Arc;

use async_trait::async_trait;
use stage_flow::{Result, Stage, StageReport};
use tracing::{info, warn};

use crate::llm::LanguageModel;
use crate::models::ResearchState;
use crate::prompts;

/// Sentinel analysis text when the synthesis call fails.
pub const RECOMMENDATION_FAILURE: &str =
    "Unable to generate recommendations due to processing error.";

/// Stage 4: synthesize everything researched so far into one clinical
/// recommendation. Always leaves `analysis` set; never raises.
pub struct GenerateRecommendationsStage {
    llm: Arc<dyn LanguageModel>,
}

impl GenerateRecommendationsStage {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Stage<ResearchState> for GenerateRecommendationsStage {
    fn name(&self) -> &str {
        "generate_recommendations"
    }

    async fn run(&self, state: &mut ResearchState) -> Result<StageReport> {
        info!("Generating clinical recommendations");

        let drug_data = serde_json::json!({
            "drugs": state.drug_info,
            "interactions": state.interactions,
            "dosage_recommendations": state.dosage_recommendations,
            "alternatives": state.alternatives,
        });

        let user = prompts::recommendations_user(&state.query, &drug_data.to_string());
        let analysis = match self
            .llm
            .complete(prompts::RECOMMENDATIONS_SYSTEM, &user)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Recommendation generation error: {e}");
                RECOMMENDATION_FAILURE.to_string()
            }
        };
        state.analysis = Some(analysis);

        Ok(StageReport::new("Clinical recommendations generated"))
    }
}

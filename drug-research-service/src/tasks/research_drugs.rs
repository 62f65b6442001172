use std::sync::Arc;

use async_trait::async_trait;
use stage_flow::{Result, Stage, StageReport};
use tracing::{info, warn};

use crate::firecrawl::DrugSearch;
use crate::llm::LanguageModel;
use crate::models::{DrugAnalysis, DrugInfo, ResearchState};

/// Upper bound on drugs researched per run.
const DRUG_RESEARCH_LIMIT: usize = 5;
/// Search results requested per drug; only the first is used.
const INTERACTION_SEARCH_RESULTS: u32 = 2;

/// Stage 2: research each extracted drug against medical sources.
///
/// A drug with no search results is skipped entirely. A drug whose page
/// cannot be scraped keeps a minimal name+source record. A failed analysis
/// call substitutes the sentinel [`DrugAnalysis::failed`] record rather
/// than dropping the drug.
pub struct ResearchDrugsStage {
    search: Arc<dyn DrugSearch>,
    llm: Arc<dyn LanguageModel>,
}

impl ResearchDrugsStage {
    pub fn new(search: Arc<dyn DrugSearch>, llm: Arc<dyn LanguageModel>) -> Self {
        Self { search, llm }
    }
}

#[async_trait]
impl Stage<ResearchState> for ResearchDrugsStage {
    fn name(&self) -> &str {
        "research_drugs"
    }

    async fn run(&self, state: &mut ResearchState) -> Result<StageReport> {
        if state.extracted_drugs.is_empty() {
            warn!("No extracted drugs found");
            return Ok(StageReport::new("No drugs to research"));
        }

        let drugs: Vec<String> = state
            .extracted_drugs
            .iter()
            .take(DRUG_RESEARCH_LIMIT)
            .cloned()
            .collect();
        info!("Researching specific drugs: {}", drugs.join(", "));

        for drug_name in &drugs {
            let hits = self
                .search
                .search_drug_interactions(drug_name, INTERACTION_SEARCH_RESULTS)
                .await;

            let Some(hit) = hits.first() else {
                warn!("No search results for {drug_name}, skipping");
                continue;
            };

            let mut drug_info = DrugInfo::new(drug_name.clone(), hit.url.clone());

            if let Some(page) = self.search.scrape_page(&hit.url).await {
                let analysis = match self.llm.analyze_drug(drug_name, &page.markdown).await {
                    Ok(analysis) => analysis,
                    Err(e) => {
                        warn!("Drug analysis error for {drug_name}: {e}");
                        DrugAnalysis::failed()
                    }
                };
                drug_info.apply_analysis(analysis);
            }

            state.drug_info.push(drug_info);
        }

        Ok(StageReport::new(format!(
            "Researched {} drug(s)",
            state.drug_info.len()
        )))
    }
}

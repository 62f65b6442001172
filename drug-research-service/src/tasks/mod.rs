pub mod analyze_interactions;
pub mod extract_drugs;
pub mod generate_recommendations;
pub mod research_drugs;

// Re-export stage implementations
pub use analyze_interactions::AnalyzeInteractionsStage;
pub use extract_drugs::ExtractDrugsStage;
pub use generate_recommendations::GenerateRecommendationsStage;
pub use research_drugs::ResearchDrugsStage;

/// Scripted collaborator doubles shared by the stage and workflow tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::firecrawl::{DrugSearch, ScrapedPage, SearchHit};
    use crate::llm::LanguageModel;
    use crate::models::DrugAnalysis;

    fn hit(url: &str, title: &str) -> SearchHit {
        SearchHit {
            url: url.to_string(),
            title: Some(title.to_string()),
            description: None,
        }
    }

    pub fn analysis_with_severity(severity: &str, class: &str) -> DrugAnalysis {
        DrugAnalysis {
            interaction_severity: severity.to_string(),
            contraindications: Vec::new(),
            age_restrictions: Vec::new(),
            dosage_forms: Vec::new(),
            description: format!("{class} drug"),
            common_interactions: Vec::new(),
            therapeutic_class: class.to_string(),
            monitoring_required: Vec::new(),
        }
    }

    /// Search double backed by fixed hit/page tables.
    #[derive(Default)]
    pub struct MockSearch {
        info_hits: Vec<SearchHit>,
        interaction_hits: HashMap<String, Vec<SearchHit>>,
        pages: HashMap<String, String>,
    }

    impl MockSearch {
        pub fn with_info_hit(mut self, url: &str, title: &str) -> Self {
            self.info_hits.push(hit(url, title));
            self
        }

        pub fn with_interaction_hit(mut self, drug_name: &str, url: &str) -> Self {
            self.interaction_hits
                .entry(drug_name.to_string())
                .or_default()
                .push(hit(url, drug_name));
            self
        }

        pub fn with_page(mut self, url: &str, markdown: &str) -> Self {
            self.pages.insert(url.to_string(), markdown.to_string());
            self
        }
    }

    #[async_trait]
    impl DrugSearch for MockSearch {
        async fn search_drug_info(&self, _query: &str, limit: u32) -> Vec<SearchHit> {
            self.info_hits
                .iter()
                .take(limit as usize)
                .cloned()
                .collect()
        }

        async fn search_drug_interactions(&self, drug_name: &str, limit: u32) -> Vec<SearchHit> {
            self.interaction_hits
                .get(drug_name)
                .map(|hits| hits.iter().take(limit as usize).cloned().collect())
                .unwrap_or_default()
        }

        async fn scrape_page(&self, url: &str) -> Option<ScrapedPage> {
            self.pages.get(url).map(|markdown| ScrapedPage {
                markdown: markdown.clone(),
            })
        }
    }

    /// Language-model double that pops scripted responses in call order.
    /// An exhausted queue behaves as a call failure.
    #[derive(Default)]
    pub struct MockLlm {
        completions: Mutex<VecDeque<Result<String, String>>>,
        analyses: Mutex<VecDeque<Result<DrugAnalysis, String>>>,
    }

    impl MockLlm {
        pub fn with_completion(self, response: &str) -> Self {
            self.completions
                .lock()
                .unwrap()
                .push_back(Ok(response.to_string()));
            self
        }

        pub fn with_completion_error(self, message: &str) -> Self {
            self.completions
                .lock()
                .unwrap()
                .push_back(Err(message.to_string()));
            self
        }

        pub fn with_analysis(self, analysis: DrugAnalysis) -> Self {
            self.analyses.lock().unwrap().push_back(Ok(analysis));
            self
        }

        pub fn with_analysis_error(self, message: &str) -> Self {
            self.analyses
                .lock()
                .unwrap()
                .push_back(Err(message.to_string()));
            self
        }
    }

    #[async_trait]
    impl LanguageModel for MockLlm {
        async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
            match self.completions.lock().unwrap().pop_front() {
                Some(Ok(response)) => Ok(response),
                Some(Err(message)) => Err(anyhow::anyhow!(message)),
                None => Err(anyhow::anyhow!("no scripted completion")),
            }
        }

        async fn analyze_drug(
            &self,
            _drug_name: &str,
            _content: &str,
        ) -> anyhow::Result<DrugAnalysis> {
            match self.analyses.lock().unwrap().pop_front() {
                Some(Ok(analysis)) => Ok(analysis),
                Some(Err(message)) => Err(anyhow::anyhow!(message)),
                None => Err(anyhow::anyhow!("no scripted analysis")),
            }
        }
    }
}

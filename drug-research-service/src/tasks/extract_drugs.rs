use std::sync::Arc;

use async_trait::async_trait;
use regex::RegexSet;
use stage_flow::{Result, Stage, StageReport};
use tracing::{info, warn};

use crate::firecrawl::DrugSearch;
use crate::llm::LanguageModel;
use crate::models::ResearchState;
use crate::{parsing, prompts};

/// Search results consulted on the search path.
const SEARCH_RESULT_LIMIT: u32 = 3;
/// Per-result cap on scraped content fed to the extraction prompt.
const SCRAPED_CONTENT_CHARS: usize = 1500;

/// Fallback vocabulary for when structured extraction fails outright.
const COMMON_DRUGS: [&str; 10] = [
    "aspirin",
    "ibuprofen",
    "acetaminophen",
    "metformin",
    "lisinopril",
    "atorvastatin",
    "omeprazole",
    "warfarin",
    "insulin",
    "prednisone",
];

/// Stage 1: identify the drugs the query is about.
///
/// Queries that look like prescription text are parsed with a structured
/// NLP extraction; topical queries are researched via web search first.
pub struct ExtractDrugsStage {
    search: Arc<dyn DrugSearch>,
    llm: Arc<dyn LanguageModel>,
}

impl ExtractDrugsStage {
    pub fn new(search: Arc<dyn DrugSearch>, llm: Arc<dyn LanguageModel>) -> Self {
        Self { search, llm }
    }

    async fn extract_from_medical_text(&self, state: &mut ResearchState) {
        let user = prompts::nlp_extraction_user(&state.query);
        match self.llm.complete(prompts::NLP_EXTRACTION_SYSTEM, &user).await {
            Ok(response) => {
                let details = parsing::parse_drug_details(&response);
                if details.is_empty() {
                    warn!("No structured drug details parsed, falling back to simple extraction");
                    state.extracted_drugs = extract_drug_names_simple(&state.query);
                } else {
                    state.extracted_drugs =
                        details.iter().map(|d| d.drug_name.clone()).collect();
                    state.extracted_drug_details = details;
                }
            }
            Err(e) => {
                warn!("NLP extraction error: {e}");
                state.extracted_drugs = extract_drug_names_simple(&state.query);
            }
        }
    }

    async fn extract_from_search(&self, state: &mut ResearchState) {
        let results = self
            .search
            .search_drug_info(&state.query, SEARCH_RESULT_LIMIT)
            .await;

        let mut all_content = String::new();
        for hit in &results {
            if let Some(page) = self.search.scrape_page(&hit.url).await {
                all_content.push_str(parsing::clamp_chars(&page.markdown, SCRAPED_CONTENT_CHARS));
                all_content.push_str("\n\n");
            }
        }

        let user = prompts::drug_extraction_user(&state.query, &all_content);
        match self
            .llm
            .complete(prompts::DRUG_EXTRACTION_SYSTEM, &user)
            .await
        {
            Ok(response) => {
                state.extracted_drugs = response
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect();
                info!("Extracted drugs: {}", state.extracted_drugs.join(", "));
            }
            Err(e) => {
                warn!("Drug extraction error: {e}");
            }
        }
    }
}

#[async_trait]
impl Stage<ResearchState> for ExtractDrugsStage {
    fn name(&self) -> &str {
        "extract_drugs"
    }

    async fn run(&self, state: &mut ResearchState) -> Result<StageReport> {
        info!("Extracting drug information from: {}", state.query);

        if contains_medical_text(&state.query) {
            self.extract_from_medical_text(state).await;
        } else {
            self.extract_from_search(state).await;
        }

        Ok(StageReport::new(format!(
            "Identified {} drug(s)",
            state.extracted_drugs.len()
        )))
    }
}

/// Whether the text reads like prescription or clinical dosage text.
fn contains_medical_text(text: &str) -> bool {
    let patterns = RegexSet::new([
        r"(?i)\d+\s*mg",
        r"(?i)\d+\s*mcg",
        r"(?i)\d+\s*ml",
        r"(?i)take\s+\d+",
        r"(?i)twice\s+daily",
        r"(?i)once\s+daily",
        r"(?i)tablet",
        r"(?i)capsule",
        r"(?i)injection",
    ])
    .expect("Invalid regex");
    patterns.is_match(text)
}

/// Substring scan of the query against a fixed list of common drugs.
fn extract_drug_names_simple(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    COMMON_DRUGS
        .into_iter()
        .filter(|drug| text_lower.contains(*drug))
        .map(title_case)
        .collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

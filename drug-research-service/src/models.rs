use serde::{Deserialize, Serialize};

/// Accumulated state for one research run. Created with only `query` set,
/// then extended once per pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchState {
    pub query: String,
    /// Drug names identified by stage 1, in relevance order.
    #[serde(default)]
    pub extracted_drugs: Vec<String>,
    /// Structured prescription parses, populated only on the NLP path.
    #[serde(default)]
    pub extracted_drug_details: Vec<ExtractedDrugInfo>,
    /// One researched record per extracted drug (first 5), from stage 2.
    #[serde(default)]
    pub drug_info: Vec<DrugInfo>,
    /// Reserved for raw search payloads; not populated by the current flow.
    #[serde(default)]
    pub search_results: Vec<serde_json::Value>,
    #[serde(default)]
    pub interactions: Vec<DrugInteraction>,
    #[serde(default)]
    pub dosage_recommendations: Vec<DosageRecommendation>,
    #[serde(default)]
    pub alternatives: Vec<AlternativeSuggestion>,
    /// Final clinical recommendation text, set by stage 4.
    #[serde(default)]
    pub analysis: Option<String>,
}

impl ResearchState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            extracted_drugs: Vec::new(),
            extracted_drug_details: Vec::new(),
            drug_info: Vec::new(),
            search_results: Vec::new(),
            interactions: Vec::new(),
            dosage_recommendations: Vec::new(),
            alternatives: Vec::new(),
            analysis: None,
        }
    }
}

/// A researched drug. Seeded with `name` and `source_url`, then enriched
/// from the clinical analysis when scraping succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub interaction_severity: Option<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub age_restrictions: Vec<String>,
    #[serde(default)]
    pub dosage_forms: Vec<String>,
    #[serde(default)]
    pub common_interactions: Vec<String>,
    #[serde(default)]
    pub therapeutic_class: String,
    #[serde(default)]
    pub monitoring_required: Vec<String>,
}

impl DrugInfo {
    pub fn new(name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            source_url: source_url.into(),
            interaction_severity: None,
            contraindications: Vec::new(),
            age_restrictions: Vec::new(),
            dosage_forms: Vec::new(),
            common_interactions: Vec::new(),
            therapeutic_class: String::new(),
            monitoring_required: Vec::new(),
        }
    }

    /// Copy every analyzed attribute onto this record.
    pub fn apply_analysis(&mut self, analysis: DrugAnalysis) {
        self.interaction_severity = Some(analysis.interaction_severity);
        self.contraindications = analysis.contraindications;
        self.age_restrictions = analysis.age_restrictions;
        self.dosage_forms = analysis.dosage_forms;
        self.description = analysis.description;
        self.common_interactions = analysis.common_interactions;
        self.therapeutic_class = analysis.therapeutic_class;
        self.monitoring_required = analysis.monitoring_required;
    }
}

/// The fixed attribute set the per-drug analysis call must return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugAnalysis {
    /// One of Major, Moderate, Minor, None or Unknown.
    pub interaction_severity: String,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub age_restrictions: Vec<String>,
    #[serde(default)]
    pub dosage_forms: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub common_interactions: Vec<String>,
    #[serde(default)]
    pub therapeutic_class: String,
    #[serde(default)]
    pub monitoring_required: Vec<String>,
}

impl DrugAnalysis {
    /// Sentinel substituted when the analysis call fails. Keeps the drug in
    /// the result set with a recognizable record instead of dropping it.
    pub fn failed() -> Self {
        Self {
            interaction_severity: "Unknown".to_string(),
            contraindications: Vec::new(),
            age_restrictions: Vec::new(),
            dosage_forms: Vec::new(),
            description: "Analysis failed".to_string(),
            common_interactions: Vec::new(),
            therapeutic_class: "Unknown".to_string(),
            monitoring_required: Vec::new(),
        }
    }
}

/// Structured parse of one drug mention in unstructured prescription text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDrugInfo {
    pub drug_name: String,
    #[serde(default)]
    pub dosage_amount: String,
    #[serde(default)]
    pub dosage_unit: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub special_instructions: String,
}

/// Pairwise interaction assessment produced by stage 3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugInteraction {
    /// "<name1> + <name2>" in drug_info order.
    pub drug_pair: String,
    pub interaction_severity: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DosageRecommendation {
    pub drug_name: String,
    pub recommended_dose: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeSuggestion {
    /// "Alternative to <name>".
    pub drug_name: String,
    pub dose: String,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub research_id: String,
    pub query: String,
    pub state: ResearchState,
}

use async_trait::async_trait;
use stage_flow::{Result, Stage, StageReport};
use tracing::info;

use crate::models::{
    AlternativeSuggestion, DosageRecommendation, DrugInfo, DrugInteraction, ResearchState,
};

/// Contraindications cited per alternative suggestion.
const CITED_CONTRAINDICATIONS: usize = 2;

/// Stage 3: pairwise interaction assessment plus dosage and alternative
/// suggestions. Pure heuristics over the researched records; no external
/// calls.
pub struct AnalyzeInteractionsStage;

#[async_trait]
impl Stage<ResearchState> for AnalyzeInteractionsStage {
    fn name(&self) -> &str {
        "analyze_interactions"
    }

    async fn run(&self, state: &mut ResearchState) -> Result<StageReport> {
        info!("Analyzing drug interactions");

        if state.drug_info.len() >= 2 {
            let mut interactions = Vec::new();
            for (i, drug1) in state.drug_info.iter().enumerate() {
                for drug2 in &state.drug_info[i + 1..] {
                    interactions.push(DrugInteraction {
                        drug_pair: format!("{} + {}", drug1.name, drug2.name),
                        interaction_severity: assess_interaction_severity(drug1, drug2)
                            .to_string(),
                        notes: format!(
                            "Monitor for interactions between {} and {}",
                            drug1.therapeutic_class, drug2.therapeutic_class
                        ),
                    });
                }
            }
            state.interactions = interactions;
            state.alternatives = generate_alternatives(&state.drug_info);
        }

        state.dosage_recommendations = generate_dosage_recommendations(&state.drug_info);

        Ok(StageReport::new(format!(
            "Assessed {} interaction pair(s)",
            state.interactions.len()
        )))
    }
}

/// Coarse pair-level severity: the worse of the two drugs' own labels,
/// where anything other than an explicit "Major" or "Moderate" collapses
/// to the Minor tier.
fn assess_interaction_severity(drug1: &DrugInfo, drug2: &DrugInfo) -> &'static str {
    let has = |drug: &DrugInfo, label: &str| drug.interaction_severity.as_deref() == Some(label);

    if has(drug1, "Major") || has(drug2, "Major") {
        "Major"
    } else if has(drug1, "Moderate") || has(drug2, "Moderate") {
        "Moderate"
    } else {
        "Minor"
    }
}

fn generate_dosage_recommendations(drug_info: &[DrugInfo]) -> Vec<DosageRecommendation> {
    drug_info
        .iter()
        .map(|drug| {
            let notes = if drug.age_restrictions.is_empty() {
                "Standard dosing applies unless contraindicated".to_string()
            } else {
                format!("Age restrictions: {}", drug.age_restrictions.join(", "))
            };
            DosageRecommendation {
                drug_name: drug.name.clone(),
                recommended_dose: "Follow prescriber instructions".to_string(),
                notes,
            }
        })
        .collect()
}

fn generate_alternatives(drug_info: &[DrugInfo]) -> Vec<AlternativeSuggestion> {
    drug_info
        .iter()
        .filter(|drug| !drug.contraindications.is_empty())
        .map(|drug| {
            let cited = drug
                .contraindications
                .iter()
                .take(CITED_CONTRAINDICATIONS)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            AlternativeSuggestion {
                drug_name: format!("Alternative to {}", drug.name),
                dose: "As prescribed".to_string(),
                reason: format!("Consider due to contraindications: {cited}"),
            }
        })
        .collect()
}

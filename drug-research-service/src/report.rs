//! Plain-text rendering of a completed research run.

use crate::models::{ExtractedDrugInfo, ResearchState};

/// Render the non-empty fields of `state` as a sectioned text report.
pub fn render(state: &ResearchState) -> String {
    let mut out = String::new();

    out.push_str(&format!("Analysis Results for: {}\n", state.query));
    out.push_str(&"=".repeat(60));
    out.push('\n');

    if !state.extracted_drug_details.is_empty() {
        out.push_str("\nExtracted prescription details:\n");
        for detail in &state.extracted_drug_details {
            out.push_str(&format!("  - {}\n", format_detail(detail)));
        }
    } else if !state.extracted_drugs.is_empty() {
        out.push_str("\nIdentified drugs:\n");
        for name in &state.extracted_drugs {
            out.push_str(&format!("  - {name}\n"));
        }
    }

    if !state.drug_info.is_empty() {
        out.push_str("\nResearched drugs:\n");
        for info in &state.drug_info {
            let severity = info.interaction_severity.as_deref().unwrap_or("Unrated");
            out.push_str(&format!("  - {} [{}]", info.name, severity));
            if !info.description.is_empty() {
                out.push_str(&format!(": {}", info.description));
            }
            out.push('\n');
        }
    }

    if !state.interactions.is_empty() {
        out.push_str("\nDrug interactions:\n");
        for interaction in &state.interactions {
            out.push_str(&format!(
                "  - {}: Severity={}, Notes={}\n",
                interaction.drug_pair, interaction.interaction_severity, interaction.notes
            ));
        }
    }

    if !state.dosage_recommendations.is_empty() {
        out.push_str("\nDosage recommendations:\n");
        for rec in &state.dosage_recommendations {
            out.push_str(&format!(
                "  - {}: {} ({})\n",
                rec.drug_name, rec.recommended_dose, rec.notes
            ));
        }
    }

    if !state.alternatives.is_empty() {
        out.push_str("\nAlternative medications:\n");
        for alt in &state.alternatives {
            out.push_str(&format!(
                "  - {} {}: {}\n",
                alt.drug_name, alt.dose, alt.reason
            ));
        }
    }

    if let Some(analysis) = &state.analysis {
        out.push_str("\nClinical recommendations:\n");
        out.push_str(analysis);
        out.push('\n');
    }

    out
}

fn format_detail(detail: &ExtractedDrugInfo) -> String {
    let mut parts = vec![detail.drug_name.clone()];

    if !detail.dosage_amount.is_empty() || !detail.dosage_unit.is_empty() {
        parts.push(format!("{}{}", detail.dosage_amount, detail.dosage_unit));
    }
    if !detail.frequency.is_empty() {
        parts.push(detail.frequency.clone());
    }
    if !detail.route.is_empty() {
        parts.push(detail.route.clone());
    }
    if !detail.duration.is_empty() {
        parts.push(detail.duration.clone());
    }
    if !detail.special_instructions.is_empty() {
        parts.push(detail.special_instructions.clone());
    }

    parts.join(", ")
}

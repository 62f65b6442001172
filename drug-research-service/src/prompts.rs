//! Prompt templates for the four LLM call families the pipeline makes.

use crate::parsing::clamp_chars;

/// Cap on scraped content included in the analysis prompt.
const ANALYSIS_CONTENT_CHARS: usize = 2500;

/// System instruction for extracting drug names from searched content.
pub const DRUG_EXTRACTION_SYSTEM: &str = "You are a medical information researcher. Extract specific drug names, dosages, and medical information from healthcare documents.

Focus on actual pharmaceutical products, medications, and therapeutic substances that are clinically used.";

pub fn drug_extraction_user(query: &str, content: &str) -> String {
    format!(
        r#"Query: {query}

Medical Content: {content}

Extract a list of specific drug/medication names mentioned in this content that are relevant to "{query}".

Rules:
- Only include actual pharmaceutical product names, not generic medical terms
- Focus on drugs that clinicians can prescribe/administer
- Include both brand names and generic names where mentioned
- Include dosage information if available
- Limit to the 10 most relevant medications
- Return drug names with dosage info if available, one per line

Example format:
Aspirin 325mg
Metformin 500mg
Lisinopril 10mg
Atorvastatin 20mg
Warfarin 5mg"#
    )
}

/// System instruction for the per-drug clinical analysis call.
pub const DRUG_INTERACTION_SYSTEM: &str = "You are analyzing pharmaceutical drugs and their interactions.

Focus on extracting information relevant to healthcare providers and pharmacists.

Pay special attention to drug interactions, contraindications, side effects, and dosage recommendations.";

pub fn drug_interaction_user(drug_name: &str, content: &str) -> String {
    let content = clamp_chars(content, ANALYSIS_CONTENT_CHARS);
    format!(
        r#"Drug: {drug_name}

Medical Database Content: {content}

Analyze this content from a clinical perspective and respond with ONLY a single JSON object with exactly these keys:

- interaction_severity: One of "Major", "Moderate", "Minor", "None", or "Unknown"
- contraindications: List of conditions or patient groups where this drug should be avoided
- age_restrictions: Specific age groups with restrictions (pediatric, geriatric, etc.)
- dosage_forms: Available forms (tablet, injection, liquid, etc.)
- description: Brief 1-sentence description of the drug's primary therapeutic use
- common_interactions: List of other drugs that commonly interact with this medication
- therapeutic_class: Drug classification (e.g., ACE inhibitor, beta-blocker, antibiotic)
- monitoring_required: Special monitoring or lab tests required during treatment

Focus on clinical safety, drug interactions, and patient-specific considerations.
Do not mix text and JSON in your response."#
    )
}

/// System instruction for structured extraction from prescription text.
pub const NLP_EXTRACTION_SYSTEM: &str = "You are a medical NLP specialist extracting structured drug information from unstructured text.

Parse medical text to identify drug names, dosages, frequencies, and administration details.";

pub fn nlp_extraction_user(medical_text: &str) -> String {
    format!(
        r#"Medical Text: {medical_text}

Extract structured drug information from this unstructured medical text:

Identify and structure:
- drug_name: Exact medication name (generic or brand)
- dosage_amount: Numerical dose (e.g., 500, 10, 0.25)
- dosage_unit: Unit of measurement (mg, mcg, ml, tablets)
- frequency: How often taken (daily, BID, TID, PRN, etc.)
- route: Method of administration (oral, IV, IM, topical)
- duration: Length of treatment if mentioned
- special_instructions: Any specific timing or food requirements

Return in JSON format for each drug found:
{{
  "drug_name": "Metformin",
  "dosage_amount": "500",
  "dosage_unit": "mg",
  "frequency": "twice daily",
  "route": "oral",
  "duration": "ongoing",
  "special_instructions": "take with meals"
}}"#
    )
}

/// System instruction for the final recommendation synthesis.
pub const RECOMMENDATIONS_SYSTEM: &str = "You are a senior clinical pharmacist providing comprehensive drug therapy recommendations.

Synthesize all drug analysis data into actionable clinical recommendations.";

pub fn recommendations_user(query: &str, drug_analysis_data: &str) -> String {
    format!(
        r#"Clinical Query: {query}

Drug Analysis Data: {drug_analysis_data}

Provide comprehensive clinical recommendations (5-6 sentences) covering:

- Primary safety concern and risk level
- Recommended dosage adjustments if needed
- Most suitable alternative if contraindicated
- Key monitoring requirements
- Patient counseling priorities
- Follow-up recommendations

Be clinically accurate and include specific actionable steps for healthcare providers."#
    )
}

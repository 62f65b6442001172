//! Language-model calls over OpenRouter via rig.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openrouter;

use crate::models::DrugAnalysis;
use crate::{parsing, prompts};

/// Language-model capability the pipeline depends on. Call failures
/// propagate to the call site, where each of the five sites applies its own
/// documented fallback.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Free-text completion with a system preamble.
    async fn complete(&self, system: &str, user: &str) -> anyhow::Result<String>;

    /// Clinical analysis of one drug's scraped content, validated against
    /// the [`DrugAnalysis`] attribute set.
    async fn analyze_drug(&self, drug_name: &str, content: &str) -> anyhow::Result<DrugAnalysis>;
}

pub struct OpenRouterLlm {
    client: openrouter::Client,
    model: String,
}

impl OpenRouterLlm {
    pub fn new(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            client: openrouter::Client::new(api_key),
            model: model.into(),
        }
    }
}

#[async_trait]
impl LanguageModel for OpenRouterLlm {
    async fn complete(&self, system: &str, user: &str) -> anyhow::Result<String> {
        let agent = self.client.agent(&self.model).preamble(system).build();
        let response = agent.prompt(user).await?;
        Ok(response)
    }

    async fn analyze_drug(&self, drug_name: &str, content: &str) -> anyhow::Result<DrugAnalysis> {
        let user = prompts::drug_interaction_user(drug_name, content);
        let response = self
            .complete(prompts::DRUG_INTERACTION_SYSTEM, &user)
            .await?;
        parsing::parse_drug_analysis(&response)
    }
}

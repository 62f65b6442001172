//! Service configuration loaded once at startup.

const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
const DEFAULT_PORT: u16 = 3000;

/// Configuration for the research collaborators and the HTTP facade.
///
/// Credentials are read once here and passed into the collaborator
/// constructors; a missing credential is a startup failure, never a
/// pipeline failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub firecrawl_api_key: String,
    pub openrouter_api_key: String,
    pub model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let firecrawl_api_key = std::env::var("FIRECRAWL_API_KEY")
            .map_err(|_| anyhow::anyhow!("FIRECRAWL_API_KEY not set"))?;
        let openrouter_api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENROUTER_API_KEY not set"))?;
        let model =
            std::env::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            firecrawl_api_key,
            openrouter_api_key,
            model,
            port,
        })
    }
}

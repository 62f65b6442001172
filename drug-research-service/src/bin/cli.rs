//! Interactive research loop over stdin.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use drug_research_service::config::Config;
use drug_research_service::firecrawl::FirecrawlClient;
use drug_research_service::llm::OpenRouterLlm;
use drug_research_service::models::ResearchState;
use drug_research_service::report;
use drug_research_service::workflow::build_research_pipeline;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let search = Arc::new(FirecrawlClient::new(config.firecrawl_api_key.clone()));
    let llm = Arc::new(OpenRouterLlm::new(
        &config.openrouter_api_key,
        config.model.clone(),
    ));
    let pipeline = build_research_pipeline(search, llm);

    println!("Drug Interaction & Dosage Analysis Agent");

    let stdin = io::stdin();
    loop {
        print!("\nEnter drugs, patient age, or 'quit' to exit: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        let mut state = ResearchState::new(input);
        if let Err(e) = pipeline.run(&mut state).await {
            eprintln!("Research run failed: {e}");
            continue;
        }

        println!("\n{}", report::render(&state));
    }

    Ok(())
}

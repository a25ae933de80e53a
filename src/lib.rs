pub mod agent;
pub mod cli;
pub mod knowledge;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod server;
pub mod topic;

use agent::ChatAgent;
use cli::Args;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Model Candidates: {}", args.chat_models);
    info!("Max Output Tokens: {}", args.max_output_tokens);
    info!("Temperature: {}", args.temperature);
    info!("Request Timeout: {}s", args.request_timeout_secs);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let agent = Arc::new(ChatAgent::new(&args)?);
    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, agent, args);
    server.run().await?;

    Ok(())
}

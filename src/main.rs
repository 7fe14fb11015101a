//! Fezz Endpoint - command line entry point.
//!
//! `invoke` runs one invocation with the event read from stdin and prints the
//! envelope; `serve` hosts the function behind the local invocation server.

use clap::{Parser, Subcommand};
use fezz_endpoint::function::endpoint::FUNCTION_NAME;
use fezz_endpoint::prelude::*;
use std::io::Read;

#[derive(Parser)]
#[command(name = "fezz-endpoint", version, about = "Call one configured HTTP endpoint")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one invocation; the event JSON is read from stdin.
    Invoke,
    /// Serve invocations over HTTP.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    fezz_endpoint::logging::init()?;

    match cli.command {
        Command::Invoke => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            let event = if input.trim().is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&input)?
            };

            let ctx = InvocationContext::from_env(FUNCTION_NAME, generate_request_id());
            let response = EndpointFunction::from_env().invoke(event, &ctx).await;
            println!("{}", serde_json::to_string(&response)?);
        }
        Command::Serve { host, port } => {
            let ctx = InvocationContext::from_env(FUNCTION_NAME, "");
            let config = ServerConfig::new()
                .host(host)
                .port(port)
                .function_name(ctx.function_name)
                .function_version(ctx.function_version);

            InvokeServer::new(config, EndpointFunction::from_env())
                .run()
                .await?;
        }
    }

    Ok(())
}

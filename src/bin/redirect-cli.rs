use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "redirect-cli")]
#[command(about = "Management CLI for the redirect server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server status
    Status,
    /// Register a redirect at runtime
    Add {
        #[arg(long)]
        path: String,
        #[arg(long)]
        url: String,
    },
    /// Dump the live mapping for a format (yaml, json, toml)
    Dump {
        #[arg(long)]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client
                .get(format!("{}/api/status", cli.server))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Add { path, url } => {
            let res = client
                .post(format!("{}/api/config/add", cli.server))
                .json(&serde_json::json!({ "path": path, "url": url }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Dump { format } => {
            let res = client
                .get(format!("{}/api/config/{}", cli.server, format))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

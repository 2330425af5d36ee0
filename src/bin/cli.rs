//! Subtrack CLI
//!
//! Command-line client for a running Subtrack server:
//! - List subscriptions
//! - Add / remove subscriptions
//! - Show the yearly total
//! - Check status

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use rust_decimal::Decimal;
use subtrack::store::{Frequency, NewSubscription};

#[derive(Parser)]
#[command(name = "subtrack-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track recurring subscriptions and their yearly cost")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all subscriptions
    List,

    /// Add a subscription
    Add {
        /// Subscription name
        name: String,
        /// Cost per billing cycle
        amount: Decimal,
        /// Billing frequency (monthly, yearly)
        #[arg(short = 'F', long, default_value = "monthly")]
        frequency: Frequency,
    },

    /// Remove a subscription by id
    Remove {
        /// Subscription id
        id: u64,
    },

    /// Show the yearly cost of all subscriptions
    Total,

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let json_output = cli.format == "json";

    match cli.command {
        Commands::List => {
            let data = get_json(&client, &format!("{}/api/v1/subscriptions", cli.api_url)).await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print_table(&data);
            }
        }

        Commands::Add {
            name,
            amount,
            frequency,
        } => {
            let body = NewSubscription::new(name, amount, frequency);

            let response = client
                .post(format!("{}/api/v1/subscriptions", cli.api_url))
                .json(&body)
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;

            if response.status().is_success() {
                let created: serde_json::Value = response.json().await?;
                if json_output {
                    println!("{}", serde_json::to_string_pretty(&created)?);
                } else {
                    println!(
                        "Added {} (id {}): {:.2} {}",
                        created["name"].as_str().unwrap_or("-"),
                        created["id"].as_u64().unwrap_or(0),
                        created["amount"].as_f64().unwrap_or(0.0),
                        created["frequency"].as_str().unwrap_or("-"),
                    );
                }
            } else {
                let status = response.status();
                let error: serde_json::Value = response.json().await.unwrap_or_default();
                bail!(
                    "Rejected ({}): {}",
                    status,
                    error["error"]["message"].as_str().unwrap_or("unknown error")
                );
            }
        }

        Commands::Remove { id } => {
            let response = client
                .delete(format!("{}/api/v1/subscriptions/{}", cli.api_url, id))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;

            if !response.status().is_success() {
                bail!("Remove failed: {}", response.status());
            }
            println!("Removed subscription {} (if it existed)", id);
        }

        Commands::Total => {
            let data = get_json(&client, &format!("{}/api/v1/summary", cli.api_url)).await?;

            if json_output {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!(
                    "Total per Year: {}",
                    data["formatted_total"].as_str().unwrap_or("-")
                );
                println!(
                    "  {} subscriptions ({} monthly, {} yearly)",
                    data["count"].as_u64().unwrap_or(0),
                    data["monthly_count"].as_u64().unwrap_or(0),
                    data["yearly_count"].as_u64().unwrap_or(0),
                );
            }
        }

        Commands::Status => {
            let health = get_json(&client, &format!("{}/health", cli.api_url)).await?;

            println!("Subtrack v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Server status: {}", health["status"].as_str().unwrap_or("unknown"));
            println!(
                "Subscriptions: {}",
                health["subscriptions"].as_u64().unwrap_or(0)
            );
            println!(
                "Live dashboards: {}",
                health["ws_connections"].as_u64().unwrap_or(0)
            );
            if let Some(uptime) = health["uptime_seconds"].as_u64() {
                println!("Uptime: {}", format_duration(uptime));
            }
        }

        Commands::Config { output } => {
            let config = subtrack::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn get_json(client: &reqwest::Client, url: &str) -> anyhow::Result<serde_json::Value> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| connect_hint(url))?;

    if !response.status().is_success() {
        bail!("Request to {} failed: {}", url, response.status());
    }

    Ok(response.json().await?)
}

fn connect_hint(url: &str) -> String {
    format!(
        "Cannot connect to Subtrack at {} (start it with: cargo run --bin subtrack)",
        url
    )
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_table(data: &serde_json::Value) {
    let rows = match data["subscriptions"].as_array() {
        Some(r) if !r.is_empty() => r,
        _ => {
            println!("No subscriptions yet.");
            println!();
            println!("Add one with:");
            println!("  subtrack-cli add Netflix 15.99 --frequency monthly");
            return;
        }
    };

    println!("{:<6} {:<24} {:>10} {:<10}", "ID", "Name", "Amount", "Frequency");
    println!("{}", "-".repeat(53));

    for row in rows {
        println!(
            "{:<6} {:<24} {:>10.2} {:<10}",
            row["id"].as_u64().unwrap_or(0),
            row["name"].as_str().unwrap_or("-"),
            row["amount"].as_f64().unwrap_or(0.0),
            row["frequency"].as_str().unwrap_or("-"),
        );
    }
}

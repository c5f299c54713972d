// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

mod agent;
mod api;
mod app;
mod config;
mod error;
mod exchange_rates;
mod models;
mod news;
mod visualizations;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::agent::GeminiNewsAgent;
use crate::api::FrankfurterClient;
use crate::app::{currency_cards, print_messages, App, HistoryOptions};
use crate::config::Credentials;
use crate::exchange_rates::DEFAULT_AMOUNT;
use crate::models::CurrencyCode;
use crate::news::NewsRetriever;

#[derive(Parser)]
#[command(author, version, about = "Currency converter with rate history and AI-curated currency news", long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to the per-user config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount and chart the last 10 days of the pair
    Convert {
        /// Base currency
        #[arg(value_name = "BASE")]
        base: CurrencyCode,
        /// Target currency
        #[arg(value_name = "TARGET")]
        target: CurrencyCode,
        /// Amount to convert (minimum 0.01)
        #[arg(short, long, default_value_t = DEFAULT_AMOUNT)]
        amount: f64,
        /// Only show the conversion
        #[arg(long)]
        no_history: bool,
        /// Also export the history to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Show and chart the last 10 days of rates
    History {
        base: CurrencyCode,
        target: CurrencyCode,
        /// Skip writing the SVG chart
        #[arg(long)]
        no_chart: bool,
        /// Export the history to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Latest news for a currency pair
    News { base: CurrencyCode, target: CurrencyCode },
    /// List supported currencies
    Currencies,
    /// Interactive shell (default)
    Shell,
    /// Write the effective configuration to a TOML file
    InitConfig {
        #[arg(default_value = "fxnews.toml")]
        path: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "fxnews_rs=debug" } else { "fxnews_rs=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let credentials = Credentials::from_env();
    debug!("Config: {:?}, credentials: {:?}", config, credentials);

    let rates = FrankfurterClient::new(config.rates_host.clone(), config.request_timeout())
        .context("Failed to create exchange-rate client")?;
    let agent = GeminiNewsAgent::new(&config, &credentials).context("Failed to create news agent")?;
    let app = App::new(
        Arc::new(rates),
        NewsRetriever::new(Arc::new(agent)),
        config.output_dir.clone(),
    );

    let today = Local::now().date_naive();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Convert {
            base,
            target,
            amount,
            no_history,
            csv,
        } => {
            let options = HistoryOptions { chart: true, csv_path: csv };
            let history = if no_history { None } else { Some(&options) };
            print_messages(&app.convert(base, target, amount, today, history).await);
        }
        Commands::History {
            base,
            target,
            no_chart,
            csv,
        } => {
            let options = HistoryOptions { chart: !no_chart, csv_path: csv };
            print_messages(&app.history(base, target, today, &options).await);
        }
        Commands::News { base, target } => {
            print_messages(&app.news(base, target).await);
        }
        Commands::Currencies => print_messages(&currency_cards()),
        Commands::InitConfig { path } => {
            config::save_config(&config, &path).context("Failed to write configuration")?;
            println!("Configuration written to {}", path.display());
        }
        Commands::Shell => {
            info!("Charts are written to {}", app.output_dir().display());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            app.run_shell(stdin, &mut stdout, today).await?;
            println!("Exiting...");
        }
    }

    Ok(())
}

// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::api::{RateProvider, HISTORY_WINDOW_DAYS};
use crate::error::AppError;
use crate::exchange_rates::{validate_amount, Conversion, DEFAULT_AMOUNT};
use crate::models::{CurrencyCode, CurrencyPair};
use crate::news::NewsRetriever;
use crate::visualizations;

/// One line of output produced by an action
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Heading(String),
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
    Text(String),
}

impl Message {
    pub fn render(&self) -> String {
        match self {
            Message::Heading(s) => format!("\n{}\n{}", s, "=".repeat(s.chars().count())),
            Message::Info(s) => s.clone(),
            Message::Success(s) => format!("✅ {}", s),
            Message::Warning(s) => format!("⚠️  {}", s),
            Message::Error(s) => format!("❌ {}", s),
            Message::Text(s) => s.clone(),
        }
    }
}

pub fn print_messages(messages: &[Message]) {
    for message in messages {
        println!("{}", message.render());
    }
}

fn report(err: &AppError) -> Message {
    if err.is_validation() {
        debug!("Validation failed: {}", err);
        Message::Warning(err.to_string())
    } else {
        debug!("Action failed: {:?}", err);
        Message::Error(err.to_string())
    }
}

async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = fut.await;
    spinner.finish_and_clear();
    out
}

/// Options for the history part of an action
#[derive(Debug, Clone, Default)]
pub struct HistoryOptions {
    pub chart: bool,
    pub csv_path: Option<PathBuf>,
}

/// The convert and news panels. Every action is independent; nothing is
/// carried over between calls.
pub struct App {
    rates: Arc<dyn RateProvider>,
    news: NewsRetriever,
    output_dir: PathBuf,
}

impl App {
    pub fn new(rates: Arc<dyn RateProvider>, news: NewsRetriever, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            rates,
            news,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Convert panel: spot rate, conversion, then the history of the pair
    /// when `history` is given.
    pub async fn convert(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        amount: f64,
        today: NaiveDate,
        history: Option<&HistoryOptions>,
    ) -> Vec<Message> {
        let pair = match CurrencyPair::new(base, target) {
            Ok(pair) => pair,
            Err(e) => return vec![report(&e)],
        };
        if let Err(e) = validate_amount(amount) {
            return vec![report(&e)];
        }

        info!("Converting {} {}", amount, pair);
        let rate = with_spinner("Fetching latest exchange rates...", self.rates.get_latest_rate(pair)).await;
        let conversion = match rate.and_then(|rate| Conversion::new(pair, amount, rate)) {
            Ok(conversion) => conversion,
            Err(e) => {
                return vec![
                    report(&e),
                    Message::Error("Failed to fetch conversion rate. Please try again later.".to_string()),
                ];
            }
        };

        let mut messages = vec![
            Message::Success(conversion.conversion_line()),
            Message::Info(format!("Exchange Rate: {}", conversion.rate_line())),
        ];
        if let Some(options) = history {
            messages.extend(self.history_for(pair, today, options).await);
        }
        messages
    }

    /// History action on its own
    pub async fn history(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        today: NaiveDate,
        options: &HistoryOptions,
    ) -> Vec<Message> {
        match CurrencyPair::new(base, target) {
            Ok(pair) => self.history_for(pair, today, options).await,
            Err(e) => vec![report(&e)],
        }
    }

    async fn history_for(&self, pair: CurrencyPair, today: NaiveDate, options: &HistoryOptions) -> Vec<Message> {
        let mut messages = vec![Message::Heading(format!(
            "Historical Exchange Rates (Last {} Days)",
            HISTORY_WINDOW_DAYS
        ))];

        let series = with_spinner(
            "Fetching historical data...",
            self.rates.get_historical_rates(pair, today),
        )
        .await;

        let series = match series {
            Ok(series) if !series.is_empty() => series,
            Ok(_) => {
                debug!("No historical data returned for {}", pair);
                messages.push(Message::Error("Could not fetch historical data.".to_string()));
                return messages;
            }
            Err(e) => {
                messages.push(report(&e));
                messages.push(Message::Error("Could not fetch historical data.".to_string()));
                return messages;
            }
        };

        messages.push(Message::Text(visualizations::render_history_table(&series)));

        if options.chart {
            let path = visualizations::chart_path(&self.output_dir, &series);
            match visualizations::create_history_chart(&series, &path) {
                Ok(()) => messages.push(Message::Success(format!("Chart saved to {}", path.display()))),
                Err(e) => messages.push(report(&e)),
            }
        }
        if let Some(csv_path) = &options.csv_path {
            match visualizations::export_history_csv(&series, csv_path) {
                Ok(()) => messages.push(Message::Success(format!("CSV file created at: {}", csv_path.display()))),
                Err(e) => messages.push(report(&e)),
            }
        }
        messages
    }

    /// News panel
    pub async fn news(&self, base: CurrencyCode, target: CurrencyCode) -> Vec<Message> {
        let pair = match CurrencyPair::new(base, target) {
            Ok(pair) => pair,
            Err(_) => {
                return vec![Message::Warning(
                    "Please select two different currencies for news.".to_string(),
                )]
            }
        };

        let result = with_spinner(
            "Searching for the latest currency news with AI agent...",
            self.news.fetch_news(pair),
        )
        .await;

        match result {
            Ok(news_report) if !news_report.is_blank() => vec![
                Message::Heading("Latest News Articles".to_string()),
                Message::Text(news_report.text),
            ],
            Ok(news_report) => vec![Message::Warning(format!(
                "No recent news found for {}. Try a different currency pair.",
                news_report.pair
            ))],
            Err(e) => vec![report(&e)],
        }
    }

    /// Interactive shell: reads commands until `quit` or end of input.
    pub async fn run_shell<R, W>(&self, input: R, out: &mut W, today: NaiveDate) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "Currency Converter and News")?;
        writeln!(out, "Get real-time exchange rates and the latest currency news")?;
        writeln!(out, "Type 'help' for commands.")?;

        let mut lines = input.lines();
        loop {
            write!(out, "fx> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            let messages = match parse_shell_command(&line) {
                Ok(ShellCommand::Empty) => continue,
                Ok(ShellCommand::Quit) => break,
                Ok(ShellCommand::Help) => vec![Message::Text(SHELL_HELP.to_string())],
                Ok(ShellCommand::Currencies) => currency_cards(),
                Ok(ShellCommand::Convert { base, target, amount }) => {
                    let options = HistoryOptions { chart: true, csv_path: None };
                    self.convert(base, target, amount, today, Some(&options)).await
                }
                Ok(ShellCommand::History { base, target }) => {
                    let options = HistoryOptions { chart: true, csv_path: None };
                    self.history(base, target, today, &options).await
                }
                Ok(ShellCommand::News { base, target }) => self.news(base, target).await,
                Err(e) => vec![report(&e), Message::Info("Type 'help' for commands.".to_string())],
            };

            for message in &messages {
                writeln!(out, "{}", message.render())?;
            }
        }
        Ok(())
    }
}

/// Flag, country and symbol of every supported currency
pub fn currency_cards() -> Vec<Message> {
    CurrencyCode::ALL
        .iter()
        .map(|c| {
            Message::Text(format!(
                "{}  {} {:<16} Currency Symbol: {}",
                c.code(),
                c.flag(),
                c.country(),
                c.symbol()
            ))
        })
        .collect()
}

const SHELL_HELP: &str = "Commands:
  convert <BASE> <TARGET> [AMOUNT]   convert an amount (default 1.0) and chart the last 10 days
  history <BASE> <TARGET>            chart the last 10 days only
  news <BASE> <TARGET>               latest news for the pair
  currencies                         list supported currencies
  help                               show this help
  quit                               leave the shell";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Empty,
    Help,
    Quit,
    Currencies,
    Convert {
        base: CurrencyCode,
        target: CurrencyCode,
        amount: f64,
    },
    History {
        base: CurrencyCode,
        target: CurrencyCode,
    },
    News {
        base: CurrencyCode,
        target: CurrencyCode,
    },
}

fn parse_codes(args: &[&str], usage: &str) -> Result<(CurrencyCode, CurrencyCode), AppError> {
    match args {
        [base, target, ..] => Ok((base.parse()?, target.parse()?)),
        _ => Err(AppError::validation(format!("Usage: {}", usage))),
    }
}

pub fn parse_shell_command(line: &str) -> Result<ShellCommand, AppError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((command, args)) = words.split_first() else {
        return Ok(ShellCommand::Empty);
    };

    match command.to_ascii_lowercase().as_str() {
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        "currencies" | "list" => Ok(ShellCommand::Currencies),
        "convert" => {
            let usage = "convert <BASE> <TARGET> [AMOUNT]";
            if args.len() > 3 {
                return Err(AppError::validation(format!("Usage: {}", usage)));
            }
            let (base, target) = parse_codes(args, usage)?;
            let amount = match args.get(2) {
                Some(raw) => raw
                    .parse::<f64>()
                    .map_err(|_| AppError::validation(format!("Invalid amount '{}'", raw)))?,
                None => DEFAULT_AMOUNT,
            };
            Ok(ShellCommand::Convert { base, target, amount })
        }
        "history" => {
            let (base, target) = parse_codes(args, "history <BASE> <TARGET>")?;
            Ok(ShellCommand::History { base, target })
        }
        "news" => {
            let (base, target) = parse_codes(args, "news <BASE> <TARGET>")?;
            Ok(ShellCommand::News { base, target })
        }
        other => Err(AppError::validation(format!("Unknown command '{}'", other))),
    }
}

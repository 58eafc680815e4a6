mod prompt;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use inferno_journal::api::{ApiError, HttpJournalApi};
use inferno_journal::config::Config;
use inferno_journal::journal::draft::DEFAULT_TIMEFRAME;
use inferno_journal::journal::{
    ChecklistState, CloseOutcome, DraftEdit, ExitDetails, ExitPrompt, FixedExit, GateStatus,
    JournalController, SubmitError,
};
use inferno_journal::models::{AssetClass, Side, TradeRatings};

use crate::prompt::StdinExitPrompt;

#[derive(Parser, Debug)]
#[command(author, version, about = "Discipline-first trading journal client")]
struct Args {
    /// Journal backend base URL
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<String>,

    /// User whose journal to work with
    #[arg(short, long, env = "JOURNAL_USER_ID")]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// KPI tiles, discipline score and recent equity
    Dashboard {
        /// Analytics window in days
        #[arg(long)]
        period_days: Option<u32>,
    },
    /// Show the pre-trade checklist
    Checklist,
    /// List open trades
    Trades,
    /// Open a new trade (all required checklist items must be checked)
    Open(OpenArgs),
    /// Close an open trade
    Close {
        trade_id: String,
        /// Skip the interactive prompt
        #[arg(long)]
        exit_price: Option<f64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        execution_rating: Option<u8>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        discipline_rating: Option<u8>,
        #[arg(long)]
        learnings: Option<String>,
        /// Also prompt for ratings and learnings
        #[arg(long)]
        rate: bool,
    },
    /// Ask Sentinel for coaching on recent trades
    Sentinel {
        #[arg(long)]
        last_n: Option<u32>,
    },
}

#[derive(clap::Args, Debug)]
struct OpenArgs {
    #[arg(long, default_value = "stock", value_parser = parse_asset_class)]
    asset_class: AssetClass,
    #[arg(long, default_value = "long", value_parser = parse_side)]
    side: Side,
    /// Ticker or pair, e.g. AAPL or EURUSD
    #[arg(long)]
    ticker: String,
    #[arg(long)]
    entry: String,
    #[arg(long)]
    stop: String,
    /// Optional planned target
    #[arg(long, default_value = "")]
    target: String,
    #[arg(long, default_value = DEFAULT_TIMEFRAME)]
    timeframe: String,
    #[arg(long = "tag")]
    tags: Vec<String>,
    #[arg(long, default_value = "")]
    thesis: String,
    #[arg(long, default_value = "")]
    exit_strategy: String,
    /// Checklist item id to mark as done (repeatable)
    #[arg(long = "check")]
    checks: Vec<String>,
}

fn parse_asset_class(s: &str) -> Result<AssetClass, String> {
    AssetClass::from_str_loose(s).ok_or_else(|| format!("unknown asset class: {s}"))
}

fn parse_side(s: &str) -> Result<Side, String> {
    Side::from_str_loose(s).ok_or_else(|| format!("unknown side: {s}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cfg = Config::from_env();
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    if let Some(url) = &args.backend_url {
        cfg = cfg.with_backend_url(url);
    }
    if let Some(user) = &args.user {
        cfg.user_id = user.clone();
    }
    match &args.command {
        Command::Dashboard {
            period_days: Some(days),
        } => cfg.analytics_period_days = *days,
        Command::Sentinel { last_n: Some(n) } => cfg.sentinel_last_n = *n,
        _ => {}
    }

    let api = HttpJournalApi::new(&cfg).context("Failed to build backend client")?;
    let mut journal = JournalController::new(Arc::new(api), &cfg);

    match args.command {
        Command::Dashboard { .. } => dashboard(&mut journal, &cfg).await,
        Command::Checklist => checklist(&mut journal).await,
        Command::Trades => trades(&mut journal).await,
        Command::Open(open) => open_trade(&mut journal, open).await,
        Command::Close {
            trade_id,
            exit_price,
            execution_rating,
            discipline_rating,
            learnings,
            rate,
        } => {
            let prompt: Box<dyn ExitPrompt> = match exit_price {
                Some(price) => {
                    let defaults = TradeRatings::default();
                    Box::new(FixedExit(ExitDetails {
                        exit_price: price,
                        ratings: Some(TradeRatings {
                            execution_rating: execution_rating
                                .unwrap_or(defaults.execution_rating),
                            discipline_rating: discipline_rating
                                .unwrap_or(defaults.discipline_rating),
                            learnings: learnings.unwrap_or(defaults.learnings),
                        }),
                    }))
                }
                None => Box::new(StdinExitPrompt::new(rate)),
            };
            close_trade(&mut journal, &trade_id, prompt.as_ref()).await
        }
        Command::Sentinel { .. } => sentinel(&mut journal).await,
    }
}

async fn dashboard(journal: &mut JournalController, cfg: &Config) -> Result<()> {
    journal
        .refresh_dashboard()
        .await
        .map_err(surface)
        .context("Failed to load analytics")?;
    let dash = journal.dashboard();

    println!("{}", dashboard_heading(cfg.analytics_period_days));
    for tile in dash.tiles() {
        println!("  {:<18} {}", tile.label, tile.value);
    }
    println!("  {:<18} {}", "Discipline band", dash.discipline_band());
    println!("  {:<18} {}", "Equity (R)", dash.equity_summary());
    Ok(())
}

fn dashboard_heading(period_days: u32) -> String {
    format!("Inferno Core: last {} days", period_days)
}

async fn checklist(journal: &mut JournalController) -> Result<()> {
    journal.begin_trade().await;
    print_checklist(journal);
    if let ChecklistState::Failed(reason) = journal.checklist().state() {
        bail!("Checklist unavailable: {}", reason);
    }
    Ok(())
}

fn print_checklist(journal: &JournalController) {
    match journal.checklist().state() {
        ChecklistState::Loaded(cl) if cl.is_empty() => {
            println!("Pre-Trade Checklist: no items defined");
        }
        ChecklistState::Loaded(cl) => {
            println!("Pre-Trade Checklist");
            for item in &cl.items {
                let mark = if journal.form().is_checked(&item.id) { "x" } else { " " };
                let req = if item.required { " (required)" } else { "" };
                println!("  [{}] {:<6} {}{}", mark, item.id, item.label, req);
            }
        }
        ChecklistState::NotLoaded => println!("Pre-Trade Checklist: loading..."),
        ChecklistState::Failed(_) => println!("Pre-Trade Checklist: unavailable"),
    }
}

async fn trades(journal: &mut JournalController) -> Result<()> {
    journal
        .refresh_trades()
        .await
        .map_err(surface)
        .context("Failed to load trades")?;
    println!("Open Trades");
    for line in journal.trades().render() {
        println!("  {}", line);
    }
    Ok(())
}

async fn open_trade(journal: &mut JournalController, open: OpenArgs) -> Result<()> {
    journal.begin_trade().await;

    journal.edit(DraftEdit::AssetClass(open.asset_class));
    journal.edit(DraftEdit::Side(open.side));
    journal.edit(DraftEdit::TickerPair(open.ticker));
    journal.edit(DraftEdit::Entry(open.entry));
    journal.edit(DraftEdit::PlannedStop(open.stop));
    journal.edit(DraftEdit::PlannedTarget(open.target));
    journal.edit(DraftEdit::Timeframe(open.timeframe));
    journal.edit(DraftEdit::Thesis(open.thesis));
    journal.edit(DraftEdit::ExitStrategy(open.exit_strategy));
    for tag in open.tags {
        journal.edit(DraftEdit::AddTag(tag));
    }
    for id in &open.checks {
        journal.toggle(id, true);
    }

    print_checklist(journal);
    let gate = journal.gate();
    if !gate.is_open() {
        if let Some(hint) = gate.hint() {
            println!("{}", hint);
        }
        if let GateStatus::Blocked { missing } = &gate {
            bail!("Unchecked required items: {}", missing.join(", "));
        }
        bail!("Trade not submitted");
    }

    match journal.submit_trade().await {
        Ok(trade) => {
            println!(
                "Opened {} {} {} @ {} (stop {}) [{}]",
                trade.asset_class.as_str().to_uppercase(),
                trade.ticker_pair,
                trade.side.as_str().to_uppercase(),
                trade.entry,
                trade.planned_stop,
                trade.id
            );
            Ok(())
        }
        Err(SubmitError::Api(e)) => Err(surface(e)).context("Trade not opened"),
        Err(e) => Err(e).context("Trade not opened"),
    }
}

async fn close_trade(
    journal: &mut JournalController,
    trade_id: &str,
    prompt: &dyn ExitPrompt,
) -> Result<()> {
    journal
        .refresh_trades()
        .await
        .map_err(surface)
        .context("Failed to load trades")?;

    match journal.close_trade(trade_id, prompt).await? {
        CloseOutcome::Closed(trade) => {
            println!(
                "Closed {} {} at {}",
                trade.ticker_pair,
                trade.id,
                trade.exit_price.map(|p| p.to_string()).unwrap_or_else(|| "?".into())
            );
            for line in journal.trades().render() {
                println!("  {}", line);
            }
        }
        CloseOutcome::Cancelled => println!("Close cancelled."),
    }
    Ok(())
}

async fn sentinel(journal: &mut JournalController) -> Result<()> {
    println!("Analyzing...");
    journal
        .run_sentinel()
        .await
        .map_err(surface)
        .context("Sentinel analysis failed")?;
    println!("Sentinel Core");
    for line in journal.sentinel().render() {
        println!("{}", line);
    }
    Ok(())
}

/// Print the backend's own explanation before the error propagates.
fn surface(e: ApiError) -> anyhow::Error {
    if let ApiError::Validation { payload, .. } = &e {
        println!("Checklist/Validation: {}", payload);
    }
    anyhow::Error::new(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_outside_one_to_five_are_refused() {
        let parsed = Args::try_parse_from([
            "inferno-journal",
            "close",
            "t1",
            "--exit-price",
            "101",
            "--execution-rating",
            "9",
        ]);
        assert!(parsed.is_err());

        let parsed = Args::try_parse_from([
            "inferno-journal",
            "close",
            "t1",
            "--exit-price",
            "101",
            "--discipline-rating",
            "5",
        ])
        .unwrap();
        match parsed.command {
            Command::Close {
                discipline_rating, ..
            } => assert_eq!(discipline_rating, Some(5)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn dashboard_heading_is_plain_text() {
        assert_eq!(dashboard_heading(30), "Inferno Core: last 30 days");
    }
}

//! timeslot: manage the weekly time-slot rules file from the command line.
//!
//! Every mutating subcommand opens a [`Session`] over the rules file, runs
//! the same editor transition an interactive caller would, and writes the
//! published collection back. `watch` keeps an editor alive and hot-reloads
//! the file whenever it changes on disk.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, Timelike};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{info, warn};

use timeslot_core::config::{self, Config};
use timeslot_rules::form::{FieldPatch, HourDomain, RowFields};
use timeslot_rules::loader::SnapshotFile;
use timeslot_rules::lookup::active_rule;
use timeslot_rules::{EditorEvent, Rule, RuleEditor, Session, Weekday};

// ── CLI ─────────────────────────────────────────────────────────────

/// Weekly time-slot rules: list, edit and audit the saved collection.
#[derive(Parser, Debug)]
#[command(name = "timeslot", version, about)]
struct Cli {
    /// Rules file (overrides the configured RULES_FILE).
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the saved rules in order.
    List,
    /// Append a rule and save it.
    Add {
        /// Comma-separated day tokens, e.g. `Mon,Wed`.
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
        #[arg(long, default_value = "1")]
        interval: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Change fields of the rule with the given serial and save it.
    Edit {
        serial: u32,
        #[arg(long, value_delimiter = ',')]
        days: Option<Vec<String>>,
        #[arg(long)]
        interval: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Remove the rule with the given serial.
    Delete { serial: u32 },
    /// Report malformed and overlapping rules; exits non-zero if any.
    Check,
    /// Show the rule in force at a weekday and hour (default: now).
    At {
        #[arg(long)]
        day: Option<Weekday>,
        #[arg(long)]
        hour: Option<u8>,
    },
    /// Keep the collection loaded and reload it whenever the file changes.
    Watch,
    /// Show the effective configuration.
    Config,
}

// ── Output ──────────────────────────────────────────────────────────

fn print_rules(rules: &[Rule], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rules)?);
    } else if rules.is_empty() {
        println!("No rules.");
    } else {
        for rule in rules {
            println!("{rule}");
        }
    }
    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────

fn open(file: SnapshotFile) -> Result<Session> {
    let path = file.path().display().to_string();
    Session::open(file).with_context(|| format!("failed to load {path}"))
}

fn cmd_check(session: &Session, json: bool) -> Result<()> {
    let report = session.audit();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for rule in &report.malformed {
            println!("malformed: {rule}");
        }
        for c in &report.conflicts {
            let days: Vec<&str> = c.days.iter().map(|d| d.token()).collect();
            println!(
                "overlap: #{} and #{} on [{}] share {} hours",
                c.first,
                c.second,
                days.join(","),
                c.shared_hours
            );
        }
    }

    if !report.is_clean() {
        bail!(
            "{} problem(s) found in {}",
            report.problem_count(),
            session.file().path().display()
        );
    }
    if !json {
        println!("{} rules, no problems.", session.rules().len());
    }
    Ok(())
}

fn cmd_at(session: &Session, day: Option<Weekday>, hour: Option<u8>, json: bool) -> Result<()> {
    let now = Local::now().naive_local();
    let day = day.unwrap_or_else(|| Weekday::from(now.weekday()));
    let hour = hour.unwrap_or(now.hour() as u8);

    let rules = session.rules();
    let rule = active_rule(&rules, day, hour);

    if json {
        println!("{}", serde_json::to_string_pretty(&rule)?);
    } else {
        match rule {
            Some(rule) => println!("{day} {hour:02}h: {rule}"),
            None => println!("{day} {hour:02}h: no rule"),
        }
    }
    Ok(())
}

async fn cmd_watch(mut file: SnapshotFile, poll: Duration) -> Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel();

    let mut editor = RuleEditor::new(evt_tx);
    editor.apply(file.load().context("failed to load rules")?);

    file.watch(cmd_tx, poll)
        .with_context(|| format!("failed to watch {}", file.path().display()))?;
    let handle = tokio::spawn(timeslot_rules::editor::run(editor, cmd_rx));

    loop {
        tokio::select! {
            event = evt_rx.recv() => match event {
                Some(EditorEvent::CollectionEmpty) => warn!("rules file is empty, no time slots configured"),
                Some(event) => info!(topic = event.topic(), "editor event"),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, stopping watch");
                break;
            }
        }
    }

    handle.abort();
    Ok(())
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    config::load_dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(file) = cli.file {
        config.rules.file = file;
    }
    config.validate().context("invalid configuration")?;
    config.log_summary();

    let domain = HourDomain::from(config.hours);
    let file = SnapshotFile::new(config.rules.file.clone());

    match cli.command {
        Command::List => print_rules(&open(file)?.rules(), cli.json),
        Command::Add {
            days,
            interval,
            from,
            to,
        } => {
            let fields = RowFields { interval, days, from, to };
            let rules = open(file)?.add(&fields, &domain)?;
            print_rules(&rules, cli.json)
        }
        Command::Edit {
            serial,
            days,
            interval,
            from,
            to,
        } => {
            let patch = FieldPatch { interval, days, from, to };
            if patch.is_empty() {
                bail!("nothing to change: pass at least one of --days, --interval, --from, --to");
            }
            let rules = open(file)?.edit(serial, patch, &domain)?;
            print_rules(&rules, cli.json)
        }
        Command::Delete { serial } => {
            let rules = open(file)?.delete(serial)?;
            print_rules(&rules, cli.json)
        }
        Command::Check => cmd_check(&open(file)?, cli.json),
        Command::At { day, hour } => cmd_at(&open(file)?, day, hour, cli.json),
        Command::Watch => {
            cmd_watch(file, Duration::from_millis(config.rules.watch_poll_ms)).await
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config.summary())?);
            Ok(())
        }
    }
}

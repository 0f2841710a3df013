//! # Powercalc CLI
//!
//! Terminal front end for the calculation engine.
//!
//! ## Commands
//!
//! - `list`: show every calculation domain
//! - `schema <domain>`: show a domain's input fields
//! - `compute <domain> -s name=value ...`: validate and compute once
//! - `interactive <domain>`: prompt for each field, compute, repeat
//! - `settings`: print the effective assumptions as TOML
//!
//! Logging goes to stderr and is filtered by `POWERCALC_LOG`
//! (e.g. `POWERCALC_LOG=powercalc_core=debug`).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use powercalc_core::schema::{FieldDefault, FieldSpec};
use powercalc_core::settings::load_assumptions;
use powercalc_core::{Assumptions, ComputeOutcome, Engine, MetricValue, Outcome, RawInputs, RawValue};

#[derive(Parser)]
#[command(name = "powercalc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Engineering calculators for power, water and fabrication services", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Assumptions file (TOML) overriding the built-in defaults
    #[arg(long, global = true, env = "POWERCALC_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List calculation domains
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the input fields of a domain
    Schema {
        /// Domain id, e.g. solar-sizing
        domain: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate inputs and compute a domain once
    Compute {
        /// Domain id, e.g. solar-sizing
        domain: String,

        /// Field value as name=value (repeatable)
        #[arg(short = 's', long = "set", value_parser = parse_assignment)]
        values: Vec<(String, String)>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Prompt for each field and compute until told to stop
    Interactive {
        /// Domain id, e.g. solar-sizing
        domain: String,
    },

    /// Print the effective assumptions as TOML
    Settings,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let env_filter = EnvFilter::try_from_env("POWERCALC_LOG").unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let assumptions = match &cli.settings {
        Some(path) => {
            debug!("Loading assumptions from {}", path.display());
            load_assumptions(path).with_context(|| format!("Failed to load settings from {}", path.display()))?
        }
        None => Assumptions::default(),
    };
    let engine = Engine::with_assumptions(assumptions).context("Invalid assumptions")?;

    match cli.command {
        Commands::List { json } => cmd_list(&engine, json),
        Commands::Schema { domain, json } => cmd_schema(&engine, &domain, json),
        Commands::Compute { domain, values, json } => cmd_compute(&engine, &domain, values, json),
        Commands::Interactive { domain } => cmd_interactive(&engine, &domain),
        Commands::Settings => cmd_settings(&engine),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_list(engine: &Engine, json: bool) -> Result<()> {
    let domains = engine.list_domains();
    if json {
        println!("{}", serde_json::to_string_pretty(&domains)?);
        return Ok(());
    }

    let width = domains.iter().map(|d| d.id.len()).max().unwrap_or(0);
    for domain in &domains {
        println!("{:<width$}  {}", domain.id, domain.label, width = width);
    }
    Ok(())
}

fn cmd_schema(engine: &Engine, domain: &str, json: bool) -> Result<()> {
    let fields = engine.input_schema(domain)?;
    if json {
        println!("{}", serde_json::to_string_pretty(fields)?);
        return Ok(());
    }

    println!("{:<20} {:<36} {:<18} {:<10} NOTES", "NAME", "LABEL", "BOUNDS", "DEFAULT");
    for field in fields {
        println!(
            "{:<20} {:<36} {:<18} {:<10} {}",
            field.name,
            field.display_label(),
            describe_bounds(field),
            describe_default(field),
            describe_notes(field)
        );
    }
    Ok(())
}

fn cmd_compute(engine: &Engine, domain: &str, values: Vec<(String, String)>, json: bool) -> Result<()> {
    let raw: RawInputs = values
        .into_iter()
        .map(|(name, value)| (name, RawValue::from(value)))
        .collect();

    let outcome = engine.compute(domain, &raw)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome {
        ComputeOutcome::Computed { result } => {
            if !json {
                print_outcome(&result);
            }
            Ok(())
        }
        ComputeOutcome::Rejected { errors } => {
            if !json {
                for (field, message) in &errors {
                    eprintln!("  {}: {}", field, message);
                }
            }
            bail!("{} field(s) rejected for {}", errors.len(), domain)
        }
    }
}

fn cmd_interactive(engine: &Engine, domain: &str) -> Result<()> {
    let fields = engine.input_schema(domain)?.to_vec();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{} - leave an optional field blank to use its default", domain);
    loop {
        let mut raw = RawInputs::new();
        for field in &fields {
            print!("{}: ", prompt_for(field));
            io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                return print_history(engine);
            };
            let line = line.trim();
            if !line.is_empty() {
                raw.insert(field.name.clone(), RawValue::from(line));
            }
        }

        match engine.compute(domain, &raw)? {
            ComputeOutcome::Computed { result } => print_outcome(&result),
            ComputeOutcome::Rejected { errors } => {
                for (field, message) in &errors {
                    println!("  {}: {}", field, message);
                }
            }
        }

        print!("Another calculation? [y/N]: ");
        io::stdout().flush()?;
        let again = lines.next().transpose()?.unwrap_or_default();
        if !again.trim().eq_ignore_ascii_case("y") {
            break;
        }
    }

    print_history(engine)
}

fn cmd_settings(engine: &Engine) -> Result<()> {
    print!("{}", engine.assumptions().to_toml_string()?);
    Ok(())
}

// ============================================================================
// Formatting
// ============================================================================

fn parse_assignment(text: &str) -> Result<(String, String), String> {
    match text.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.trim().to_string())),
        _ => Err(format!("expected name=value, got '{}'", text)),
    }
}

fn format_value(value: &MetricValue) -> String {
    match value {
        MetricValue::Number(n) if n.is_infinite() => "Infinity".to_string(),
        MetricValue::Number(n) if n.fract() == 0.0 => format!("{:.0}", n),
        MetricValue::Number(n) if n.abs() >= 100.0 => format!("{:.2}", n),
        MetricValue::Number(n) => format!("{:.4}", n),
        MetricValue::Text(s) => s.clone(),
    }
}

fn print_outcome(outcome: &Outcome) {
    let width = outcome.labels().map(str::len).max().unwrap_or(0);
    for metric in outcome.metrics() {
        println!("  {:<width$}  {}", metric.label, format_value(&metric.value), width = width);
    }
}

fn print_history(engine: &Engine) -> Result<()> {
    let history = engine.history(usize::MAX);
    if history.is_empty() {
        return Ok(());
    }
    println!();
    println!("Session history (newest first):");
    for entry in history {
        let summary = entry
            .outputs
            .metrics()
            .first()
            .map(|m| format!("{} = {}", m.label, format_value(&m.value)))
            .unwrap_or_default();
        println!("  {}  {}  {}", entry.timestamp.format("%H:%M:%S"), entry.domain_id, summary);
    }
    Ok(())
}

fn prompt_for(field: &FieldSpec) -> String {
    let mut prompt = field.display_label();
    if field.is_choice() {
        prompt.push_str(&format!(" [{}]", field.options().join("/")));
    }
    match (&field.default, &field.placeholder) {
        (Some(default), _) if !field.required => prompt.push_str(&format!(" (default {})", default_text(default))),
        (_, Some(hint)) => prompt.push_str(&format!(" (e.g. {})", hint)),
        _ => {}
    }
    if field.required {
        prompt.push_str(" *");
    }
    prompt
}

fn default_text(default: &FieldDefault) -> String {
    match default {
        FieldDefault::Number(n) => n.to_string(),
        FieldDefault::Choice(s) => s.clone(),
    }
}

fn describe_bounds(field: &FieldSpec) -> String {
    match (field.min, field.max) {
        (Some(min), Some(max)) => format!("{} .. {}", min, max),
        (Some(min), None) => format!(">= {}", min),
        (None, Some(max)) => format!("<= {}", max),
        (None, None) => "-".to_string(),
    }
}

fn describe_default(field: &FieldSpec) -> String {
    field.default.as_ref().map(default_text).unwrap_or_else(|| "-".to_string())
}

fn describe_notes(field: &FieldSpec) -> String {
    let mut notes = Vec::new();
    if field.required {
        notes.push("required".to_string());
    }
    if field.is_choice() {
        notes.push(format!("one of {}", field.options().join(", ")));
    }
    notes.join("; ")
}

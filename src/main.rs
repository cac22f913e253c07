use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lead_qualification::{process_leads, report, LeadFilter, LeadTable, RankedTable, ScoringConfig};

#[derive(Parser)]
#[command(name = "lead-qualification")]
#[command(about = "Enrich, score and rank life-science sales leads", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ViewArgs {
    /// Raw lead table
    #[arg(long, default_value = "data/leads_raw.csv")]
    input: PathBuf,
    /// Scoring config (TOML); stock weights when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Keep leads scoring at least this much
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=100))]
    min_score: u32,
    /// Case-insensitive text matched against every column
    #[arg(long)]
    search: Option<String>,
}

impl ViewArgs {
    fn filter(&self) -> LeadFilter {
        LeadFilter::new(self.min_score, self.search.as_deref())
    }

    fn label(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.min_score > 0 {
            parts.push(format!("min score {}", self.min_score));
        }
        if let Some(search) = self.search.as_deref().filter(|search| !search.is_empty()) {
            parts.push(format!("search '{search}'"));
        }
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ranked lead list
    Score {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long, default_value_t = 25)]
        limit: usize,
        /// Emit JSON instead of a text listing
        #[arg(long)]
        json: bool,
    },
    /// Write the filtered ranked list as CSV
    Export {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long, default_value = "qualified_leads.csv")]
        out: PathBuf,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Print the stock scoring config as TOML
    Config,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ScoringConfig> {
    match path {
        Some(path) => ScoringConfig::load(path)
            .with_context(|| format!("failed to load scoring config {}", path.display())),
        None => Ok(ScoringConfig::default()),
    }
}

fn run_pipeline(view: &ViewArgs) -> anyhow::Result<(RankedTable, ScoringConfig)> {
    let config = load_config(view.config.as_deref())?;
    let table = LeadTable::from_path(&view.input)
        .with_context(|| format!("failed to read leads from {}", view.input.display()))?;
    let ranked = process_leads(&table, &config);
    Ok((ranked, config))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lead_qualification=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { view, limit, json } => {
            let (ranked, _) = run_pipeline(&view)?;
            let filtered = view.filter().apply(&ranked);
            info!(total = ranked.len(), shown = filtered.len(), "filtered leads");

            if json {
                let leads: Vec<_> = filtered.leads.iter().take(limit).collect();
                println!("{}", serde_json::to_string_pretty(&leads)?);
                return Ok(());
            }

            if filtered.is_empty() {
                println!("No leads match this view.");
                return Ok(());
            }

            println!("Ranked leads ({} of {}):", filtered.len(), ranked.len());
            for lead in filtered.leads.iter().take(limit) {
                let enriched = &lead.lead;
                let raw = &enriched.raw;
                println!(
                    "{:>3}. [{:>3}] {} | {} | {} | {} (HQ {}) | remote {} | {} | {}",
                    lead.rank,
                    lead.probability_score,
                    raw.name,
                    raw.title,
                    raw.company,
                    raw.person_location,
                    raw.company_hq,
                    enriched.is_remote,
                    if enriched.email.is_empty() { "-" } else { enriched.email.as_str() },
                    raw.source
                );
            }
        }
        Commands::Export { view, out } => {
            let (ranked, _) = run_pipeline(&view)?;
            let filtered = view.filter().apply(&ranked);
            filtered
                .write_csv_path(&out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Exported {} leads to {}.", filtered.len(), out.display());
        }
        Commands::Report { view, out } => {
            let (ranked, config) = run_pipeline(&view)?;
            let filtered = view.filter().apply(&ranked);
            let label = view.label();
            let report = report::build_report(
                &filtered,
                &config,
                label.as_deref(),
                Utc::now().date_naive(),
            );
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Config => {
            print!("{}", ScoringConfig::default().to_toml_string()?);
        }
    }

    Ok(())
}
